//! Font file tests
//!
//! Builds a small in-memory TrueType font shaped like the Selectric font
//! (the letters and quote marks the accent builds use) and exercises loading
//! and saving against it.


use crate::font_source::cmap_table::{assemble_cmap, split_cmap, RawSubtable};
use write_fonts::tables::cmap::Cmap;
use write_fonts::tables::glyf::{
    Anchor, Bbox, Component, ComponentFlags, CompositeGlyph, Contour, GlyfLocaBuilder,
    Glyph, SimpleGlyph, Transform,
};
use write_fonts::read::tables::glyf::CurvePoint;
use write_fonts::tables::head::Head;
use write_fonts::tables::hhea::Hhea;
use write_fonts::tables::hmtx::{Hmtx, LongMetric};
use write_fonts::tables::loca::LocaFormat;
use write_fonts::tables::maxp::Maxp;
use write_fonts::tables::post::Post;
use write_fonts::types::{FWord, GlyphId, GlyphId16, Tag, UfWord};
use write_fonts::FontBuilder;

/// Hinting program attached to `e`
pub(crate) const E_INSTRUCTIONS: [u8; 3] = [0xB0, 0x01, 0x2B];
/// A passthrough table the editor never looks at
pub(crate) const FPGM_DATA: [u8; 4] = [0xB0, 0x00, 0x2C, 0x2D];

fn rect(x0: i16, y0: i16, x1: i16, y1: i16) -> Vec<CurvePoint> {
    vec![
        CurvePoint::on_curve(x0, y0),
        CurvePoint::on_curve(x0, y1),
        CurvePoint::on_curve(x1, y1),
        CurvePoint::on_curve(x1, y0),
    ]
}

fn simple(contours: Vec<Vec<CurvePoint>>, instructions: &[u8]) -> Glyph {
    let mut glyph = SimpleGlyph {
        bbox: Bbox::default(),
        contours: contours.into_iter().map(Contour::from).collect(),
        instructions: instructions.to_vec(),
    };
    glyph.recompute_bounding_box();
    Glyph::Simple(glyph)
}

/// A comma-like mark between y=400 and y=500 with one off-curve point
fn quote_mark() -> Vec<CurvePoint> {
    vec![
        CurvePoint::on_curve(40, 400),
        CurvePoint::on_curve(20, 420),
        CurvePoint::off_curve(100, 440),
        CurvePoint::on_curve(100, 500),
        CurvePoint::on_curve(40, 500),
    ]
}

fn offset_component(gid: u16, x: i16, y: i16) -> Component {
    Component::new(
        GlyphId16::new(gid),
        Anchor::Offset { x, y },
        Transform::default(),
        ComponentFlags::default(),
    )
}

/// Glyph order of [`selectric_test_font`]
pub(crate) const GLYPH_ORDER: [&str; 10] = [
    ".notdef",
    "space",
    "e",
    "E",
    "a",
    "A",
    "quoteright",
    "quoteleft",
    "numbersign",
    "quotedblright",
];

/// Mac Roman format 6 subtable mapping `a` to glyph 4 and `e` to glyph 2
pub(crate) const MAC_ROMAN_SUBTABLE: [u8; 20] = [
    0, 6, 0, 20, 0, 0, 0, 0x61, 0, 5, 0, 4, 0, 0, 0, 0, 0, 0, 0, 2,
];
/// Empty format 14 (variation selector) subtable
pub(crate) const VARIATION_SUBTABLE: [u8; 10] = [0, 14, 0, 0, 0, 10, 0, 0, 0, 0];

fn unicode_cmap() -> Vec<u8> {
    let cmap = Cmap::from_mappings([
        (' ', GlyphId::new(1)),
        ('e', GlyphId::new(2)),
        ('E', GlyphId::new(3)),
        ('a', GlyphId::new(4)),
        ('A', GlyphId::new(5)),
        ('\u{2019}', GlyphId::new(6)),
        ('\u{2018}', GlyphId::new(7)),
        ('#', GlyphId::new(8)),
        ('\u{201D}', GlyphId::new(9)),
    ])
    .unwrap();
    write_fonts::dump_table(&cmap).unwrap()
}

/// Build the test font
///
/// `e` is the 500×500 box used throughout the accent tests; `quotedblright`
/// is a composite of two `quoteright` components.
pub(crate) fn selectric_test_font() -> Vec<u8> {
    let post = Post::new_v2(GLYPH_ORDER);
    build_test_font(unicode_cmap(), write_fonts::dump_table(&post).unwrap())
}

/// The test font with a Mac Roman and a variation selector subtable next to
/// the Unicode maps
pub(crate) fn legacy_cmap_test_font() -> Vec<u8> {
    let mut subtables = split_cmap(&unicode_cmap()).unwrap();
    subtables.push(RawSubtable::new(1, 0, MAC_ROMAN_SUBTABLE.to_vec()));
    subtables.push(RawSubtable::new(0, 5, VARIATION_SUBTABLE.to_vec()));
    let post = Post::new_v2(GLYPH_ORDER);
    build_test_font(
        assemble_cmap(subtables).unwrap(),
        write_fonts::dump_table(&post).unwrap(),
    )
}

/// The test font with a version 3 `post` table, which stores no glyph names
pub(crate) fn unnamed_test_font() -> Vec<u8> {
    let mut post = vec![0, 3, 0, 0];
    post.resize(32, 0);
    build_test_font(unicode_cmap(), post)
}

fn build_test_font(cmap: Vec<u8>, post: Vec<u8>) -> Vec<u8> {
    let quoteright_gid = 6;
    let mut quotedblright = CompositeGlyph::new(
        offset_component(quoteright_gid, 0, 0),
        Bbox {
            x_min: 20,
            y_min: 400,
            x_max: 250,
            y_max: 500,
        },
    );
    quotedblright.add_component(
        offset_component(quoteright_gid, 150, 0),
        Bbox {
            x_min: 20,
            y_min: 400,
            x_max: 250,
            y_max: 500,
        },
    );

    // (glyph, advance, lsb)
    let glyphs: Vec<(Glyph, u16, i16)> = vec![
        (Glyph::Empty, 500, 0),
        (Glyph::Empty, 250, 0),
        (simple(vec![rect(0, 0, 500, 500)], &E_INSTRUCTIONS), 600, 0),
        (simple(vec![rect(0, 0, 500, 700)], &[]), 600, 0),
        (
            simple(vec![rect(0, 0, 450, 450), rect(100, 100, 350, 350)], &[]),
            550,
            0,
        ),
        (simple(vec![rect(0, 0, 600, 700)], &[]), 650, 0),
        (simple(vec![quote_mark()], &[]), 200, 20),
        (simple(vec![quote_mark()], &[]), 200, 20),
        (
            simple(vec![rect(50, 0, 550, 700), rect(150, 100, 450, 600)], &[]),
            600,
            50,
        ),
        (Glyph::Composite(quotedblright), 350, 20),
    ];

    let mut glyf_builder = GlyfLocaBuilder::new();
    for (glyph, _, _) in &glyphs {
        glyf_builder.add_glyph(glyph).unwrap();
    }
    let (glyf, loca, loca_format) = glyf_builder.build();

    let hmtx = Hmtx {
        h_metrics: glyphs
            .iter()
            .map(|(_, advance, lsb)| LongMetric {
                advance: *advance,
                side_bearing: *lsb,
            })
            .collect(),
        left_side_bearings: Vec::new(),
    };
    let hhea = Hhea {
        ascender: FWord::new(800),
        descender: FWord::new(-200),
        line_gap: FWord::new(0),
        advance_width_max: UfWord::new(650),
        min_left_side_bearing: FWord::new(0),
        min_right_side_bearing: FWord::new(0),
        x_max_extent: FWord::new(600),
        caret_slope_rise: 1,
        caret_slope_run: 0,
        caret_offset: 0,
        number_of_h_metrics: glyphs.len() as u16,
    };
    let maxp = Maxp {
        num_glyphs: glyphs.len() as u16,
        max_points: Some(8),
        max_contours: Some(2),
        max_composite_points: Some(10),
        max_composite_contours: Some(2),
        max_zones: Some(2),
        max_twilight_points: Some(0),
        max_storage: Some(0),
        max_function_defs: Some(0),
        max_instruction_defs: Some(0),
        max_stack_elements: Some(16),
        max_size_of_instructions: Some(3),
        max_component_elements: Some(2),
        max_component_depth: Some(1),
    };
    let head = Head {
        units_per_em: 1000,
        x_min: 0,
        y_min: 0,
        x_max: 600,
        y_max: 700,
        index_to_loc_format: if loca_format == LocaFormat::Long { 1 } else { 0 },
        ..Default::default()
    };

    let mut builder = FontBuilder::new();
    builder.add_table(&head).unwrap();
    builder.add_table(&hhea).unwrap();
    builder.add_table(&maxp).unwrap();
    builder.add_table(&hmtx).unwrap();
    builder.add_table(&glyf).unwrap();
    builder.add_table(&loca).unwrap();
    builder.add_raw(Tag::new(b"cmap"), cmap);
    builder.add_raw(Tag::new(b"post"), post);
    builder.add_raw(Tag::new(b"fpgm"), FPGM_DATA.to_vec());
    builder.add_raw(Tag::new(b"hdmx"), vec![0, 0, 0, 0, 0, 0, 0, 0]);
    builder.add_raw(Tag::new(b"DSIG"), vec![0, 0, 0, 1, 0, 0, 0, 0]);
    builder.build()
}
