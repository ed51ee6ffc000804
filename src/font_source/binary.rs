//! Reading and writing TrueType font files
//!
//! Loading decodes the tables glyph editing touches (`glyf`, `loca`, `hmtx`,
//! `cmap`, `post`, `maxp`) into [`FontData`]. Saving compiles them back and
//! copies every other table through unchanged, patching the summary values
//! in `head`, `hhea`, and `maxp`.

use crate::core::errors::EditError;
use crate::font_source::charmap::CharacterMap;
use crate::font_source::cmap_table::{assemble_cmap, split_cmap, RawSubtable};
use crate::font_source::data::{
    ComponentAnchor, ComponentRef, CompositeData, FontData, GlyphData,
};
use crate::font_source::glyph_names::assign_glyph_names;
use crate::font_source::metrics::{
    number_of_long_metrics, FontMetrics, GlyphMeasure, HorizontalMetric,
};
use crate::font_source::outline::{Outline, PointFlags};
use crate::geometry::utilities::ot_round;
use kurbo::{Affine, Point, Vec2};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info, warn};
use write_fonts::from_obj::ToOwnedTable;
use write_fonts::read::tables::cmap::CmapSubtable;
use write_fonts::read::tables::glyf::{
    Anchor, CompositeGlyph as ReadComposite, CompositeGlyphFlags, CurvePoint, Glyph as ReadGlyph,
    SimpleGlyph as ReadSimple,
};
use write_fonts::read::tables::post::Post as ReadPost;
use write_fonts::read::{FontData as ReadFontData, FontRead, FontRef, TableProvider};
use write_fonts::tables::cmap::Cmap;
use write_fonts::tables::glyf::{Bbox, Contour, GlyfLocaBuilder, Glyph, SimpleGlyph};
use write_fonts::tables::hhea::Hhea;
use write_fonts::tables::hmtx::{Hmtx, LongMetric};
use write_fonts::tables::loca::LocaFormat;
use write_fonts::tables::post::Post;
use write_fonts::types::{FWord, GlyphId, GlyphId16, Tag, UfWord, Version16Dot16};
use write_fonts::FontBuilder;

const HEAD: Tag = Tag::new(b"head");
const HHEA: Tag = Tag::new(b"hhea");
const MAXP: Tag = Tag::new(b"maxp");
const GLYF: Tag = Tag::new(b"glyf");
const LOCA: Tag = Tag::new(b"loca");
const HMTX: Tag = Tag::new(b"hmtx");
const CMAP: Tag = Tag::new(b"cmap");
const POST: Tag = Tag::new(b"post");
const GVAR: Tag = Tag::new(b"gvar");
const CFF: Tag = Tag::new(b"CFF ");
const CFF2: Tag = Tag::new(b"CFF2");
const DSIG: Tag = Tag::new(b"DSIG");

/// Tables indexed by glyph id that we cannot rebuild for a new glyph count
const PER_GLYPH_TABLES: [Tag; 4] = [
    Tag::new(b"hdmx"),
    Tag::new(b"LTSH"),
    Tag::new(b"vhea"),
    Tag::new(b"vmtx"),
];

/// Tables that are regenerated from [`FontData`] on save
const REBUILT_TABLES: [Tag; 8] = [HEAD, HHEA, MAXP, GLYF, LOCA, HMTX, CMAP, POST];

const CHECKSUM_MAGIC: u32 = 0xB1B0_AFBA;

// byte offsets into the fixed-layout tables we patch in place
const HEAD_CHECKSUM_ADJUSTMENT: usize = 8;
const HEAD_BBOX: usize = 36;
const HEAD_INDEX_TO_LOC_FORMAT: usize = 50;
const HEAD_MIN_LEN: usize = 54;
const MAXP_NUM_GLYPHS: usize = 4;
const MAXP_MAX_POINTS: usize = 6;
const MAXP_MAX_CONTOURS: usize = 8;
const MAXP_V1_MIN_LEN: usize = 32;

/// A font file together with its decoded, editable contents
#[derive(Debug, Clone)]
pub struct FontFile {
    source: Vec<u8>,
    data: FontData,
}

impl FontFile {
    /// Read and decode the font at `path`
    pub fn open(path: impl AsRef<Path>) -> Result<Self, EditError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| EditError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let font = Self::from_bytes(bytes)?;
        info!(
            "Loaded {} with {} glyphs",
            path.display(),
            font.data.glyph_order().len()
        );
        Ok(font)
    }

    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, EditError> {
        let data = decode(&bytes)?;
        Ok(Self {
            source: bytes,
            data,
        })
    }

    pub fn data(&self) -> &FontData {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut FontData {
        &mut self.data
    }

    /// Compile the current contents into a complete font file
    pub fn to_bytes(&self) -> Result<Vec<u8>, EditError> {
        encode(&self.source, &self.data)
    }

    /// Compile and write the font to `path`, replacing any existing file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), EditError> {
        let path = path.as_ref();
        let bytes = self.to_bytes()?;
        std::fs::write(path, &bytes).map_err(|source| EditError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        info!("Wrote {} bytes to {}", bytes.len(), path.display());
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// loading

fn decode(bytes: &[u8]) -> Result<FontData, EditError> {
    let font = FontRef::new(bytes)?;

    if font.table_data(CFF).is_some() || font.table_data(CFF2).is_some() {
        return Err(EditError::Unsupported(
            "CFF outlines; only TrueType (glyf) fonts can be edited".to_string(),
        ));
    }
    if font.table_data(GVAR).is_some() {
        return Err(EditError::Unsupported(
            "variable font (gvar); edited glyphs would lose their variations".to_string(),
        ));
    }

    let num_glyphs = font.maxp()?.num_glyphs() as usize;
    let unicode_maps = read_unicode_maps(&font)?;
    let mut lowest_codepoints: BTreeMap<u32, u32> = BTreeMap::new();
    for (_, mappings) in &unicode_maps {
        for &(codepoint, gid) in mappings {
            lowest_codepoints
                .entry(gid)
                .and_modify(|lowest| *lowest = (*lowest).min(codepoint))
                .or_insert(codepoint);
        }
    }
    let names = assign_glyph_names(post_names(&font, num_glyphs), &lowest_codepoints);

    let loca = font.loca(None)?;
    let glyf = font.glyf()?;
    let hmtx = font.hmtx()?;

    let mut data = FontData::new();
    for (index, name) in names.iter().enumerate() {
        let gid = GlyphId::from(index as u16);
        let glyph = match loca.get_glyf(gid, &glyf)? {
            None => GlyphData::Empty,
            Some(ReadGlyph::Simple(simple)) => GlyphData::Simple(read_simple(&simple)?),
            Some(ReadGlyph::Composite(composite)) => {
                GlyphData::Composite(read_composite(&composite, &names)?)
            }
        };
        let metric = HorizontalMetric::new(
            hmtx.advance(gid).unwrap_or(0),
            hmtx.side_bearing(gid).unwrap_or(0),
        );
        data.insert_glyph(name, glyph, metric);
    }
    data.update_glyph_count();

    for (mut charmap, mappings) in unicode_maps {
        for (codepoint, gid) in mappings {
            let name = names
                .get(gid as usize)
                .ok_or(EditError::GlyphIdOutOfRange(gid))?;
            charmap.insert(codepoint, name.as_str());
        }
        debug!(
            "Read cmap subtable ({}, {}) with {} mappings",
            charmap.platform_id,
            charmap.encoding_id,
            charmap.len()
        );
        data.add_charmap(charmap);
    }

    Ok(data)
}

/// The editable Unicode subtables, each as an empty map plus its
/// (codepoint, glyph id) pairs
fn read_unicode_maps(font: &FontRef) -> Result<Vec<(CharacterMap, Vec<(u32, u32)>)>, EditError> {
    let Some(table) = font.table_data(CMAP) else {
        return Ok(Vec::new());
    };
    let mut maps = Vec::new();
    for subtable in split_cmap(table.as_bytes())? {
        if !subtable.is_editable() {
            debug!(
                "Keeping cmap subtable ({}, {}) format {} as is",
                subtable.platform_id,
                subtable.encoding_id,
                subtable.format()
            );
            continue;
        }
        let mappings: Vec<(u32, u32)> =
            match CmapSubtable::read(ReadFontData::new(&subtable.data))? {
                CmapSubtable::Format4(table) => {
                    table.iter().map(|(cp, gid)| (cp, gid.to_u32())).collect()
                }
                CmapSubtable::Format12(table) => {
                    table.iter().map(|(cp, gid)| (cp, gid.to_u32())).collect()
                }
                _ => continue,
            };
        maps.push((
            CharacterMap::new(subtable.platform_id, subtable.encoding_id),
            mappings,
        ));
    }
    Ok(maps)
}

/// Per-glyph names from a version 1 or 2 `post` table
fn post_names(font: &FontRef, num_glyphs: usize) -> Vec<Option<String>> {
    let post: Option<ReadPost> = font.post().ok().filter(|post| {
        post.version() == Version16Dot16::VERSION_1_0
            || post.version() == Version16Dot16::VERSION_2_0
    });
    (0..num_glyphs)
        .map(|index| {
            post.as_ref()
                .and_then(|post| post.glyph_name(GlyphId16::new(index as u16).into()))
                .map(str::to_string)
        })
        .collect()
}

fn read_simple(simple: &ReadSimple) -> Result<Outline, EditError> {
    let (points, flags): (Vec<Point>, Vec<PointFlags>) = simple
        .points()
        .map(|point| {
            (
                Point::new(point.x as f64, point.y as f64),
                PointFlags::from_on_curve(point.on_curve),
            )
        })
        .unzip();
    let end_points = simple
        .end_pts_of_contours()
        .iter()
        .map(|end| end.get() as usize)
        .collect();
    Outline::new(points, end_points, flags, simple.instructions().to_vec())
}

fn read_composite(composite: &ReadComposite, names: &[String]) -> Result<CompositeData, EditError> {
    let mut components = Vec::new();
    for component in composite.components() {
        let gid = component.glyph.to_u32();
        let base = names
            .get(gid as usize)
            .ok_or(EditError::GlyphIdOutOfRange(gid))?
            .clone();
        let t = &component.transform;
        let transform = Affine::new([
            t.xx.to_f32() as f64,
            t.yx.to_f32() as f64,
            t.xy.to_f32() as f64,
            t.yy.to_f32() as f64,
            0.0,
            0.0,
        ]);
        let anchor = match component.anchor {
            Anchor::Offset { x, y } => ComponentAnchor::Offset(Vec2::new(x as f64, y as f64)),
            Anchor::Point { base, component } => ComponentAnchor::Points {
                parent: base as usize,
                child: component as usize,
            },
        };
        let scaled_offset = component
            .flags
            .contains(CompositeGlyphFlags::SCALED_COMPONENT_OFFSET)
            && !component
                .flags
                .contains(CompositeGlyphFlags::UNSCALED_COMPONENT_OFFSET);
        components.push(ComponentRef {
            base,
            transform,
            anchor,
            scaled_offset,
        });
    }
    Ok(CompositeData::new(components, composite.to_owned_table()))
}

// ---------------------------------------------------------------------------
// saving

fn encode(source: &[u8], data: &FontData) -> Result<Vec<u8>, EditError> {
    let order = data.glyph_order();
    if data.num_glyphs() != order.len() {
        return Err(EditError::GlyphCountMismatch {
            stored: data.num_glyphs(),
            actual: order.len(),
        });
    }
    if order.len() > u16::MAX as usize {
        return Err(EditError::TooManyGlyphs(order.len()));
    }

    let font = FontRef::new(source)?;
    let source_glyph_count = font.maxp()?.num_glyphs() as usize;
    let glyph_count_changed = source_glyph_count != order.len();

    // glyf + loca, measuring as we go
    let mut glyf_builder = GlyfLocaBuilder::new();
    let mut measures = Vec::with_capacity(order.len());
    let mut metrics = Vec::with_capacity(order.len());
    for name in order {
        let glyph = data
            .glyph(name)
            .ok_or_else(|| EditError::MissingGlyph(name.clone()))?;
        let metric = data.metric(name).unwrap_or_default();
        let (compiled, measure) = compile_glyph(glyph, metric)?;
        glyf_builder
            .add_glyph(&compiled)
            .map_err(|e| EditError::compile(GLYF, format!("glyph '{name}': {e}")))?;
        measures.push(measure);
        metrics.push(metric);
    }
    let (glyf, loca, loca_format) = glyf_builder.build();
    let summary = FontMetrics::from_glyphs(measures);

    let mut builder = FontBuilder::new();
    builder
        .add_table(&glyf)
        .map_err(|e| EditError::compile(GLYF, e))?;
    builder
        .add_table(&loca)
        .map_err(|e| EditError::compile(LOCA, e))?;

    // hmtx + hhea
    let advances: Vec<u16> = metrics.iter().map(|m| m.advance).collect();
    let long_metrics = number_of_long_metrics(&advances);
    let hmtx = Hmtx {
        h_metrics: metrics[..long_metrics]
            .iter()
            .map(|m| LongMetric {
                advance: m.advance,
                side_bearing: m.lsb,
            })
            .collect(),
        left_side_bearings: metrics[long_metrics..].iter().map(|m| m.lsb).collect(),
    };
    builder
        .add_table(&hmtx)
        .map_err(|e| EditError::compile(HMTX, e))?;

    let mut hhea: Hhea = font.hhea()?.to_owned_table();
    hhea.number_of_h_metrics = long_metrics as u16;
    hhea.advance_width_max = UfWord::new(summary.advance_width_max);
    hhea.min_left_side_bearing = FWord::new(summary.min_left_side_bearing);
    hhea.min_right_side_bearing = FWord::new(summary.min_right_side_bearing);
    hhea.x_max_extent = FWord::new(summary.x_max_extent);
    builder
        .add_table(&hhea)
        .map_err(|e| EditError::compile(HHEA, e))?;

    // cmap
    if let Some(cmap) = font.table_data(CMAP) {
        builder.add_raw(CMAP, compile_cmap(cmap.as_bytes(), data)?);
    }

    // post
    if let Ok(post) = font.post() {
        if post.version() == Version16Dot16::VERSION_1_0
            || post.version() == Version16Dot16::VERSION_2_0
        {
            let mut post_out: Post = post.to_owned_table();
            let names = Post::new_v2(order.iter().map(String::as_str));
            post_out.version = names.version;
            post_out.num_glyphs = names.num_glyphs;
            post_out.glyph_name_index = names.glyph_name_index;
            post_out.string_data = names.string_data;
            builder
                .add_table(&post_out)
                .map_err(|e| EditError::compile(POST, e))?;
        } else {
            builder.add_raw(POST, post.offset_data().as_bytes().to_vec());
        }
    }

    builder.add_raw(HEAD, patch_head(&font, &summary, loca_format)?);
    builder.add_raw(MAXP, patch_maxp(&font, order.len() as u16, &summary)?);

    for record in font.table_directory().table_records() {
        let tag = record.tag();
        if REBUILT_TABLES.contains(&tag) {
            continue;
        }
        if tag == DSIG || (glyph_count_changed && PER_GLYPH_TABLES.contains(&tag)) {
            debug!("Dropping table {}", tag);
            continue;
        }
        if let Some(table) = font.table_data(tag) {
            builder.add_raw(tag, table.as_bytes().to_vec());
        }
    }

    let mut bytes = builder.build();
    write_checksum_adjustment(&mut bytes)?;
    Ok(bytes)
}

fn compile_glyph(
    glyph: &GlyphData,
    metric: HorizontalMetric,
) -> Result<(Glyph, GlyphMeasure), EditError> {
    let mut measure = GlyphMeasure {
        metric,
        ..Default::default()
    };
    let compiled = match glyph {
        GlyphData::Empty => Glyph::Empty,
        GlyphData::Simple(outline) if outline.is_empty() => {
            measure.simple_counts = Some((0, 0));
            Glyph::Empty
        }
        GlyphData::Simple(outline) => {
            let simple = compile_simple(outline)?;
            measure.bbox = Some(simple.bbox);
            measure.simple_counts = Some((outline.len(), outline.number_of_contours()));
            Glyph::Simple(simple)
        }
        GlyphData::Composite(composite) => {
            measure.bbox = Some(composite.bbox());
            Glyph::Composite(composite.compiled().clone())
        }
    };
    Ok((compiled, measure))
}

fn compile_simple(outline: &Outline) -> Result<SimpleGlyph, EditError> {
    let mut contours = Vec::with_capacity(outline.number_of_contours());
    let mut bbox: Option<Bbox> = None;
    for (points, flags) in outline.contours() {
        let mut contour = Vec::with_capacity(points.len());
        for (point, flag) in points.iter().zip(flags) {
            let x = to_font_unit(point.x)?;
            let y = to_font_unit(point.y)?;
            let point_box = Bbox {
                x_min: x,
                y_min: y,
                x_max: x,
                y_max: y,
            };
            bbox = Some(bbox.map_or(point_box, |b| b.union(point_box)));
            contour.push(CurvePoint::new(x, y, flag.is_on_curve()));
        }
        contours.push(Contour::from(contour));
    }
    Ok(SimpleGlyph {
        bbox: bbox.unwrap_or_default(),
        contours,
        instructions: outline.instructions().to_vec(),
    })
}

fn to_font_unit(value: f64) -> Result<i16, EditError> {
    let rounded = ot_round(value);
    if rounded < i16::MIN as f64 || rounded > i16::MAX as f64 || !rounded.is_finite() {
        return Err(EditError::CoordinateOverflow(value));
    }
    Ok(rounded as i16)
}

/// Rebuild the Unicode subtables and keep every other subtable of `source`
fn compile_cmap(source: &[u8], data: &FontData) -> Result<Vec<u8>, EditError> {
    let mut subtables = Vec::new();
    if data.charmaps().iter().any(CharacterMap::is_unicode) {
        let unicode = write_fonts::dump_table(&unicode_cmap(data)?)
            .map_err(|e| EditError::compile(CMAP, e))?;
        subtables = split_cmap(&unicode)?;
    }

    for kept in split_cmap(source)?.into_iter().filter(|s| !s.is_editable()) {
        let replaced = subtables.iter().any(|rebuilt: &RawSubtable| {
            (rebuilt.platform_id, rebuilt.encoding_id) == (kept.platform_id, kept.encoding_id)
        });
        if replaced {
            warn!(
                "Replacing cmap subtable ({}, {}) format {} with the rebuilt Unicode map",
                kept.platform_id,
                kept.encoding_id,
                kept.format()
            );
            continue;
        }
        subtables.push(kept);
    }
    assemble_cmap(subtables)
}

/// The merged Unicode mappings as a fresh format 4 (and 12, if needed) table
fn unicode_cmap(data: &FontData) -> Result<Cmap, EditError> {
    let mut mappings: BTreeMap<u32, GlyphId> = BTreeMap::new();
    for charmap in data.charmaps().iter().filter(|c| c.is_unicode()) {
        for (codepoint, name) in charmap.iter() {
            let gid = data
                .glyph_id(name)
                .ok_or_else(|| EditError::MissingGlyph(name.to_string()))?;
            mappings.insert(codepoint, GlyphId::new(gid as u32));
        }
    }
    let mappings = mappings
        .into_iter()
        .map(|(codepoint, gid)| {
            char::from_u32(codepoint)
                .map(|c| (c, gid))
                .ok_or(EditError::InvalidCodepoint(codepoint))
        })
        .collect::<Result<Vec<_>, _>>()?;
    Cmap::from_mappings(mappings).map_err(|e| EditError::compile(CMAP, e))
}

fn patch_head(
    font: &FontRef,
    summary: &FontMetrics,
    loca_format: LocaFormat,
) -> Result<Vec<u8>, EditError> {
    let mut head = font
        .table_data(HEAD)
        .map(|data| data.as_bytes().to_vec())
        .ok_or_else(|| EditError::Unsupported("missing head table".to_string()))?;
    if head.len() < HEAD_MIN_LEN {
        return Err(EditError::Unsupported("truncated head table".to_string()));
    }

    head[HEAD_CHECKSUM_ADJUSTMENT..HEAD_CHECKSUM_ADJUSTMENT + 4].copy_from_slice(&[0; 4]);
    let bbox = summary.bbox.unwrap_or_default();
    for (i, value) in [bbox.x_min, bbox.y_min, bbox.x_max, bbox.y_max]
        .into_iter()
        .enumerate()
    {
        let start = HEAD_BBOX + i * 2;
        head[start..start + 2].copy_from_slice(&value.to_be_bytes());
    }
    head[HEAD_INDEX_TO_LOC_FORMAT..HEAD_INDEX_TO_LOC_FORMAT + 2]
        .copy_from_slice(&[0, matches!(loca_format, LocaFormat::Long) as u8]);
    Ok(head)
}

fn patch_maxp(
    font: &FontRef,
    num_glyphs: u16,
    summary: &FontMetrics,
) -> Result<Vec<u8>, EditError> {
    let maxp = font.maxp()?;
    let mut out = maxp.offset_data().as_bytes().to_vec();
    out[MAXP_NUM_GLYPHS..MAXP_NUM_GLYPHS + 2].copy_from_slice(&num_glyphs.to_be_bytes());
    if maxp.version() == Version16Dot16::VERSION_1_0 && out.len() >= MAXP_V1_MIN_LEN {
        // only ever grow the simple glyph maxima; composite limits are untouched
        let max_points = maxp.max_points().unwrap_or(0).max(summary.max_points);
        let max_contours = maxp.max_contours().unwrap_or(0).max(summary.max_contours);
        out[MAXP_MAX_POINTS..MAXP_MAX_POINTS + 2].copy_from_slice(&max_points.to_be_bytes());
        out[MAXP_MAX_CONTOURS..MAXP_MAX_CONTOURS + 2].copy_from_slice(&max_contours.to_be_bytes());
    }
    Ok(out)
}

/// Fill in `head.checksumAdjustment` for a fully assembled font
fn write_checksum_adjustment(bytes: &mut [u8]) -> Result<(), EditError> {
    let head_offset = FontRef::new(&*bytes)?
        .table_directory()
        .table_records()
        .iter()
        .find(|record| record.tag() == HEAD)
        .map(|record| record.offset() as usize)
        .ok_or_else(|| EditError::Unsupported("missing head table".to_string()))?;

    let sum = bytes.chunks(4).fold(0u32, |sum, chunk| {
        let mut word = [0u8; 4];
        word[..chunk.len()].copy_from_slice(chunk);
        sum.wrapping_add(u32::from_be_bytes(word))
    });
    let adjustment = CHECKSUM_MAGIC.wrapping_sub(sum);
    let start = head_offset + HEAD_CHECKSUM_ADJUSTMENT;
    bytes[start..start + 4].copy_from_slice(&adjustment.to_be_bytes());
    Ok(())
}
