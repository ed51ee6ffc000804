//! Glyph naming
//!
//! Names come from `post` when it has them. Otherwise a glyph reached from a
//! Unicode map is named after its lowest codepoint: the Adobe Glyph List for
//! New Fonts name where there is one, `uniXXXX` or `uXXXXX` otherwise. Any
//! other glyph is `glyphNNNNN`, and glyph 0 is always `.notdef`.

use std::collections::{BTreeMap, HashMap};

const DIGIT_NAMES: [&str; 10] = [
    "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine",
];

/// AGLFN names outside ASCII letters and digits, sorted by codepoint
const AGL_NAMES: &[(u32, &str)] = &[
    (0x0020, "space"),
    (0x0021, "exclam"),
    (0x0022, "quotedbl"),
    (0x0023, "numbersign"),
    (0x0024, "dollar"),
    (0x0025, "percent"),
    (0x0026, "ampersand"),
    (0x0027, "quotesingle"),
    (0x0028, "parenleft"),
    (0x0029, "parenright"),
    (0x002A, "asterisk"),
    (0x002B, "plus"),
    (0x002C, "comma"),
    (0x002D, "hyphen"),
    (0x002E, "period"),
    (0x002F, "slash"),
    (0x003A, "colon"),
    (0x003B, "semicolon"),
    (0x003C, "less"),
    (0x003D, "equal"),
    (0x003E, "greater"),
    (0x003F, "question"),
    (0x0040, "at"),
    (0x005B, "bracketleft"),
    (0x005C, "backslash"),
    (0x005D, "bracketright"),
    (0x005E, "asciicircum"),
    (0x005F, "underscore"),
    (0x0060, "grave"),
    (0x007B, "braceleft"),
    (0x007C, "bar"),
    (0x007D, "braceright"),
    (0x007E, "asciitilde"),
    (0x00A1, "exclamdown"),
    (0x00A2, "cent"),
    (0x00A3, "sterling"),
    (0x00A4, "currency"),
    (0x00A5, "yen"),
    (0x00A6, "brokenbar"),
    (0x00A7, "section"),
    (0x00A8, "dieresis"),
    (0x00A9, "copyright"),
    (0x00AA, "ordfeminine"),
    (0x00AB, "guillemotleft"),
    (0x00AC, "logicalnot"),
    (0x00AE, "registered"),
    (0x00AF, "macron"),
    (0x00B0, "degree"),
    (0x00B1, "plusminus"),
    (0x00B2, "twosuperior"),
    (0x00B3, "threesuperior"),
    (0x00B4, "acute"),
    (0x00B5, "mu"),
    (0x00B6, "paragraph"),
    (0x00B7, "periodcentered"),
    (0x00B8, "cedilla"),
    (0x00B9, "onesuperior"),
    (0x00BA, "ordmasculine"),
    (0x00BB, "guillemotright"),
    (0x00BC, "onequarter"),
    (0x00BD, "onehalf"),
    (0x00BE, "threequarters"),
    (0x00BF, "questiondown"),
    (0x00C0, "Agrave"),
    (0x00C1, "Aacute"),
    (0x00C2, "Acircumflex"),
    (0x00C3, "Atilde"),
    (0x00C4, "Adieresis"),
    (0x00C5, "Aring"),
    (0x00C6, "AE"),
    (0x00C7, "Ccedilla"),
    (0x00C8, "Egrave"),
    (0x00C9, "Eacute"),
    (0x00CA, "Ecircumflex"),
    (0x00CB, "Edieresis"),
    (0x00CC, "Igrave"),
    (0x00CD, "Iacute"),
    (0x00CE, "Icircumflex"),
    (0x00CF, "Idieresis"),
    (0x00D0, "Eth"),
    (0x00D1, "Ntilde"),
    (0x00D2, "Ograve"),
    (0x00D3, "Oacute"),
    (0x00D4, "Ocircumflex"),
    (0x00D5, "Otilde"),
    (0x00D6, "Odieresis"),
    (0x00D7, "multiply"),
    (0x00D8, "Oslash"),
    (0x00D9, "Ugrave"),
    (0x00DA, "Uacute"),
    (0x00DB, "Ucircumflex"),
    (0x00DC, "Udieresis"),
    (0x00DD, "Yacute"),
    (0x00DE, "Thorn"),
    (0x00DF, "germandbls"),
    (0x00E0, "agrave"),
    (0x00E1, "aacute"),
    (0x00E2, "acircumflex"),
    (0x00E3, "atilde"),
    (0x00E4, "adieresis"),
    (0x00E5, "aring"),
    (0x00E6, "ae"),
    (0x00E7, "ccedilla"),
    (0x00E8, "egrave"),
    (0x00E9, "eacute"),
    (0x00EA, "ecircumflex"),
    (0x00EB, "edieresis"),
    (0x00EC, "igrave"),
    (0x00ED, "iacute"),
    (0x00EE, "icircumflex"),
    (0x00EF, "idieresis"),
    (0x00F0, "eth"),
    (0x00F1, "ntilde"),
    (0x00F2, "ograve"),
    (0x00F3, "oacute"),
    (0x00F4, "ocircumflex"),
    (0x00F5, "otilde"),
    (0x00F6, "odieresis"),
    (0x00F7, "divide"),
    (0x00F8, "oslash"),
    (0x00F9, "ugrave"),
    (0x00FA, "uacute"),
    (0x00FB, "ucircumflex"),
    (0x00FC, "udieresis"),
    (0x00FD, "yacute"),
    (0x00FE, "thorn"),
    (0x00FF, "ydieresis"),
    (0x0131, "dotlessi"),
    (0x0141, "Lslash"),
    (0x0142, "lslash"),
    (0x0152, "OE"),
    (0x0153, "oe"),
    (0x0160, "Scaron"),
    (0x0161, "scaron"),
    (0x0178, "Ydieresis"),
    (0x017D, "Zcaron"),
    (0x017E, "zcaron"),
    (0x0192, "florin"),
    (0x02C6, "circumflex"),
    (0x02C7, "caron"),
    (0x02D8, "breve"),
    (0x02D9, "dotaccent"),
    (0x02DA, "ring"),
    (0x02DB, "ogonek"),
    (0x02DC, "tilde"),
    (0x02DD, "hungarumlaut"),
    (0x2013, "endash"),
    (0x2014, "emdash"),
    (0x2018, "quoteleft"),
    (0x2019, "quoteright"),
    (0x201A, "quotesinglbase"),
    (0x201C, "quotedblleft"),
    (0x201D, "quotedblright"),
    (0x201E, "quotedblbase"),
    (0x2020, "dagger"),
    (0x2021, "daggerdbl"),
    (0x2022, "bullet"),
    (0x2026, "ellipsis"),
    (0x2030, "perthousand"),
    (0x2039, "guilsinglleft"),
    (0x203A, "guilsinglright"),
    (0x2044, "fraction"),
    (0x20AC, "Euro"),
    (0x2122, "trademark"),
    (0x2212, "minus"),
    (0xFB01, "fi"),
    (0xFB02, "fl"),
];

/// The production name for a codepoint
pub fn name_for_codepoint(codepoint: u32) -> String {
    if let Some(c) = char::from_u32(codepoint).filter(char::is_ascii_alphabetic) {
        return c.to_string();
    }
    if (0x30..=0x39).contains(&codepoint) {
        return DIGIT_NAMES[(codepoint - 0x30) as usize].to_string();
    }
    if let Ok(index) = AGL_NAMES.binary_search_by_key(&codepoint, |(cp, _)| *cp) {
        return AGL_NAMES[index].1.to_string();
    }
    if codepoint <= 0xFFFF {
        format!("uni{codepoint:04X}")
    } else {
        format!("u{codepoint:X}")
    }
}

/// Name every glyph
///
/// `post_names` has one entry per glyph; `lowest_codepoints` maps a glyph id
/// to the lowest codepoint any Unicode map sends to it. Repeated names get
/// `#1`, `#2`, ... suffixes.
pub fn assign_glyph_names(
    post_names: Vec<Option<String>>,
    lowest_codepoints: &BTreeMap<u32, u32>,
) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    post_names
        .into_iter()
        .enumerate()
        .map(|(index, post_name)| {
            let base = post_name
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| fallback_name(index, lowest_codepoints));
            let repeats = seen.entry(base.clone()).or_insert(0);
            let name = if *repeats == 0 {
                base
            } else {
                format!("{base}#{repeats}")
            };
            *repeats += 1;
            name
        })
        .collect()
}

fn fallback_name(index: usize, lowest_codepoints: &BTreeMap<u32, u32>) -> String {
    if index == 0 {
        return ".notdef".to_string();
    }
    match lowest_codepoints.get(&(index as u32)) {
        Some(&codepoint) => name_for_codepoint(codepoint),
        None => format!("glyph{index:05}"),
    }
}
