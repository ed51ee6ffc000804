//! Character map updates

use crate::core::errors::EditError;
use crate::font_source::FontData;
use tracing::{debug, warn};

/// Map `codepoint` to `glyph` in every Unicode character map
///
/// Existing entries for the codepoint are overwritten. A glyph that is not
/// in the font is skipped with a warning. Returns `true` if at least one map
/// was updated.
pub fn add_unicode_mapping(
    font: &mut FontData,
    codepoint: u32,
    glyph: &str,
) -> Result<bool, EditError> {
    if char::from_u32(codepoint).is_none() {
        return Err(EditError::InvalidCodepoint(codepoint));
    }
    if !font.contains_glyph(glyph) {
        warn!(
            "Not mapping U+{:04X}: glyph '{}' is not in the font",
            codepoint, glyph
        );
        return Ok(false);
    }

    let mut updated = 0;
    for charmap in font.charmaps_mut().iter_mut().filter(|c| c.is_unicode()) {
        if let Some(previous) = charmap.insert(codepoint, glyph) {
            if previous != glyph {
                debug!(
                    "U+{:04X} was '{}' in cmap ({}, {})",
                    codepoint, previous, charmap.platform_id, charmap.encoding_id
                );
            }
        }
        updated += 1;
    }

    if updated == 0 {
        warn!("Not mapping U+{:04X}: the font has no Unicode cmap", codepoint);
    }
    Ok(updated > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font_source::charmap::{PLATFORM_MACINTOSH, PLATFORM_UNICODE};
    use crate::font_source::{CharacterMap, GlyphData, HorizontalMetric};

    fn font() -> FontData {
        let mut font = FontData::new();
        font.insert_glyph("eacute", GlyphData::Empty, HorizontalMetric::default());
        font.insert_glyph("e", GlyphData::Empty, HorizontalMetric::default());
        font.add_charmap(CharacterMap::new(PLATFORM_UNICODE, 3));
        font.add_charmap(CharacterMap::windows_bmp());
        let mut mac = CharacterMap::new(PLATFORM_MACINTOSH, 0);
        mac.insert(0x8E, "e");
        font.add_charmap(mac);
        font
    }

    #[test]
    fn maps_in_every_unicode_table() {
        let mut font = font();
        assert!(add_unicode_mapping(&mut font, 0xE9, "eacute").unwrap());

        for charmap in font.charmaps() {
            if charmap.is_unicode() {
                assert_eq!(charmap.get(0xE9), Some("eacute"));
            } else {
                assert_eq!(charmap.get(0xE9), None);
                assert_eq!(charmap.len(), 1);
            }
        }
    }

    #[test]
    fn overwrites_existing_entries() {
        let mut font = font();
        add_unicode_mapping(&mut font, 0xE9, "e").unwrap();
        add_unicode_mapping(&mut font, 0xE9, "eacute").unwrap();
        assert_eq!(font.charmaps()[0].get(0xE9), Some("eacute"));
        assert_eq!(font.charmaps()[0].len(), 1);
    }

    #[test]
    fn unknown_glyph_is_a_no_op() {
        let mut font = font();
        assert!(!add_unicode_mapping(&mut font, 0xE8, "egrave").unwrap());
        assert!(font.charmaps().iter().all(|c| c.get(0xE8).is_none()));
    }

    #[test]
    fn no_unicode_table_reports_false() {
        let mut font = FontData::new();
        font.insert_glyph("e", GlyphData::Empty, HorizontalMetric::default());
        assert!(!add_unicode_mapping(&mut font, 0x65, "e").unwrap());
    }

    #[test]
    fn surrogates_are_rejected() {
        let mut font = font();
        assert!(matches!(
            add_unicode_mapping(&mut font, 0xD800, "e"),
            Err(EditError::InvalidCodepoint(0xD800))
        ));
    }
}
