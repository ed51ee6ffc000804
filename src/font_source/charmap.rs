//! Character maps (codepoint → glyph name)

use std::collections::BTreeMap;

/// Platform ids from the OpenType `cmap` encoding records
pub const PLATFORM_UNICODE: u16 = 0;
pub const PLATFORM_MACINTOSH: u16 = 1;
pub const PLATFORM_WINDOWS: u16 = 3;

const WINDOWS_BMP_ENCODING: u16 = 1;
const WINDOWS_FULL_REPERTOIRE_ENCODING: u16 = 10;

/// One `cmap` subtable, keyed by glyph name instead of glyph id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterMap {
    pub platform_id: u16,
    pub encoding_id: u16,
    mappings: BTreeMap<u32, String>,
}

impl CharacterMap {
    pub fn new(platform_id: u16, encoding_id: u16) -> Self {
        Self {
            platform_id,
            encoding_id,
            mappings: BTreeMap::new(),
        }
    }

    /// A Windows BMP map, the most common Unicode subtable
    pub fn windows_bmp() -> Self {
        Self::new(PLATFORM_WINDOWS, WINDOWS_BMP_ENCODING)
    }

    /// Whether this subtable maps Unicode codepoints
    pub fn is_unicode(&self) -> bool {
        self.platform_id == PLATFORM_UNICODE
            || (self.platform_id == PLATFORM_WINDOWS
                && matches!(
                    self.encoding_id,
                    WINDOWS_BMP_ENCODING | WINDOWS_FULL_REPERTOIRE_ENCODING
                ))
    }

    /// Insert or overwrite a mapping, returning the previous glyph name
    pub fn insert(&mut self, codepoint: u32, glyph_name: impl Into<String>) -> Option<String> {
        self.mappings.insert(codepoint, glyph_name.into())
    }

    pub fn get(&self, codepoint: u32) -> Option<&str> {
        self.mappings.get(&codepoint).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, &str)> + '_ {
        self.mappings.iter().map(|(cp, name)| (*cp, name.as_str()))
    }

    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }
}
