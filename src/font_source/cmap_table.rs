//! Raw `cmap` subtables
//!
//! Only Unicode subtables in format 4 or 12 are decoded for editing. Every
//! other subtable is carried through byte for byte; glyph ids are only ever
//! appended, so the ids inside them stay valid.

use crate::core::errors::EditError;
use crate::font_source::charmap::CharacterMap;
use write_fonts::types::Tag;

const CMAP: Tag = Tag::new(b"cmap");
const HEADER_LEN: usize = 4;
const RECORD_LEN: usize = 8;

/// An encoding record together with the bytes of its subtable
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawSubtable {
    pub platform_id: u16,
    pub encoding_id: u16,
    pub data: Vec<u8>,
}

impl RawSubtable {
    pub fn new(platform_id: u16, encoding_id: u16, data: Vec<u8>) -> Self {
        Self {
            platform_id,
            encoding_id,
            data,
        }
    }

    pub fn format(&self) -> u16 {
        read_u16(&self.data, 0).unwrap_or_default()
    }

    /// Whether this subtable is decoded into a [`CharacterMap`]
    pub fn is_editable(&self) -> bool {
        matches!(self.format(), 4 | 12)
            && CharacterMap::new(self.platform_id, self.encoding_id).is_unicode()
    }

    fn key(&self) -> (u16, u16) {
        (self.platform_id, self.encoding_id)
    }
}

fn read_u16(data: &[u8], pos: usize) -> Option<u16> {
    data.get(pos..pos + 2)
        .map(|bytes| u16::from_be_bytes([bytes[0], bytes[1]]))
}

fn read_u32(data: &[u8], pos: usize) -> Option<u32> {
    data.get(pos..pos + 4)
        .map(|bytes| u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
}

fn malformed(message: impl Into<String>) -> EditError {
    EditError::MalformedTable {
        tag: CMAP,
        message: message.into(),
    }
}

/// Byte length of the subtable at `offset`, from its format-specific header
fn subtable_len(table: &[u8], offset: usize) -> Option<usize> {
    let len = match read_u16(table, offset)? {
        0 | 2 | 4 | 6 => read_u16(table, offset + 2)? as usize,
        8 | 10 | 12 | 13 => read_u32(table, offset + 4)? as usize,
        14 => read_u32(table, offset + 2)? as usize,
        _ => return None,
    };
    Some(len)
}

/// Split a `cmap` table into its encoding records, in table order
pub fn split_cmap(table: &[u8]) -> Result<Vec<RawSubtable>, EditError> {
    let num_tables = read_u16(table, 2).ok_or_else(|| malformed("truncated header"))?;
    let mut subtables = Vec::with_capacity(num_tables as usize);
    for index in 0..num_tables as usize {
        let record = HEADER_LEN + index * RECORD_LEN;
        let (Some(platform_id), Some(encoding_id), Some(offset)) = (
            read_u16(table, record),
            read_u16(table, record + 2),
            read_u32(table, record + 4),
        ) else {
            return Err(malformed("truncated encoding records"));
        };
        let offset = offset as usize;
        let data = subtable_len(table, offset)
            .and_then(|len| table.get(offset..offset + len))
            .ok_or_else(|| {
                malformed(format!(
                    "subtable ({platform_id}, {encoding_id}) is truncated or has an unknown format"
                ))
            })?;
        subtables.push(RawSubtable::new(platform_id, encoding_id, data.to_vec()));
    }
    Ok(subtables)
}

/// Assemble a `cmap` table
///
/// Records are sorted by platform and encoding id. When two records share
/// both ids the one listed first wins. Identical subtables are stored once.
pub fn assemble_cmap(mut subtables: Vec<RawSubtable>) -> Result<Vec<u8>, EditError> {
    subtables.sort_by_key(RawSubtable::key);
    subtables.dedup_by_key(|subtable| subtable.key());

    let num_tables = u16::try_from(subtables.len())
        .map_err(|_| EditError::compile(CMAP, "too many encoding records"))?;
    let header_len = HEADER_LEN + subtables.len() * RECORD_LEN;

    let mut out = Vec::with_capacity(header_len);
    out.extend_from_slice(&0u16.to_be_bytes());
    out.extend_from_slice(&num_tables.to_be_bytes());

    let mut body: Vec<u8> = Vec::new();
    let mut written: Vec<(&[u8], u32)> = Vec::new();
    for subtable in &subtables {
        let offset = match written.iter().find(|(data, _)| *data == subtable.data.as_slice()) {
            Some((_, offset)) => *offset,
            None => {
                let offset = u32::try_from(header_len + body.len())
                    .map_err(|_| EditError::compile(CMAP, "table is larger than 4 GiB"))?;
                body.extend_from_slice(&subtable.data);
                written.push((&subtable.data, offset));
                offset
            }
        };
        out.extend_from_slice(&subtable.platform_id.to_be_bytes());
        out.extend_from_slice(&subtable.encoding_id.to_be_bytes());
        out.extend_from_slice(&offset.to_be_bytes());
    }
    out.extend_from_slice(&body);
    Ok(out)
}
