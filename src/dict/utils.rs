//! Low-level byte reading and writing utilities

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use encoding_rs::Encoding;

use super::types::error::{DictError, Result};

/// Reads a UTF-8 string prefixed by a big-endian length of `width` bytes (2 or 4).
///
/// Advances the slice past the string.
pub fn read_prefixed_str(reader: &mut &[u8], width: usize, context: &'static str) -> Result<String> {
    let len = match width {
        2 => reader.read_u16::<BigEndian>()? as usize,
        4 => reader.read_u32::<BigEndian>()? as usize,
        _ => return Err(DictError::InvalidFormat(format!("Invalid length width: {}", width))),
    };
    if len > reader.len() {
        return Err(DictError::InvalidFormat(format!(
            "{} length {} exceeds remaining {} bytes",
            context,
            len,
            reader.len()
        )));
    }
    let current: &[u8] = *reader;
    let (bytes, rest) = current.split_at(len);
    let text = std::str::from_utf8(bytes)
        .map_err(|e| DictError::InvalidFormat(format!("{} is not valid UTF-8: {}", context, e)))?
        .to_owned();
    *reader = rest;
    Ok(text)
}

/// Writes a UTF-8 string prefixed by a big-endian length of `width` bytes (2 or 4).
pub fn write_prefixed_str(out: &mut Vec<u8>, text: &str, width: usize, context: &'static str) -> Result<()> {
    let len = text.len();
    match width {
        2 => {
            let len = u16::try_from(len).map_err(|_| DictError::TooLong {
                context,
                len,
                max: u16::MAX as usize,
            })?;
            out.write_u16::<BigEndian>(len)?;
        }
        4 => {
            let len = u32::try_from(len).map_err(|_| DictError::TooLong {
                context,
                len,
                max: u32::MAX as usize,
            })?;
            out.write_u32::<BigEndian>(len)?;
        }
        _ => return Err(DictError::InvalidFormat(format!("Invalid length width: {}", width))),
    }
    out.extend_from_slice(text.as_bytes());
    Ok(())
}

/// Resolves an encoding label such as `utf-8`, `gbk` or `windows-1252`.
pub fn parse_encoding(label: &str) -> Result<&'static Encoding> {
    Encoding::for_label(label.trim().as_bytes())
        .ok_or_else(|| DictError::UnknownEncoding(label.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefixed_strings_advance_the_cursor() {
        let mut buf = Vec::new();
        write_prefixed_str(&mut buf, "café", 2, "word").unwrap();
        write_prefixed_str(&mut buf, "a hot drink", 4, "meaning").unwrap();

        let mut cursor = buf.as_slice();
        assert_eq!(read_prefixed_str(&mut cursor, 2, "word").unwrap(), "café");
        assert_eq!(read_prefixed_str(&mut cursor, 4, "meaning").unwrap(), "a hot drink");
        assert!(cursor.is_empty());
    }

    #[test]
    fn truncated_string_is_invalid() {
        let mut cursor: &[u8] = &[0, 9, b'a', b'b'];
        assert!(matches!(
            read_prefixed_str(&mut cursor, 2, "word"),
            Err(DictError::InvalidFormat(_))
        ));
    }

    #[test]
    fn oversized_word_is_rejected() {
        let long = "x".repeat(u16::MAX as usize + 1);
        let err = write_prefixed_str(&mut Vec::new(), &long, 2, "word").unwrap_err();
        assert!(matches!(err, DictError::TooLong { context: "word", .. }));
    }

    #[test]
    fn encoding_labels_resolve() {
        assert_eq!(parse_encoding("utf8").unwrap(), encoding_rs::UTF_8);
        assert_eq!(parse_encoding(" GBK ").unwrap(), encoding_rs::GBK);
        assert!(parse_encoding("klingon").is_err());
    }
}
