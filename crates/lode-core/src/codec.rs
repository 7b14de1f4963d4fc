use std::io::{Read, Write};

use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;

use crate::error::CoreError;
use crate::object::{Object, ObjectKind};

/// Size-field enforcement for [`decode_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SizeCheck {
    /// The declared size must equal the body length.
    #[default]
    Strict,
    /// Accept the body regardless of the declared size. Needed only for
    /// stores written by tools that lied in the header.
    Legacy,
}

/// Decode one object file: a zlib stream of `<tag> <decimal-size>\0<body>`,
/// with the size field enforced.
pub fn decode(raw: &[u8]) -> Result<Object, CoreError> {
    decode_with(raw, SizeCheck::Strict)
}

pub fn decode_with(raw: &[u8], size_check: SizeCheck) -> Result<Object, CoreError> {
    let mut data = Vec::new();
    ZlibDecoder::new(raw)
        .read_to_end(&mut data)
        .map_err(|e| CoreError::CorruptObject(e.to_string()))?;

    let space = data
        .iter()
        .position(|&b| b == b' ')
        .ok_or_else(|| CoreError::MalformedHeader("no space after type tag".into()))?;
    let nul = data[space..]
        .iter()
        .position(|&b| b == 0)
        .map(|i| space + i)
        .ok_or_else(|| CoreError::MalformedHeader("no NUL terminating the size field".into()))?;

    let kind = ObjectKind::from_tag(&data[..space]).ok_or_else(|| {
        CoreError::UnknownObjectType(String::from_utf8_lossy(&data[..space]).into_owned())
    })?;
    let declared = parse_size(&data[space + 1..nul])?;

    let body = data[nul + 1..].to_vec();
    if size_check == SizeCheck::Strict && declared != body.len() {
        return Err(CoreError::SizeMismatch {
            declared,
            actual: body.len(),
        });
    }

    Ok(Object::new(kind, body))
}

/// Encode the wire form of an object, the inverse of [`decode`]: header
/// plus body, zlib-compressed, in memory.
pub fn encode(kind: ObjectKind, body: &[u8]) -> Result<Vec<u8>, CoreError> {
    let mut plain = Vec::with_capacity(body.len() + 16);
    plain.extend_from_slice(kind.tag().as_bytes());
    plain.push(b' ');
    plain.extend_from_slice(body.len().to_string().as_bytes());
    plain.push(0);
    plain.extend_from_slice(body);

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(&plain)?;
    Ok(encoder.finish()?)
}

fn parse_size(field: &[u8]) -> Result<usize, CoreError> {
    std::str::from_utf8(field)
        .ok()
        .filter(|s| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()))
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| {
            CoreError::MalformedHeader(format!(
                "size field {:?} is not ascii decimal",
                String::from_utf8_lossy(field)
            ))
        })
}
