// Key Codec
// Binary key buffer layout and its base64 text form
//
// Layout: [4-byte big-endian length][little-endian exponent magnitude]
//         [4-byte big-endian length][little-endian modulus magnitude]
// Each length is the minimal byte count of its magnitude.

use base64::{engine::general_purpose::STANDARD, Engine as _};

use super::bigint::{from_bytes, to_bytes, RsaBigInt};
use super::error::{CryptoError, CryptoResult};

/// Append one length-prefixed big-integer segment to the buffer
pub fn write_bigint(buf: &mut Vec<u8>, value: &RsaBigInt) {
    let magnitude = to_bytes(value);
    buf.extend_from_slice(&(magnitude.len() as u32).to_be_bytes());
    buf.extend_from_slice(&magnitude);
}

/// Read one length-prefixed big-integer segment starting at `offset`.
/// Returns the value and the offset just past the segment.
pub fn read_bigint(buf: &[u8], offset: usize) -> CryptoResult<(RsaBigInt, usize)> {
    let header: [u8; 4] = buf
        .get(offset..offset + 4)
        .and_then(|s| s.try_into().ok())
        .ok_or_else(|| {
            CryptoError::MalformedKey(format!(
                "missing length header at offset {offset} in a {}-byte buffer",
                buf.len()
            ))
        })?;

    let len = u32::from_be_bytes(header) as usize;
    let start = offset + 4;
    let end = start + len;

    let magnitude = buf.get(start..end).ok_or_else(|| {
        CryptoError::MalformedKey(format!(
            "declared segment of {len} bytes overruns a {}-byte buffer",
            buf.len()
        ))
    })?;

    Ok((from_bytes(magnitude), end))
}

/// Pack an (exponent, modulus) pair into the binary layout and base64-encode it
pub fn encode_key(exponent: &RsaBigInt, modulus: &RsaBigInt) -> String {
    let mut buf = Vec::new();
    write_bigint(&mut buf, exponent);
    write_bigint(&mut buf, modulus);
    STANDARD.encode(buf)
}

/// Decode a base64 key string back into its (exponent, modulus) pair.
/// Trailing bytes after the second segment are tolerated.
pub fn decode_key(encoded: &str) -> CryptoResult<(RsaBigInt, RsaBigInt)> {
    let buf = STANDARD
        .decode(encoded)
        .map_err(|e| CryptoError::MalformedKey(format!("invalid base64: {e}")))?;

    let (exponent, next) = read_bigint(&buf, 0)?;
    let (modulus, _) = read_bigint(&buf, next)?;

    Ok((exponent, modulus))
}
