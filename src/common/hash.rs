use sha3::{Digest, Sha3_256};

use crate::error::JpakeError;

/// Byte length of a SHA3-256 digest.
pub const DIGEST_LEN: usize = 32;

/// Computes the SHA3-256 digest of `data`.
pub fn sha3_256(data: &[u8]) -> [u8; DIGEST_LEN] {
    Sha3_256::digest(data).into()
}

/// Concatenates `fields`, prefixing each with its length as a single byte.
///
/// The prefixes delimit variable-width fields inside one hash input so that
/// no two distinct field sequences can collide by concatenation. Fields
/// longer than 255 bytes cannot be represented and are rejected.
pub fn prepare_hash_data(fields: &[&[u8]]) -> Result<Vec<u8>, JpakeError> {
    let mut data = Vec::with_capacity(fields.iter().map(|f| f.len() + 1).sum());
    for field in fields {
        let len = u8::try_from(field.len()).map_err(|_| {
            JpakeError::InvalidArgument(format!(
                "Hash input field too long: {} bytes, maximum is 255",
                field.len()
            ))
        })?;
        data.push(len);
        data.extend_from_slice(field);
    }
    Ok(data)
}
