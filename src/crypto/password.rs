use k256::Scalar;

use crate::common::hash::sha3_256;
use crate::crypto::point::{decode_scalar_reduced, encode_scalar, SCALAR_LEN};
use crate::error::JpakeError;

/// Suffix appended to the hash input whenever the digest reduces to zero.
const RETRY_SUFFIX: &[u8] = b"retried";

/// Deterministically maps a password to the protocol scalar `s`, returned as
/// 32 big-endian bytes with `1 <= s < n`.
///
/// Computes `SHA3-256(password) mod n`. Should the result be zero, the ASCII
/// literal `"retried"` is appended to the hashed input and the digest is
/// recomputed until the result is nonzero, which guarantees the protocol
/// precondition `s mod n != 0`.
///
/// A single SHA3-256 is intentionally cheap. Run weak passwords through a
/// key-stretching function such as Argon2 before calling this.
pub fn derive_s(password: &str) -> Result<[u8; SCALAR_LEN], JpakeError> {
    if password.is_empty() {
        return Err(JpakeError::InvalidArgument("Missing password".to_string()));
    }
    let mut input = password.as_bytes().to_vec();
    let mut s = decode_scalar_reduced(&sha3_256(&input))?;
    while s == Scalar::ZERO {
        input.extend_from_slice(RETRY_SUFFIX);
        s = decode_scalar_reduced(&sha3_256(&input))?;
    }
    Ok(encode_scalar(&s))
}

#[cfg(test)]
mod tests {
    use super::*;
    use elliptic_curve::PrimeField;

    #[test]
    fn test_derive_s_deterministic() {
        let s1 = derive_s("secretPassword123").unwrap();
        let s2 = derive_s("secretPassword123").unwrap();
        assert_eq!(s1, s2);
        assert_eq!(s1.len(), SCALAR_LEN);
    }

    #[test]
    fn test_derive_s_distinct_passwords() {
        let s1 = derive_s("secretPassword123").unwrap();
        let s2 = derive_s("wrongPassword").unwrap();
        assert_ne!(s1, s2);
    }

    #[test]
    fn test_derive_s_in_range() {
        let s = derive_s("some password").unwrap();
        // canonical encoding below n, and nonzero
        let scalar = Option::<Scalar>::from(Scalar::from_repr(s.into())).unwrap();
        assert_ne!(scalar, Scalar::ZERO);
    }

    #[test]
    fn test_derive_s_empty_password() {
        assert_eq!(
            derive_s("").unwrap_err(),
            JpakeError::InvalidArgument("Missing password".to_string())
        );
    }
}
