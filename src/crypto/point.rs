use elliptic_curve::{
    bigint::{ArrayEncoding, U256},
    ops::Reduce,
    sec1::{FromEncodedPoint, ToEncodedPoint},
    Curve,
};
use k256::{AffinePoint, EncodedPoint, FieldBytes, ProjectivePoint, Scalar, Secp256k1};

use crate::error::JpakeError;

/// Byte length of a SEC1 compressed secp256k1 point.
pub const POINT_LEN: usize = 33;

/// Byte length of a big-endian encoded scalar.
pub const SCALAR_LEN: usize = 32;

/// The secp256k1 base point `G`.
pub const GENERATOR: ProjectivePoint = ProjectivePoint::GENERATOR;

/// The order `n` of the secp256k1 base point, as 32 big-endian bytes.
pub fn group_order() -> [u8; SCALAR_LEN] {
    Secp256k1::ORDER.to_be_byte_array().into()
}

/// Serializes a point to its 33-byte SEC1 compressed form.
///
/// The point at infinity has no compressed form; it is never a legal
/// protocol value, so hitting it here is an internal error.
pub fn encode_point(point: &ProjectivePoint) -> Result<[u8; POINT_LEN], JpakeError> {
    let encoded = point.to_affine().to_encoded_point(true);
    let bytes = encoded.as_bytes();
    if bytes.len() != POINT_LEN {
        return Err(JpakeError::Internal(
            "Cannot encode the point at infinity".to_string(),
        ));
    }
    let mut out = [0u8; POINT_LEN];
    out.copy_from_slice(bytes);
    Ok(out)
}

/// Decodes a 33-byte SEC1 compressed point, rejecting off-curve encodings.
///
/// SEC1 encodes the identity as a single zero byte, so a decoded 33-byte
/// point is never the point at infinity.
pub fn decode_point(bytes: &[u8; POINT_LEN]) -> Result<ProjectivePoint, JpakeError> {
    let encoded = EncodedPoint::from_bytes(bytes)
        .map_err(|_| JpakeError::InvalidArgument("Invalid point encoding".to_string()))?;
    Option::<AffinePoint>::from(AffinePoint::from_encoded_point(&encoded))
        .map(ProjectivePoint::from)
        .ok_or_else(|| JpakeError::InvalidArgument("Invalid point encoding".to_string()))
}

/// Encodes a scalar as 32 big-endian bytes.
pub fn encode_scalar(scalar: &Scalar) -> [u8; SCALAR_LEN] {
    scalar.to_bytes().into()
}

/// Decodes up to 64 big-endian bytes as a scalar reduced modulo `n`.
pub fn decode_scalar_reduced(bytes: &[u8]) -> Result<Scalar, JpakeError> {
    if bytes.is_empty() || bytes.len() > 2 * SCALAR_LEN {
        return Err(JpakeError::InvalidArgument(format!(
            "Invalid scalar encoding: must be 1 to 64 bytes, got {}",
            bytes.len()
        )));
    }
    let mut wide = [0u8; 2 * SCALAR_LEN];
    wide[2 * SCALAR_LEN - bytes.len()..].copy_from_slice(bytes);
    let hi = <Scalar as Reduce<U256>>::reduce_bytes(FieldBytes::from_slice(&wide[..SCALAR_LEN]));
    let lo = <Scalar as Reduce<U256>>::reduce_bytes(FieldBytes::from_slice(&wide[SCALAR_LEN..]));
    // value = hi * 2^256 + lo; fold 2^256 mod n into the high limb
    let carry = <Scalar as Reduce<U256>>::reduce(U256::MAX) + Scalar::ONE;
    Ok(hi * carry + lo)
}
