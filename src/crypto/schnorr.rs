use k256::{ProjectivePoint, Scalar};
use log::error;

use crate::common::hash::{prepare_hash_data, sha3_256};
use crate::common::random::random_nonzero_scalar;
use crate::crypto::point::{
    decode_point, decode_scalar_reduced, encode_point, encode_scalar, POINT_LEN, SCALAR_LEN,
};
use crate::error::JpakeError;

/// Serialized proof length: `[VLen][V][rLen][r]`.
pub const PROOF_LEN: usize = 2 + POINT_LEN + SCALAR_LEN;

/// Non-interactive Schnorr proof of knowledge of `x` such that `gx = g * x`,
/// where `g` is an arbitrary generator.
///
/// The proof is bound to a prover identity and an optional list of context
/// strings through the Fiat-Shamir challenge, so it cannot be replayed by or
/// against a different party or session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SchnorrProof {
    v: ProjectivePoint,
    r: Scalar,
}

impl SchnorrProof {
    /// Creates a proof of knowledge of `x` with `gx = g * x`.
    ///
    /// Draws a fresh `v` in `[1, n)` and computes `V = g * v`,
    /// `c = H(gx, V, user_id, other_info)` and `r = (v - x * c) mod n`.
    /// The serialized proof is verified before being returned; a failure
    /// there means the underlying curve arithmetic is broken and surfaces
    /// as `Internal` rather than reaching the peer.
    pub fn prove(
        user_id: &str,
        x: &Scalar,
        gx: &ProjectivePoint,
        g: &ProjectivePoint,
        other_info: &[String],
    ) -> Result<Self, JpakeError> {
        let v = random_nonzero_scalar();
        let big_v = g * &v;
        let c = challenge(user_id, gx, &big_v, other_info)?;
        let r = v - c * x;
        let proof = Self { v: big_v, r };
        if !Self::verify(user_id, gx, &proof.to_bytes()?, g, other_info)? {
            return Err(JpakeError::Internal("Proof self-check failed".to_string()));
        }
        Ok(proof)
    }

    /// Verifies a serialized proof that the peer knows `x` with `gx = g * x`.
    ///
    /// Malformed framing raises `VerificationError`. A `V` that does not
    /// decode as a curve point yields `Ok(false)` instead, so callers report
    /// a uniform verification failure for off-curve and algebraically
    /// invalid proofs alike.
    pub fn verify(
        peer_user_id: &str,
        gx: &ProjectivePoint,
        proof: &[u8],
        g: &ProjectivePoint,
        other_info: &[String],
    ) -> Result<bool, JpakeError> {
        if proof.len() != PROOF_LEN {
            return Err(JpakeError::VerificationError(
                "Invalid proof, must be 33 + 32 + 2 bytes long".to_string(),
            ));
        }
        if proof[0] as usize != POINT_LEN || proof[1 + POINT_LEN] as usize != SCALAR_LEN {
            return Err(JpakeError::VerificationError(
                "Invalid proof, V must be 33 bytes and r must be 32 bytes".to_string(),
            ));
        }
        let mut v_bytes = [0u8; POINT_LEN];
        v_bytes.copy_from_slice(&proof[1..1 + POINT_LEN]);
        let v = match decode_point(&v_bytes) {
            Ok(point) => point,
            Err(_) => {
                error!("schnorr verify: V does not decode as a curve point");
                return Ok(false);
            }
        };
        let r = decode_scalar_reduced(&proof[2 + POINT_LEN..])?;
        let c = challenge(peer_user_id, gx, &v, other_info)?;
        // V == g*r + gx*c, compared in affine coordinates so that distinct
        // projective representations of the same point test equal
        let expected = g * &r + gx * &c;
        Ok(v.to_affine() == expected.to_affine())
    }

    /// Serializes the proof as `[33][V compressed][32][r big-endian]`.
    pub fn to_bytes(&self) -> Result<[u8; PROOF_LEN], JpakeError> {
        let mut out = [0u8; PROOF_LEN];
        out[0] = POINT_LEN as u8;
        out[1..1 + POINT_LEN].copy_from_slice(&encode_point(&self.v)?);
        out[1 + POINT_LEN] = SCALAR_LEN as u8;
        out[2 + POINT_LEN..].copy_from_slice(&encode_scalar(&self.r));
        Ok(out)
    }
}

/// Fiat-Shamir challenge `c = SHA3-256(gx || V || user_id || other_info) mod n`,
/// every field prefixed with its one-byte length, in that exact order.
fn challenge(
    user_id: &str,
    gx: &ProjectivePoint,
    v: &ProjectivePoint,
    other_info: &[String],
) -> Result<Scalar, JpakeError> {
    let gx_bytes = encode_point(gx)?;
    let v_bytes = encode_point(v)?;
    let mut fields: Vec<&[u8]> = Vec::with_capacity(3 + other_info.len());
    fields.push(&gx_bytes);
    fields.push(&v_bytes);
    fields.push(user_id.as_bytes());
    for info in other_info {
        fields.push(info.as_bytes());
    }
    let data = prepare_hash_data(&fields)?;
    decode_scalar_reduced(&sha3_256(&data))
}
