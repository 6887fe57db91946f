use crate::crypto::point::POINT_LEN;
use crate::crypto::schnorr::PROOF_LEN;
use crate::error::JpakeError;

/// Round 1 commitments: `G1 = G*x1`, `G2 = G*x2` and the proofs of knowledge
/// of `x1` and `x2`.
///
/// Point and proof fields are carried as opaque bytes; all semantic
/// validation happens when the peer session consumes the message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Round1Message {
    pub g1: [u8; POINT_LEN],
    pub g2: [u8; POINT_LEN],
    pub zkp_x1: [u8; PROOF_LEN],
    pub zkp_x2: [u8; PROOF_LEN],
}

impl Round1Message {
    /// Serialized length of `G1 || G2 || ZKPx1 || ZKPx2`.
    pub const LEN: usize = 2 * POINT_LEN + 2 * PROOF_LEN;

    pub fn to_bytes(&self) -> [u8; Self::LEN] {
        let mut out = [0u8; Self::LEN];
        out[..POINT_LEN].copy_from_slice(&self.g1);
        out[POINT_LEN..2 * POINT_LEN].copy_from_slice(&self.g2);
        out[2 * POINT_LEN..2 * POINT_LEN + PROOF_LEN].copy_from_slice(&self.zkp_x1);
        out[2 * POINT_LEN + PROOF_LEN..].copy_from_slice(&self.zkp_x2);
        out
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, JpakeError> {
        if bytes.len() != Self::LEN {
            return Err(JpakeError::InvalidArgument(format!(
                "Invalid round 1 message: must be {} bytes, got {}",
                Self::LEN,
                bytes.len()
            )));
        }
        let mut msg = Self {
            g1: [0u8; POINT_LEN],
            g2: [0u8; POINT_LEN],
            zkp_x1: [0u8; PROOF_LEN],
            zkp_x2: [0u8; PROOF_LEN],
        };
        msg.g1.copy_from_slice(&bytes[..POINT_LEN]);
        msg.g2.copy_from_slice(&bytes[POINT_LEN..2 * POINT_LEN]);
        msg.zkp_x1
            .copy_from_slice(&bytes[2 * POINT_LEN..2 * POINT_LEN + PROOF_LEN]);
        msg.zkp_x2.copy_from_slice(&bytes[2 * POINT_LEN + PROOF_LEN..]);
        Ok(msg)
    }
}

/// Round 2 payload: `A = (G1 + G3 + G4) * x2s` and the proof of knowledge of
/// `x2s` under that combined generator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Round2Message {
    pub a: [u8; POINT_LEN],
    pub zkp_x2s: [u8; PROOF_LEN],
}

impl Round2Message {
    /// Serialized length of `A || ZKPx2s`.
    pub const LEN: usize = POINT_LEN + PROOF_LEN;

    pub fn to_bytes(&self) -> [u8; Self::LEN] {
        let mut out = [0u8; Self::LEN];
        out[..POINT_LEN].copy_from_slice(&self.a);
        out[POINT_LEN..].copy_from_slice(&self.zkp_x2s);
        out
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, JpakeError> {
        if bytes.len() != Self::LEN {
            return Err(JpakeError::InvalidArgument(format!(
                "Invalid round 2 message: must be {} bytes, got {}",
                Self::LEN,
                bytes.len()
            )));
        }
        let mut msg = Self {
            a: [0u8; POINT_LEN],
            zkp_x2s: [0u8; PROOF_LEN],
        };
        msg.a.copy_from_slice(&bytes[..POINT_LEN]);
        msg.zkp_x2s.copy_from_slice(&bytes[POINT_LEN..]);
        Ok(msg)
    }
}

/// Second message of the three-pass schedule: the responder's round 1 and
/// round 2 outputs bundled into one wire message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pass2Message {
    pub round1: Round1Message,
    pub round2: Round2Message,
}

impl Pass2Message {
    /// Serialized length of the bundled round 1 and round 2 messages.
    pub const LEN: usize = Round1Message::LEN + Round2Message::LEN;

    pub fn to_bytes(&self) -> [u8; Self::LEN] {
        let mut out = [0u8; Self::LEN];
        out[..Round1Message::LEN].copy_from_slice(&self.round1.to_bytes());
        out[Round1Message::LEN..].copy_from_slice(&self.round2.to_bytes());
        out
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, JpakeError> {
        if bytes.len() != Self::LEN {
            return Err(JpakeError::InvalidArgument(format!(
                "Invalid pass 2 message: must be {} bytes, got {}",
                Self::LEN,
                bytes.len()
            )));
        }
        Ok(Self {
            round1: Round1Message::from_bytes(&bytes[..Round1Message::LEN])?,
            round2: Round2Message::from_bytes(&bytes[Round1Message::LEN..])?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_round1() -> Round1Message {
        Round1Message {
            g1: [0x02; POINT_LEN],
            g2: [0x03; POINT_LEN],
            zkp_x1: [0x21; PROOF_LEN],
            zkp_x2: [0x20; PROOF_LEN],
        }
    }

    #[test]
    fn test_round1_roundtrip() {
        let msg = sample_round1();
        let bytes = msg.to_bytes();
        assert_eq!(bytes.len(), 200);
        assert_eq!(Round1Message::from_bytes(&bytes).unwrap(), msg);
    }

    #[test]
    fn test_round2_roundtrip() {
        let msg = Round2Message {
            a: [0x02; POINT_LEN],
            zkp_x2s: [0x07; PROOF_LEN],
        };
        let bytes = msg.to_bytes();
        assert_eq!(bytes.len(), 100);
        assert_eq!(Round2Message::from_bytes(&bytes).unwrap(), msg);
    }

    #[test]
    fn test_pass2_roundtrip() {
        let msg = Pass2Message {
            round1: sample_round1(),
            round2: Round2Message {
                a: [0x03; POINT_LEN],
                zkp_x2s: [0x01; PROOF_LEN],
            },
        };
        let bytes = msg.to_bytes();
        assert_eq!(bytes.len(), 300);
        assert_eq!(Pass2Message::from_bytes(&bytes).unwrap(), msg);
    }

    #[test]
    fn test_wrong_lengths_rejected() {
        assert!(Round1Message::from_bytes(&[0u8; 199]).is_err());
        assert!(Round1Message::from_bytes(&[0u8; 201]).is_err());
        assert!(Round2Message::from_bytes(&[0u8; 99]).is_err());
        assert!(Pass2Message::from_bytes(&[0u8; 301]).is_err());
    }
}
