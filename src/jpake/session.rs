use std::fmt;
use std::mem;

use elliptic_curve::Group;
use k256::{ProjectivePoint, Scalar};
use log::error;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::common::hash::sha3_256;
use crate::common::random::random_nonzero_scalar;
use crate::crypto::point::{decode_point, decode_scalar_reduced, encode_point, GENERATOR};
use crate::crypto::schnorr::{SchnorrProof, PROOF_LEN};
use crate::error::JpakeError;
use crate::jpake::messages::{Round1Message, Round2Message};

/// Progress of a session through the protocol.
///
/// States advance strictly forward; `Failed` is terminal and is entered on
/// any error other than a mis-ordered call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum State {
    Initial,
    Round1Done,
    Round2Done,
    Round2Received,
    KeyDerived,
    Failed,
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            State::Initial => "Initial",
            State::Round1Done => "Round1Done",
            State::Round2Done => "Round2Done",
            State::Round2Received => "Round2Received",
            State::KeyDerived => "KeyDerived",
            State::Failed => "Failed",
        };
        f.write_str(name)
    }
}

// Each stage owns exactly the fields the next operation needs, so a
// "missing required data" condition cannot be represented. Ephemeral
// secrets are wiped when their stage is dropped.

#[derive(Zeroize, ZeroizeOnDrop)]
struct Round1Data {
    x1: Scalar,
    x2: Scalar,
    #[zeroize(skip)]
    g1: ProjectivePoint,
    #[zeroize(skip)]
    g2: ProjectivePoint,
}

#[derive(Zeroize, ZeroizeOnDrop)]
struct Round2Data {
    x2: Scalar,
    x2s: Scalar,
    #[zeroize(skip)]
    g1: ProjectivePoint,
    #[zeroize(skip)]
    g2: ProjectivePoint,
    #[zeroize(skip)]
    g3: ProjectivePoint,
    #[zeroize(skip)]
    g4: ProjectivePoint,
    peer_user_id: String,
}

#[derive(Zeroize, ZeroizeOnDrop)]
struct Round2ReceivedData {
    x2: Scalar,
    x2s: Scalar,
    #[zeroize(skip)]
    g1: ProjectivePoint,
    #[zeroize(skip)]
    g2: ProjectivePoint,
    #[zeroize(skip)]
    g3: ProjectivePoint,
    #[zeroize(skip)]
    g4: ProjectivePoint,
    #[zeroize(skip)]
    b: ProjectivePoint,
    #[zeroize(skip)]
    peer_zkp_x2s: [u8; PROOF_LEN],
    peer_user_id: String,
}

enum Stage {
    Initial,
    Round1Done(Round1Data),
    Round2Done(Round2Data),
    Round2Received(Round2ReceivedData),
    KeyDerived,
    Failed,
}

impl Stage {
    fn state(&self) -> State {
        match self {
            Stage::Initial => State::Initial,
            Stage::Round1Done(_) => State::Round1Done,
            Stage::Round2Done(_) => State::Round2Done,
            Stage::Round2Received(_) => State::Round2Received,
            Stage::KeyDerived => State::KeyDerived,
            Stage::Failed => State::Failed,
        }
    }
}

fn invalid_state(operation: &str, expected: State, actual: State) -> JpakeError {
    JpakeError::InvalidState(format!(
        "{} requires state {}, current state is {}",
        operation, expected, actual
    ))
}

/// One party's view of a J-PAKE exchange.
///
/// The local party is always "Alice": it emits a round 1 message, consumes
/// the peer's round 1 in `round2`, consumes the peer's round 2 in
/// `set_round2_from_peer` and finally derives the shared key. The session
/// performs no I/O; the caller transports the messages.
pub struct Session {
    user_id: String,
    other_info: Vec<String>,
    stage: Stage,
}

impl Session {
    /// Creates a session for `user_id` with no extra context bound into
    /// its proofs.
    pub fn new(user_id: &str) -> Result<Self, JpakeError> {
        Self::with_other_info(user_id, &[])
    }

    /// Creates a session whose proofs additionally bind the `other_info`
    /// strings, in order. Both parties must use the same list.
    pub fn with_other_info(user_id: &str, other_info: &[String]) -> Result<Self, JpakeError> {
        if user_id.is_empty() {
            return Err(JpakeError::InvalidArgument("Missing userId".to_string()));
        }
        if user_id.len() > 255 {
            return Err(JpakeError::InvalidArgument(
                "Invalid userId: must be at most 255 bytes".to_string(),
            ));
        }
        if other_info.iter().any(|info| info.len() > 255) {
            return Err(JpakeError::InvalidArgument(
                "Invalid otherInfo: entries must be at most 255 bytes".to_string(),
            ));
        }
        Ok(Self {
            user_id: user_id.to_string(),
            other_info: other_info.to_vec(),
            stage: Stage::Initial,
        })
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn state(&self) -> State {
        self.stage.state()
    }

    /// Emits the round 1 commitments `G1 = G*x1`, `G2 = G*x2` with proofs of
    /// knowledge of the fresh ephemeral scalars `x1, x2`.
    pub fn round1(&mut self) -> Result<Round1Message, JpakeError> {
        match mem::replace(&mut self.stage, Stage::Failed) {
            Stage::Initial => {}
            other => {
                let actual = other.state();
                self.stage = other;
                return Err(invalid_state("round1", State::Initial, actual));
            }
        }

        let x1 = random_nonzero_scalar();
        let x2 = random_nonzero_scalar();
        let g1 = GENERATOR * x1;
        let g2 = GENERATOR * x2;
        let zkp_x1 = SchnorrProof::prove(&self.user_id, &x1, &g1, &GENERATOR, &self.other_info)?
            .to_bytes()?;
        let zkp_x2 = SchnorrProof::prove(&self.user_id, &x2, &g2, &GENERATOR, &self.other_info)?
            .to_bytes()?;
        let message = Round1Message {
            g1: encode_point(&g1)?,
            g2: encode_point(&g2)?,
            zkp_x1,
            zkp_x2,
        };

        self.stage = Stage::Round1Done(Round1Data { x1, x2, g1, g2 });
        Ok(message)
    }

    /// Consumes the peer's round 1 message and emits the round 2 payload
    /// `A = (G1 + G3 + G4) * (x2 * s)` with its proof of knowledge.
    ///
    /// `s` is the password scalar as big-endian bytes (up to 64, reduced
    /// modulo `n`), normally the output of [`crate::derive_s`].
    pub fn round2(
        &mut self,
        peer_round1: &Round1Message,
        s: &[u8],
        peer_user_id: &str,
    ) -> Result<Round2Message, JpakeError> {
        let r1 = match mem::replace(&mut self.stage, Stage::Failed) {
            Stage::Round1Done(data) => data,
            other => {
                let actual = other.state();
                self.stage = other;
                return Err(invalid_state("round2", State::Round1Done, actual));
            }
        };

        if s.is_empty() || peer_user_id.is_empty() {
            return Err(JpakeError::InvalidArgument(
                "Missing required arguments for round 2".to_string(),
            ));
        }
        let g3 = decode_point(&peer_round1.g1).map_err(|_| {
            JpakeError::InvalidArgument(
                "Invalid points received: G1 or G2 is not a valid ProjectivePoint".to_string(),
            )
        })?;
        let g4 = decode_point(&peer_round1.g2).map_err(|_| {
            JpakeError::InvalidArgument(
                "Invalid points received: G1 or G2 is not a valid ProjectivePoint".to_string(),
            )
        })?;
        let s = decode_scalar_reduced(s)?;
        if s == Scalar::ZERO {
            return Err(JpakeError::InvalidArgument(
                "Invalid s: s MUST not be equal to 0 mod n".to_string(),
            ));
        }
        if peer_user_id == self.user_id {
            return Err(JpakeError::VerificationError(
                "Proof verification failed, userIds are equal.".to_string(),
            ));
        }
        let zkp_x1_ok =
            SchnorrProof::verify(peer_user_id, &g3, &peer_round1.zkp_x1, &GENERATOR, &self.other_info)?;
        let zkp_x2_ok =
            SchnorrProof::verify(peer_user_id, &g4, &peer_round1.zkp_x2, &GENERATOR, &self.other_info)?;
        if !zkp_x1_ok || !zkp_x2_ok {
            error!("round2: peer round 1 proof rejected");
            return Err(JpakeError::VerificationError(
                "ZKP verification failed".to_string(),
            ));
        }

        let x2s = r1.x2 * s;
        let generator = r1.g1 + g3 + g4;
        if bool::from(generator.is_identity()) {
            return Err(JpakeError::VerificationError(
                "Invalid point: The new generator is the point at infinity".to_string(),
            ));
        }
        let a = generator * x2s;
        let zkp_x2s =
            SchnorrProof::prove(&self.user_id, &x2s, &a, &generator, &self.other_info)?.to_bytes()?;
        let message = Round2Message {
            a: encode_point(&a)?,
            zkp_x2s,
        };

        self.stage = Stage::Round2Done(Round2Data {
            x2: r1.x2,
            x2s,
            g1: r1.g1,
            g2: r1.g2,
            g3,
            g4,
            peer_user_id: peer_user_id.to_string(),
        });
        Ok(message)
    }

    /// Stores the peer's round 2 payload `B` for the key derivation step.
    pub fn set_round2_from_peer(&mut self, peer_round2: &Round2Message) -> Result<(), JpakeError> {
        let mut r2 = match mem::replace(&mut self.stage, Stage::Failed) {
            Stage::Round2Done(data) => data,
            other => {
                let actual = other.state();
                self.stage = other;
                return Err(invalid_state(
                    "set_round2_from_peer",
                    State::Round2Done,
                    actual,
                ));
            }
        };

        let b = decode_point(&peer_round2.a).map_err(|_| {
            JpakeError::InvalidArgument(
                "Invalid point received: A is not a valid ProjectivePoint".to_string(),
            )
        })?;

        let peer_user_id = mem::take(&mut r2.peer_user_id);
        self.stage = Stage::Round2Received(Round2ReceivedData {
            x2: r2.x2,
            x2s: r2.x2s,
            g1: r2.g1,
            g2: r2.g2,
            g3: r2.g3,
            g4: r2.g4,
            b,
            peer_zkp_x2s: peer_round2.zkp_x2s,
            peer_user_id,
        });
        Ok(())
    }

    /// Verifies the peer's round 2 proof and derives the shared key
    /// `SHA3-256(compressed(Ka))` with `Ka = (B - G4 * x2s) * x2`.
    ///
    /// With both parties honest and sharing `s`, `Ka` equals the peer's
    /// value `(x1 + x3) * x2 * x4 * s * G`, which is symmetric in the two
    /// parties' secrets. A password mismatch yields different keys.
    pub fn derive_shared_key(&mut self) -> Result<[u8; 32], JpakeError> {
        let data = match mem::replace(&mut self.stage, Stage::Failed) {
            Stage::Round2Received(data) => data,
            other => {
                let actual = other.state();
                self.stage = other;
                return Err(invalid_state(
                    "derive_shared_key",
                    State::Round2Received,
                    actual,
                ));
            }
        };

        if bool::from(data.b.is_identity()) {
            return Err(JpakeError::VerificationError(
                "Invalid point: B is the point at infinity".to_string(),
            ));
        }
        // the combined generator the peer proved against, from our view
        let peer_generator = data.g1 + data.g3 + data.g2;
        if !SchnorrProof::verify(
            &data.peer_user_id,
            &data.b,
            &data.peer_zkp_x2s,
            &peer_generator,
            &self.other_info,
        )? {
            error!("derive_shared_key: peer round 2 proof rejected");
            return Err(JpakeError::VerificationError(
                "ZKP verification failed".to_string(),
            ));
        }

        let ka = (data.b - data.g4 * data.x2s) * data.x2;
        let key = sha3_256(&encode_point(&ka)?);

        self.stage = Stage::KeyDerived;
        Ok(key)
    }
}
