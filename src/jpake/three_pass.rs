use crate::error::JpakeError;
use crate::jpake::messages::{Pass2Message, Round1Message, Round2Message};
use crate::jpake::session::{Session, State};

/// Serializes the symmetric two-round exchange into a strict back-and-forth
/// of three wire messages:
///
/// 1. initiator `pass1` -> responder
/// 2. responder `pass2` -> initiator (round 1 and round 2 bundled)
/// 3. initiator `pass3` -> responder
///
/// after which both sides call `derive_shared_key`. The adapter is a pure
/// scheduling wrapper over [`Session`]; no cryptographic material is added
/// or removed.
pub struct ThreePassSession {
    session: Session,
}

impl ThreePassSession {
    pub fn new(user_id: &str) -> Result<Self, JpakeError> {
        Ok(Self {
            session: Session::new(user_id)?,
        })
    }

    pub fn with_other_info(user_id: &str, other_info: &[String]) -> Result<Self, JpakeError> {
        Ok(Self {
            session: Session::with_other_info(user_id, other_info)?,
        })
    }

    pub fn user_id(&self) -> &str {
        self.session.user_id()
    }

    pub fn state(&self) -> State {
        self.session.state()
    }

    /// Initiator: emits the opening round 1 message.
    pub fn pass1(&mut self) -> Result<Round1Message, JpakeError> {
        self.session.round1()
    }

    /// Responder: consumes the initiator's `pass1` and answers with its own
    /// round 1 and round 2 in a single message.
    pub fn pass2(
        &mut self,
        peer_pass1: &Round1Message,
        s: &[u8],
        peer_user_id: &str,
    ) -> Result<Pass2Message, JpakeError> {
        let round1 = self.session.round1()?;
        let round2 = self.session.round2(peer_pass1, s, peer_user_id)?;
        Ok(Pass2Message { round1, round2 })
    }

    /// Initiator: consumes the responder's `pass2` and emits its own round 2.
    pub fn pass3(
        &mut self,
        peer_pass2: &Pass2Message,
        s: &[u8],
        peer_user_id: &str,
    ) -> Result<Round2Message, JpakeError> {
        let round2 = self.session.round2(&peer_pass2.round1, s, peer_user_id)?;
        self.session.set_round2_from_peer(&peer_pass2.round2)?;
        Ok(round2)
    }

    /// Responder: consumes the initiator's `pass3`.
    pub fn receive_pass3(&mut self, peer_pass3: &Round2Message) -> Result<(), JpakeError> {
        self.session.set_round2_from_peer(peer_pass3)
    }

    pub fn derive_shared_key(&mut self) -> Result<[u8; 32], JpakeError> {
        self.session.derive_shared_key()
    }
}
