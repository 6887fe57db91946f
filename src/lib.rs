//! Password Authenticated Key Exchange by Juggling (J-PAKE, RFC 8236) over
//! secp256k1, using the non-interactive Schnorr proof of RFC 8235.
//!
//! Two parties sharing a low-entropy password each run a [`Session`] (or a
//! [`ThreePassSession`] for strictly alternating transports), exchange the
//! round messages and derive the same high-entropy 32-byte key. An attacker
//! on the wire learns nothing beyond one online password guess per session.

pub mod common;
pub mod crypto;
pub mod error;
pub mod jpake;

pub use crypto::password::derive_s;
pub use error::JpakeError;
pub use jpake::{Pass2Message, Round1Message, Round2Message, Session, State, ThreePassSession};
