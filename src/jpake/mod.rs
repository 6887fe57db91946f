pub mod messages;
pub mod session;
pub mod three_pass;

pub use messages::{Pass2Message, Round1Message, Round2Message};
pub use session::{Session, State};
pub use three_pass::ThreePassSession;
