//! Value objects passed through the request/verify protocol.

pub mod request_context;
pub mod verify_outcome;

pub use request_context::RequestContext;
pub use verify_outcome::VerifyOutcome;
