//! Domain entities representing persisted records.

pub mod session;


pub use session::{expiry_after, format_timestamp, parse_timestamp, Session};
