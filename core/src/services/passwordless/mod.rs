//! Strategy registry and the request/verify protocol
//!
//! `Passwordless` owns the named strategies and a token store. The
//! protocol itself lives in free functions so it can be driven with any
//! store/strategy pair:
//! - `request_token` - generate, send, then store
//! - `verify_token` - verify, then consume on success

mod protocol;
mod service;

#[cfg(test)]
mod tests;

pub use protocol::{request_token, verify_token};
pub use service::Passwordless;
