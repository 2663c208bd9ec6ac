//! Strategies: a named generator, transport, TTL and validity check
//!
//! `SimpleStrategy` covers the common case of pairing an existing
//! generator with an existing transport. Anything more specialised
//! implements [`Strategy`] directly.

mod simple;
mod traits;

pub use simple::SimpleStrategy;
pub use traits::Strategy;
