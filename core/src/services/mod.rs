//! Capabilities and the registry that drives them.

pub mod generator;
pub mod passwordless;
pub mod strategy;
pub mod transport;

// Re-export commonly used types
pub use generator::{CrockfordGenerator, PinGenerator, TokenGenerator};
pub use passwordless::Passwordless;
pub use strategy::{SimpleStrategy, Strategy};
pub use transport::{LogTransport, Transport};
