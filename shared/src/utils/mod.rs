//! Common utility functions

pub mod masking;
pub mod url;

// Re-export commonly used utilities
pub use masking::*;
pub use url::*;
