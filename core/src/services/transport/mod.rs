//! Token delivery channels

mod logging;
mod traits;

pub use logging::{LogTransport, MessageFn};
pub use traits::Transport;
