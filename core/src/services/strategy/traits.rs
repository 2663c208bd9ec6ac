//! Strategy capability trait

use chrono::Duration;

use crate::domain::value_objects::RequestContext;
use crate::services::generator::TokenGenerator;
use crate::services::transport::Transport;

/// Everything needed to run one sign-in flow
///
/// A strategy generates and sanitises tokens, delivers them, decides how
/// long they live and whether it may be used for a given request.
pub trait Strategy: TokenGenerator + Transport {
    /// Lifetime of tokens issued by this strategy
    fn ttl(&self, ctx: &RequestContext) -> Duration;

    /// Whether this strategy may serve the request
    fn valid(&self, _ctx: &RequestContext) -> bool {
        true
    }
}
