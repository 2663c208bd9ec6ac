//! Result of a one-time token verification.

use crate::errors::DomainError;

/// Outcome of verifying a user-supplied token
#[derive(Debug)]
pub enum VerifyOutcome {
    /// A token is stored for the user but the supplied one does not match
    Invalid,

    /// The token matched and has been consumed
    Valid,

    /// The token matched but removing it failed
    ///
    /// The user is authenticated, but the token may still verify again
    /// until it expires. Callers should log or alert on this state.
    ValidUnconsumed(DomainError),
}

impl VerifyOutcome {
    /// Whether the supplied token matched
    pub fn is_valid(&self) -> bool {
        !matches!(self, VerifyOutcome::Invalid)
    }

    /// Whether the token is known to be unusable from now on
    pub fn is_consumed(&self) -> bool {
        matches!(self, VerifyOutcome::Valid)
    }

    /// Error raised while consuming a matched token
    pub fn consume_error(&self) -> Option<&DomainError> {
        match self {
            VerifyOutcome::ValidUnconsumed(error) => Some(error),
            _ => None,
        }
    }
}
