//! Crockford base32 generator

use async_trait::async_trait;

use crate::domain::value_objects::RequestContext;
use crate::errors::DomainResult;

use super::random_string;
use super::traits::TokenGenerator;

/// Crockford base32 symbols: digits and upper-case letters without I, L, O, U
pub const CROCKFORD_ALPHABET: &str = "0123456789ABCDEFGHJKMNPQRSTVWXYZ";

/// Generates fixed-length Crockford base32 codes
///
/// Sanitising upper-cases the input, reads `I`/`L` as `1` and `O` as `0`,
/// and drops everything else outside the alphabet (hyphens, spaces, `U`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrockfordGenerator {
    length: usize,
}

impl CrockfordGenerator {
    pub fn new(length: usize) -> Self {
        Self { length }
    }

    pub fn length(&self) -> usize {
        self.length
    }

    /// Canonicalise a user-typed code
    pub fn normalize(input: &str) -> String {
        input
            .chars()
            .map(|c| c.to_ascii_uppercase())
            .map(|c| match c {
                'I' | 'L' => '1',
                'O' => '0',
                other => other,
            })
            .filter(|c| CROCKFORD_ALPHABET.contains(*c))
            .collect()
    }
}

#[async_trait]
impl TokenGenerator for CrockfordGenerator {
    async fn generate(&self, _ctx: &RequestContext) -> DomainResult<String> {
        random_string(CROCKFORD_ALPHABET.as_bytes(), self.length)
    }

    async fn sanitize(&self, _ctx: &RequestContext, input: &str) -> DomainResult<String> {
        Ok(Self::normalize(input))
    }
}
