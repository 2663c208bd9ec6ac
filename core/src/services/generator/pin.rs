//! Numeric PIN generator

use async_trait::async_trait;

use crate::domain::value_objects::RequestContext;
use crate::errors::DomainResult;

use super::random_string;
use super::traits::TokenGenerator;

const DIGITS: &[u8] = b"0123456789";

/// Generates numeric codes of a fixed length, leading zeros included
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinGenerator {
    length: usize,
}

impl PinGenerator {
    pub fn new(length: usize) -> Self {
        Self { length }
    }
}

impl Default for PinGenerator {
    fn default() -> Self {
        Self::new(6)
    }
}

#[async_trait]
impl TokenGenerator for PinGenerator {
    async fn generate(&self, _ctx: &RequestContext) -> DomainResult<String> {
        random_string(DIGITS, self.length)
    }

    async fn sanitize(&self, _ctx: &RequestContext, input: &str) -> DomainResult<String> {
        Ok(input.chars().filter(char::is_ascii_digit).collect())
    }
}
