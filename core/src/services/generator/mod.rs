//! Token generators
//!
//! A generator produces the secret handed to the user and canonicalises
//! what the user types back before it is compared:
//! - `CrockfordGenerator` - Crockford base32 codes safe to copy by hand
//! - `PinGenerator` - numeric codes for keypad entry

mod crockford;
mod pin;
mod traits;


pub use crockford::{CrockfordGenerator, CROCKFORD_ALPHABET};
pub use pin::PinGenerator;
pub use traits::TokenGenerator;

use rand::{rngs::OsRng, Rng};

use crate::errors::{DomainError, DomainResult};

/// Draw `length` characters uniformly from `alphabet` using the OS CSPRNG
pub(crate) fn random_string(alphabet: &[u8], length: usize) -> DomainResult<String> {
    if length == 0 {
        return Err(DomainError::generation("token length must be at least 1"));
    }
    if alphabet.is_empty() {
        return Err(DomainError::generation("alphabet is empty"));
    }

    let mut rng = OsRng;
    let token = (0..length)
        .map(|_| char::from(alphabet[rng.gen_range(0..alphabet.len())]))
        .collect();

    Ok(token)
}
