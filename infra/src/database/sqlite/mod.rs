//! SQLite implementations of the core repository traits

mod token_store_impl;

pub use token_store_impl::SqliteTokenStore;
