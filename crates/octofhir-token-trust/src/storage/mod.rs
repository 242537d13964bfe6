//! Status provider traits for subjects and clients.
//!
//! This module defines the capabilities the validator consults:
//!
//! - [`SubjectStatusProvider`] - is the end user still active
//! - [`ClientStatusProvider`] - is the client still registered and enabled
//!
//! # Implementations
//!
//! - [`memory`] - in-memory stores for embedding and tests
//! - [`caching`] - decorators that cache lookups of another provider
//!
//! Durable stores are provided by backend crates.

pub mod caching;
pub mod client;
pub mod memory;
pub mod subject;

pub use caching::{CachingClientStatusProvider, CachingSubjectStatusProvider};
pub use client::ClientStatusProvider;
pub use memory::{InMemoryClientStore, InMemorySubjectStore};
pub use subject::SubjectStatusProvider;
