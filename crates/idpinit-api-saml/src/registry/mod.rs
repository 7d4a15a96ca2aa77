//! Collaborators that resolve service registrations and their metadata
//!
//! The pipeline only sees the [`ServiceRegistry`] and [`MetadataResolver`]
//! traits. The in-memory registry and the caching resolver are the
//! implementations the server wires in by default.

pub mod metadata_resolver;
pub mod service_registry;

pub use metadata_resolver::{CachingMetadataResolver, MetadataResolver};
pub use service_registry::{InMemoryServiceRegistry, ServiceRegistry};
