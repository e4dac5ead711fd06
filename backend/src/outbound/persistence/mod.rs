//! Persistence adapters implementing the domain store ports.
//!
//! The document store itself is an external collaborator; the in-memory
//! adapters here are the reference implementation used by the server and by
//! tests. They honour the same contract a database-backed adapter would:
//! unique-constrained account insert and per-document atomicity.

mod memory;

pub use memory::{MemoryAccountStore, MemoryTripStore};
