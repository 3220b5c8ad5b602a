//! Infrastructure layer: reference store implementations and external-service
//! adapters.
//!
//! The stores here are in-memory (`RwLock` + `HashMap`), intended for
//! tests/dev and the reference deployment. Production persistence is an
//! external collaborator behind the same traits; the single write lock is
//! this implementation's transactional boundary, so multi-row operations are
//! atomic by construction.

pub mod stores;
pub mod token;


pub use stores::{InMemoryCatalogStore, InMemoryGrantStore};
pub use token::UnavailableTokenProvider;
