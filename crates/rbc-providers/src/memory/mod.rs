//! In-memory store provider
//!
//! | Type | Role |
//! |------|------|
//! | [`InMemoryStore`] | Shared key/list storage with expiry and blocking pop |
//! | [`InMemoryPool`] | `ConnectionPool` with reuse, discard and fault injection |
//! | [`InMemoryConnection`] | `StoreConnection` handed out by the pool |

mod pool;
mod store;

pub use pool::{Fault, InMemoryConnection, InMemoryPool};
pub use store::InMemoryStore;
