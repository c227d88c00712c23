// Adapters layer: concrete implementations for external systems.

pub mod http;
pub mod storage;

pub use http::{SigelClient, SIGEL_QUERY_URL};
pub use storage::LocalStorage;
