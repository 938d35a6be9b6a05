pub mod client;
pub mod errors;
pub mod pipeline;
pub mod types;

pub use client::{Fetcher, fetch, get_client};
pub use errors::FetchError;
pub use types::PageResponse;
