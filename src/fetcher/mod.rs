pub mod client;
pub mod errors;
pub mod types;

pub use client::{HttpFetcher, PageFetcher, build_client};
pub use errors::FetchError;
pub use types::{BodyReader, FetchedPage};

#[cfg(test)]
pub use client::MockPageFetcher;
