//! Page acquisition — the only part of the pipeline that touches the network.

pub mod page_fetcher;

pub use page_fetcher::{FetchError, HttpPageFetcher, Offline, PageSource};
