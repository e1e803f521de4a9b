//! Image post fetcher for Korean entertainment sites.
//!
//! [`fetcher::Fetcher`] runs the whole pipeline; the other modules are its
//! stages and can be used on their own.

pub mod config;
pub mod downloader;
pub mod error;
pub mod extract;
pub mod fetcher;
pub mod http;
pub mod logging;
pub mod retrieve;
pub mod site;
pub mod url_model;

pub use error::FetchError;
pub use fetcher::{FetchEvent, Fetcher, RunSummary};
