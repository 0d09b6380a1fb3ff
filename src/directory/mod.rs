//! Directory client and the fetch-result cell it feeds.

mod client;
mod error;
mod store;

pub use client::*;
pub use error::*;
pub use store::*;
