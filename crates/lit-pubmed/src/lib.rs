//! # lit-pubmed
//!
//! Literature search for LitScout over the NCBI E-utilities:
//! - `esearch` resolves a boolean strategy and publication-date window to PMIDs
//! - `efetch` pulls the matching records as XML, in batches
//!
//! Records come back as [`RawArticle`]s with gaps left empty; sentinel
//! substitution happens when the store normalizes them.

mod client;
pub mod efetch;
mod error;
pub mod esearch;
mod http;

use std::future::Future;

use lit_core::entities::RawArticle;

pub use client::PubMedClient;
pub use error::PubMedError;

/// A literature-database collaborator.
pub trait LiteratureSearch: Send + Sync {
    /// Run `strategy` restricted to publications from `min_year` to `max_year`.
    fn search(
        &self,
        strategy: &str,
        min_year: i32,
        max_year: i32,
    ) -> impl Future<Output = Result<Vec<RawArticle>, PubMedError>> + Send;
}
