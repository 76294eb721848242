//! Entity structs for LitScout domain objects.

mod article;
mod result;
mod run;

pub use article::{
    NO_ABSTRACT, NO_AUTHORS, NO_DOI, NO_LINK, NO_PMID, NO_TITLE, NO_YEAR, NormalizedArticle,
    RawArticle,
};
pub use result::{ResultLink, SearchResult};
pub use run::{NewRun, RunMetadata};
