//! # lit-core
//!
//! Core types, reference tags, and query extractors for LitScout.
//!
//! This crate provides the foundational types shared across all LitScout crates:
//! - Entity structs for runs, raw articles, and stored search results
//! - `DateRange` with its ordering invariant and the configurable fallback policy
//! - Reference tag (`S00001`) and run identifier newtypes
//! - The date-range and fenced-block extractors used to refine a user query
//! - Cross-cutting error types
//!
//! Nothing in here performs I/O. Model calls, PubMed requests, and storage
//! live in their own crates and only exchange these types.

pub mod entities;
pub mod errors;
pub mod extract;
pub mod generation;
pub mod ids;
pub mod range;
