//! Core pipeline orchestration for filingdigest.
//!
//! This crate ties together the source table, document fetching, XML field
//! projection, and the output table into the end-to-end `run_digest` workflow.

pub mod document;
pub mod pipeline;

pub use document::{is_xml_source, summarize_document};
pub use pipeline::{DigestConfig, DigestResult, ProgressReporter, SilentProgress, run_digest};
