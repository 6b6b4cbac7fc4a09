//! docsort - keyword-based document classification and filing.
//!
//! Text is extracted from each document by a format-specific extractor,
//! scored against a set of keyword rules, and the file is copied or moved
//! into an output directory named after the winning document type.

pub mod classify;
pub mod cli;
pub mod config;
pub mod extract;
pub mod models;
pub mod pipeline;
pub mod rules;
