//! Core types, annotation model, and configuration for taglint.
//!
//! This crate provides the foundational data structures used across all taglint crates:
//! - [`types`]: The type graph arena, node identities, and graph errors
//! - [`tags`]: The annotation tree extracted from comment lines, plus stability levels
//! - [`document`]: JSON type graph documents and their loader
//! - [`config`]: Configuration loading from `taglint.json`

pub mod config;
pub mod document;
pub mod tags;
pub mod types;
