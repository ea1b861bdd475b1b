//! Enforcement engine for taglint tag policies.
//!
//! Walks a type graph, extracts each declaration's tags, and applies an
//! ordered rule set:
//! - `alpha-beta-prefix`: `+k8s:alpha` / `+k8s:beta` only at the head of a chain, with a payload
//! - `validation-stability`: tags may not be less stable than their context allows
//! - `required-and-optional`: fields with (transitive) validation must declare requiredness
//!
//! Policy violations are collected as [`types::Diagnostic`]s; rule or
//! extraction failures abort the pass with a [`types::LintError`].

pub mod check;
pub mod engine;
pub mod registry;
pub mod rule;
pub mod rules;
pub mod transitive;
pub mod types;
