//! Core library for the `hubcheck` CLI.
//!
//! `hubcheck` runs Gherkin acceptance scenarios against a GitHub-compatible
//! REST API: feature files are parsed by [`gherkin`], each step is matched to
//! a definition in [`steps`], requests go through the [`http`] client, and the
//! [`runner`] records outcomes, prints a summary and optionally writes a JSON
//! report.
pub mod args;
pub mod config;
pub mod error;
pub mod gherkin;
pub mod http;
pub mod runner;
pub mod steps;

mod entry;
mod logger;

pub use entry::run;
