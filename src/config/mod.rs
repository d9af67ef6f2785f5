//! Configuration loading and application.
pub(crate) mod apply;
mod loader;
mod parse;
pub mod types;

#[cfg(test)]
mod test_support;
#[cfg(test)]
mod tests;

pub use apply::apply_config;
pub use loader::load_config;

pub(crate) use parse::{parse_base_url, parse_duration_value};
