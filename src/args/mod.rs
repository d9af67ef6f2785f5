//! CLI argument types and parsing helpers.
mod cli;
mod defaults;
pub(crate) mod parsers;

#[cfg(test)]
mod test_support;

pub use cli::{Command, RunArgs};

pub(crate) use defaults::DEFAULT_CONFIG_FILES;
#[cfg(test)]
pub(crate) use defaults::{DEFAULT_BASE_URL, DEFAULT_USER_AGENT};
