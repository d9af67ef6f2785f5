pub(crate) const DEFAULT_USER_AGENT: &str = concat!("hubcheck/", env!("CARGO_PKG_VERSION"));

pub(crate) const DEFAULT_BASE_URL: &str = "https://api.github.com";

pub(super) const DEFAULT_FEATURES_PATH: &str = "features";

pub(super) const DEFAULT_TIMEOUT: &str = "30s";

/// Config files picked up from the working directory when `--config` is absent.
pub(crate) const DEFAULT_CONFIG_FILES: [&str; 2] = ["hubcheck.toml", "hubcheck.json"];
