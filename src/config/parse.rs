use std::time::Duration;

use url::Url;

use crate::error::ConfigError;

pub(crate) fn parse_duration_value(value: &str) -> Result<Duration, ConfigError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ConfigError::DurationEmpty);
    }

    let mut digits_len = 0usize;
    for ch in value.chars() {
        if ch.is_ascii_digit() {
            digits_len = digits_len.saturating_add(1);
        } else {
            break;
        }
    }
    if digits_len == 0 {
        return Err(ConfigError::InvalidDurationFormat {
            value: value.to_owned(),
        });
    }
    let (num_part, unit_part) = value.split_at(digits_len);
    let number: u64 = num_part
        .parse()
        .map_err(|err| ConfigError::InvalidDurationNumber {
            value: value.to_owned(),
            source: err,
        })?;

    let unit = if unit_part.is_empty() { "s" } else { unit_part };
    let duration = match unit {
        "ms" => Duration::from_millis(number),
        "s" => Duration::from_secs(number),
        "m" => {
            let secs = number
                .checked_mul(60)
                .ok_or(ConfigError::DurationOverflow)?;
            Duration::from_secs(secs)
        }
        "h" => {
            let secs = number
                .checked_mul(60)
                .and_then(|seconds| seconds.checked_mul(60))
                .ok_or(ConfigError::DurationOverflow)?;
            Duration::from_secs(secs)
        }
        _ => {
            return Err(ConfigError::InvalidDurationUnit {
                unit: unit.to_owned(),
            });
        }
    };

    if duration.as_millis() == 0 {
        return Err(ConfigError::DurationZero);
    }

    Ok(duration)
}

/// Accepts absolute `http`/`https` URLs with a host.
pub(crate) fn parse_base_url(value: &str) -> Result<Url, ConfigError> {
    let trimmed = value.trim();
    let url = Url::parse(trimmed).map_err(|err| ConfigError::InvalidBaseUrl {
        url: trimmed.to_owned(),
        source: err,
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::BaseUrlScheme {
            url: trimmed.to_owned(),
        });
    }
    if url.host_str().is_none_or(str::is_empty) {
        return Err(ConfigError::BaseUrlMissingHost {
            url: trimmed.to_owned(),
        });
    }
    Ok(url)
}
