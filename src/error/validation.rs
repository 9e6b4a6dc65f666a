use thiserror::Error;

use crate::inputs::TargetKind;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Duration must not be empty.")]
    DurationEmpty,
    #[error("Invalid duration '{value}'.")]
    InvalidDurationFormat { value: String },
    #[error("Invalid duration '{value}': {source}")]
    InvalidDurationNumber {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },
    #[error("Duration overflow.")]
    DurationOverflow,
    #[error("Invalid duration unit '{unit}'.")]
    InvalidDurationUnit { unit: String },
    #[error("Duration must be > 0.")]
    DurationZero,
    #[error("Invalid value: {source}")]
    InvalidNumber {
        #[source]
        source: std::num::ParseIntError,
    },
    #[error("Value must be between {min} and {max}, got {value}.")]
    CountOutOfRange { value: u64, min: u64, max: u64 },
    #[error("Success rate must be a percentage between 0 and 100, got {value}.")]
    SuccessRateOutOfRange { value: u64 },
    #[error("delay-min must be <= delay-max.")]
    DelayRangeInverted,
    #[error("Target URL must not be empty.")]
    TargetEmpty,
    #[error("Invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("Unsupported URL scheme '{scheme}' in '{url}'. Use http or https.")]
    UnsupportedScheme { url: String, scheme: String },
    #[error("URL '{url}' is missing host.")]
    UrlMissingHost { url: String },
    #[error("URL '{url}' does not look like a {expected} target.")]
    KindMismatch { url: String, expected: TargetKind },
    #[error("Unsupported proxy '{value}'. Expected http://, https://, socks5:// or socks5h://.")]
    UnsupportedProxyScheme { value: String },
    #[error("Failed to build runtime: {source}")]
    RuntimeBuildFailed {
        #[source]
        source: std::io::Error,
    },
    #[cfg(test)]
    #[error("Test expectation failed: {message}")]
    TestExpectation { message: &'static str },
    #[cfg(test)]
    #[error("Test expectation failed: {message}: {value}")]
    TestExpectationValue {
        message: &'static str,
        value: String,
    },
}
