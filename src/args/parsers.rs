use std::time::Duration;

use super::types::BoundedCount;
use crate::error::ValidationError;

const MAX_PERCENT: u8 = 100;

pub(super) fn parse_bounded_count(s: &str) -> Result<BoundedCount, ValidationError> {
    s.parse::<BoundedCount>()
}

pub(crate) fn parse_percent(s: &str) -> Result<u8, ValidationError> {
    let value: u64 = s
        .trim()
        .parse()
        .map_err(|err| ValidationError::InvalidNumber { source: err })?;
    u8::try_from(value)
        .ok()
        .filter(|percent| *percent <= MAX_PERCENT)
        .ok_or(ValidationError::SuccessRateOutOfRange { value })
}

/// Parses `<number>[ms|s|m]`; a bare number means seconds.
pub(crate) fn parse_duration_arg(s: &str) -> Result<Duration, ValidationError> {
    parse_duration_with(s, false)
}

/// Like [`parse_duration_arg`] but allows zero, for delay bounds.
pub(crate) fn parse_delay_arg(s: &str) -> Result<Duration, ValidationError> {
    parse_duration_with(s, true)
}

fn parse_duration_with(s: &str, allow_zero: bool) -> Result<Duration, ValidationError> {
    let value = s.trim();
    if value.is_empty() {
        return Err(ValidationError::DurationEmpty);
    }

    let digits_len = value.chars().take_while(char::is_ascii_digit).count();
    if digits_len == 0 {
        return Err(ValidationError::InvalidDurationFormat {
            value: value.to_owned(),
        });
    }
    let (num_part, unit_part) = value.split_at(digits_len);
    let number: u64 = num_part
        .parse()
        .map_err(|err| ValidationError::InvalidDurationNumber {
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
                .ok_or(ValidationError::DurationOverflow)?;
            Duration::from_secs(secs)
        }
        _ => {
            return Err(ValidationError::InvalidDurationUnit {
                unit: unit.to_owned(),
            });
        }
    };

    if !allow_zero && duration.is_zero() {
        return Err(ValidationError::DurationZero);
    }

    Ok(duration)
}
