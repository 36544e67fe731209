//! ISO-8601 durations as used by the REST service.
//!
//! The service exchanges time spans as ISO-8601 duration strings:
//!
//! ```text
//! 300 seconds  ->  "PT5M"
//! 6 hours      ->  "PT6H"
//! 0 seconds    ->  "PT0S"
//! 1 day 2 min  ->  "P1DT2M"
//! ```
//!
//! Only fixed-length units are supported.  Years and months have no fixed
//! length in seconds and are rejected.

use thiserror::Error;

/// Errors raised while parsing an ISO-8601 duration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DurationError {
    #[error("invalid ISO-8601 duration '{0}': must start with 'P'")]
    MissingPrefix(String),

    #[error("invalid ISO-8601 duration '{value}': unexpected '{found}'")]
    UnexpectedCharacter { value: String, found: char },

    #[error("invalid ISO-8601 duration '{0}': years and months are not supported")]
    CalendarUnit(String),

    #[error("invalid ISO-8601 duration '{0}': no components")]
    Empty(String),

    #[error("ISO-8601 duration '{0}' overflows")]
    Overflow(String),
}

const MINUTE: u64 = 60;
const HOUR: u64 = 60 * MINUTE;
const DAY: u64 = 24 * HOUR;
const WEEK: u64 = 7 * DAY;

/// Formats a number of seconds as an ISO-8601 duration, omitting zero parts.
pub fn format_seconds(total: u64) -> String {
    if total == 0 {
        return "PT0S".to_string();
    }

    let days = total / DAY;
    let hours = (total % DAY) / HOUR;
    let minutes = (total % HOUR) / MINUTE;
    let seconds = total % MINUTE;

    let mut out = String::from("P");
    if days > 0 {
        out.push_str(&format!("{days}D"));
    }
    if hours > 0 || minutes > 0 || seconds > 0 {
        out.push('T');
        if hours > 0 {
            out.push_str(&format!("{hours}H"));
        }
        if minutes > 0 {
            out.push_str(&format!("{minutes}M"));
        }
        if seconds > 0 {
            out.push_str(&format!("{seconds}S"));
        }
    }
    out
}

/// Formats a number of minutes as an ISO-8601 duration.
pub fn format_minutes(minutes: u32) -> String {
    format_seconds(u64::from(minutes) * MINUTE)
}

/// Parses an ISO-8601 duration into whole seconds.
///
/// Fractional seconds are truncated.  Week (`W`), day (`D`), hour (`H`),
/// minute (`M` after `T`) and second (`S`) designators are accepted.
///
/// # Errors
///
/// Returns [`DurationError`] for malformed input, calendar units (`Y`, or `M`
/// before `T`), or values that overflow `u64`.
pub fn parse_seconds(value: &str) -> Result<u64, DurationError> {
    let text = value.trim();
    let body = text
        .strip_prefix('P')
        .or_else(|| text.strip_prefix('p'))
        .ok_or_else(|| DurationError::MissingPrefix(value.to_string()))?;

    let mut total: u64 = 0;
    let mut in_time = false;
    let mut number = String::new();
    let mut components = 0usize;

    for c in body.chars() {
        match c.to_ascii_uppercase() {
            'T' if !in_time && number.is_empty() => in_time = true,
            d if d.is_ascii_digit() || d == '.' || d == ',' => number.push(d),
            unit @ ('W' | 'D' | 'H' | 'M' | 'S' | 'Y') => {
                if number.is_empty() {
                    return Err(DurationError::UnexpectedCharacter {
                        value: value.to_string(),
                        found: c,
                    });
                }
                let scale = match (unit, in_time) {
                    ('Y', _) | ('M', false) => {
                        return Err(DurationError::CalendarUnit(value.to_string()))
                    }
                    ('W', false) => WEEK,
                    ('D', false) => DAY,
                    ('H', true) => HOUR,
                    ('M', true) => MINUTE,
                    ('S', true) => 1,
                    _ => {
                        return Err(DurationError::UnexpectedCharacter {
                            value: value.to_string(),
                            found: c,
                        })
                    }
                };
                let amount = whole_part(&number, value)?;
                let part = amount
                    .checked_mul(scale)
                    .ok_or_else(|| DurationError::Overflow(value.to_string()))?;
                total = total
                    .checked_add(part)
                    .ok_or_else(|| DurationError::Overflow(value.to_string()))?;
                number.clear();
                components += 1;
            }
            _ => {
                return Err(DurationError::UnexpectedCharacter {
                    value: value.to_string(),
                    found: c,
                })
            }
        }
    }

    if !number.is_empty() {
        return Err(DurationError::UnexpectedCharacter {
            value: value.to_string(),
            found: number.chars().last().unwrap_or('?'),
        });
    }
    if components == 0 {
        return Err(DurationError::Empty(value.to_string()));
    }
    Ok(total)
}

/// Parses an ISO-8601 duration into whole minutes, truncating leftover seconds.
///
/// # Errors
///
/// See [`parse_seconds`]; additionally fails if the result exceeds `u32`.
pub fn parse_minutes(value: &str) -> Result<u32, DurationError> {
    let minutes = parse_seconds(value)? / MINUTE;
    u32::try_from(minutes).map_err(|_| DurationError::Overflow(value.to_string()))
}

/// Integer part of a number written with an optional `.`/`,` fraction.
fn whole_part(number: &str, original: &str) -> Result<u64, DurationError> {
    let whole = number.split(['.', ',']).next().unwrap_or_default();
    if whole.is_empty() {
        return Ok(0);
    }
    whole.parse::<u64>().map_err(|_| DurationError::Overflow(original.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_omits_zero_parts() {
        assert_eq!(format_seconds(0), "PT0S");
        assert_eq!(format_seconds(300), "PT5M");
        assert_eq!(format_seconds(3_661), "PT1H1M1S");
        assert_eq!(format_seconds(DAY + 120), "P1DT2M");
        assert_eq!(format_seconds(2 * DAY), "P2D");
    }

    #[test]
    fn test_format_minutes() {
        assert_eq!(format_minutes(360), "PT6H");
        assert_eq!(format_minutes(90), "PT1H30M");
    }

    #[test]
    fn test_parse_accepts_time_and_day_units() {
        assert_eq!(parse_seconds("PT5M"), Ok(300));
        assert_eq!(parse_seconds("P1DT2M"), Ok(DAY + 120));
        assert_eq!(parse_seconds("P1W"), Ok(WEEK));
        assert_eq!(parse_seconds("PT0S"), Ok(0));
        assert_eq!(parse_seconds("pt1h"), Ok(3_600));
    }

    #[test]
    fn test_parse_truncates_fractional_seconds() {
        assert_eq!(parse_seconds("PT1.75S"), Ok(1));
        assert_eq!(parse_seconds("PT2M0,5S"), Ok(120));
    }

    #[test]
    fn test_parse_rejects_calendar_units() {
        assert!(matches!(parse_seconds("P1Y"), Err(DurationError::CalendarUnit(_))));
        assert!(matches!(parse_seconds("P2M"), Err(DurationError::CalendarUnit(_))));
    }

    #[test]
    fn test_parse_rejects_malformed_input() {
        assert!(matches!(parse_seconds("5M"), Err(DurationError::MissingPrefix(_))));
        assert!(matches!(parse_seconds("P"), Err(DurationError::Empty(_))));
        assert!(matches!(parse_seconds("PT"), Err(DurationError::Empty(_))));
        assert!(parse_seconds("PT5").is_err());
        assert!(parse_seconds("PTM").is_err());
        assert!(parse_seconds("PT5H3D").is_err());
    }

    #[test]
    fn test_parse_minutes_round_trips_format() {
        for minutes in [0u32, 1, 59, 60, 360, 1_441] {
            assert_eq!(parse_minutes(&format_minutes(minutes)), Ok(minutes));
        }
    }
}
