use chrono::{DateTime, Utc};

const SECOND_MS: i64 = 1_000;
const MINUTE_MS: i64 = 60 * SECOND_MS;
const HOUR_MS: i64 = 60 * MINUTE_MS;
const DAY_MS: i64 = 24 * HOUR_MS;
const MONTH_MS: i64 = 30 * DAY_MS;
const YEAR_MS: i64 = 365 * DAY_MS;

/// Relative pt-BR distance between `date` and `now`, e.g. "Há 3 horas".
///
/// Units are chosen strictly (no "about"/"almost" qualifiers): seconds under a
/// minute, minutes under an hour, hours under a day, days under 30 days,
/// months under 12 months, years beyond that.
pub fn format_time_ago(date: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let diff = now.signed_duration_since(date).num_milliseconds();
    let future = diff < 0;
    let ms = diff.abs();

    let (unit, unit_ms) = if ms < MINUTE_MS {
        (Unit::Second, SECOND_MS)
    } else if ms < HOUR_MS {
        (Unit::Minute, MINUTE_MS)
    } else if ms < DAY_MS {
        (Unit::Hour, HOUR_MS)
    } else if ms < MONTH_MS {
        (Unit::Day, DAY_MS)
    } else if ms < 12 * MONTH_MS {
        (Unit::Month, MONTH_MS)
    } else {
        (Unit::Year, YEAR_MS)
    };

    let count = (ms as f64 / unit_ms as f64).round() as i64;
    let distance = unit.describe(count);

    if future {
        format!("em {}", distance)
    } else {
        format!("Há {}", distance)
    }
}

/// Parse an ISO-8601 timestamp and format it relative to `now`.
///
/// Returns the input unchanged when it cannot be parsed.
pub fn format_iso_time_ago(iso: &str, now: DateTime<Utc>) -> String {
    match DateTime::parse_from_rfc3339(iso) {
        Ok(date) => format_time_ago(date.with_timezone(&Utc), now),
        Err(_) => iso.to_string(),
    }
}

#[derive(Debug, Clone, Copy)]
enum Unit {
    Second,
    Minute,
    Hour,
    Day,
    Month,
    Year,
}

impl Unit {
    fn describe(self, count: i64) -> String {
        let (one, many) = match self {
            Unit::Second => ("segundo", "segundos"),
            Unit::Minute => ("minuto", "minutos"),
            Unit::Hour => ("hora", "horas"),
            Unit::Day => ("dia", "dias"),
            Unit::Month => ("mês", "meses"),
            Unit::Year => ("ano", "anos"),
        };
        if count == 1 {
            format!("1 {}", one)
        } else {
            format!("{} {}", count, many)
        }
    }
}
