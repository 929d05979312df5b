//! Serde helpers for the backend's date and time strings.
//!
//! Dates travel as `YYYY-MM-DD`. Times are sent as `HH:MM`; the backend
//! answers with Python's `isoformat()`, which adds seconds.

use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, Time};

pub const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");
pub const HORA_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[hour]:[minute]");
const HORA_SECONDS_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[hour]:[minute]:[second]");

pub fn format_date(date: Date) -> String {
    date.format(DATE_FORMAT)
        .unwrap_or_else(|_| format!("{:04}-{:02}-{:02}", date.year(), date.month() as u8, date.day()))
}

pub fn parse_date(raw: &str) -> Result<Date, time::error::Parse> {
    // Tolerate full timestamps such as "2026-10-19T00:00:00".
    let day = raw.trim().get(..10).unwrap_or(raw.trim());
    Date::parse(day, DATE_FORMAT)
}

pub fn format_hora(hora: Time) -> String {
    format!("{:02}:{:02}", hora.hour(), hora.minute())
}

pub fn parse_hora(raw: &str) -> Result<Time, time::error::Parse> {
    let raw = raw.trim();
    // Drop fractional seconds ("21:05:00.123456").
    let raw = raw.split('.').next().unwrap_or(raw);
    Time::parse(raw, HORA_SECONDS_FORMAT).or_else(|_| Time::parse(raw, HORA_FORMAT))
}

/// Splits an ISO timestamp ("2026-10-19T22:15:00" or with a space).
pub fn parse_data_hora(raw: &str) -> Option<(Date, Time)> {
    let (data, hora) = raw.trim().split_once(['T', ' '])?;
    Some((parse_date(data).ok()?, parse_hora(hora).ok()?))
}

pub mod date {
    use serde::{de::Error, Deserialize, Deserializer, Serializer};
    use time::Date;

    pub fn serialize<S: Serializer>(date: &Date, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_date(*date))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Date, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_date(&raw).map_err(D::Error::custom)
    }

    pub mod option {
        use serde::{de::Error, Deserialize, Deserializer, Serializer};
        use time::Date;

        pub fn serialize<S: Serializer>(
            date: &Option<Date>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match date {
                Some(d) => serializer.serialize_str(&super::super::format_date(*d)),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<Date>, D::Error> {
            match Option::<String>::deserialize(deserializer)? {
                Some(raw) if !raw.trim().is_empty() => super::super::parse_date(&raw)
                    .map(Some)
                    .map_err(D::Error::custom),
                _ => Ok(None),
            }
        }
    }
}

pub mod hora {
    use serde::{de::Error, Deserialize, Deserializer, Serializer};
    use time::Time;

    pub fn serialize<S: Serializer>(hora: &Time, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_hora(*hora))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Time, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_hora(&raw).map_err(D::Error::custom)
    }

    pub mod option {
        use serde::{de::Error, Deserialize, Deserializer, Serializer};
        use time::Time;

        pub fn serialize<S: Serializer>(
            hora: &Option<Time>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match hora {
                Some(h) => serializer.serialize_str(&super::super::format_hora(*h)),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<Time>, D::Error> {
            match Option::<String>::deserialize(deserializer)? {
                Some(raw) if !raw.trim().is_empty() => super::super::parse_hora(&raw)
                    .map(Some)
                    .map_err(D::Error::custom),
                _ => Ok(None),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{date, time};

    #[test]
    fn hora_accepts_isoformat_with_seconds() {
        assert_eq!(parse_hora("21:05:00").unwrap(), time!(21:05));
        assert_eq!(parse_hora("21:05").unwrap(), time!(21:05));
        assert_eq!(parse_hora("21:05:00.250000").unwrap(), time!(21:05));
    }

    #[test]
    fn hora_is_sent_without_seconds() {
        assert_eq!(format_hora(time!(7:03:59)), "07:03");
    }

    #[test]
    fn date_tolerates_timestamp_suffix() {
        assert_eq!(parse_date("2026-10-19T00:00:00").unwrap(), date!(2026 - 10 - 19));
        assert_eq!(format_date(date!(2026 - 01 - 02)), "2026-01-02");
    }

    #[test]
    fn garbage_hora_is_rejected() {
        assert!(parse_hora("25:99").is_err());
        assert!(parse_hora("").is_err());
    }
}
