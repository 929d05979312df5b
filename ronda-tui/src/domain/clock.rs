use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, Month, OffsetDateTime, PrimitiveDateTime, Time, UtcOffset};

pub use ronda_api::domain::formats::format_hora;

const DATA_BR: &[BorrowedFormatItem<'static>] = format_description!("[day]/[month]/[year]");
const DATA_HORA_BR: &[BorrowedFormatItem<'static>] =
    format_description!("[day]/[month]/[year] [hour]:[minute]");

/// Local wall clock. Falls back to UTC when the offset cannot be determined.
pub fn local_now() -> PrimitiveDateTime {
    let now = OffsetDateTime::now_utc();
    let local = match UtcOffset::current_local_offset() {
        Ok(offset) => now.to_offset(offset),
        Err(_) => now,
    };
    PrimitiveDateTime::new(local.date(), local.time())
}

/// Current time truncated to the minute.
pub fn hora_atual() -> Time {
    let now = local_now().time();
    Time::from_hms(now.hour(), now.minute(), 0).unwrap_or(now)
}

pub fn format_data_br(date: Date) -> String {
    date.format(DATA_BR)
        .unwrap_or_else(|_| format!("{:02}/{:02}/{}", date.day(), date.month() as u8, date.year()))
}

pub fn format_data_hora_br(dt: PrimitiveDateTime) -> String {
    dt.format(DATA_HORA_BR)
        .unwrap_or_else(|_| format!("{} {}", format_data_br(dt.date()), format_hora(dt.time())))
}

/// Accepts `DD/MM/AAAA`, with or without zero padding.
pub fn parse_data_br(raw: &str) -> Option<Date> {
    let mut parts = raw.trim().splitn(3, '/');
    let day: u8 = parts.next()?.parse().ok()?;
    let month: u8 = parts.next()?.parse().ok()?;
    let year = parts.next()?;
    if year.len() != 4 {
        return None;
    }
    let month = Month::try_from(month).ok()?;
    Date::from_calendar_date(year.parse().ok()?, month, day).ok()
}

/// Accepts `HH:MM`, `H:MM` and `HHMM`.
pub fn parse_hora_input(raw: &str) -> Option<Time> {
    let raw = raw.trim();
    let (h, m) = match raw.split_once(':') {
        Some((h, m)) => (h, m),
        None if raw.len() == 4 && raw.chars().all(|c| c.is_ascii_digit()) => raw.split_at(2),
        None => return None,
    };
    if m.len() != 2 {
        return None;
    }
    let hour: u8 = h.parse().ok()?;
    let minute: u8 = m.parse().ok()?;
    Time::from_hms(hour, minute, 0).ok()
}
