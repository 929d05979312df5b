use time::Time;

use super::PatrolError;

pub const ENTRY_TOLERANCE_MINUTES: i64 = 30;
const MINUTES_PER_DAY: i64 = 24 * 60;

fn minute_of_day(hora: Time) -> i64 {
    i64::from(hora.hour()) * 60 + i64::from(hora.minute())
}

/// Checks that an informed entry time is within the tolerance of the
/// current time. Distance is measured around the clock, so 23:50 and 00:10
/// are 20 minutes apart.
pub fn validate_entry_time(informada: Time, atual: Time) -> Result<(), PatrolError> {
    let diff = (minute_of_day(informada) - minute_of_day(atual)).abs();
    let distance = diff.min(MINUTES_PER_DAY - diff);

    if distance > ENTRY_TOLERANCE_MINUTES {
        return Err(PatrolError::EntryTimeOutOfRange {
            informada,
            atual,
            tolerancia: ENTRY_TOLERANCE_MINUTES,
        });
    }
    Ok(())
}
