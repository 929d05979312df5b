use time::macros::time;
use time::{Date, Duration, PrimitiveDateTime, Time};

use super::clock::format_data_hora_br;

pub const ESCALA_NOTURNA: &str = "18 às 06";
pub const ESCALA_DIURNA: &str = "06h às 18h";

const NIGHT_LABELS: [&str; 2] = [ESCALA_NOTURNA, "18h às 06h"];
const SHIFT_CHANGE_MORNING: Time = time!(06:00);
const SHIFT_CHANGE_EVENING: Time = time!(18:00);
/// Night-shift times before noon fall on the morning after the shift date.
const NIGHT_ROLLOVER: Time = time!(12:00);

/// Shift schedule named by its escala label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Escala {
    /// 06:00 to 18:00 on the shift date.
    Diurna,
    /// 18:00 on the shift date to 06:00 on the next day.
    Noturna,
}

impl Escala {
    /// Night labels select the night shift; anything else is the day shift.
    pub fn from_label(label: &str) -> Self {
        if NIGHT_LABELS.contains(&label.trim()) {
            Escala::Noturna
        } else {
            Escala::Diurna
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Escala::Diurna => ESCALA_DIURNA,
            Escala::Noturna => ESCALA_NOTURNA,
        }
    }

    /// Value of the backend's `turno` field.
    pub fn turno(&self) -> &'static str {
        match self {
            Escala::Diurna => "Diurno",
            Escala::Noturna => "Noturno",
        }
    }

    pub fn toggle(&self) -> Self {
        match self {
            Escala::Diurna => Escala::Noturna,
            Escala::Noturna => Escala::Diurna,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShiftWindow {
    pub escala: Escala,
    pub inicio: PrimitiveDateTime,
    pub fim: PrimitiveDateTime,
    pub inicio_formatado: String,
    pub fim_formatado: String,
}

/// Absolute boundaries of the shift that starts on `data` under `escala`.
pub fn shift_window(data: Date, escala: &str) -> ShiftWindow {
    let escala = Escala::from_label(escala);
    let (inicio, fim) = match escala {
        Escala::Noturna => (
            data.with_time(SHIFT_CHANGE_EVENING),
            data.saturating_add(Duration::DAY)
                .with_time(SHIFT_CHANGE_MORNING),
        ),
        Escala::Diurna => (
            data.with_time(SHIFT_CHANGE_MORNING),
            data.with_time(SHIFT_CHANGE_EVENING),
        ),
    };

    ShiftWindow {
        escala,
        inicio,
        fim,
        inicio_formatado: format_data_hora_br(inicio),
        fim_formatado: format_data_hora_br(fim),
    }
}

/// Shift date a moment belongs to. Early hours of a night shift count
/// towards the previous day's plantão.
pub fn shift_date_for(now: PrimitiveDateTime, escala: Escala) -> Date {
    match escala {
        Escala::Noturna if now.time() < SHIFT_CHANGE_MORNING => {
            now.date().previous_day().unwrap_or(now.date())
        }
        _ => now.date(),
    }
}

impl ShiftWindow {
    /// Places a wall-clock time on the shift's timeline. In the night shift,
    /// morning times belong to the following calendar day; afternoon times
    /// just before the 18:00 handover stay on the shift date.
    pub fn anchor(&self, hora: Time) -> PrimitiveDateTime {
        match self.escala {
            Escala::Noturna if hora < NIGHT_ROLLOVER => self.fim.date().with_time(hora),
            _ => self.inicio.date().with_time(hora),
        }
    }
}
