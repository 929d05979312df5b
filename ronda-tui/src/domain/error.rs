use thiserror::Error;
use time::Time;

use super::clock::format_hora;

fn hhmm(hora: &Time) -> String {
    format_hora(*hora)
}

/// Validation failures of the patrol flow. `Display` is the message shown
/// to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatrolError {
    #[error("Informe o residencial.")]
    MissingResidencial,
    #[error("Informe o horário de início.")]
    MissingStartTime,
    #[error("Informe o horário de término.")]
    MissingEndTime,
    #[error("Já existe uma ronda em andamento. Finalize-a antes de iniciar outra.")]
    AlreadyActive,
    #[error("Nenhuma ronda em andamento.")]
    NoActivePatrol,
    #[error(
        "O término ({}) deve ser posterior ao início ({}).",
        hhmm(.termino),
        hhmm(.inicio)
    )]
    InvalidDuration { inicio: Time, termino: Time },
    #[error("O contador só pode ser usado com uma ronda em andamento.")]
    CountdownUnavailable,
    #[error(
        "Horário informado ({}) fora da tolerância de {} minutos em relação ao horário atual ({}).",
        hhmm(.informada),
        .tolerancia,
        hhmm(.atual)
    )]
    EntryTimeOutOfRange {
        informada: Time,
        atual: Time,
        tolerancia: i64,
    },
}
