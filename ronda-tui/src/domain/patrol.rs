use ronda_api::domain::{CondominioId, RondaId};
use time::{Date, Time};

use super::{shift_window, Countdown, PatrolError, ShiftWindow};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatrolStatus {
    Iniciada,
    Finalizada,
}

impl PatrolStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PatrolStatus::Iniciada => "iniciada",
            PatrolStatus::Finalizada => "finalizada",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patrol {
    /// Server id, once the backend acknowledged the start.
    pub id: Option<RondaId>,
    pub residencial: String,
    pub condominio_id: Option<CondominioId>,
    pub inicio: Time,
    pub termino: Option<Time>,
    /// Minutes, set on finish.
    pub duracao: Option<i64>,
    pub status: PatrolStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatrolState {
    Idle,
    Active { patrol: Patrol, countdown: Countdown },
    Finished { patrol: Patrol },
}

/// Patrol lifecycle for one shift: at most one active patrol, plus the
/// ordered list of patrols finished during this session.
#[derive(Debug, Clone)]
pub struct PatrolTracker {
    data_plantao: Date,
    escala: String,
    countdown_secs: u32,
    state: PatrolState,
    session: Vec<Patrol>,
}

impl PatrolTracker {
    pub fn new(data_plantao: Date, escala: impl Into<String>, countdown_secs: u32) -> Self {
        Self {
            data_plantao,
            escala: escala.into(),
            countdown_secs,
            state: PatrolState::Idle,
            session: Vec::new(),
        }
    }

    pub fn state(&self) -> &PatrolState {
        &self.state
    }

    pub fn session(&self) -> &[Patrol] {
        &self.session
    }

    pub fn data_plantao(&self) -> Date {
        self.data_plantao
    }

    pub fn escala(&self) -> &str {
        &self.escala
    }

    pub fn window(&self) -> ShiftWindow {
        shift_window(self.data_plantao, &self.escala)
    }

    pub fn active(&self) -> Option<&Patrol> {
        match &self.state {
            PatrolState::Active { patrol, .. } => Some(patrol),
            _ => None,
        }
    }

    pub fn countdown(&self) -> Option<&Countdown> {
        match &self.state {
            PatrolState::Active { countdown, .. } => Some(countdown),
            _ => None,
        }
    }

    /// Changes shift date and escala. Not allowed while a patrol runs, since
    /// its duration depends on the window.
    pub fn set_shift(&mut self, data_plantao: Date, escala: &str) -> Result<(), PatrolError> {
        if self.active().is_some() {
            return Err(PatrolError::AlreadyActive);
        }
        self.data_plantao = data_plantao;
        self.escala = escala.to_string();
        Ok(())
    }

    pub fn start(
        &mut self,
        residencial: &str,
        condominio_id: Option<CondominioId>,
        inicio: Option<Time>,
    ) -> Result<&Patrol, PatrolError> {
        let residencial = residencial.trim();
        if residencial.is_empty() {
            return Err(PatrolError::MissingResidencial);
        }
        let inicio = inicio.ok_or(PatrolError::MissingStartTime)?;
        if self.active().is_some() {
            return Err(PatrolError::AlreadyActive);
        }

        self.state = PatrolState::Active {
            patrol: Patrol {
                id: None,
                residencial: residencial.to_string(),
                condominio_id,
                inicio,
                termino: None,
                duracao: None,
                status: PatrolStatus::Iniciada,
            },
            countdown: Countdown::started(self.countdown_secs),
        };
        tracing::debug!(residencial, "patrol started");

        self.active().ok_or(PatrolError::NoActivePatrol)
    }

    /// Records the server id of the active patrol.
    pub fn set_remote_id(&mut self, id: RondaId) {
        if let PatrolState::Active { patrol, .. } = &mut self.state {
            patrol.id = Some(id);
        }
    }

    /// Drops the active patrol without finishing it.
    pub fn cancel(&mut self) -> Option<Patrol> {
        match std::mem::replace(&mut self.state, PatrolState::Idle) {
            PatrolState::Active { patrol, .. } => Some(patrol),
            other => {
                self.state = other;
                None
            }
        }
    }

    /// Duration in minutes the active patrol would have if it ended at
    /// `termino`. Both times are anchored to the shift window first.
    pub fn duration_until(&self, termino: Option<Time>) -> Result<i64, PatrolError> {
        let patrol = self.active().ok_or(PatrolError::NoActivePatrol)?;
        let termino = termino.ok_or(PatrolError::MissingEndTime)?;
        anchored_minutes(&self.window(), patrol.inicio, termino)
    }

    pub fn finish(&mut self, termino: Option<Time>) -> Result<&Patrol, PatrolError> {
        let duracao = self.duration_until(termino)?;
        let termino = termino.ok_or(PatrolError::MissingEndTime)?;

        let mut patrol = match std::mem::replace(&mut self.state, PatrolState::Idle) {
            PatrolState::Active { patrol, .. } => patrol,
            other => {
                self.state = other;
                return Err(PatrolError::NoActivePatrol);
            }
        };

        patrol.termino = Some(termino);
        patrol.duracao = Some(duracao);
        patrol.status = PatrolStatus::Finalizada;
        tracing::debug!(residencial = %patrol.residencial, duracao, "patrol finished");

        self.session.push(patrol.clone());
        self.state = PatrolState::Finished { patrol };
        self.session.last().ok_or(PatrolError::NoActivePatrol)
    }

    /// Records a patrol that already happened, without going through the
    /// active state. The countdown is not touched.
    pub fn record_completed(
        &mut self,
        residencial: &str,
        condominio_id: Option<CondominioId>,
        inicio: Option<Time>,
        termino: Option<Time>,
    ) -> Result<&Patrol, PatrolError> {
        let residencial = residencial.trim();
        if residencial.is_empty() {
            return Err(PatrolError::MissingResidencial);
        }
        let inicio = inicio.ok_or(PatrolError::MissingStartTime)?;
        let termino = termino.ok_or(PatrolError::MissingEndTime)?;
        let duracao = anchored_minutes(&self.window(), inicio, termino)?;

        self.session.push(Patrol {
            id: None,
            residencial: residencial.to_string(),
            condominio_id,
            inicio,
            termino: Some(termino),
            duracao: Some(duracao),
            status: PatrolStatus::Finalizada,
        });
        self.session.last().ok_or(PatrolError::NoActivePatrol)
    }

    /// Removes a finished patrol by its current position. Out of range is a
    /// no-op.
    pub fn remove(&mut self, index: usize) -> Option<Patrol> {
        if index < self.session.len() {
            Some(self.session.remove(index))
        } else {
            None
        }
    }

    /// Minutes elapsed since the active patrol started, anchored like
    /// [`Self::finish`]. Negative values are clamped to zero.
    pub fn elapsed_minutes(&self, now: Time) -> Option<i64> {
        let patrol = self.active()?;
        let window = self.window();
        let minutes = (window.anchor(now) - window.anchor(patrol.inicio)).whole_minutes();
        Some(minutes.max(0))
    }

    /// Advances the countdown by one second. Returns `true` when it just
    /// reached zero.
    pub fn tick(&mut self) -> bool {
        match &mut self.state {
            PatrolState::Active { countdown, .. } => countdown.tick(),
            _ => false,
        }
    }

    /// Pauses or resumes the countdown, restarting it once it has expired.
    /// Returns whether it is now running.
    pub fn toggle_countdown(&mut self) -> Result<bool, PatrolError> {
        match &mut self.state {
            PatrolState::Active { countdown, .. } => {
                if countdown.is_expired() {
                    countdown.restart();
                } else if countdown.is_running() {
                    countdown.pause();
                } else {
                    countdown.resume();
                }
                Ok(countdown.is_running())
            }
            _ => Err(PatrolError::CountdownUnavailable),
        }
    }

    /// Restores a patrol the backend reports as still running.
    pub fn restore_active(&mut self, patrol: Patrol) {
        self.state = PatrolState::Active {
            patrol,
            countdown: Countdown::started(self.countdown_secs),
        };
    }
}

fn anchored_minutes(window: &ShiftWindow, inicio: Time, termino: Time) -> Result<i64, PatrolError> {
    let minutes = (window.anchor(termino) - window.anchor(inicio)).whole_minutes();
    if minutes <= 0 {
        return Err(PatrolError::InvalidDuration { inicio, termino });
    }
    Ok(minutes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ESCALA_DIURNA, ESCALA_NOTURNA};
    use time::macros::{date, time};

    fn tracker(escala: &str) -> PatrolTracker {
        PatrolTracker::new(date!(2026 - 10 - 19), escala, 1200)
    }

    #[test]
    fn night_patrol_across_midnight_lasts_twenty_minutes() {
        let mut tracker = tracker(ESCALA_NOTURNA);
        tracker
            .start("Jardim Europa", Some(CondominioId::new(3)), Some(time!(23:50)))
            .unwrap();

        let patrol = tracker.finish(Some(time!(00:10))).unwrap();

        assert_eq!(patrol.duracao, Some(20));
        assert_eq!(patrol.status, PatrolStatus::Finalizada);
        assert_eq!(tracker.session().len(), 1);
        assert!(tracker.active().is_none());
        assert!(tracker.countdown().is_none());
        assert!(matches!(tracker.state(), PatrolState::Finished { .. }));
    }

    #[test]
    fn night_patrol_started_before_handover_counts_forward() {
        let mut tracker = tracker(ESCALA_NOTURNA);
        tracker.start("Residencial A", None, Some(time!(17:58))).unwrap();

        let patrol = tracker.finish(Some(time!(18:10))).unwrap();

        assert_eq!(patrol.duracao, Some(12));
    }

    #[test]
    fn end_before_start_is_rejected_in_both_escalas() {
        for escala in [ESCALA_NOTURNA, ESCALA_DIURNA] {
            let mut tracker = tracker(escala);
            tracker.start("Residencial A", None, Some(time!(09:00))).unwrap();

            let err = tracker.finish(Some(time!(08:00))).unwrap_err();

            assert_eq!(
                err,
                PatrolError::InvalidDuration {
                    inicio: time!(09:00),
                    termino: time!(08:00)
                }
            );
            assert!(tracker.active().is_some(), "patrol stays active for {escala}");
            assert!(tracker.session().is_empty());
        }
    }

    #[test]
    fn zero_length_patrol_is_rejected() {
        let mut tracker = tracker(ESCALA_DIURNA);
        tracker.start("A", None, Some(time!(10:00))).unwrap();
        assert!(tracker.finish(Some(time!(10:00))).is_err());
    }

    #[test]
    fn start_validates_inputs() {
        let mut tracker = tracker(ESCALA_NOTURNA);
        assert_eq!(
            tracker.start("   ", None, Some(time!(19:00))).unwrap_err(),
            PatrolError::MissingResidencial
        );
        assert_eq!(
            tracker.start("A", None, None).unwrap_err(),
            PatrolError::MissingStartTime
        );

        tracker.start("A", None, Some(time!(19:00))).unwrap();
        assert_eq!(
            tracker.start("B", None, Some(time!(19:05))).unwrap_err(),
            PatrolError::AlreadyActive
        );
    }

    #[test]
    fn finish_requires_active_patrol_and_end_time() {
        let mut tracker = tracker(ESCALA_NOTURNA);
        assert_eq!(
            tracker.finish(Some(time!(20:00))).unwrap_err(),
            PatrolError::NoActivePatrol
        );

        tracker.start("A", None, Some(time!(19:00))).unwrap();
        assert_eq!(
            tracker.finish(None).unwrap_err(),
            PatrolError::MissingEndTime
        );
    }

    #[test]
    fn start_resets_countdown() {
        let mut tracker = tracker(ESCALA_NOTURNA);
        tracker.start("A", None, Some(time!(19:00))).unwrap();
        for _ in 0..30 {
            tracker.tick();
        }
        assert_eq!(tracker.countdown().map(Countdown::remaining), Some(1170));

        tracker.finish(Some(time!(19:20))).unwrap();
        tracker.start("A", None, Some(time!(19:40))).unwrap();
        assert_eq!(tracker.countdown().map(Countdown::remaining), Some(1200));
    }

    #[test]
    fn countdown_toggle_needs_active_patrol() {
        let mut tracker = tracker(ESCALA_NOTURNA);
        assert_eq!(
            tracker.toggle_countdown().unwrap_err(),
            PatrolError::CountdownUnavailable
        );

        tracker.start("A", None, Some(time!(19:00))).unwrap();
        assert_eq!(tracker.toggle_countdown(), Ok(false));
        tracker.tick();
        assert_eq!(tracker.countdown().map(Countdown::remaining), Some(1200));
        assert_eq!(tracker.toggle_countdown(), Ok(true));
    }

    #[test]
    fn toggle_after_expiry_restarts_countdown() {
        let mut tracker = PatrolTracker::new(date!(2026 - 10 - 19), ESCALA_NOTURNA, 2);
        tracker.start("A", None, Some(time!(19:00))).unwrap();
        tracker.tick();
        assert!(tracker.tick());

        assert_eq!(tracker.toggle_countdown(), Ok(true));
        assert_eq!(tracker.countdown().map(Countdown::remaining), Some(2));
    }

    #[test]
    fn remove_twice_with_same_index_never_panics() {
        let mut tracker = tracker(ESCALA_NOTURNA);
        for (inicio, termino) in [(time!(19:00), time!(19:20)), (time!(20:00), time!(20:15))] {
            tracker.start("A", None, Some(inicio)).unwrap();
            tracker.finish(Some(termino)).unwrap();
        }

        let first = tracker.remove(1).unwrap();
        assert_eq!(first.inicio, time!(20:00));
        assert_eq!(tracker.remove(1), None);
        assert_eq!(tracker.session().len(), 1);
        assert_eq!(tracker.remove(7), None);
    }

    #[test]
    fn elapsed_minutes_follow_the_shift_window() {
        let mut tracker = tracker(ESCALA_NOTURNA);
        assert_eq!(tracker.elapsed_minutes(time!(23:00)), None);

        tracker.start("A", None, Some(time!(23:45))).unwrap();
        assert_eq!(tracker.elapsed_minutes(time!(00:05)), Some(20));
        assert_eq!(tracker.elapsed_minutes(time!(23:40)), Some(0));
    }

    #[test]
    fn cancel_returns_to_idle() {
        let mut tracker = tracker(ESCALA_DIURNA);
        tracker.start("A", None, Some(time!(10:00))).unwrap();
        tracker.set_remote_id(RondaId::new(5));

        let cancelled = tracker.cancel().unwrap();

        assert_eq!(cancelled.id, Some(RondaId::new(5)));
        assert_eq!(tracker.state(), &PatrolState::Idle);
        assert_eq!(tracker.cancel(), None);
    }

    #[test]
    fn record_completed_skips_active_state() {
        let mut tracker = tracker(ESCALA_NOTURNA);
        let patrol = tracker
            .record_completed("B", None, Some(time!(02:00)), Some(time!(02:25)))
            .unwrap();
        assert_eq!(patrol.duracao, Some(25));
        assert_eq!(tracker.state(), &PatrolState::Idle);
    }

    #[test]
    fn shift_cannot_change_mid_patrol() {
        let mut tracker = tracker(ESCALA_NOTURNA);
        tracker.start("A", None, Some(time!(19:00))).unwrap();
        assert_eq!(
            tracker.set_shift(date!(2026 - 10 - 20), ESCALA_DIURNA),
            Err(PatrolError::AlreadyActive)
        );
    }
}
