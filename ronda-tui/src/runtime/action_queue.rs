use crate::app::LookupKind;
use ronda_api::domain::OcorrenciaId;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

#[derive(Debug, Clone, PartialEq)]
pub(super) enum Action {
    StartPatrol,
    FinishPatrol,
    SaveCompletePatrol,
    Reconcile,
    Consolidate,
    CheckActivePatrol,
    Lookup { kind: LookupKind, query: String },
    AnalyzeReport,
    LoadOcorrencias,
    OpenOcorrencia(OcorrenciaId),
}

impl Action {
    /// Lookups fire mid-typing, so keys pressed meanwhile are kept.
    pub(super) fn is_submission(&self) -> bool {
        !matches!(self, Action::Lookup { .. })
    }
}

pub(super) type ActionTx = UnboundedSender<Action>;
pub(super) type ActionRx = UnboundedReceiver<Action>;

pub(super) fn channel() -> (ActionTx, ActionRx) {
    mpsc::unbounded_channel()
}
