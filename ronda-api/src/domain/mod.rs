mod analise;
mod cadastro;
mod consolidacao;
pub mod formats;
mod ids;
mod ocorrencia;
mod ronda;
mod ronda_esporadica;

pub use analise::*;
pub use cadastro::*;
pub use consolidacao::*;
pub use ids::*;
pub use ocorrencia::*;
pub use ronda::*;
pub use ronda_esporadica::*;

/// Responses that carry the backend's `sucesso` / `message` pair.
pub trait BackendOutcome {
    fn sucesso(&self) -> bool;
    fn message(&self) -> Option<&str>;
}

/// Plain acknowledgement returned by most mutating endpoints.
#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
pub struct Ack {
    pub sucesso: bool,
    #[serde(default)]
    pub message: Option<String>,
}

impl BackendOutcome for Ack {
    fn sucesso(&self) -> bool {
        self.sucesso
    }

    fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}
