use serde::{Deserialize, Serialize};

use super::BackendOutcome;

#[derive(Debug, Clone, Serialize)]
pub struct AnalisarRelatorioRequest<'a> {
    pub texto_relatorio: &'a str,
}

/// Fields the analyzer extracts from a raw occurrence narrative.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DadosAnalise {
    #[serde(default, alias = "relatorio")]
    pub relatorio_corrigido: Option<String>,
    /// `YYYY-MM-DDTHH:MM[:SS]` as produced by the backend.
    #[serde(default)]
    pub data_hora_ocorrencia: Option<String>,
    #[serde(default)]
    pub endereco_especifico: Option<String>,
    #[serde(default)]
    pub colaboradores_envolvidos: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AnaliseResponse {
    pub sucesso: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub dados: Option<DadosAnalise>,
}

impl BackendOutcome for AnaliseResponse {
    fn sucesso(&self) -> bool {
        self.sucesso
    }

    fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}
