use serde::Deserialize;

use super::{BackendOutcome, CondominioId, RondaId};

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ConsolidacaoResultado {
    pub sucesso: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub relatorio_consolidado: Option<String>,
    #[serde(default)]
    pub total_rondas: Option<i64>,
    #[serde(default)]
    pub periodo: Option<String>,
    #[serde(default)]
    pub duracao_total_minutos: Option<i64>,
    #[serde(default)]
    pub whatsapp_enviado: Option<bool>,
    #[serde(default)]
    pub ronda_principal_id: Option<RondaId>,
}

impl BackendOutcome for ConsolidacaoResultado {
    fn sucesso(&self) -> bool {
        self.sucesso
    }

    fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ResumoConsolidacao {
    #[serde(default)]
    pub total_rondas_esporadicas: i64,
    #[serde(default)]
    pub rondas_finalizadas: i64,
    #[serde(default)]
    pub rondas_processadas: i64,
    #[serde(default)]
    pub duracao_total_minutos: i64,
    #[serde(default)]
    pub ronda_principal_criada: bool,
    #[serde(default)]
    pub ronda_principal_id: Option<RondaId>,
    #[serde(default)]
    pub pode_consolidar: bool,
    #[serde(default)]
    pub ja_consolidado: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StatusConsolidacao {
    pub sucesso: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub condominio_id: Option<CondominioId>,
    #[serde(default)]
    pub status: ResumoConsolidacao,
}

impl BackendOutcome for StatusConsolidacao {
    fn sucesso(&self) -> bool {
        self.sucesso
    }

    fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}
