use serde::{Deserialize, Serialize};
use time::{Date, Time};

use super::{formats, BackendOutcome, CondominioId, RondaId, UserId};

/// A regular (fixed-shift) patrol as stored by the backend.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Ronda {
    pub id: RondaId,
    pub condominio_id: CondominioId,
    #[serde(default)]
    pub condominio_nome: Option<String>,
    #[serde(with = "formats::date")]
    pub data_plantao: Date,
    pub escala_plantao: String,
    #[serde(default)]
    pub log_bruto: Option<String>,
    #[serde(default)]
    pub total_rondas: Option<i64>,
    #[serde(default)]
    pub duracao_total_minutos: Option<i64>,
    #[serde(default)]
    pub user_id: Option<UserId>,
    #[serde(default)]
    pub user_nome: Option<String>,
    pub status: String,
}

/// Patrol currently marked as running on the server.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RondaAtiva {
    pub id: RondaId,
    #[serde(default)]
    pub inicio: Option<String>,
    #[serde(default, with = "formats::date::option")]
    pub data_plantao: Option<Date>,
    #[serde(default, with = "formats::hora::option")]
    pub hora_entrada: Option<Time>,
    #[serde(default)]
    pub escala_plantao: Option<String>,
    #[serde(default)]
    pub turno: Option<String>,
    #[serde(default)]
    pub observacoes: Option<String>,
    #[serde(default)]
    pub user_id: Option<UserId>,
    #[serde(default)]
    pub user_nome: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RondaEmAndamento {
    pub em_andamento: bool,
    #[serde(default)]
    pub ronda: Option<RondaAtiva>,
}

impl RondaEmAndamento {
    pub fn nenhuma() -> Self {
        Self {
            em_andamento: false,
            ronda: None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct IniciarRondaRequest {
    pub condominio_id: CondominioId,
    #[serde(with = "formats::date")]
    pub data_plantao: Date,
    pub escala_plantao: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supervisor_id: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct FinalizarRondaRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_bruto: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observacoes: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct AtualizarRondaRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_bruto: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observacoes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub escala_plantao: Option<String>,
}

/// Answer to the start endpoints of both patrol kinds.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RondaIniciada {
    pub sucesso: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub ronda_id: Option<RondaId>,
}

impl BackendOutcome for RondaIniciada {
    fn sucesso(&self) -> bool {
        self.sucesso
    }

    fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RelatorioRonda {
    pub sucesso: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub relatorio: Option<String>,
}

impl BackendOutcome for RelatorioRonda {
    fn sucesso(&self) -> bool {
        self.sucesso
    }

    fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct RondasDoDiaResponse {
    #[serde(default)]
    pub rondas: Vec<Ronda>,
}

