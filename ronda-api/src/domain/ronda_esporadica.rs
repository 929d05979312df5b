use serde::{Deserialize, Serialize};
use time::{Date, Time};

use super::{formats, BackendOutcome, CondominioId, RondaId, UserId};

/// A sporadic (ad hoc) patrol record. Read-only from the client side once
/// the backend reports it as executed.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RondaEsporadica {
    pub id: RondaId,
    pub condominio_id: CondominioId,
    #[serde(default)]
    pub condominio_nome: Option<String>,
    #[serde(default)]
    pub user_id: Option<UserId>,
    #[serde(default)]
    pub user_nome: Option<String>,
    #[serde(with = "formats::date")]
    pub data_plantao: Date,
    #[serde(default, with = "formats::hora::option")]
    pub hora_entrada: Option<Time>,
    #[serde(default, with = "formats::hora::option")]
    pub hora_saida: Option<Time>,
    #[serde(default)]
    pub duracao_minutos: Option<i64>,
    #[serde(default)]
    pub duracao_formatada: Option<String>,
    pub escala_plantao: String,
    #[serde(default)]
    pub turno: Option<String>,
    #[serde(default)]
    pub observacoes: Option<String>,
    pub status: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct IniciarRondaEsporadicaRequest {
    pub condominio_id: CondominioId,
    pub user_id: UserId,
    #[serde(with = "formats::date")]
    pub data_plantao: Date,
    #[serde(with = "formats::hora")]
    pub hora_entrada: Time,
    pub escala_plantao: String,
    pub turno: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observacoes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supervisor_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FinalizarRondaEsporadicaRequest {
    #[serde(with = "formats::hora")]
    pub hora_saida: Time,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observacoes: Option<String>,
}

/// A sporadic patrol recorded after the fact: start and finish in one go.
#[derive(Debug, Clone)]
pub struct RondaCompleta {
    pub condominio_id: CondominioId,
    pub user_id: UserId,
    pub data_plantao: Date,
    pub hora_entrada: Time,
    pub hora_saida: Time,
    pub escala_plantao: String,
    pub turno: String,
    pub observacoes: Option<String>,
}

/// Optional filters for the executed-patrols history.
#[derive(Debug, Clone, Copy, Default)]
pub struct PeriodoFiltro {
    pub data_inicio: Option<Date>,
    pub data_fim: Option<Date>,
}

impl PeriodoFiltro {
    pub fn dia(data: Date) -> Self {
        Self {
            data_inicio: Some(data),
            data_fim: Some(data),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ExecutadasResponse {
    pub sucesso: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub rondas: Vec<RondaEsporadica>,
}

impl BackendOutcome for ExecutadasResponse {
    fn sucesso(&self) -> bool {
        self.sucesso
    }

    fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}
