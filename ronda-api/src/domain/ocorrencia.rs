use serde::{Deserialize, Serialize};
use time::{Date, Time};

use super::{formats, CondominioId, OcorrenciaId};

/// A registered occurrence as the history endpoints return it. Related
/// records come back as display names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ocorrencia {
    pub id: OcorrenciaId,
    #[serde(default)]
    pub relatorio_final: Option<String>,
    #[serde(default)]
    pub data_hora_ocorrencia: Option<String>,
    #[serde(default)]
    pub turno: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub endereco_especifico: Option<String>,
    #[serde(default)]
    pub condominio: Option<String>,
    #[serde(default)]
    pub tipo: Option<String>,
    #[serde(default)]
    pub supervisor: Option<i64>,
    #[serde(default)]
    pub colaboradores: Vec<String>,
    #[serde(default)]
    pub orgaos_acionados: Vec<String>,
    #[serde(default)]
    pub data_criacao: Option<String>,
    #[serde(default)]
    pub data_modificacao: Option<String>,
}

impl Ocorrencia {
    pub fn data_hora(&self) -> Option<(Date, Time)> {
        formats::parse_data_hora(self.data_hora_ocorrencia.as_deref()?)
    }

    pub fn relatorio(&self) -> &str {
        self.relatorio_final.as_deref().unwrap_or_default()
    }
}

/// Filters for `/api/ocorrencias/historico`. Unset fields are left out of
/// the query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OcorrenciaFiltro {
    /// `Pendente`, `Aprovado` or `Rejeitado`.
    pub status: Option<String>,
    pub condominio_id: Option<CondominioId>,
    pub data_inicio: Option<Date>,
    pub data_fim: Option<Date>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct HistoricoResponse {
    #[serde(default)]
    pub historico: Vec<Ocorrencia>,
}
