use serde::{Deserialize, Serialize};

use super::CondominioId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condominio {
    pub id: CondominioId,
    pub nome: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Colaborador {
    pub id: i64,
    /// `/api/colaboradores` only fills `nome_completo`; older views send `nome`.
    #[serde(alias = "nome")]
    pub nome_completo: String,
    #[serde(default)]
    pub cargo: Option<String>,
    #[serde(default)]
    pub matricula: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Logradouro {
    pub id: i64,
    pub nome: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CondominiosResponse {
    #[serde(default)]
    pub condominios: Vec<Condominio>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ColaboradoresResponse {
    #[serde(default)]
    pub colaboradores: Vec<Colaborador>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LogradourosResponse {
    #[serde(default)]
    pub logradouros: Vec<Logradouro>,
}
