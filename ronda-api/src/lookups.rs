use reqwest::Method;

use crate::{
    domain::{
        Colaborador, ColaboradoresResponse, Condominio, CondominiosResponse, Logradouro,
        LogradourosResponse,
    },
    ApiError, RondaClient,
};

/// Autocomplete lookups. An empty `nome` lists everything the backend is
/// willing to return.
impl RondaClient {
    #[tracing::instrument(skip(self))]
    pub async fn buscar_condominios(&self, nome: &str) -> Result<Vec<Condominio>, ApiError> {
        let url = self
            .endpoint("/api/condominios")
            .with_query(&[("nome", nome.trim())])?;
        let response: CondominiosResponse = self
            .get_json(self.request(Method::GET, url), "GET /api/condominios")
            .await?;
        Ok(response.condominios)
    }

    #[tracing::instrument(skip(self))]
    pub async fn buscar_colaboradores(&self, nome: &str) -> Result<Vec<Colaborador>, ApiError> {
        let url = self
            .endpoint("/api/colaboradores")
            .with_query(&[("nome", nome.trim())])?;
        let response: ColaboradoresResponse = self
            .get_json(self.request(Method::GET, url), "GET /api/colaboradores")
            .await?;
        Ok(response.colaboradores)
    }

    #[tracing::instrument(skip(self))]
    pub async fn buscar_logradouros(&self, nome: &str) -> Result<Vec<Logradouro>, ApiError> {
        let url = self
            .endpoint("/api/logradouros_view")
            .with_query(&[("nome", nome.trim())])?;
        let response: LogradourosResponse = self
            .get_json(self.request(Method::GET, url), "GET /api/logradouros_view")
            .await?;
        Ok(response.logradouros)
    }
}
