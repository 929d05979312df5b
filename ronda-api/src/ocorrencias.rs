use reqwest::Method;

use crate::{
    domain::{formats, HistoricoResponse, Ocorrencia, OcorrenciaFiltro, OcorrenciaId},
    ApiError, RondaClient,
};

/// Read access to registered occurrences.
impl RondaClient {
    /// Newest first. The backend returns at most 100 entries.
    #[tracing::instrument(skip(self))]
    pub async fn historico_ocorrencias(
        &self,
        filtro: &OcorrenciaFiltro,
    ) -> Result<Vec<Ocorrencia>, ApiError> {
        let condominio_id = filtro
            .condominio_id
            .map(|id| id.to_string())
            .unwrap_or_default();
        let data_inicio = filtro.data_inicio.map(formats::format_date).unwrap_or_default();
        let data_fim = filtro.data_fim.map(formats::format_date).unwrap_or_default();
        let url = self.endpoint("/api/ocorrencias/historico").with_query(&[
            ("status", filtro.status.as_deref().unwrap_or_default()),
            ("condominio_id", condominio_id.as_str()),
            ("data_inicio", data_inicio.as_str()),
            ("data_fim", data_fim.as_str()),
        ])?;
        let response: HistoricoResponse = self
            .get_json(
                self.request(Method::GET, url),
                "GET /api/ocorrencias/historico",
            )
            .await?;
        Ok(response.historico)
    }

    #[tracing::instrument(skip(self))]
    pub async fn detalhe_ocorrencia(&self, id: OcorrenciaId) -> Result<Ocorrencia, ApiError> {
        let url = self.endpoint(&format!("/api/ocorrencias/{}", id)).to_url()?;
        self.get_json(self.request(Method::GET, url), "GET /api/ocorrencias/{id}")
            .await
    }
}
