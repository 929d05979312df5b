use reqwest::Method;
use time::Date;

use crate::{
    domain::{formats, Ack, CondominioId, ConsolidacaoResultado, StatusConsolidacao},
    ApiError, RondaClient,
};

fn turno_path(acao: &str, condominio_id: CondominioId, data: Date) -> String {
    format!(
        "/api/rondas-esporadicas/{}/{}/{}",
        acao,
        condominio_id,
        formats::format_date(data)
    )
}

/// Consolidation of a shift's sporadic patrols into one report.
impl RondaClient {
    #[tracing::instrument(skip(self))]
    pub async fn consolidar_turno(
        &self,
        condominio_id: CondominioId,
        data: Date,
    ) -> Result<ConsolidacaoResultado, ApiError> {
        let url = self
            .endpoint(&turno_path("consolidar-turno", condominio_id, data))
            .to_url()?;
        self.get_checked(
            self.request(Method::POST, url),
            "POST /api/rondas-esporadicas/consolidar-turno",
        )
        .await
    }

    /// Consolidates, marks as processed and sends the WhatsApp report in one call.
    #[tracing::instrument(skip(self))]
    pub async fn processo_completo(
        &self,
        condominio_id: CondominioId,
        data: Date,
    ) -> Result<ConsolidacaoResultado, ApiError> {
        let url = self
            .endpoint(&turno_path("processo-completo", condominio_id, data))
            .to_url()?;
        self.get_checked(
            self.request(Method::POST, url),
            "POST /api/rondas-esporadicas/processo-completo",
        )
        .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn marcar_processadas(
        &self,
        condominio_id: CondominioId,
        data: Date,
    ) -> Result<Ack, ApiError> {
        let url = self
            .endpoint(&turno_path("marcar-processadas", condominio_id, data))
            .to_url()?;
        self.get_checked(
            self.request(Method::PUT, url),
            "PUT /api/rondas-esporadicas/marcar-processadas",
        )
        .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn status_consolidacao(
        &self,
        condominio_id: CondominioId,
        data: Date,
    ) -> Result<StatusConsolidacao, ApiError> {
        let url = self
            .endpoint(&turno_path("status-consolidacao", condominio_id, data))
            .to_url()?;
        self.get_checked(
            self.request(Method::GET, url),
            "GET /api/rondas-esporadicas/status-consolidacao",
        )
        .await
    }
}
