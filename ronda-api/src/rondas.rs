use reqwest::Method;
use time::Date;

use crate::{
    domain::{
        formats, Ack, AtualizarRondaRequest, CondominioId, FinalizarRondaRequest,
        IniciarRondaRequest, RelatorioRonda, Ronda, RondaEmAndamento, RondaId, RondaIniciada,
        RondasDoDiaResponse,
    },
    ApiError, RondaClient,
};

/// Regular (fixed-shift) patrols.
impl RondaClient {
    #[tracing::instrument(skip(self))]
    pub async fn iniciar_ronda(
        &self,
        request: &IniciarRondaRequest,
    ) -> Result<RondaIniciada, ApiError> {
        let url = self.endpoint("/api/rondas/iniciar").to_url()?;
        self.get_checked(
            self.request(Method::POST, url).json(request),
            "POST /api/rondas/iniciar",
        )
        .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn finalizar_ronda(
        &self,
        id: RondaId,
        request: &FinalizarRondaRequest,
    ) -> Result<Ack, ApiError> {
        let url = self
            .endpoint(&format!("/api/rondas/finalizar/{}", id))
            .to_url()?;
        self.get_checked(
            self.request(Method::PUT, url).json(request),
            "PUT /api/rondas/finalizar",
        )
        .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn atualizar_ronda(
        &self,
        id: RondaId,
        request: &AtualizarRondaRequest,
    ) -> Result<Ack, ApiError> {
        let url = self
            .endpoint(&format!("/api/rondas/atualizar/{}", id))
            .to_url()?;
        self.get_checked(
            self.request(Method::PUT, url).json(request),
            "PUT /api/rondas/atualizar",
        )
        .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn ronda_em_andamento(
        &self,
        condominio_id: CondominioId,
    ) -> Result<RondaEmAndamento, ApiError> {
        let url = self
            .endpoint(&format!("/api/rondas/em-andamento/{}", condominio_id))
            .to_url()?;
        self.get_json(
            self.request(Method::GET, url),
            "GET /api/rondas/em-andamento",
        )
        .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn gerar_relatorio_ronda(
        &self,
        condominio_id: CondominioId,
        data: Date,
    ) -> Result<RelatorioRonda, ApiError> {
        let url = self
            .endpoint(&format!(
                "/api/rondas/gerar-relatorio/{}/{}",
                condominio_id,
                formats::format_date(data)
            ))
            .to_url()?;
        self.get_checked(
            self.request(Method::POST, url),
            "POST /api/rondas/gerar-relatorio",
        )
        .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn rondas_do_dia(
        &self,
        condominio_id: CondominioId,
        data: Date,
    ) -> Result<Vec<Ronda>, ApiError> {
        let url = self
            .endpoint(&format!(
                "/api/rondas/do-dia/{}/{}",
                condominio_id,
                formats::format_date(data)
            ))
            .to_url()?;
        let response: RondasDoDiaResponse = self
            .get_json(self.request(Method::GET, url), "GET /api/rondas/do-dia")
            .await?;
        Ok(response.rondas)
    }
}
