use reqwest::Method;
use time::Date;

use crate::{
    domain::{
        formats, Ack, CondominioId, ExecutadasResponse, FinalizarRondaEsporadicaRequest,
        IniciarRondaEsporadicaRequest, PeriodoFiltro, RondaCompleta, RondaEmAndamento,
        RondaEsporadica, RondaId, RondaIniciada,
    },
    ApiError, RondaClient,
};

/// Sporadic patrols.
impl RondaClient {
    #[tracing::instrument(skip(self))]
    pub async fn iniciar_ronda_esporadica(
        &self,
        request: &IniciarRondaEsporadicaRequest,
    ) -> Result<RondaIniciada, ApiError> {
        let url = self.endpoint("/api/rondas-esporadicas/iniciar").to_url()?;
        self.get_checked(
            self.request(Method::POST, url).json(request),
            "POST /api/rondas-esporadicas/iniciar",
        )
        .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn finalizar_ronda_esporadica(
        &self,
        id: RondaId,
        request: &FinalizarRondaEsporadicaRequest,
    ) -> Result<Ack, ApiError> {
        let url = self
            .endpoint(&format!("/api/rondas-esporadicas/finalizar/{}", id))
            .to_url()?;
        self.get_checked(
            self.request(Method::PUT, url).json(request),
            "PUT /api/rondas-esporadicas/finalizar",
        )
        .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn ronda_esporadica_em_andamento(
        &self,
        condominio_id: CondominioId,
        data_plantao: Date,
    ) -> Result<RondaEmAndamento, ApiError> {
        let data = formats::format_date(data_plantao);
        let url = self
            .endpoint(&format!(
                "/api/rondas-esporadicas/em-andamento/{}",
                condominio_id
            ))
            .with_query(&[("data_plantao", data.as_str())])?;
        self.get_json(
            self.request(Method::GET, url),
            "GET /api/rondas-esporadicas/em-andamento",
        )
        .await
    }

    /// Finished sporadic patrols of one condominium, optionally limited to a
    /// period. The backend rejects the query without a condominium.
    #[tracing::instrument(skip(self))]
    pub async fn rondas_executadas(
        &self,
        condominio_id: CondominioId,
        periodo: PeriodoFiltro,
    ) -> Result<Vec<RondaEsporadica>, ApiError> {
        let condominio = condominio_id.to_string();
        let inicio = periodo.data_inicio.map(formats::format_date).unwrap_or_default();
        let fim = periodo.data_fim.map(formats::format_date).unwrap_or_default();

        let url = self
            .endpoint("/api/rondas-esporadicas/executadas")
            .with_query(&[
                ("condominio_id", condominio.as_str()),
                ("data_inicio", inicio.as_str()),
                ("data_fim", fim.as_str()),
            ])?;
        let response: ExecutadasResponse = self
            .get_checked(
                self.request(Method::GET, url),
                "GET /api/rondas-esporadicas/executadas",
            )
            .await?;
        Ok(response.rondas)
    }

    /// Records a patrol that already happened: starts it and immediately
    /// finishes it with the given exit time.
    #[tracing::instrument(skip(self))]
    pub async fn salvar_ronda_completa(&self, ronda: &RondaCompleta) -> Result<RondaId, ApiError> {
        let iniciada = self
            .iniciar_ronda_esporadica(&IniciarRondaEsporadicaRequest {
                condominio_id: ronda.condominio_id,
                user_id: ronda.user_id,
                data_plantao: ronda.data_plantao,
                hora_entrada: ronda.hora_entrada,
                escala_plantao: ronda.escala_plantao.clone(),
                turno: ronda.turno.clone(),
                observacoes: ronda.observacoes.clone(),
                supervisor_id: None,
            })
            .await?;

        let id = iniciada.ronda_id.ok_or_else(|| {
            ApiError::Parse("POST /api/rondas-esporadicas/iniciar returned no ronda_id".to_string())
        })?;

        self.finalizar_ronda_esporadica(
            id,
            &FinalizarRondaEsporadicaRequest {
                hora_saida: ronda.hora_saida,
                observacoes: ronda.observacoes.clone(),
            },
        )
        .await?;

        tracing::info!(%id, "sporadic patrol saved");
        Ok(id)
    }
}
