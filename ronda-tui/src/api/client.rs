use ronda_api::domain::{
    Colaborador, Condominio, CondominioId, ConsolidacaoResultado, FinalizarRondaEsporadicaRequest,
    IniciarRondaEsporadicaRequest, Logradouro, Ocorrencia, OcorrenciaFiltro, OcorrenciaId,
    PeriodoFiltro, RondaCompleta, RondaEmAndamento, RondaEsporadica, RondaId, StatusConsolidacao,
};
use ronda_api::{AnaliseRelatorio, ApiError, RondaClient, Token};
use time::Date;

use crate::api::dev_backend::DevBackend;

/// Backend access for the UI. In dev mode every call is answered by an
/// in-memory [`DevBackend`] instead of the HTTP client.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: RondaClient,
    dev_backend: Option<DevBackend>,
}

impl ApiClient {
    pub fn new(base_url: &str, token: &str) -> Result<Self, ApiError> {
        let client = RondaClient::new(base_url)?.with_token(Token::new(token));
        Ok(Self {
            client,
            dev_backend: None,
        })
    }

    pub fn dev() -> Result<Self, ApiError> {
        Ok(Self {
            client: RondaClient::new("http://localhost")?,
            dev_backend: Some(DevBackend::new()),
        })
    }

    pub fn is_dev(&self) -> bool {
        self.dev_backend.is_some()
    }

    pub async fn condominios(&self) -> Result<Vec<Condominio>, ApiError> {
        if let Some(dev) = &self.dev_backend {
            return Ok(dev.condominios());
        }
        self.client.buscar_condominios("").await
    }

    pub async fn colaboradores(&self, nome: &str) -> Result<Vec<Colaborador>, ApiError> {
        if let Some(dev) = &self.dev_backend {
            return Ok(dev.colaboradores(nome));
        }
        self.client.buscar_colaboradores(nome).await
    }

    pub async fn logradouros(&self, nome: &str) -> Result<Vec<Logradouro>, ApiError> {
        if let Some(dev) = &self.dev_backend {
            return Ok(dev.logradouros(nome));
        }
        self.client.buscar_logradouros(nome).await
    }

    /// Starts a sporadic patrol and returns its server id.
    pub async fn iniciar_ronda(
        &self,
        request: &IniciarRondaEsporadicaRequest,
    ) -> Result<RondaId, ApiError> {
        if let Some(dev) = &self.dev_backend {
            return Ok(dev.iniciar(request));
        }
        let iniciada = self.client.iniciar_ronda_esporadica(request).await?;
        iniciada
            .ronda_id
            .ok_or_else(|| ApiError::Parse("start response without ronda_id".to_string()))
    }

    pub async fn finalizar_ronda(
        &self,
        id: RondaId,
        request: &FinalizarRondaEsporadicaRequest,
    ) -> Result<(), ApiError> {
        if let Some(dev) = &self.dev_backend {
            return dev.finalizar(id, request);
        }
        self.client.finalizar_ronda_esporadica(id, request).await?;
        Ok(())
    }

    pub async fn ronda_em_andamento(
        &self,
        condominio_id: CondominioId,
        data_plantao: Date,
    ) -> Result<RondaEmAndamento, ApiError> {
        if let Some(dev) = &self.dev_backend {
            return Ok(dev.em_andamento(condominio_id, data_plantao));
        }
        self.client
            .ronda_esporadica_em_andamento(condominio_id, data_plantao)
            .await
    }

    /// Finished patrols of one condominium on the shift date.
    pub async fn rondas_executadas(
        &self,
        condominio_id: CondominioId,
        data: Date,
    ) -> Result<Vec<RondaEsporadica>, ApiError> {
        if let Some(dev) = &self.dev_backend {
            return Ok(dev.executadas(condominio_id, data));
        }
        self.client
            .rondas_executadas(condominio_id, PeriodoFiltro::dia(data))
            .await
    }

    pub async fn salvar_ronda_completa(&self, ronda: &RondaCompleta) -> Result<RondaId, ApiError> {
        if let Some(dev) = &self.dev_backend {
            return dev.salvar_completa(ronda);
        }
        self.client.salvar_ronda_completa(ronda).await
    }

    pub async fn status_consolidacao(
        &self,
        condominio_id: CondominioId,
        data: Date,
    ) -> Result<StatusConsolidacao, ApiError> {
        if let Some(dev) = &self.dev_backend {
            return Ok(dev.status_consolidacao(condominio_id, data));
        }
        self.client.status_consolidacao(condominio_id, data).await
    }

    /// Consolidates the shift. `completo` also marks the patrols as processed
    /// and sends the WhatsApp report on the server side.
    pub async fn consolidar(
        &self,
        condominio_id: CondominioId,
        data: Date,
        completo: bool,
    ) -> Result<ConsolidacaoResultado, ApiError> {
        if let Some(dev) = &self.dev_backend {
            return Ok(dev.consolidar(condominio_id, data, completo));
        }
        if completo {
            self.client.processo_completo(condominio_id, data).await
        } else {
            self.client.consolidar_turno(condominio_id, data).await
        }
    }

    pub async fn ocorrencias(&self, filtro: &OcorrenciaFiltro) -> Result<Vec<Ocorrencia>, ApiError> {
        if let Some(dev) = &self.dev_backend {
            return Ok(dev.ocorrencias(filtro));
        }
        self.client.historico_ocorrencias(filtro).await
    }

    pub async fn ocorrencia(&self, id: OcorrenciaId) -> Result<Ocorrencia, ApiError> {
        if let Some(dev) = &self.dev_backend {
            return dev.ocorrencia(id);
        }
        self.client.detalhe_ocorrencia(id).await
    }

    pub async fn analisar_relatorio(&self, texto: &str) -> Result<AnaliseRelatorio, ApiError> {
        if self.dev_backend.is_some() {
            return Ok(DevBackend::analisar(texto));
        }
        self.client.analisar_relatorio(texto).await
    }
}
