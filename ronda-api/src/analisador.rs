use reqwest::Method;
use time::{Date, Time};

use crate::{
    domain::{formats, AnalisarRelatorioRequest, AnaliseResponse},
    ApiError, RondaClient,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnaliseOrigem {
    Backend,
    /// The analyzer answered 405 and the text was cleaned up locally.
    LocalFallback,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnaliseRelatorio {
    pub origem: AnaliseOrigem,
    pub relatorio_corrigido: String,
    pub data_hora_ocorrencia: Option<String>,
    pub endereco_especifico: Option<String>,
    pub colaboradores_envolvidos: Vec<String>,
}

impl AnaliseRelatorio {
    fn local(texto: &str) -> Self {
        Self {
            origem: AnaliseOrigem::LocalFallback,
            relatorio_corrigido: fallback_relatorio(texto),
            data_hora_ocorrencia: None,
            endereco_especifico: None,
            colaboradores_envolvidos: Vec::new(),
        }
    }

    /// Splits `data_hora_ocorrencia` into date and time, if it parses.
    pub fn data_hora(&self) -> Option<(Date, Time)> {
        formats::parse_data_hora(self.data_hora_ocorrencia.as_deref()?)
    }
}

impl RondaClient {
    /// Sends the assembled report text to the analyzer. When the endpoint is
    /// not available (HTTP 405) the text is cleaned up locally instead.
    #[tracing::instrument(skip(self, texto), fields(len = texto.len()))]
    pub async fn analisar_relatorio(&self, texto: &str) -> Result<AnaliseRelatorio, ApiError> {
        let url = self
            .endpoint("/api/analisador/processar-relatorio")
            .to_url()?;
        let request = self
            .request(Method::POST, url)
            .json(&AnalisarRelatorioRequest {
                texto_relatorio: texto,
            });

        let response: AnaliseResponse = match self
            .get_checked(request, "POST /api/analisador/processar-relatorio")
            .await
        {
            Ok(response) => response,
            Err(ApiError::MethodNotAllowed) => {
                tracing::warn!("analyzer returned 405, formatting report locally");
                return Ok(AnaliseRelatorio::local(texto));
            }
            Err(e) => return Err(e),
        };

        let dados = response.dados.unwrap_or_default();
        let relatorio_corrigido = dados
            .relatorio_corrigido
            .filter(|r| !r.trim().is_empty())
            .unwrap_or_else(|| fallback_relatorio(texto));

        Ok(AnaliseRelatorio {
            origem: AnaliseOrigem::Backend,
            relatorio_corrigido,
            data_hora_ocorrencia: dados.data_hora_ocorrencia,
            endereco_especifico: dados.endereco_especifico.filter(|e| !e.trim().is_empty()),
            colaboradores_envolvidos: dados.colaboradores_envolvidos,
        })
    }
}

/// Local cleanup used when the analyzer is unavailable: collapses runs of
/// whitespace, keeps at most one blank line between paragraphs and
/// capitalises the first letter of every sentence.
pub fn fallback_relatorio(texto: &str) -> String {
    let mut linhas: Vec<String> = Vec::new();
    let mut pending_blank = false;

    for line in texto.lines() {
        let normalized = line.split_whitespace().collect::<Vec<_>>().join(" ");
        if normalized.is_empty() {
            pending_blank = !linhas.is_empty();
            continue;
        }
        if pending_blank {
            linhas.push(String::new());
            pending_blank = false;
        }
        linhas.push(capitalize_sentences(&normalized));
    }

    linhas.join("\n")
}

fn capitalize_sentences(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut sentence_start = true;

    for c in line.chars() {
        if sentence_start && c.is_alphabetic() {
            out.extend(c.to_uppercase());
            sentence_start = false;
            continue;
        }
        if c.is_alphanumeric() {
            sentence_start = false;
        }
        out.push(c);
        if matches!(c, '.' | '!' | '?') {
            sentence_start = true;
        }
    }

    out
}
