use ronda_api::domain::{
    Colaborador, Condominio, CondominioId, ConsolidacaoResultado, FinalizarRondaEsporadicaRequest,
    IniciarRondaEsporadicaRequest, Logradouro, Ocorrencia, OcorrenciaFiltro, OcorrenciaId,
    ResumoConsolidacao, RondaAtiva, RondaCompleta, RondaEmAndamento, RondaEsporadica, RondaId,
    StatusConsolidacao,
};
use ronda_api::{fallback_relatorio, AnaliseOrigem, AnaliseRelatorio, ApiError};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use time::{Date, Time};

use crate::domain::shift_window;

const CONDOMINIOS: [&str; 6] = [
    "Residencial Jardim Europa",
    "Residencial Vila Nova",
    "Condomínio Parque das Flores",
    "Residencial Central",
    "Condomínio Solar dos Ipês",
    "Residencial Bela Vista",
];

const COLABORADORES: [(&str, &str); 4] = [
    ("Carlos Silva", "Vigilante"),
    ("Ana Souza", "Supervisora"),
    ("João Pereira", "Vigilante"),
    ("Marcos Oliveira", "Porteiro"),
];

const LOGRADOUROS: [&str; 5] = [
    "Rua das Acácias",
    "Rua dos Ipês",
    "Avenida Brasil",
    "Travessa das Flores",
    "Alameda Santos",
];

/// Offline backend for `ronda-tui dev`.
#[derive(Debug, Clone)]
pub struct DevBackend {
    store: Arc<Mutex<DevStore>>,
}

#[derive(Debug, Default)]
struct DevStore {
    rondas: Vec<RondaEsporadica>,
    ocorrencias: Vec<Ocorrencia>,
    next_id: i64,
}

impl DevStore {
    fn next_id(&mut self) -> RondaId {
        self.next_id += 1;
        RondaId::new(self.next_id)
    }
}

fn matches_nome(nome: &str, query: &str) -> bool {
    query.trim().is_empty() || nome.to_lowercase().contains(&query.trim().to_lowercase())
}

fn nome_condominio(id: CondominioId) -> Option<String> {
    usize::try_from(id.as_i64() - 1)
        .ok()
        .and_then(|i| CONDOMINIOS.get(i))
        .map(|nome| nome.to_string())
}

fn ocorrencia(
    id: i64,
    condominio: usize,
    data_hora: &str,
    status: &str,
    tipo: &str,
    relatorio: &str,
) -> Ocorrencia {
    Ocorrencia {
        id: OcorrenciaId::new(id),
        relatorio_final: Some(relatorio.to_string()),
        data_hora_ocorrencia: Some(data_hora.to_string()),
        turno: Some("Noturno".to_string()),
        status: Some(status.to_string()),
        endereco_especifico: Some(LOGRADOUROS[condominio % LOGRADOUROS.len()].to_string()),
        condominio: CONDOMINIOS.get(condominio).map(|nome| nome.to_string()),
        tipo: Some(tipo.to_string()),
        supervisor: Some(1),
        colaboradores: vec![COLABORADORES[condominio % COLABORADORES.len()].0.to_string()],
        orgaos_acionados: Vec::new(),
        data_criacao: Some(data_hora.to_string()),
        data_modificacao: None,
    }
}

fn seed_ocorrencias() -> Vec<Ocorrencia> {
    vec![
        ocorrencia(
            1,
            0,
            "2026-10-12T22:30:00",
            "Aprovado",
            "Portão aberto",
            "Portão da garagem encontrado aberto.\nMorador avisado.\nPortão fechado.",
        ),
        ocorrencia(
            2,
            1,
            "2026-10-15T02:10:00",
            "Rejeitado",
            "Barulho",
            "Som alto no bloco B. Situação normalizada.",
        ),
        ocorrencia(
            3,
            0,
            "2026-10-18T23:40:00",
            "Pendente",
            "Suspeito",
            "Pessoa em atitude suspeita na entrada.\nPolícia Militar acionada.",
        ),
    ]
}

fn dentro_do_periodo(ocorrencia: &Ocorrencia, filtro: &OcorrenciaFiltro) -> bool {
    let Some((data, _)) = ocorrencia.data_hora() else {
        return filtro.data_inicio.is_none() && filtro.data_fim.is_none();
    };
    filtro.data_inicio.is_none_or(|inicio| data >= inicio)
        && filtro.data_fim.is_none_or(|fim| data <= fim)
}

fn duracao(data: Date, escala: &str, inicio: Time, fim: Time) -> i64 {
    let window = shift_window(data, escala);
    (window.anchor(fim) - window.anchor(inicio)).whole_minutes()
}

impl DevBackend {
    pub fn new() -> Self {
        Self {
            store: Arc::new(Mutex::new(DevStore {
                rondas: Vec::new(),
                ocorrencias: seed_ocorrencias(),
                next_id: 100,
            })),
        }
    }

    fn store(&self) -> MutexGuard<'_, DevStore> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn condominios(&self) -> Vec<Condominio> {
        CONDOMINIOS
            .iter()
            .zip(1..)
            .map(|(nome, id)| Condominio {
                id: CondominioId::new(id),
                nome: nome.to_string(),
            })
            .collect()
    }

    pub fn colaboradores(&self, nome: &str) -> Vec<Colaborador> {
        COLABORADORES
            .iter()
            .zip(1..)
            .filter(|((n, _), _)| matches_nome(n, nome))
            .map(|((n, cargo), id)| Colaborador {
                id,
                nome_completo: n.to_string(),
                cargo: Some(cargo.to_string()),
                matricula: Some(format!("{:05}", 10000 + id)),
            })
            .collect()
    }

    pub fn logradouros(&self, nome: &str) -> Vec<Logradouro> {
        LOGRADOUROS
            .iter()
            .zip(1..)
            .filter(|(n, _)| matches_nome(n, nome))
            .map(|(n, id)| Logradouro {
                id,
                nome: n.to_string(),
            })
            .collect()
    }

    pub fn iniciar(&self, request: &IniciarRondaEsporadicaRequest) -> RondaId {
        let mut store = self.store();
        let id = store.next_id();
        store.rondas.push(RondaEsporadica {
            id,
            condominio_id: request.condominio_id,
            condominio_nome: nome_condominio(request.condominio_id),
            user_id: Some(request.user_id),
            user_nome: Some("Dev User".to_string()),
            data_plantao: request.data_plantao,
            hora_entrada: Some(request.hora_entrada),
            hora_saida: None,
            duracao_minutos: None,
            duracao_formatada: None,
            escala_plantao: request.escala_plantao.clone(),
            turno: Some(request.turno.clone()),
            observacoes: request.observacoes.clone(),
            status: "em_andamento".to_string(),
        });
        id
    }

    pub fn finalizar(
        &self,
        id: RondaId,
        request: &FinalizarRondaEsporadicaRequest,
    ) -> Result<(), ApiError> {
        let mut store = self.store();
        let ronda = store
            .rondas
            .iter_mut()
            .find(|r| r.id == id && r.status == "em_andamento")
            .ok_or_else(|| ApiError::Backend {
                message: "Ronda não encontrada ou já finalizada".to_string(),
            })?;

        let inicio = ronda.hora_entrada.unwrap_or(request.hora_saida);
        let minutos = duracao(ronda.data_plantao, &ronda.escala_plantao, inicio, request.hora_saida);
        ronda.hora_saida = Some(request.hora_saida);
        ronda.duracao_minutos = Some(minutos);
        ronda.duracao_formatada = Some(format!("{}min", minutos));
        ronda.status = "finalizada".to_string();
        if request.observacoes.is_some() {
            ronda.observacoes = request.observacoes.clone();
        }
        Ok(())
    }

    pub fn em_andamento(&self, condominio_id: CondominioId, data: Date) -> RondaEmAndamento {
        let store = self.store();
        let Some(ronda) = store.rondas.iter().find(|r| {
            r.condominio_id == condominio_id && r.data_plantao == data && r.status == "em_andamento"
        }) else {
            return RondaEmAndamento::nenhuma();
        };

        RondaEmAndamento {
            em_andamento: true,
            ronda: Some(RondaAtiva {
                id: ronda.id,
                inicio: None,
                data_plantao: Some(ronda.data_plantao),
                hora_entrada: ronda.hora_entrada,
                escala_plantao: Some(ronda.escala_plantao.clone()),
                turno: ronda.turno.clone(),
                observacoes: ronda.observacoes.clone(),
                user_id: ronda.user_id,
                user_nome: ronda.user_nome.clone(),
            }),
        }
    }

    /// Like the server, only finished patrols of the given condominium.
    pub fn executadas(&self, condominio_id: CondominioId, data: Date) -> Vec<RondaEsporadica> {
        self.store()
            .rondas
            .iter()
            .filter(|r| r.condominio_id == condominio_id && r.data_plantao == data)
            .filter(|r| r.status == "finalizada")
            .cloned()
            .collect()
    }

    pub fn salvar_completa(&self, ronda: &RondaCompleta) -> Result<RondaId, ApiError> {
        let id = self.iniciar(&IniciarRondaEsporadicaRequest {
            condominio_id: ronda.condominio_id,
            user_id: ronda.user_id,
            data_plantao: ronda.data_plantao,
            hora_entrada: ronda.hora_entrada,
            escala_plantao: ronda.escala_plantao.clone(),
            turno: ronda.turno.clone(),
            observacoes: ronda.observacoes.clone(),
            supervisor_id: None,
        });
        self.finalizar(
            id,
            &FinalizarRondaEsporadicaRequest {
                hora_saida: ronda.hora_saida,
                observacoes: ronda.observacoes.clone(),
            },
        )?;
        Ok(id)
    }

    fn do_turno(&self, condominio_id: CondominioId, data: Date) -> Vec<RondaEsporadica> {
        self.store()
            .rondas
            .iter()
            .filter(|r| r.condominio_id == condominio_id && r.data_plantao == data)
            .cloned()
            .collect()
    }

    pub fn status_consolidacao(&self, condominio_id: CondominioId, data: Date) -> StatusConsolidacao {
        let rondas = self.do_turno(condominio_id, data);
        let finalizadas: Vec<_> = rondas.iter().filter(|r| r.status == "finalizada").collect();
        let processadas = rondas.iter().filter(|r| r.status == "processada").count();

        StatusConsolidacao {
            sucesso: true,
            message: None,
            condominio_id: Some(condominio_id),
            status: ResumoConsolidacao {
                total_rondas_esporadicas: rondas.len() as i64,
                rondas_finalizadas: finalizadas.len() as i64,
                rondas_processadas: processadas as i64,
                duracao_total_minutos: finalizadas.iter().filter_map(|r| r.duracao_minutos).sum(),
                ronda_principal_criada: processadas > 0,
                ronda_principal_id: None,
                pode_consolidar: !finalizadas.is_empty(),
                ja_consolidado: processadas > 0 && finalizadas.is_empty(),
            },
        }
    }

    pub fn consolidar(
        &self,
        condominio_id: CondominioId,
        data: Date,
        completo: bool,
    ) -> ConsolidacaoResultado {
        let mut store = self.store();
        let principal = store.next_id();
        let mut linhas = Vec::new();
        let mut total = 0;
        let mut minutos = 0;
        let mut escala = String::new();

        for ronda in store
            .rondas
            .iter_mut()
            .filter(|r| r.condominio_id == condominio_id && r.data_plantao == data)
            .filter(|r| r.status == "finalizada")
        {
            if let (Some(entrada), Some(saida)) = (ronda.hora_entrada, ronda.hora_saida) {
                linhas.push(format!(
                    "\tInício: {}  – Término: {} ({} min)",
                    crate::domain::format_hora(entrada),
                    crate::domain::format_hora(saida),
                    ronda.duracao_minutos.unwrap_or_default()
                ));
            }
            total += 1;
            minutos += ronda.duracao_minutos.unwrap_or_default();
            escala = ronda.escala_plantao.clone();
            if completo {
                ronda.status = "processada".to_string();
            }
        }

        if total == 0 {
            return ConsolidacaoResultado {
                sucesso: false,
                message: Some("Nenhuma ronda finalizada para consolidar".to_string()),
                relatorio_consolidado: None,
                total_rondas: Some(0),
                periodo: None,
                duracao_total_minutos: None,
                whatsapp_enviado: Some(false),
                ronda_principal_id: None,
            };
        }

        let periodo = shift_window(data, &escala);
        ConsolidacaoResultado {
            sucesso: true,
            message: Some(format!("{} rondas consolidadas", total)),
            relatorio_consolidado: Some(format!(
                "Residencial: {}\n{}",
                nome_condominio(condominio_id).unwrap_or_default(),
                linhas.join("\n")
            )),
            total_rondas: Some(total),
            periodo: Some(format!(
                "{} - {} ({})",
                periodo.inicio_formatado,
                periodo.fim_formatado,
                periodo.escala.turno()
            )),
            duracao_total_minutos: Some(minutos),
            whatsapp_enviado: Some(completo),
            ronda_principal_id: Some(principal),
        }
    }

    /// Newest first, like the server.
    pub fn ocorrencias(&self, filtro: &OcorrenciaFiltro) -> Vec<Ocorrencia> {
        let condominio = filtro.condominio_id.and_then(nome_condominio);
        let mut ocorrencias: Vec<Ocorrencia> = self
            .store()
            .ocorrencias
            .iter()
            .filter(|o| {
                filtro
                    .status
                    .as_deref()
                    .is_none_or(|status| o.status.as_deref() == Some(status))
            })
            .filter(|o| {
                condominio
                    .as_deref()
                    .is_none_or(|nome| o.condominio.as_deref() == Some(nome))
            })
            .filter(|o| dentro_do_periodo(o, filtro))
            .cloned()
            .collect();
        ocorrencias.sort_by(|a, b| b.data_hora_ocorrencia.cmp(&a.data_hora_ocorrencia));
        ocorrencias
    }

    pub fn ocorrencia(&self, id: OcorrenciaId) -> Result<Ocorrencia, ApiError> {
        self.store()
            .ocorrencias
            .iter()
            .find(|o| o.id == id)
            .cloned()
            .ok_or_else(|| ApiError::Backend {
                message: "Ocorrência não encontrada".to_string(),
            })
    }

    pub fn analisar(texto: &str) -> AnaliseRelatorio {
        AnaliseRelatorio {
            origem: AnaliseOrigem::LocalFallback,
            relatorio_corrigido: fallback_relatorio(texto),
            data_hora_ocorrencia: None,
            endereco_especifico: None,
            colaboradores_envolvidos: Vec::new(),
        }
    }
}

impl Default for DevBackend {
    fn default() -> Self {
        Self::new()
    }
}
