use crate::api::ApiClient;
use crate::app::{App, LookupKind, TextInput};
use crate::domain::{
    build_report, condominiums_to_confirm, format_data_br, format_hora, hora_atual,
    ocorrencia_detalhe, parse_hora_input, validate_entry_time, Patrol, PatrolStatus,
};
use anyhow::Result;
use ronda_api::domain::{
    FinalizarRondaEsporadicaRequest, IniciarRondaEsporadicaRequest, OcorrenciaId, RondaCompleta,
    UserId,
};
use ronda_api::{AnaliseOrigem, ApiError};
use time::Time;

use super::action_queue::Action;

pub(super) async fn run_action(action: Action, app: &mut App, client: &ApiClient) -> Result<()> {
    match action {
        Action::StartPatrol => start_patrol(app, client).await,
        Action::FinishPatrol => finish_patrol(app, client).await,
        Action::SaveCompletePatrol => save_complete_patrol(app, client).await,
        Action::Reconcile => reconcile(app, client).await,
        Action::Consolidate => consolidate(app, client).await,
        Action::CheckActivePatrol => check_active_patrol(app, client).await,
        Action::Lookup { kind, query } => lookup(app, client, kind, query).await,
        Action::AnalyzeReport => analyze_report(app, client).await,
        Action::LoadOcorrencias => load_ocorrencias(app, client).await,
        Action::OpenOcorrencia(id) => open_ocorrencia(app, client, id).await,
    }
    Ok(())
}

fn report_api_error(app: &mut App, call: &str, err: ApiError) {
    tracing::warn!(call, error = %err, "backend call failed");
    let mut message = err.user_message();
    if err.is_unauthorized() {
        message.push_str(" Execute `ronda-tui login`.");
    }
    app.set_status(message);
}

/// Blank is `None`; anything unparseable is an error message.
fn read_hora(input: &TextInput, campo: &str) -> Result<Option<Time>, String> {
    if input.is_blank() {
        return Ok(None);
    }
    parse_hora_input(&input.value)
        .map(Some)
        .ok_or_else(|| format!("Horário de {} inválido. Use HH:MM.", campo))
}

async fn start_patrol(app: &mut App, client: &ApiClient) {
    let inicio = match read_hora(&app.inicio_input, "início") {
        Ok(inicio) => inicio,
        Err(msg) => return app.set_status(msg),
    };
    if let Some(hora) = inicio {
        if let Err(e) = validate_entry_time(hora, hora_atual()) {
            return app.set_status(e.to_string());
        }
    }

    let condominio_id = app.resolved_condominio_id();
    let residencial = app.residencial_input.value.clone();
    let hora_entrada = match app.tracker.start(&residencial, condominio_id, inicio) {
        Ok(patrol) => patrol.inicio,
        Err(e) => return app.set_status(e.to_string()),
    };

    let Some(condominio_id) = condominio_id else {
        app.set_status(format!(
            "Ronda iniciada às {} (residencial fora do cadastro, salva só localmente)",
            format_hora(hora_entrada)
        ));
        return;
    };

    let request = IniciarRondaEsporadicaRequest {
        condominio_id,
        user_id: UserId::new(app.user_id),
        data_plantao: app.tracker.data_plantao(),
        hora_entrada,
        escala_plantao: app.tracker.escala().to_string(),
        turno: app.escala().turno().to_string(),
        observacoes: None,
        supervisor_id: None,
    };

    match client.iniciar_ronda(&request).await {
        Ok(id) => {
            app.tracker.set_remote_id(id);
            app.termino_input.clear();
            app.set_status(format!(
                "Ronda iniciada em {} às {}",
                residencial.trim(),
                format_hora(hora_entrada)
            ));
        }
        Err(e) => {
            app.tracker.cancel();
            report_api_error(app, "iniciar ronda", e);
        }
    }
}

async fn finish_patrol(app: &mut App, client: &ApiClient) {
    let termino = match read_hora(&app.termino_input, "término") {
        Ok(termino) => termino,
        Err(msg) => return app.set_status(msg),
    };
    if let Err(e) = app.tracker.duration_until(termino) {
        return app.set_status(e.to_string());
    }

    let remote_id = app.tracker.active().and_then(|p| p.id);
    if let (Some(id), Some(hora_saida)) = (remote_id, termino) {
        let request = FinalizarRondaEsporadicaRequest {
            hora_saida,
            observacoes: None,
        };
        if let Err(e) = client.finalizar_ronda(id, &request).await {
            return report_api_error(app, "finalizar ronda", e);
        }
    }

    match app.tracker.finish(termino) {
        Ok(patrol) => {
            let message = format!(
                "Ronda finalizada: {} ({} min)",
                patrol.residencial,
                patrol.duracao.unwrap_or_default()
            );
            app.set_status(message);
            app.clear_patrol_inputs();
            if app.pending.is_some() {
                let executed = std::mem::take(&mut app.executed);
                app.set_executed(executed);
            }
        }
        Err(e) => app.set_status(e.to_string()),
    }
}

/// Records a patrol that already happened. The entry time is not checked
/// against the clock.
async fn save_complete_patrol(app: &mut App, client: &ApiClient) {
    let (inicio, termino) = match (
        read_hora(&app.inicio_input, "início"),
        read_hora(&app.termino_input, "término"),
    ) {
        (Ok(inicio), Ok(termino)) => (inicio, termino),
        (Err(msg), _) | (_, Err(msg)) => return app.set_status(msg),
    };

    let condominio_id = app.resolved_condominio_id();
    let residencial = app.residencial_input.value.clone();
    let patrol = match app
        .tracker
        .record_completed(&residencial, condominio_id, inicio, termino)
    {
        Ok(patrol) => patrol.clone(),
        Err(e) => return app.set_status(e.to_string()),
    };
    let index = app.tracker.session().len().saturating_sub(1);

    if let (Some(condominio_id), Some(hora_saida)) = (condominio_id, patrol.termino) {
        let ronda = RondaCompleta {
            condominio_id,
            user_id: UserId::new(app.user_id),
            data_plantao: app.tracker.data_plantao(),
            hora_entrada: patrol.inicio,
            hora_saida,
            escala_plantao: app.tracker.escala().to_string(),
            turno: app.escala().turno().to_string(),
            observacoes: None,
        };
        if let Err(e) = client.salvar_ronda_completa(&ronda).await {
            app.tracker.remove(index);
            return report_api_error(app, "salvar ronda completa", e);
        }
    }

    app.clear_patrol_inputs();
    app.set_status(format!(
        "Ronda registrada: {} ({} min)",
        patrol.residencial,
        patrol.duracao.unwrap_or_default()
    ));
}

/// Asks the backend, one condominium at a time, which of the saved patrols
/// it has on record for the shift.
async fn reconcile(app: &mut App, client: &ApiClient) {
    if app.tracker.session().is_empty() {
        return app.set_status("Nenhuma ronda salva para conferir".to_string());
    }
    let data = app.tracker.data_plantao();

    let mut executed = Vec::new();
    for condominio_id in condominiums_to_confirm(app.tracker.session()) {
        match client.rondas_executadas(condominio_id, data).await {
            Ok(rondas) => executed.extend(rondas),
            Err(e) => return report_api_error(app, "rondas executadas", e),
        }
    }

    app.set_executed(executed);
    let pendentes = app.pending.as_ref().map(Vec::len).unwrap_or_default();
    if pendentes == 0 {
        app.set_status("Todas as rondas salvas foram confirmadas".to_string());
    } else {
        app.set_status(format!("{} condomínio(s) com rondas pendentes", pendentes));
    }
}

async fn consolidate(app: &mut App, client: &ApiClient) {
    let Some((condominio_id, nome)) = app.consolidation_target() else {
        return app.set_status("Informe o residencial a consolidar".to_string());
    };
    let data = app.tracker.data_plantao();

    let status = match client.status_consolidacao(condominio_id, data).await {
        Ok(status) => status.status,
        Err(e) => return report_api_error(app, "status consolidação", e),
    };
    if status.ja_consolidado {
        return app.set_status(format!("O turno de {} já foi consolidado", nome));
    }
    if !status.pode_consolidar {
        return app.set_status(format!("Nenhuma ronda finalizada para consolidar em {}", nome));
    }

    match client.consolidar(condominio_id, data, true).await {
        Ok(resultado) => {
            let body = resultado
                .relatorio_consolidado
                .clone()
                .or_else(|| resultado.message.clone())
                .unwrap_or_default();
            let link = app.share_link(&body);
            app.open_preview(&format!("Consolidação - {}", nome), body, Some(link));
            app.set_status(format!(
                "{} rondas consolidadas ({} min){}",
                resultado.total_rondas.unwrap_or_default(),
                resultado.duracao_total_minutos.unwrap_or_default(),
                if resultado.whatsapp_enviado == Some(true) {
                    ", WhatsApp enviado"
                } else {
                    ""
                }
            ));
        }
        Err(e) => report_api_error(app, "consolidar turno", e),
    }
}

/// Restores a patrol the backend still has running for the chosen
/// condominium.
async fn check_active_patrol(app: &mut App, client: &ApiClient) {
    if app.tracker.active().is_some() {
        return;
    }
    let Some(condominio) = app.resolved_condominio().cloned() else {
        return;
    };

    let andamento = match client
        .ronda_em_andamento(condominio.id, app.tracker.data_plantao())
        .await
    {
        Ok(andamento) => andamento,
        Err(e) => return report_api_error(app, "ronda em andamento", e),
    };
    let Some(ronda) = andamento.ronda.filter(|_| andamento.em_andamento) else {
        return;
    };
    let Some(inicio) = ronda.hora_entrada else {
        tracing::warn!(id = %ronda.id, "running patrol without hora_entrada");
        return;
    };

    app.tracker.restore_active(Patrol {
        id: Some(ronda.id),
        residencial: condominio.nome,
        condominio_id: Some(condominio.id),
        inicio,
        termino: None,
        duracao: None,
        status: PatrolStatus::Iniciada,
    });
    app.inicio_input.set(&format_hora(inicio));
    app.set_status(format!(
        "Ronda em andamento restaurada (início {})",
        format_hora(inicio)
    ));
}

async fn lookup(app: &mut App, client: &ApiClient, kind: LookupKind, query: String) {
    let nomes: Result<Vec<String>, ApiError> = match kind {
        LookupKind::Colaboradores => client
            .colaboradores(&query)
            .await
            .map(|list| list.into_iter().map(|c| c.nome_completo).collect()),
        LookupKind::Logradouros => client
            .logradouros(&query)
            .await
            .map(|list| list.into_iter().map(|l| l.nome).collect()),
    };

    match nomes {
        Ok(nomes) => app.apply_suggestions(kind, &query, nomes),
        Err(e) => tracing::warn!(?kind, error = %e, "autocomplete failed"),
    }
}

async fn analyze_report(app: &mut App, client: &ApiClient) {
    if app.relatorio_input.is_blank() {
        return app.set_status("Descreva a ocorrência antes de analisar".to_string());
    }
    let texto = match app.report_fields() {
        Ok(fields) => fields.submission_text(),
        Err(msg) => return app.set_status(msg),
    };

    let analise = match client.analisar_relatorio(&texto).await {
        Ok(analise) => analise,
        Err(e) => return report_api_error(app, "analisar relatório", e),
    };

    if let Some((data, hora)) = analise.data_hora() {
        app.data_input.set(&format_data_br(data));
        app.hora_input.set(&format_hora(hora));
    }
    if let Some(endereco) = analise
        .endereco_especifico
        .as_deref()
        .filter(|e| !e.trim().is_empty())
    {
        app.endereco_input.set(endereco);
    }
    if !analise.colaboradores_envolvidos.is_empty() {
        app.colaborador_input
            .set(&analise.colaboradores_envolvidos.join(", "));
    }
    app.persist_form();

    let relatorio = match app.report_fields() {
        Ok(fields) => build_report(&fields, &analise.relatorio_corrigido),
        Err(msg) => return app.set_status(msg),
    };
    let link = app.share_link(&relatorio);
    app.relatorio_limpo = Some(relatorio.clone());
    app.open_preview("Relatório de ocorrência", relatorio, Some(link));
    app.set_status(match analise.origem {
        AnaliseOrigem::Backend => "Relatório analisado".to_string(),
        AnaliseOrigem::LocalFallback => {
            "Analisador indisponível: relatório formatado localmente".to_string()
        }
    });
}

async fn load_ocorrencias(app: &mut App, client: &ApiClient) {
    let filtro = match app.ocorrencia_filtro() {
        Ok(filtro) => filtro,
        Err(msg) => return app.set_status(msg),
    };

    match client.ocorrencias(&filtro).await {
        Ok(ocorrencias) => {
            let total = ocorrencias.len();
            app.set_ocorrencias(ocorrencias);
            app.set_status(match total {
                0 => "Nenhuma ocorrência encontrada".to_string(),
                n => format!("{} ocorrência(s)", n),
            });
        }
        Err(e) => report_api_error(app, "histórico de ocorrências", e),
    }
}

async fn open_ocorrencia(app: &mut App, client: &ApiClient, id: OcorrenciaId) {
    match client.ocorrencia(id).await {
        Ok(ocorrencia) => {
            let link = app.share_link(ocorrencia.relatorio());
            app.open_preview(
                &format!("Ocorrência #{}", id),
                ocorrencia_detalhe(&ocorrencia),
                Some(link),
            );
        }
        Err(e) => report_api_error(app, "detalhe da ocorrência", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RondaConfig;
    use crate::domain::form_state::MemoryFormStore;
    use pretty_assertions::assert_eq;
    use ronda_api::domain::{Condominio, CondominioId};
    use serde_json::json;
    use wiremock::{
        matchers::{method, path, query_param},
        Mock, MockServer, ResponseTemplate,
    };

    fn app() -> App {
        let mut app = App::new(&RondaConfig::default(), Box::new(MemoryFormStore::default()));
        app.set_condominios(vec![
            Condominio {
                id: CondominioId::new(1),
                nome: "Residencial Jardim Europa".to_string(),
            },
            Condominio {
                id: CondominioId::new(2),
                nome: "Residencial Vila Nova".to_string(),
            },
        ]);
        app
    }

    fn remote(server: &MockServer) -> ApiClient {
        ApiClient::new(&server.uri(), "tok-123").unwrap()
    }

    async fn failing_start(server: &MockServer) {
        Mock::given(method("POST"))
            .and(path("/api/rondas-esporadicas/iniciar"))
            .respond_with(
                ResponseTemplate::new(500).set_body_json(json!({"message": "Erro interno"})),
            )
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn start_is_undone_when_backend_rejects_it() {
        let server = MockServer::start().await;
        failing_start(&server).await;
        let mut app = app();
        app.residencial_input.set("Residencial Jardim Europa");
        app.inicio_input.set(&format_hora(hora_atual()));

        run_action(Action::StartPatrol, &mut app, &remote(&server))
            .await
            .unwrap();

        assert!(app.tracker.active().is_none());
        assert_eq!(app.status_message.as_deref(), Some("Erro interno"));
    }

    #[tokio::test]
    async fn started_patrol_keeps_server_id() {
        let client = ApiClient::dev().unwrap();
        let mut app = app();
        app.residencial_input.set("Residencial Jardim Europa");
        app.inicio_input.set(&format_hora(hora_atual()));

        run_action(Action::StartPatrol, &mut app, &client).await.unwrap();

        let active = app.tracker.active().unwrap();
        assert!(active.id.is_some());
        assert_eq!(active.condominio_id, Some(CondominioId::new(1)));
    }

    #[tokio::test]
    async fn failed_save_complete_drops_recorded_entry() {
        let server = MockServer::start().await;
        failing_start(&server).await;
        let mut app = app();
        app.residencial_input.set("Residencial Vila Nova");
        app.inicio_input.set("19:00");
        app.termino_input.set("19:20");

        run_action(Action::SaveCompletePatrol, &mut app, &remote(&server))
            .await
            .unwrap();

        assert!(app.tracker.session().is_empty());
        assert_eq!(app.inicio_input.value, "19:00");
        assert_eq!(app.status_message.as_deref(), Some("Erro interno"));
    }

    #[tokio::test]
    async fn reconcile_asks_once_per_saved_condominium() {
        let server = MockServer::start().await;
        let executada = json!({
            "id": 11,
            "condominio_id": 1,
            "data_plantao": "2026-10-19",
            "hora_entrada": "19:00:00",
            "hora_saida": "19:20:00",
            "duracao_minutos": 20,
            "escala_plantao": "18 às 06",
            "status": "finalizada"
        });
        Mock::given(method("GET"))
            .and(path("/api/rondas-esporadicas/executadas"))
            .and(query_param("condominio_id", "1"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"sucesso": true, "rondas": [executada]})),
            )
            .with_priority(1)
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/rondas-esporadicas/executadas"))
            .and(query_param("condominio_id", "2"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"sucesso": true, "rondas": []})),
            )
            .with_priority(1)
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/rondas-esporadicas/executadas"))
            .respond_with(
                ResponseTemplate::new(400)
                    .set_body_json(json!({"message": "condominio_id é obrigatório."})),
            )
            .expect(0)
            .mount(&server)
            .await;

        let mut app = app();
        let europa = Some(CondominioId::new(1));
        let vila = Some(CondominioId::new(2));
        for (nome, id, inicio, termino) in [
            ("Residencial Jardim Europa", europa, "19:00", "19:20"),
            ("Residencial Vila Nova", vila, "20:00", "20:15"),
            ("Residencial Jardim Europa", europa, "21:00", "21:20"),
        ] {
            app.tracker
                .record_completed(nome, id, parse_hora_input(inicio), parse_hora_input(termino))
                .unwrap();
        }

        run_action(Action::Reconcile, &mut app, &remote(&server))
            .await
            .unwrap();

        assert_eq!(app.executed.len(), 1);
        assert_eq!(app.pending, Some(vec!["Residencial Vila Nova".to_string()]));
        assert_eq!(
            app.status_message.as_deref(),
            Some("1 condomínio(s) com rondas pendentes")
        );
    }

    #[tokio::test]
    async fn reconcile_against_dev_backend_confirms_saved_patrols() {
        let client = ApiClient::dev().unwrap();
        let mut app = app();
        app.residencial_input.set("Residencial Vila Nova");
        app.inicio_input.set("19:00");
        app.termino_input.set("19:20");
        run_action(Action::SaveCompletePatrol, &mut app, &client)
            .await
            .unwrap();

        run_action(Action::Reconcile, &mut app, &client).await.unwrap();

        assert_eq!(app.pending, Some(Vec::new()));
        assert_eq!(
            app.status_message.as_deref(),
            Some("Todas as rondas salvas foram confirmadas")
        );
    }

    #[tokio::test]
    async fn analyzer_405_reports_local_formatting() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/analisador/processar-relatorio"))
            .respond_with(ResponseTemplate::new(405))
            .expect(1)
            .mount(&server)
            .await;
        let mut app = app();
        app.relatorio_input.set("portão aberto no bloco b");

        run_action(Action::AnalyzeReport, &mut app, &remote(&server))
            .await
            .unwrap();

        assert_eq!(
            app.status_message.as_deref(),
            Some("Analisador indisponível: relatório formatado localmente")
        );
        assert!(app.relatorio_limpo.is_some());
        assert!(app.preview.is_some());
    }

    #[tokio::test]
    async fn analyze_refuses_unparseable_time() {
        let client = ApiClient::dev().unwrap();
        let mut app = app();
        app.relatorio_input.set("portão aberto");
        app.hora_input.set("22:1");

        run_action(Action::AnalyzeReport, &mut app, &client)
            .await
            .unwrap();

        assert!(app.status_message.as_deref().unwrap().contains("Hora inválida"));
        assert!(app.preview.is_none());
    }

    #[tokio::test]
    async fn history_loads_and_opens_detail() {
        let client = ApiClient::dev().unwrap();
        let mut app = app();
        app.cycle_status_filtro(true);

        run_action(Action::LoadOcorrencias, &mut app, &client)
            .await
            .unwrap();
        assert_eq!(app.ocorrencias.len(), 1);
        let id = app.selected_ocorrencia().unwrap().id;

        run_action(Action::OpenOcorrencia(id), &mut app, &client)
            .await
            .unwrap();
        let preview = app.preview.as_ref().unwrap();
        assert_eq!(preview.title, format!("Ocorrência #{}", id));
        assert!(preview.body.contains("Status: Pendente"));
        assert!(preview.link.as_deref().unwrap().starts_with("https://wa.me/"));
    }

    #[tokio::test]
    async fn missing_occurrence_is_reported() {
        let client = ApiClient::dev().unwrap();
        let mut app = app();

        run_action(
            Action::OpenOcorrencia(OcorrenciaId::new(99)),
            &mut app,
            &client,
        )
        .await
        .unwrap();

        assert!(app.preview.is_none());
        assert_eq!(app.status_message.as_deref(), Some("Ocorrência não encontrada"));
    }
}
