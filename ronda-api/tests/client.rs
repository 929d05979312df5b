use pretty_assertions::assert_eq;
use ronda_api::{
    domain::{
        CondominioId, IniciarRondaRequest, OcorrenciaFiltro, OcorrenciaId, PeriodoFiltro,
        RondaCompleta, RondaId, UserId,
    },
    AnaliseOrigem, ApiError, RondaClient, Token,
};
use serde_json::json;
use time::macros::{date, time};
use wiremock::{
    matchers::{body_json, header, method, path, query_param, query_param_is_missing},
    Mock, MockServer, ResponseTemplate,
};

fn authed_client(server: &MockServer) -> RondaClient {
    RondaClient::new(&server.uri())
        .unwrap()
        .with_token(Token::new("tok-123"))
}

#[tokio::test]
async fn login_stores_returned_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/login"))
        .and(body_json(json!({"email": "a@b.com", "password": "segredo"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "token": "jwt-abc",
            "message": "Login realizado com sucesso"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut client = RondaClient::new(&server.uri()).unwrap();
    let token = client.login("a@b.com", "segredo").await.unwrap();

    assert_eq!(token.as_str(), "jwt-abc");
    assert_eq!(client.token().map(Token::as_str), Some("jwt-abc"));
}

#[tokio::test]
async fn login_failure_surfaces_backend_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "success": false,
            "message": "Credenciais inválidas"
        })))
        .mount(&server)
        .await;

    let mut client = RondaClient::new(&server.uri()).unwrap();
    let err = client.login("a@b.com", "errada").await.unwrap_err();

    assert_eq!(err.user_message(), "Credenciais inválidas");
    assert!(client.token().is_none());
}

#[tokio::test]
async fn authenticated_calls_send_bearer_header() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/condominios"))
        .and(header("Authorization", "Bearer tok-123"))
        .and(header("Content-Type", "application/json"))
        .and(query_param("nome", "Jard"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "condominios": [
                {"id": 1, "nome": "Jardim das Flores"},
                {"id": 4, "nome": "Jardim Europa"}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = authed_client(&server);
    let condominios = client.buscar_condominios("Jard").await.unwrap();

    let nomes: Vec<_> = condominios.iter().map(|c| c.nome.as_str()).collect();
    assert_eq!(nomes, vec!["Jardim das Flores", "Jardim Europa"]);
    assert_eq!(condominios[1].id, CondominioId::new(4));
}

#[tokio::test]
async fn sucesso_false_maps_to_backend_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/rondas/iniciar"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "sucesso": false,
            "message": "Já existe uma ronda em andamento"
        })))
        .mount(&server)
        .await;

    let client = authed_client(&server);
    let err = client
        .iniciar_ronda(&IniciarRondaRequest {
            condominio_id: CondominioId::new(3),
            data_plantao: date!(2026 - 10 - 19),
            escala_plantao: "18 às 06".to_string(),
            user_id: None,
            supervisor_id: None,
        })
        .await
        .unwrap_err();

    match err {
        ApiError::Backend { message } => assert_eq!(message, "Já existe uma ronda em andamento"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn unauthorized_status_is_classified() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/rondas/em-andamento/3"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"message": "Token expirado"})))
        .mount(&server)
        .await;

    let client = authed_client(&server);
    let err = client
        .ronda_em_andamento(CondominioId::new(3))
        .await
        .unwrap_err();

    assert!(err.is_unauthorized());
}

#[tokio::test]
async fn error_status_carries_body_message() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/rondas/finalizar/9"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "Ronda não encontrada"})))
        .mount(&server)
        .await;

    let client = authed_client(&server);
    let err = client
        .finalizar_ronda(RondaId::new(9), &Default::default())
        .await
        .unwrap_err();

    assert_eq!(err.user_message(), "Ronda não encontrada");
}

#[tokio::test]
async fn analyzer_405_falls_back_to_local_formatting() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/analisador/processar-relatorio"))
        .respond_with(ResponseTemplate::new(405))
        .expect(1)
        .mount(&server)
        .await;

    let client = authed_client(&server);
    let analise = client
        .analisar_relatorio("portão   encontrado aberto.  nada  mais")
        .await
        .unwrap();

    assert_eq!(analise.origem, AnaliseOrigem::LocalFallback);
    assert_eq!(
        analise.relatorio_corrigido,
        "Portão encontrado aberto. Nada mais"
    );
}

#[tokio::test]
async fn analyzer_success_returns_extracted_fields() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/analisador/processar-relatorio"))
        .and(body_json(json!({"texto_relatorio": "texto"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "sucesso": true,
            "dados": {
                "relatorio_corrigido": "Relatório revisado.",
                "data_hora_ocorrencia": "2026-10-19T23:40",
                "endereco_especifico": "Rua das Acácias, 120",
                "colaboradores_envolvidos": ["Carlos Silva"]
            }
        })))
        .mount(&server)
        .await;

    let client = authed_client(&server);
    let analise = client.analisar_relatorio("texto").await.unwrap();

    assert_eq!(analise.origem, AnaliseOrigem::Backend);
    assert_eq!(analise.relatorio_corrigido, "Relatório revisado.");
    assert_eq!(
        analise.data_hora(),
        Some((date!(2026 - 10 - 19), time!(23:40)))
    );
    assert_eq!(analise.endereco_especifico.as_deref(), Some("Rua das Acácias, 120"));
    assert_eq!(analise.colaboradores_envolvidos, vec!["Carlos Silva".to_string()]);
}

#[tokio::test]
async fn executadas_sends_period_filters() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/rondas-esporadicas/executadas"))
        .and(query_param("condominio_id", "3"))
        .and(query_param("data_inicio", "2026-10-19"))
        .and(query_param("data_fim", "2026-10-19"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "sucesso": true,
            "rondas": [{
                "id": 11,
                "condominio_id": 3,
                "condominio_nome": "Jardim Europa",
                "user_id": 2,
                "data_plantao": "2026-10-19",
                "hora_entrada": "23:50:00",
                "hora_saida": "00:10:00",
                "duracao_minutos": 20,
                "escala_plantao": "18 às 06",
                "turno": "Noite",
                "status": "finalizada"
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = authed_client(&server);
    let rondas = client
        .rondas_executadas(
            CondominioId::new(3),
            PeriodoFiltro::dia(date!(2026 - 10 - 19)),
        )
        .await
        .unwrap();

    assert_eq!(rondas.len(), 1);
    assert_eq!(rondas[0].hora_entrada, Some(time!(23:50)));
    assert_eq!(rondas[0].duracao_minutos, Some(20));
}

#[tokio::test]
async fn salvar_ronda_completa_starts_then_finishes() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/rondas-esporadicas/iniciar"))
        .and(body_json(json!({
            "condominio_id": 3,
            "user_id": 2,
            "data_plantao": "2026-10-19",
            "hora_entrada": "23:50",
            "escala_plantao": "18 às 06",
            "turno": "Noite"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "sucesso": true,
            "ronda_id": 42
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/rondas-esporadicas/finalizar/42"))
        .and(body_json(json!({"hora_saida": "00:10"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"sucesso": true})))
        .expect(1)
        .mount(&server)
        .await;

    let client = authed_client(&server);
    let id = client
        .salvar_ronda_completa(&RondaCompleta {
            condominio_id: CondominioId::new(3),
            user_id: UserId::new(2),
            data_plantao: date!(2026 - 10 - 19),
            hora_entrada: time!(23:50),
            hora_saida: time!(00:10),
            escala_plantao: "18 às 06".to_string(),
            turno: "Noite".to_string(),
            observacoes: None,
        })
        .await
        .unwrap();

    assert_eq!(id, RondaId::new(42));
}

#[tokio::test]
async fn status_consolidacao_reads_nested_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/rondas-esporadicas/status-consolidacao/3/2026-10-19"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "sucesso": true,
            "condominio_id": 3,
            "status": {
                "total_rondas_esporadicas": 4,
                "rondas_finalizadas": 3,
                "rondas_processadas": 0,
                "duracao_total_minutos": 60,
                "ronda_principal_criada": false,
                "pode_consolidar": true,
                "ja_consolidado": false
            }
        })))
        .mount(&server)
        .await;

    let client = authed_client(&server);
    let status = client
        .status_consolidacao(CondominioId::new(3), date!(2026 - 10 - 19))
        .await
        .unwrap();

    assert_eq!(status.status.rondas_finalizadas, 3);
    assert!(status.status.pode_consolidar);
    assert!(!status.status.ja_consolidado);
}

#[tokio::test]
async fn processo_completo_returns_consolidated_report() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/rondas-esporadicas/processo-completo/3/2026-10-19"))
        .and(header("Authorization", "Bearer tok-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "sucesso": true,
            "relatorio_consolidado": "Plantão 19/10/2026\nResidencial: Jardim Europa",
            "total_rondas": 3,
            "duracao_total_minutos": 65,
            "whatsapp_enviado": true,
            "ronda_principal_id": 77
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = authed_client(&server);
    let resultado = client
        .processo_completo(CondominioId::new(3), date!(2026 - 10 - 19))
        .await
        .unwrap();

    assert_eq!(resultado.total_rondas, Some(3));
    assert_eq!(resultado.duracao_total_minutos, Some(65));
    assert_eq!(resultado.ronda_principal_id, Some(RondaId::new(77)));
    assert_eq!(resultado.whatsapp_enviado, Some(true));
}

#[tokio::test]
async fn consolidar_turno_without_finished_patrols_is_backend_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/rondas-esporadicas/consolidar-turno/3/2026-10-19"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "sucesso": false,
            "message": "Nenhuma ronda esporádica finalizada encontrada"
        })))
        .mount(&server)
        .await;

    let client = authed_client(&server);
    let err = client
        .consolidar_turno(CondominioId::new(3), date!(2026 - 10 - 19))
        .await
        .unwrap_err();

    assert_eq!(err.user_message(), "Nenhuma ronda esporádica finalizada encontrada");
}

#[tokio::test]
async fn marcar_processadas_uses_put() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/rondas-esporadicas/marcar-processadas/3/2026-10-19"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"sucesso": true})))
        .expect(1)
        .mount(&server)
        .await;

    let client = authed_client(&server);
    client
        .marcar_processadas(CondominioId::new(3), date!(2026 - 10 - 19))
        .await
        .unwrap();
}

#[tokio::test]
async fn em_andamento_sends_shift_date() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/rondas-esporadicas/em-andamento/3"))
        .and(query_param("data_plantao", "2026-10-19"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "em_andamento": false
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = authed_client(&server);
    let andamento = client
        .ronda_esporadica_em_andamento(CondominioId::new(3), date!(2026 - 10 - 19))
        .await
        .unwrap();

    assert!(!andamento.em_andamento);
    assert!(andamento.ronda.is_none());
}

#[tokio::test]
async fn colaboradores_carry_cargo_and_matricula() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/colaboradores"))
        .and(query_param("nome", "Car"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "colaboradores": [
                {
                    "id": 7,
                    "nome_completo": "Carlos Silva",
                    "cargo": "Vigilante",
                    "matricula": "10007",
                    "status": "Ativo"
                },
                {"id": 8, "nome_completo": "Carla Dias"}
            ]
        })))
        .mount(&server)
        .await;

    let client = authed_client(&server);
    let colaboradores = client.buscar_colaboradores("Car").await.unwrap();

    assert_eq!(colaboradores[0].matricula.as_deref(), Some("10007"));
    assert_eq!(colaboradores[0].cargo.as_deref(), Some("Vigilante"));
    assert_eq!(colaboradores[1].matricula, None);
}

#[tokio::test]
async fn executadas_always_names_the_condominium() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/rondas-esporadicas/executadas"))
        .and(query_param("condominio_id", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "sucesso": true,
            "rondas": []
        })))
        .with_priority(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/rondas-esporadicas/executadas"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "sucesso": false,
            "message": "condominio_id é obrigatório."
        })))
        .expect(0)
        .mount(&server)
        .await;

    let client = authed_client(&server);
    let rondas = client
        .rondas_executadas(CondominioId::new(5), PeriodoFiltro::default())
        .await
        .unwrap();

    assert!(rondas.is_empty());
}

#[tokio::test]
async fn historico_sends_only_set_filters() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/ocorrencias/historico"))
        .and(query_param("status", "Pendente"))
        .and(query_param("data_inicio", "2026-10-01"))
        .and(query_param("data_fim", "2026-10-19"))
        .and(query_param_is_missing("condominio_id"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "historico": [{
                "id": 42,
                "relatorio_final": "Portão aberto.",
                "data_hora_ocorrencia": "2026-10-18T23:40:00",
                "turno": "Noite",
                "status": "Pendente",
                "endereco_especifico": "Rua A, 10",
                "condominio": "Jardim Europa",
                "tipo": "Invasão",
                "supervisor": 1,
                "colaboradores": ["Ana Souza"],
                "orgaos_acionados": []
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let filtro = OcorrenciaFiltro {
        status: Some("Pendente".to_string()),
        data_inicio: Some(date!(2026 - 10 - 01)),
        data_fim: Some(date!(2026 - 10 - 19)),
        ..Default::default()
    };
    let historico = authed_client(&server)
        .historico_ocorrencias(&filtro)
        .await
        .unwrap();

    assert_eq!(historico.len(), 1);
    assert_eq!(historico[0].id, OcorrenciaId::new(42));
    assert_eq!(historico[0].condominio.as_deref(), Some("Jardim Europa"));
    assert_eq!(historico[0].colaboradores, vec!["Ana Souza"]);
}

#[tokio::test]
async fn detalhe_reads_bare_object() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/ocorrencias/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 42,
            "relatorio_final": "Portão aberto.",
            "orgaos_acionados": ["Polícia Militar"],
            "data_criacao": "2026-10-18T23:50:00"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let ocorrencia = authed_client(&server)
        .detalhe_ocorrencia(OcorrenciaId::new(42))
        .await
        .unwrap();

    assert_eq!(ocorrencia.relatorio(), "Portão aberto.");
    assert_eq!(ocorrencia.orgaos_acionados, vec!["Polícia Militar"]);
}

#[tokio::test]
async fn detalhe_of_unknown_occurrence_is_status_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/ocorrencias/7"))
        .respond_with(ResponseTemplate::new(404).set_body_string("<h1>Not Found</h1>"))
        .mount(&server)
        .await;

    let err = authed_client(&server)
        .detalhe_ocorrencia(OcorrenciaId::new(7))
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Status { status, .. } if status.as_u16() == 404));
}
