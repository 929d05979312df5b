use ronda_api::domain::{formats, Ocorrencia, RondaEsporadica};

use super::clock::{format_data_br, format_hora};

/// Review states the history can be filtered by.
pub const STATUS_OCORRENCIA: [&str; 3] = ["Pendente", "Aprovado", "Rejeitado"];

const EXCERPT_LINES: usize = 3;

/// `DD/MM/AAAA HH:MM`, or the raw value when it is not an ISO timestamp.
fn data_hora_br(raw: Option<&str>) -> String {
    let Some(raw) = raw.filter(|r| !r.trim().is_empty()) else {
        return "Sem data".to_string();
    };
    match formats::parse_data_hora(raw) {
        Some((data, hora)) => format!("{} {}", format_data_br(data), format_hora(hora)),
        None => raw.trim().to_string(),
    }
}

fn or_dash(value: Option<&str>) -> &str {
    value.filter(|v| !v.trim().is_empty()).unwrap_or("-")
}

fn nomes(list: &[String]) -> String {
    if list.is_empty() {
        "-".to_string()
    } else {
        list.join(", ")
    }
}

/// One-line heading used in the history list.
pub fn ocorrencia_titulo(ocorrencia: &Ocorrencia) -> String {
    format!(
        "#{}  {}  [{}]",
        ocorrencia.id,
        data_hora_br(ocorrencia.data_hora_ocorrencia.as_deref()),
        or_dash(ocorrencia.status.as_deref())
    )
}

/// First lines of the report, with an ellipsis when there is more.
pub fn relatorio_excerpt(relatorio: &str) -> Vec<String> {
    let mut lines = relatorio.lines().map(str::trim).filter(|l| !l.is_empty());
    let mut excerpt: Vec<String> = lines.by_ref().take(EXCERPT_LINES).map(String::from).collect();
    if lines.next().is_some() {
        if let Some(last) = excerpt.last_mut() {
            last.push_str(" …");
        }
    }
    excerpt
}

pub fn ocorrencia_detalhe(ocorrencia: &Ocorrencia) -> String {
    let supervisor = ocorrencia
        .supervisor
        .map(|id| format!("#{}", id))
        .unwrap_or_else(|| "-".to_string());
    let mut lines = vec![
        format!("Ocorrência #{}", ocorrencia.id),
        format!("Status: {}", or_dash(ocorrencia.status.as_deref())),
        format!(
            "Data/hora: {}",
            data_hora_br(ocorrencia.data_hora_ocorrencia.as_deref())
        ),
        format!("Tipo: {}", or_dash(ocorrencia.tipo.as_deref())),
        format!("Turno: {}", or_dash(ocorrencia.turno.as_deref())),
        format!("Condomínio: {}", or_dash(ocorrencia.condominio.as_deref())),
        format!("Local: {}", or_dash(ocorrencia.endereco_especifico.as_deref())),
        format!("Colaboradores: {}", nomes(&ocorrencia.colaboradores)),
        format!("Órgãos acionados: {}", nomes(&ocorrencia.orgaos_acionados)),
        format!("Supervisor: {}", supervisor),
        format!("Criada em: {}", data_hora_br(ocorrencia.data_criacao.as_deref())),
    ];
    if ocorrencia.data_modificacao.is_some() {
        lines.push(format!(
            "Modificada em: {}",
            data_hora_br(ocorrencia.data_modificacao.as_deref())
        ));
    }
    lines.push(String::new());
    lines.push("Relatório:".to_string());
    lines.push(match ocorrencia.relatorio().trim() {
        "" => "Sem relatório".to_string(),
        texto => texto.to_string(),
    });
    lines.join("\n")
}

/// `HH:MM - HH:MM (N min)` for a patrol the backend has on record.
pub fn executada_linha(ronda: &RondaEsporadica) -> String {
    let entrada = ronda.hora_entrada.map(format_hora).unwrap_or_else(|| "--:--".to_string());
    match (ronda.hora_saida, ronda.duracao_minutos) {
        (Some(saida), Some(minutos)) => {
            format!("{} - {} ({} min)", entrada, format_hora(saida), minutos)
        }
        (Some(saida), None) => format!("{} - {}", entrada, format_hora(saida)),
        (None, _) => format!("{} - Em andamento", entrada),
    }
}
