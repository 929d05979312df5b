use time::Date;

use super::clock::{format_data_br, format_hora};
use super::Patrol;

const WA_ME: &str = "https://wa.me/";

/// Shift summary of finished patrols, grouped by residencial in the order
/// they were first patrolled.
pub fn patrol_report(data_plantao: Date, escala: &str, patrols: &[Patrol]) -> String {
    let mut lines = vec![format!("Plantão {} ({})", format_data_br(data_plantao), escala)];

    let mut residenciais: Vec<&str> = Vec::new();
    for patrol in patrols {
        if !residenciais.contains(&patrol.residencial.as_str()) {
            residenciais.push(&patrol.residencial);
        }
    }

    let mut total = 0;
    for residencial in residenciais {
        lines.push(format!("Residencial: {}", residencial));
        for patrol in patrols.iter().filter(|p| p.residencial == residencial) {
            let (Some(termino), Some(duracao)) = (patrol.termino, patrol.duracao) else {
                continue;
            };
            lines.push(format!(
                "\tInício: {}  – Término: {} ({} min)",
                format_hora(patrol.inicio),
                format_hora(termino),
                duracao
            ));
            total += 1;
        }
        lines.push(String::new());
    }

    lines.push(format!("✅ Total: {} rondas completas no plantão", total));
    lines.join("\n")
}

/// `wa.me` share link. A configured phone number (any formatting) targets
/// that contact directly.
pub fn share_link(texto: &str, phone: Option<&str>) -> String {
    let digits: String = phone
        .unwrap_or_default()
        .chars()
        .filter(|c| c.is_ascii_digit())
        .collect();
    format!("{}{}?text={}", WA_ME, digits, urlencoding::encode(texto))
}
