use time::{Date, Time};

use super::clock::{format_data_br, format_hora};

/// Section headings every finished occurrence report carries.
pub const REPORT_SECTIONS: [&str; 5] = [
    "RELATO:",
    "AÇÕES REALIZADAS:",
    "ACIONAMENTOS:",
    "ENVOLVIDOS:",
    "VIATURA:",
];

/// Inputs of the occurrence report form.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportFields<'a> {
    pub data: Option<Date>,
    pub hora: Option<Time>,
    pub endereco: &'a str,
    pub colaborador: &'a str,
    pub vtr: &'a str,
    pub relatorio_bruto: &'a str,
    pub signer: Option<&'a str>,
}

fn or_placeholder(value: &str, campo: &str) -> String {
    let value = value.trim();
    if value.is_empty() {
        format!("[Preencher {}]", campo)
    } else {
        value.to_string()
    }
}

impl ReportFields<'_> {
    fn data_str(&self) -> String {
        self.data
            .map(format_data_br)
            .unwrap_or_else(|| "[Preencher data]".to_string())
    }

    fn hora_str(&self) -> String {
        self.hora
            .map(format_hora)
            .unwrap_or_else(|| "[Preencher hora]".to_string())
    }

    /// Text sent to the analyzer: the form fields as a header block, then
    /// the raw narrative.
    pub fn submission_text(&self) -> String {
        format!(
            "Data: {}\nHora: {}\nColaborador: {}\nEndereço: {}\nViatura/VTR: {}\n\n{}",
            self.data_str(),
            self.hora_str(),
            or_placeholder(self.colaborador, "colaborador"),
            or_placeholder(self.endereco, "endereço"),
            or_placeholder(self.vtr, "viatura"),
            self.relatorio_bruto.trim()
        )
    }
}

/// Whether the text already has every report section, in which case it is
/// used as is.
pub fn has_report_structure(texto: &str) -> bool {
    let upper = texto.to_uppercase();
    REPORT_SECTIONS.iter().all(|section| upper.contains(section))
}

/// Final occurrence report. The cleaned narrative is interpolated into the
/// fixed template unless it is already a complete report.
pub fn build_report(fields: &ReportFields<'_>, relatorio_corrigido: &str) -> String {
    let corrigido = relatorio_corrigido.trim();
    if has_report_structure(corrigido) {
        return corrigido.to_string();
    }

    let relato = strip_header_block(corrigido);
    let relato = if relato.is_empty() {
        or_placeholder(fields.relatorio_bruto, "relato")
    } else {
        relato.to_string()
    };
    let responsavel = fields
        .signer
        .filter(|s| !s.trim().is_empty())
        .map(|s| s.trim().to_string())
        .unwrap_or_else(|| or_placeholder(fields.colaborador, "responsável"));

    format!(
        "RELATÓRIO DE OCORRÊNCIA\n\
         \n\
         Data: {data}\n\
         Hora: {hora}\n\
         Endereço: {endereco}\n\
         Colaborador: {colaborador}\n\
         \n\
         RELATO:\n\
         {relato}\n\
         \n\
         AÇÕES REALIZADAS:\n\
         - Equipe de segurança deslocada ao local e situação acompanhada até a normalização.\n\
         \n\
         ACIONAMENTOS:\n\
         ( ) Polícia Militar  ( ) Bombeiros  ( ) SAMU  ( ) Defesa Civil\n\
         \n\
         ENVOLVIDOS:\n\
         {envolvidos}\n\
         \n\
         VIATURA: {vtr}\n\
         \n\
         Responsável: {responsavel}",
        data = fields.data_str(),
        hora = fields.hora_str(),
        endereco = or_placeholder(fields.endereco, "endereço"),
        colaborador = or_placeholder(fields.colaborador, "colaborador"),
        relato = relato,
        envolvidos = or_placeholder(fields.colaborador, "envolvidos"),
        vtr = or_placeholder(fields.vtr, "viatura"),
        responsavel = responsavel,
    )
}

/// Drops the `Data:`/`Hora:`/... header block that [`ReportFields::submission_text`]
/// prepends, when the analyzer echoes it back.
fn strip_header_block(texto: &str) -> &str {
    const HEADER_KEYS: [&str; 5] = ["Data:", "Hora:", "Colaborador:", "Endereço:", "Viatura/VTR:"];

    let mut rest = texto.trim_start();
    loop {
        let (line, tail) = rest.split_once('\n').unwrap_or((rest, ""));
        if HEADER_KEYS.iter().any(|k| line.trim_start().starts_with(k)) {
            rest = tail.trim_start();
        } else {
            return rest.trim();
        }
        if rest.is_empty() {
            return rest;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use time::macros::{date, time};

    fn fields<'a>() -> ReportFields<'a> {
        ReportFields {
            data: Some(date!(2026 - 10 - 19)),
            hora: Some(time!(22:15)),
            endereco: "Rua das Acácias, 120",
            colaborador: "Carlos Silva",
            vtr: "VTR 05",
            relatorio_bruto: "portao aberto encontrado na ronda",
            signer: None,
        }
    }

    #[test]
    fn submission_text_uses_placeholders_for_blank_fields() {
        let blank = ReportFields {
            relatorio_bruto: "  relato cru  ",
            ..Default::default()
        };
        assert_eq!(
            blank.submission_text(),
            "Data: [Preencher data]\n\
             Hora: [Preencher hora]\n\
             Colaborador: [Preencher colaborador]\n\
             Endereço: [Preencher endereço]\n\
             Viatura/VTR: [Preencher viatura]\n\
             \n\
             relato cru"
        );
    }

    #[test]
    fn submission_text_with_filled_fields() {
        let text = fields().submission_text();
        assert!(text.starts_with("Data: 19/10/2026\nHora: 22:15\nColaborador: Carlos Silva\n"));
        assert!(text.ends_with("\n\nportao aberto encontrado na ronda"));
    }

    #[test]
    fn template_wraps_cleaned_narrative() {
        let report = build_report(&fields(), "Portão aberto encontrado durante a ronda.");

        assert!(report.starts_with("RELATÓRIO DE OCORRÊNCIA\n\nData: 19/10/2026\nHora: 22:15\n"));
        assert!(report.contains("RELATO:\nPortão aberto encontrado durante a ronda.\n"));
        assert!(report.contains("VIATURA: VTR 05"));
        assert!(report.ends_with("Responsável: Carlos Silva"));
        assert!(has_report_structure(&report));
    }

    #[test]
    fn structured_text_is_kept_verbatim() {
        let ready = "RELATO:\nx\nAÇÕES REALIZADAS:\ny\nACIONAMENTOS:\nz\nENVOLVIDOS:\nw\nVIATURA: VTR 03";
        assert_eq!(build_report(&fields(), ready), ready);
    }

    #[test]
    fn echoed_header_block_is_not_duplicated() {
        let echoed = "Data: 19/10/2026\nHora: 22:15\nColaborador: Carlos Silva\nEndereço: Rua X\nViatura/VTR: VTR 05\n\nPortão aberto.";
        let report = build_report(&fields(), echoed);
        assert!(report.contains("RELATO:\nPortão aberto.\n"));
        assert_eq!(report.matches("Hora:").count(), 1);
    }

    #[test]
    fn signer_overrides_collaborator() {
        let with_signer = ReportFields {
            signer: Some("Supervisor Noturno"),
            ..fields()
        };
        assert!(build_report(&with_signer, "ok").ends_with("Responsável: Supervisor Noturno"));
    }
}
