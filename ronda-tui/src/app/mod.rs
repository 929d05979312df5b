use crate::config::RondaConfig;
use crate::domain::{
    self, form_state, form_state::FormState, form_state::FormStore, local_now, parse_data_br,
    parse_hora_input, Escala, Patrol, PatrolTracker, ReportFields, STATUS_OCORRENCIA,
};
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use ronda_api::domain::{Condominio, CondominioId, Ocorrencia, OcorrenciaFiltro, RondaEsporadica};
use std::time::Instant;
use time::{Date, Time};

mod state;
pub use state::{
    LookupKind, OcorrenciaField, PatrolField, PendingLookup, Preview, ReportField, TextInput,
    View, LOOKUP_DEBOUNCE, LOOKUP_MIN_CHARS,
};

pub struct App {
    pub running: bool,
    pub current_view: View,
    pub status_message: Option<String>,

    // Patrol view
    pub tracker: PatrolTracker,
    pub focused_patrol_field: PatrolField,
    pub residencial_input: TextInput,
    pub inicio_input: TextInput,
    pub termino_input: TextInput,
    pub condominios: Vec<Condominio>,
    pub filtered_condominios: Vec<Condominio>,
    pub condominio_index: usize,
    pub selected_session_index: Option<usize>,
    pub executed: Vec<RondaEsporadica>,
    /// `None` until a reconciliation ran.
    pub pending: Option<Vec<String>>,

    // Report view
    pub focused_report_field: ReportField,
    pub data_input: TextInput,
    pub hora_input: TextInput,
    pub endereco_input: TextInput,
    pub colaborador_input: TextInput,
    pub vtr_index: Option<usize>,
    pub relatorio_input: TextInput,
    pub suggestions: Vec<String>,
    pub suggestion_index: usize,
    pub pending_lookup: Option<PendingLookup>,
    pub relatorio_limpo: Option<String>,

    // Occurrence history
    pub focused_ocorrencia_field: OcorrenciaField,
    /// Index into `STATUS_OCORRENCIA`; `None` is "Todos".
    pub status_filtro: Option<usize>,
    pub data_inicio_input: TextInput,
    pub data_fim_input: TextInput,
    pub ocorrencias: Vec<Ocorrencia>,
    pub ocorrencia_index: usize,
    return_view: View,

    pub preview: Option<Preview>,

    // Loading indicator
    pub is_loading: bool,
    pub throbber_state: throbber_widgets_tui::ThrobberState,

    form_store: Box<dyn FormStore>,

    // Config values used at runtime
    pub user_id: i64,
    pub vtr_options: Vec<String>,
    pub whatsapp_phone: Option<String>,
    pub signer: Option<String>,
}

impl App {
    pub fn new(cfg: &RondaConfig, form_store: Box<dyn FormStore>) -> Self {
        let escala = Escala::from_label(&cfg.default_escala);
        let data_plantao = domain::shift_date_for(local_now(), escala);

        Self {
            running: true,
            current_view: View::Ronda,
            status_message: None,
            tracker: PatrolTracker::new(data_plantao, escala.label(), cfg.countdown_secs()),
            focused_patrol_field: PatrolField::Residencial,
            residencial_input: TextInput::new(),
            inicio_input: TextInput::new(),
            termino_input: TextInput::new(),
            condominios: Vec::new(),
            filtered_condominios: Vec::new(),
            condominio_index: 0,
            selected_session_index: None,
            executed: Vec::new(),
            pending: None,
            focused_report_field: ReportField::Data,
            data_input: TextInput::new(),
            hora_input: TextInput::new(),
            endereco_input: TextInput::new(),
            colaborador_input: TextInput::new(),
            vtr_index: None,
            relatorio_input: TextInput::new(),
            suggestions: Vec::new(),
            suggestion_index: 0,
            pending_lookup: None,
            relatorio_limpo: None,
            focused_ocorrencia_field: OcorrenciaField::Status,
            status_filtro: None,
            data_inicio_input: TextInput::new(),
            data_fim_input: TextInput::new(),
            ocorrencias: Vec::new(),
            ocorrencia_index: 0,
            return_view: View::Ronda,
            preview: None,
            is_loading: false,
            throbber_state: throbber_widgets_tui::ThrobberState::default(),
            form_store,
            user_id: cfg.user_id,
            vtr_options: cfg.vtr_options.clone(),
            whatsapp_phone: cfg.whatsapp_phone.clone(),
            signer: cfg.signer.clone(),
        }
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    pub fn set_status(&mut self, message: String) {
        self.status_message = Some(message);
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    pub fn navigate_to(&mut self, view: View) {
        self.current_view = view;
        self.suggestions.clear();
        self.pending_lookup = None;
    }

    pub fn escala(&self) -> Escala {
        Escala::from_label(self.tracker.escala())
    }

    pub fn open_preview(&mut self, title: &str, body: String, link: Option<String>) {
        self.preview = Some(Preview {
            title: title.to_string(),
            body,
            link,
            scroll: 0,
        });
    }

    pub fn close_preview(&mut self) {
        self.preview = None;
    }

    // ---- Shift ----

    pub fn toggle_escala(&mut self) {
        let escala = self.escala().toggle();
        let data = domain::shift_date_for(local_now(), escala);
        match self.tracker.set_shift(data, escala.label()) {
            Ok(()) => {
                self.pending = None;
                self.set_status(format!("Escala alterada para {}", escala.label()));
            }
            Err(e) => self.set_status(e.to_string()),
        }
    }

    /// Moves the shift date by `days` (negative goes back).
    pub fn shift_date_by(&mut self, days: i64) {
        let current = self.tracker.data_plantao();
        let Some(data) = current.checked_add(time::Duration::days(days)) else {
            return;
        };
        let escala = self.tracker.escala().to_string();
        match self.tracker.set_shift(data, &escala) {
            Ok(()) => self.pending = None,
            Err(e) => self.set_status(e.to_string()),
        }
    }

    // ---- Condominium selection ----

    pub fn set_condominios(&mut self, condominios: Vec<Condominio>) {
        self.condominios = condominios;
        self.filter_condominios();
    }

    pub fn filter_condominios(&mut self) {
        let query = self.residencial_input.value.trim();
        if query.is_empty() {
            self.filtered_condominios.clear();
            self.condominio_index = 0;
            return;
        }

        let matcher = SkimMatcherV2::default();
        let mut scored: Vec<(Condominio, i64)> = self
            .condominios
            .iter()
            .filter_map(|c| {
                matcher
                    .fuzzy_match(&c.nome, query)
                    .map(|score| (c.clone(), score))
            })
            .collect();

        scored.sort_by(|a, b| b.1.cmp(&a.1));
        self.filtered_condominios = scored.into_iter().map(|(c, _)| c).collect();
        self.condominio_index = 0;
    }

    /// Suggestions are hidden once the input already names a condominium.
    pub fn visible_condominios(&self) -> &[Condominio] {
        if self.resolved_condominio().is_some() {
            &[]
        } else {
            self.filtered_condominios.as_slice()
        }
    }

    pub fn condominio_next(&mut self) {
        let len = self.visible_condominios().len();
        if len > 0 {
            self.condominio_index = (self.condominio_index + 1) % len;
        }
    }

    pub fn condominio_previous(&mut self) {
        let len = self.visible_condominios().len();
        if len > 0 {
            self.condominio_index = (self.condominio_index + len - 1) % len;
        }
    }

    /// Copies the highlighted suggestion into the input.
    pub fn accept_condominio(&mut self) -> Option<Condominio> {
        let chosen = self
            .visible_condominios()
            .get(self.condominio_index)
            .cloned()?;
        self.residencial_input.set(&chosen.nome);
        self.filter_condominios();
        Some(chosen)
    }

    /// Condominium whose name matches the input exactly, ignoring case
    /// (accented letters included).
    pub fn resolved_condominio(&self) -> Option<&Condominio> {
        let nome = self.residencial_input.value.trim().to_lowercase();
        self.condominios
            .iter()
            .find(|c| c.nome.trim().to_lowercase() == nome)
    }

    pub fn resolved_condominio_id(&self) -> Option<CondominioId> {
        self.resolved_condominio().map(|c| c.id)
    }

    /// Condominium the consolidation targets: the typed one, else the active
    /// patrol's.
    pub fn consolidation_target(&self) -> Option<(CondominioId, String)> {
        if let Some(c) = self.resolved_condominio() {
            return Some((c.id, c.nome.clone()));
        }
        let patrol = self.tracker.active()?;
        Some((patrol.condominio_id?, patrol.residencial.clone()))
    }

    // ---- Patrol inputs ----

    pub fn focused_patrol_input(&mut self) -> &mut TextInput {
        match self.focused_patrol_field {
            PatrolField::Residencial => &mut self.residencial_input,
            PatrolField::Inicio => &mut self.inicio_input,
            PatrolField::Termino => &mut self.termino_input,
        }
    }

    pub fn patrol_input_char(&mut self, c: char) {
        self.focused_patrol_input().insert(c);
        if self.focused_patrol_field == PatrolField::Residencial {
            self.filter_condominios();
        }
    }

    pub fn patrol_input_backspace(&mut self) {
        self.focused_patrol_input().backspace();
        if self.focused_patrol_field == PatrolField::Residencial {
            self.filter_condominios();
        }
    }

    /// Fills the focused time field with the current time.
    pub fn fill_now(&mut self) {
        let agora = domain::format_hora(domain::hora_atual());
        match self.focused_patrol_field {
            PatrolField::Termino => self.termino_input.set(&agora),
            _ => self.inicio_input.set(&agora),
        }
    }

    pub fn clear_patrol_inputs(&mut self) {
        self.inicio_input.clear();
        self.termino_input.clear();
    }

    // ---- Session list ----

    pub fn session_next(&mut self) {
        let len = self.tracker.session().len();
        if len == 0 {
            self.selected_session_index = None;
            return;
        }
        self.selected_session_index = Some(match self.selected_session_index {
            Some(i) if i + 1 < len => i + 1,
            Some(i) => i,
            None => 0,
        });
    }

    pub fn session_previous(&mut self) {
        self.selected_session_index = match self.selected_session_index {
            Some(i) if i > 0 => Some(i - 1),
            other => other,
        };
    }

    pub fn remove_selected_patrol(&mut self) -> Option<Patrol> {
        let removed = self.tracker.remove(self.selected_session_index?)?;
        let len = self.tracker.session().len();
        self.selected_session_index = match self.selected_session_index {
            _ if len == 0 => None,
            Some(i) if i >= len => Some(len - 1),
            other => other,
        };
        if let Some(executed) = self.pending.as_ref().map(|_| self.executed.clone()) {
            self.set_executed(executed);
        }
        Some(removed)
    }

    pub fn set_executed(&mut self, executed: Vec<RondaEsporadica>) {
        self.pending = Some(domain::pending_condominiums(
            self.tracker.session(),
            &executed,
        ));
        self.executed = executed;
    }

    pub fn whatsapp_report(&self) -> String {
        domain::patrol_report(
            self.tracker.data_plantao(),
            self.tracker.escala(),
            self.tracker.session(),
        )
    }

    pub fn share_link(&self, texto: &str) -> String {
        domain::share_link(texto, self.whatsapp_phone.as_deref())
    }

    // ---- Occurrence history ----

    /// Opens the history, remembering where Esc goes back to.
    pub fn open_ocorrencias(&mut self) {
        if self.current_view != View::Ocorrencias {
            self.return_view = self.current_view;
        }
        self.navigate_to(View::Ocorrencias);
    }

    pub fn close_ocorrencias(&mut self) {
        self.navigate_to(self.return_view);
    }

    pub fn status_filtro_label(&self) -> &'static str {
        self.status_filtro
            .and_then(|i| STATUS_OCORRENCIA.get(i))
            .copied()
            .unwrap_or("Todos")
    }

    /// Todos → Pendente → Aprovado → Rejeitado → Todos.
    pub fn cycle_status_filtro(&mut self, forward: bool) {
        let len = STATUS_OCORRENCIA.len();
        self.status_filtro = match (self.status_filtro, forward) {
            (None, true) => Some(0),
            (None, false) => Some(len - 1),
            (Some(i), true) if i + 1 < len => Some(i + 1),
            (Some(i), false) if i > 0 => Some(i - 1),
            _ => None,
        };
    }

    pub fn focused_ocorrencia_input(&mut self) -> Option<&mut TextInput> {
        match self.focused_ocorrencia_field {
            OcorrenciaField::Status => None,
            OcorrenciaField::DataInicio => Some(&mut self.data_inicio_input),
            OcorrenciaField::DataFim => Some(&mut self.data_fim_input),
        }
    }

    pub fn clear_ocorrencia_filtros(&mut self) {
        self.status_filtro = None;
        self.data_inicio_input.clear();
        self.data_fim_input.clear();
    }

    /// Query for the history. Blank dates are left out; a date that does
    /// not parse is an error message.
    pub fn ocorrencia_filtro(&self) -> Result<OcorrenciaFiltro, String> {
        let data = |input: &TextInput| -> Result<Option<Date>, String> {
            if input.is_blank() {
                return Ok(None);
            }
            parse_data_br(&input.value).map(Some).ok_or_else(|| {
                format!("Data inválida: \"{}\". Use DD/MM/AAAA.", input.value.trim())
            })
        };
        let data_inicio = data(&self.data_inicio_input)?;
        let data_fim = data(&self.data_fim_input)?;
        if let (Some(inicio), Some(fim)) = (data_inicio, data_fim) {
            if inicio > fim {
                return Err("A data inicial é posterior à data final".to_string());
            }
        }
        Ok(OcorrenciaFiltro {
            status: self.status_filtro.map(|_| self.status_filtro_label().to_string()),
            condominio_id: None,
            data_inicio,
            data_fim,
        })
    }

    pub fn set_ocorrencias(&mut self, ocorrencias: Vec<Ocorrencia>) {
        self.ocorrencias = ocorrencias;
        self.ocorrencia_index = 0;
    }

    pub fn selected_ocorrencia(&self) -> Option<&Ocorrencia> {
        self.ocorrencias.get(self.ocorrencia_index)
    }

    pub fn ocorrencia_next(&mut self) {
        if self.ocorrencia_index + 1 < self.ocorrencias.len() {
            self.ocorrencia_index += 1;
        }
    }

    pub fn ocorrencia_previous(&mut self) {
        self.ocorrencia_index = self.ocorrencia_index.saturating_sub(1);
    }

    // ---- Report form ----

    pub fn focused_report_input(&mut self) -> Option<&mut TextInput> {
        match self.focused_report_field {
            ReportField::Data => Some(&mut self.data_input),
            ReportField::Hora => Some(&mut self.hora_input),
            ReportField::Endereco => Some(&mut self.endereco_input),
            ReportField::Colaborador => Some(&mut self.colaborador_input),
            ReportField::Vtr => None,
            ReportField::RelatorioBruto => Some(&mut self.relatorio_input),
        }
    }

    pub fn focus_report_field(&mut self, field: ReportField) {
        self.focused_report_field = field;
        self.suggestions.clear();
        self.suggestion_index = 0;
        self.pending_lookup = None;
    }

    pub fn report_input_char(&mut self, c: char) {
        if let Some(input) = self.focused_report_input() {
            input.insert(c);
            self.after_report_edit();
        }
    }

    pub fn report_input_backspace(&mut self) {
        if let Some(input) = self.focused_report_input() {
            input.backspace();
            self.after_report_edit();
        }
    }

    fn after_report_edit(&mut self) {
        self.relatorio_limpo = None;
        self.schedule_lookup(Instant::now());
        self.persist_form();
    }

    /// Debounces an autocomplete request for the focused field.
    pub fn schedule_lookup(&mut self, now: Instant) {
        let Some(kind) = self.focused_report_field.lookup() else {
            return;
        };
        let query = match kind {
            LookupKind::Colaboradores => &self.colaborador_input.value,
            LookupKind::Logradouros => &self.endereco_input.value,
        };
        self.pending_lookup = PendingLookup::schedule(kind, query, now);
        if self.pending_lookup.is_none() {
            self.suggestions.clear();
        }
    }

    /// Returns the pending lookup once its delay has passed.
    pub fn take_due_lookup(&mut self, now: Instant) -> Option<PendingLookup> {
        if self.pending_lookup.as_ref()?.is_due(now) {
            self.pending_lookup.take()
        } else {
            None
        }
    }

    /// Applies lookup results unless the field changed in the meantime.
    pub fn apply_suggestions(&mut self, kind: LookupKind, query: &str, nomes: Vec<String>) {
        let current = match kind {
            LookupKind::Colaboradores => self.colaborador_input.value.trim(),
            LookupKind::Logradouros => self.endereco_input.value.trim(),
        };
        if current != query || self.focused_report_field.lookup() != Some(kind) {
            return;
        }
        self.suggestions = nomes;
        self.suggestion_index = 0;
    }

    pub fn suggestion_next(&mut self) {
        if !self.suggestions.is_empty() {
            self.suggestion_index = (self.suggestion_index + 1) % self.suggestions.len();
        }
    }

    pub fn suggestion_previous(&mut self) {
        let len = self.suggestions.len();
        if len > 0 {
            self.suggestion_index = (self.suggestion_index + len - 1) % len;
        }
    }

    pub fn accept_suggestion(&mut self) -> bool {
        let Some(nome) = self.suggestions.get(self.suggestion_index).cloned() else {
            return false;
        };
        if let Some(input) = self.focused_report_input() {
            input.set(&nome);
        }
        self.suggestions.clear();
        self.persist_form();
        true
    }

    pub fn vtr(&self) -> &str {
        self.vtr_index
            .and_then(|i| self.vtr_options.get(i))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Steps through the VTR options, `None` included.
    pub fn cycle_vtr(&mut self, forward: bool) {
        let len = self.vtr_options.len();
        if len == 0 {
            return;
        }
        self.vtr_index = match (self.vtr_index, forward) {
            (None, true) => Some(0),
            (None, false) => Some(len - 1),
            (Some(i), true) if i + 1 < len => Some(i + 1),
            (Some(i), false) if i > 0 => Some(i - 1),
            _ => None,
        };
        self.relatorio_limpo = None;
        self.persist_form();
    }

    pub fn fill_report_now(&mut self) {
        let now = local_now();
        self.data_input.set(&domain::format_data_br(now.date()));
        self.hora_input.set(&domain::format_hora(domain::hora_atual()));
        self.persist_form();
    }

    /// Parsed report date and time. A filled field that does not parse is
    /// an error message for the status bar.
    pub fn report_data_hora(&self) -> Result<(Option<Date>, Option<Time>), String> {
        let data = match self.data_input.value.trim() {
            "" => None,
            raw => Some(
                parse_data_br(raw)
                    .ok_or_else(|| format!("Data inválida: \"{}\". Use DD/MM/AAAA.", raw))?,
            ),
        };
        let hora = match self.hora_input.value.trim() {
            "" => None,
            raw => Some(
                parse_hora_input(raw)
                    .ok_or_else(|| format!("Hora inválida: \"{}\". Use HH:MM.", raw))?,
            ),
        };
        Ok((data, hora))
    }

    pub fn report_fields(&self) -> Result<ReportFields<'_>, String> {
        let (data, hora) = self.report_data_hora()?;
        Ok(ReportFields {
            data,
            hora,
            endereco: &self.endereco_input.value,
            colaborador: &self.colaborador_input.value,
            vtr: self.vtr(),
            relatorio_bruto: &self.relatorio_input.value,
            signer: self.signer.as_deref(),
        })
    }

    /// Inputs are saved as typed, so half-written values survive a restart.
    pub fn form_state(&self) -> FormState {
        FormState {
            data: self.data_input.value.clone(),
            hora: self.hora_input.value.clone(),
            endereco: self.endereco_input.value.clone(),
            colaborador: self.colaborador_input.value.clone(),
            relatorio_bruto: self.relatorio_input.value.clone(),
            vtr: self.vtr().to_string(),
        }
    }

    pub fn restore_form(&mut self, state: FormState) {
        self.data_input = TextInput::from_str(&state.data);
        self.hora_input = TextInput::from_str(&state.hora);
        self.endereco_input = TextInput::from_str(&state.endereco);
        self.colaborador_input = TextInput::from_str(&state.colaborador);
        self.relatorio_input = TextInput::from_str(&state.relatorio_bruto);
        self.vtr_index = self.vtr_options.iter().position(|v| *v == state.vtr);
    }

    pub fn load_form(&mut self) {
        match form_state::load(self.form_store.as_ref()) {
            Ok(Some(state)) => self.restore_form(state),
            Ok(None) => {}
            Err(e) => tracing::warn!("could not restore report form: {:#}", e),
        }
    }

    pub fn persist_form(&self) {
        if let Err(e) = form_state::save(self.form_store.as_ref(), &self.form_state()) {
            tracing::warn!("could not save report form: {:#}", e);
        }
    }

    pub fn clear_form(&mut self) {
        self.restore_form(FormState::default());
        self.relatorio_limpo = None;
        self.suggestions.clear();
        self.pending_lookup = None;
        if let Err(e) = form_state::clear(self.form_store.as_ref()) {
            tracing::warn!("could not clear report form: {:#}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::form_state::MemoryFormStore;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    /// Shares one in-memory store between the app and the test.
    struct Shared(Arc<MemoryFormStore>);

    impl FormStore for Shared {
        fn read(&self, key: &str) -> anyhow::Result<Option<String>> {
            self.0.read(key)
        }
        fn write(&self, key: &str, value: &str) -> anyhow::Result<()> {
            self.0.write(key, value)
        }
        fn clear(&self, key: &str) -> anyhow::Result<()> {
            self.0.clear(key)
        }
    }

    fn app_with_store() -> (App, Arc<MemoryFormStore>) {
        let store = Arc::new(MemoryFormStore::default());
        let app = App::new(&RondaConfig::default(), Box::new(Shared(store.clone())));
        (app, store)
    }

    fn condominio(id: i64, nome: &str) -> Condominio {
        Condominio {
            id: CondominioId::new(id),
            nome: nome.to_string(),
        }
    }

    #[test]
    fn typing_filters_condominios_by_fuzzy_score() {
        let (mut app, _) = app_with_store();
        app.set_condominios(vec![
            condominio(1, "Residencial Jardim Europa"),
            condominio(2, "Residencial Vila Nova"),
        ]);

        for c in "vila".chars() {
            app.patrol_input_char(c);
        }

        assert_eq!(app.visible_condominios().len(), 1);
        let chosen = app.accept_condominio().unwrap();
        assert_eq!(chosen.id, CondominioId::new(2));
        assert_eq!(app.residencial_input.value, "Residencial Vila Nova");
        assert_eq!(app.resolved_condominio_id(), Some(CondominioId::new(2)));
        assert!(app.visible_condominios().is_empty());
    }

    #[test]
    fn report_edits_are_persisted_and_restored() {
        let (mut app, store) = app_with_store();
        app.focus_report_field(ReportField::Colaborador);
        for c in "Ana".chars() {
            app.report_input_char(c);
        }
        app.cycle_vtr(true);

        let mut reopened = App::new(&RondaConfig::default(), Box::new(Shared(store.clone())));
        reopened.load_form();

        assert_eq!(reopened.colaborador_input.value, "Ana");
        assert_eq!(reopened.vtr(), "VTR 03");

        reopened.clear_form();
        assert_eq!(form_state::load(store.as_ref()).unwrap(), None);
        assert!(reopened.colaborador_input.value.is_empty());
    }

    #[test]
    fn half_typed_date_and_time_survive_restart() {
        let (mut app, store) = app_with_store();
        app.focus_report_field(ReportField::Data);
        for c in "5/3/2026".chars() {
            app.report_input_char(c);
        }
        app.focus_report_field(ReportField::Hora);
        for c in "22:1".chars() {
            app.report_input_char(c);
        }

        let mut reopened = App::new(&RondaConfig::default(), Box::new(Shared(store.clone())));
        reopened.load_form();

        assert_eq!(reopened.data_input.value, "5/3/2026");
        assert_eq!(reopened.hora_input.value, "22:1");
        let err = reopened.report_fields().map(|_| ()).unwrap_err();
        assert!(err.contains("22:1"), "{err}");

        reopened.focus_report_field(ReportField::Hora);
        reopened.report_input_char('5');
        let fields = reopened.report_fields().unwrap();
        assert_eq!(fields.data, Some(time::macros::date!(2026 - 03 - 05)));
        assert_eq!(fields.hora, Some(time::macros::time!(22:15)));
    }

    #[test]
    fn residencial_resolves_regardless_of_accented_case() {
        let (mut app, _) = app_with_store();
        app.set_condominios(vec![condominio(5, "Condomínio Solar dos Ipês")]);
        app.residencial_input.set("CONDOMÍNIO SOLAR DOS IPÊS");

        assert_eq!(app.resolved_condominio_id(), Some(CondominioId::new(5)));
    }

    #[test]
    fn lookup_waits_for_debounce_and_minimum_length() {
        let (mut app, _) = app_with_store();
        app.focus_report_field(ReportField::Endereco);
        app.report_input_char('R');
        assert!(app.pending_lookup.is_none());

        app.report_input_char('u');
        let now = Instant::now();
        assert!(app.take_due_lookup(now).is_none());

        let due = app.take_due_lookup(now + LOOKUP_DEBOUNCE).unwrap();
        assert_eq!(due.kind, LookupKind::Logradouros);
        assert_eq!(due.query, "Ru");
        assert!(app.pending_lookup.is_none());
    }

    #[test]
    fn stale_suggestions_are_dropped() {
        let (mut app, _) = app_with_store();
        app.focus_report_field(ReportField::Colaborador);
        app.colaborador_input.set("Car");

        app.apply_suggestions(LookupKind::Colaboradores, "Ca", vec!["Carlos".to_string()]);
        assert!(app.suggestions.is_empty());

        app.apply_suggestions(LookupKind::Colaboradores, "Car", vec!["Carlos".to_string()]);
        assert!(app.accept_suggestion());
        assert_eq!(app.colaborador_input.value, "Carlos");
    }

    #[test]
    fn vtr_cycles_through_none() {
        let (mut app, _) = app_with_store();
        app.vtr_options = vec!["VTR 03".to_string(), "VTR 04".to_string()];
        app.cycle_vtr(false);
        assert_eq!(app.vtr(), "VTR 04");
        app.cycle_vtr(true);
        assert_eq!(app.vtr(), "");
        app.cycle_vtr(true);
        assert_eq!(app.vtr(), "VTR 03");
    }

    #[test]
    fn removing_last_selected_patrol_moves_selection_up() {
        let (mut app, _) = app_with_store();
        let cid = Some(CondominioId::new(1));
        app.tracker
            .record_completed("A", cid, parse_hora_input("19:00"), parse_hora_input("19:20"))
            .unwrap();
        app.tracker
            .record_completed("B", None, parse_hora_input("20:00"), parse_hora_input("20:10"))
            .unwrap();
        app.session_next();
        app.session_next();
        assert_eq!(app.selected_session_index, Some(1));

        let removed = app.remove_selected_patrol().unwrap();
        assert_eq!(removed.residencial, "B");
        assert_eq!(app.selected_session_index, Some(0));

        app.remove_selected_patrol().unwrap();
        assert_eq!(app.selected_session_index, None);
        assert_eq!(app.remove_selected_patrol(), None);
    }

    #[test]
    fn status_filter_cycles_through_todos() {
        let (mut app, _) = app_with_store();
        assert_eq!(app.status_filtro_label(), "Todos");

        app.cycle_status_filtro(true);
        assert_eq!(app.status_filtro_label(), "Pendente");
        app.cycle_status_filtro(false);
        app.cycle_status_filtro(false);
        assert_eq!(app.status_filtro_label(), "Rejeitado");
        app.cycle_status_filtro(true);
        assert_eq!(app.status_filtro_label(), "Todos");
    }

    #[test]
    fn occurrence_filter_parses_dates_and_rejects_bad_ones() {
        let (mut app, _) = app_with_store();
        app.cycle_status_filtro(true);
        app.data_inicio_input.set("1/10/2026");
        app.data_fim_input.set("19/10/2026");

        let filtro = app.ocorrencia_filtro().unwrap();
        assert_eq!(filtro.status.as_deref(), Some("Pendente"));
        assert_eq!(filtro.data_inicio, Some(time::macros::date!(2026 - 10 - 01)));
        assert_eq!(filtro.data_fim, Some(time::macros::date!(2026 - 10 - 19)));

        app.data_fim_input.set("19/10");
        assert!(app.ocorrencia_filtro().unwrap_err().contains("19/10"));

        app.data_fim_input.set("30/09/2026");
        assert!(app.ocorrencia_filtro().is_err());

        app.clear_ocorrencia_filtros();
        assert_eq!(app.ocorrencia_filtro().unwrap(), OcorrenciaFiltro::default());
    }

    #[test]
    fn closing_history_returns_to_previous_view() {
        let (mut app, _) = app_with_store();
        app.navigate_to(View::Relatorio);
        app.open_ocorrencias();
        assert_eq!(app.current_view, View::Ocorrencias);

        app.close_ocorrencias();
        assert_eq!(app.current_view, View::Relatorio);
    }
}
