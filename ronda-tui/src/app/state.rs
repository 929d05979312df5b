use std::time::{Duration, Instant};

/// Autocomplete waits this long after the last keystroke.
pub const LOOKUP_DEBOUNCE: Duration = Duration::from_millis(350);
pub const LOOKUP_MIN_CHARS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum View {
    Ronda,
    Relatorio,
    Ocorrencias,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PatrolField {
    Residencial,
    Inicio,
    Termino,
}

impl PatrolField {
    pub fn next(self) -> Self {
        match self {
            PatrolField::Residencial => PatrolField::Inicio,
            PatrolField::Inicio => PatrolField::Termino,
            PatrolField::Termino => PatrolField::Residencial,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            PatrolField::Residencial => PatrolField::Termino,
            PatrolField::Inicio => PatrolField::Residencial,
            PatrolField::Termino => PatrolField::Inicio,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ReportField {
    Data,
    Hora,
    Endereco,
    Colaborador,
    Vtr,
    RelatorioBruto,
}

impl ReportField {
    const ORDER: [ReportField; 6] = [
        ReportField::Data,
        ReportField::Hora,
        ReportField::Endereco,
        ReportField::Colaborador,
        ReportField::Vtr,
        ReportField::RelatorioBruto,
    ];

    fn position(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ORDER[(self.position() + 1) % Self::ORDER.len()]
    }

    pub fn previous(self) -> Self {
        Self::ORDER[(self.position() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }

    pub fn label(self) -> &'static str {
        match self {
            ReportField::Data => "Data",
            ReportField::Hora => "Hora",
            ReportField::Endereco => "Endereço",
            ReportField::Colaborador => "Colaborador",
            ReportField::Vtr => "Viatura",
            ReportField::RelatorioBruto => "Relato",
        }
    }

    /// Which backend list autocompletes this field, if any.
    pub fn lookup(self) -> Option<LookupKind> {
        match self {
            ReportField::Endereco => Some(LookupKind::Logradouros),
            ReportField::Colaborador => Some(LookupKind::Colaboradores),
            _ => None,
        }
    }
}

/// Filters of the occurrence history.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OcorrenciaField {
    Status,
    DataInicio,
    DataFim,
}

impl OcorrenciaField {
    pub fn next(self) -> Self {
        match self {
            OcorrenciaField::Status => OcorrenciaField::DataInicio,
            OcorrenciaField::DataInicio => OcorrenciaField::DataFim,
            OcorrenciaField::DataFim => OcorrenciaField::Status,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            OcorrenciaField::Status => OcorrenciaField::DataFim,
            OcorrenciaField::DataInicio => OcorrenciaField::Status,
            OcorrenciaField::DataFim => OcorrenciaField::DataInicio,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupKind {
    Colaboradores,
    Logradouros,
}

/// A lookup waiting for the debounce delay to pass.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingLookup {
    pub kind: LookupKind,
    pub query: String,
    pub due: Instant,
}

impl PendingLookup {
    /// `None` when the query is too short to be worth a request.
    pub fn schedule(kind: LookupKind, query: &str, now: Instant) -> Option<Self> {
        let query = query.trim();
        if query.chars().count() < LOOKUP_MIN_CHARS {
            return None;
        }
        Some(Self {
            kind,
            query: query.to_string(),
            due: now + LOOKUP_DEBOUNCE,
        })
    }

    pub fn is_due(&self, now: Instant) -> bool {
        now >= self.due
    }
}

/// Full-screen overlay showing generated text, with an optional share link.
#[derive(Debug, Clone, PartialEq)]
pub struct Preview {
    pub title: String,
    pub body: String,
    pub link: Option<String>,
    pub scroll: u16,
}

/// A text input with mid-string cursor support.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextInput {
    pub value: String,
    pub cursor: usize,
}

impl TextInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_str(s: &str) -> Self {
        Self {
            value: s.to_string(),
            cursor: s.len(),
        }
    }

    pub fn set(&mut self, s: &str) {
        self.value = s.to_string();
        self.cursor = self.value.len();
    }

    /// Insert a character at the cursor position.
    pub fn insert(&mut self, c: char) {
        self.value.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    /// Delete the character immediately before the cursor (backspace).
    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let new_cursor = self.prev_boundary(self.cursor);
        self.value.drain(new_cursor..self.cursor);
        self.cursor = new_cursor;
    }

    pub fn move_left(&mut self) {
        if self.cursor > 0 {
            self.cursor = self.prev_boundary(self.cursor);
        }
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.value.len() {
            self.cursor = self.next_boundary(self.cursor);
        }
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }
    pub fn end(&mut self) {
        self.cursor = self.value.len();
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    pub fn is_blank(&self) -> bool {
        self.value.trim().is_empty()
    }

    /// Returns the string split at the cursor: (before, after).
    pub fn split_at_cursor(&self) -> (&str, &str) {
        (&self.value[..self.cursor], &self.value[self.cursor..])
    }

    fn prev_boundary(&self, pos: usize) -> usize {
        let mut p = pos;
        loop {
            p -= 1;
            if self.value.is_char_boundary(p) {
                return p;
            }
        }
    }

    fn next_boundary(&self, pos: usize) -> usize {
        let mut p = pos + 1;
        while p <= self.value.len() && !self.value.is_char_boundary(p) {
            p += 1;
        }
        p
    }
}
