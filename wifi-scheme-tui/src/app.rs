use anyhow::Result;
use tui_input::{Input, InputRequest};

use wifi_scheme::{PropertyRecord, Scheme, SchemeCatalog, StateReconciler, StatusTool, UpdateRequest};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusMessage {
    Info(String),
    Error(String),
}

pub struct App<T> {
    pub filter: Input,
    pub selected: usize,
    pub record: PropertyRecord,
    pub message: Option<StatusMessage>,
    catalog: SchemeCatalog,
    matches: Vec<(Scheme, f64)>, // best first
    reconciler: StateReconciler<T>,
}

impl<T: StatusTool> App<T> {
    pub fn new(catalog: SchemeCatalog, reconciler: StateReconciler<T>) -> Result<Self> {
        let record = reconciler.store().load()?;
        let mut app = Self {
            filter: Input::default(),
            selected: 0,
            record,
            message: None,
            catalog,
            matches: Vec::new(),
            reconciler,
        };

        app.apply_filter();
        Ok(app)
    }

    /// Visible schemes with their match score, best first.
    pub fn visible(&self) -> impl Iterator<Item = (&Scheme, f64)> {
        self.matches.iter().map(|(scheme, score)| (scheme, *score))
    }

    pub fn visible_len(&self) -> usize {
        self.matches.len()
    }

    pub fn get_selected_scheme(&self) -> Option<&Scheme> {
        self.matches.get(self.selected).map(|(scheme, _)| scheme)
    }

    pub fn insert_char(&mut self, c: char) {
        self.filter.handle(InputRequest::InsertChar(c));
        self.apply_filter();
    }

    pub fn delete_char(&mut self) {
        self.filter.handle(InputRequest::DeletePrevChar);
        self.apply_filter();
    }

    pub fn cursor_left(&mut self) {
        self.filter.handle(InputRequest::GoToPrevChar);
    }

    pub fn cursor_right(&mut self) {
        self.filter.handle(InputRequest::GoToNextChar);
    }

    pub fn previous_scheme(&mut self) {
        if !self.matches.is_empty() {
            self.selected = if self.selected == 0 {
                self.matches.len() - 1
            } else {
                self.selected - 1
            };
        }
    }

    pub fn next_scheme(&mut self) {
        if !self.matches.is_empty() {
            self.selected = (self.selected + 1) % self.matches.len();
        }
    }

    /// Select the highlighted scheme and probe it.
    pub fn activate_selected(&mut self) {
        let Some(scheme) = self.get_selected_scheme().cloned() else {
            self.message = Some(StatusMessage::Error("No scheme selected".to_string()));
            return;
        };

        let request = UpdateRequest::select(&scheme.interface, &scheme.name, scheme.target_ssid());
        self.run_update(&scheme.name, &request);
    }

    /// Re-probe the stored scheme.
    pub fn refresh(&mut self) {
        let current = self.record.scheme_current().map(str::to_string);
        let ssid = current
            .as_deref()
            .and_then(|name| self.catalog.find(name))
            .map(|s| s.target_ssid().to_string())
            .unwrap_or_default();

        let name = current.as_deref().unwrap_or("(none)");
        self.run_update(name, &UpdateRequest::refresh(ssid));
    }

    fn run_update(&mut self, name: &str, request: &UpdateRequest) {
        match self.reconciler.update(request) {
            Ok(record) => {
                let active = record.scheme_active().unwrap_or(false);
                let state = if active { "active" } else { "inactive" };
                self.message = Some(StatusMessage::Info(format!("{}: {}", name, state)));
                self.record = record;
            }
            Err(e) => {
                tracing::error!("Update failed: {}", e);
                self.message = Some(StatusMessage::Error(e.to_string()));
            }
        }
    }

    fn apply_filter(&mut self) {
        self.matches = self
            .catalog
            .search(self.filter.value())
            .into_iter()
            .map(|(scheme, score)| (scheme.clone(), score))
            .collect();

        // Ensure we have a valid selection
        if self.selected >= self.matches.len() {
            self.selected = 0;
        }
    }
}
