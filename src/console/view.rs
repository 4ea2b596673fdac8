//! Per-table view state: schema, first page, option sets, the edit draft and submission.

use crate::config::ForeignKeyBindings;
use crate::console::api::{ConsoleApi, ConsoleError};
use crate::console::fk::{ForeignKeyResolver, OptionSets};
use crate::console::form::{draft_from_row, form_fields, grid, submission_payload, Draft, FormField, Grid};
use crate::response::{Page, Written};
use crate::schema::TableDescriptor;
use crate::value::{FieldValue, Record};
use std::sync::Arc;

/// Page requested when a table is mounted or reloaded.
pub const INITIAL_PAGE_SIZE: u64 = 200;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resume {
    Ready,
    Editing,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViewState {
    Loading,
    Ready,
    Editing,
    Submitting,
    /// Held until acknowledged, then back to `resume`.
    Error { message: String, resume: Resume },
}

impl ViewState {
    fn name(&self) -> &'static str {
        match self {
            ViewState::Loading => "loading",
            ViewState::Ready => "ready",
            ViewState::Editing => "editing",
            ViewState::Submitting => "submitting",
            ViewState::Error { .. } => "showing an error",
        }
    }
}

/// Identifies one load. Results carrying an older generation are dropped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadTicket {
    pub generation: u64,
    pub table: String,
}

#[derive(Default)]
struct Loaded {
    schema: bool,
    records: bool,
    options: bool,
}

pub struct TableView {
    api: Arc<dyn ConsoleApi>,
    resolver: ForeignKeyResolver,
    table: String,
    generation: u64,
    state: ViewState,
    loaded: Loaded,
    schema: Option<TableDescriptor>,
    records: Vec<Record>,
    total: u64,
    options: OptionSets,
    draft: Draft,
    editing: Option<FieldValue>,
}

impl TableView {
    pub fn new(api: Arc<dyn ConsoleApi>, bindings: Arc<ForeignKeyBindings>, table: &str) -> Self {
        TableView {
            resolver: ForeignKeyResolver::new(api.clone(), bindings),
            api,
            table: table.to_string(),
            generation: 0,
            state: ViewState::Loading,
            loaded: Loaded::default(),
            schema: None,
            records: Vec::new(),
            total: 0,
            options: OptionSets::new(),
            draft: Draft::new(),
            editing: None,
        }
    }

    /// Tear down everything for the old table and start over. Earlier tickets go stale.
    pub fn switch_table(&mut self, table: &str) -> LoadTicket {
        tracing::debug!(from = %self.table, to = %table, "switching table");
        self.table = table.to_string();
        self.generation += 1;
        self.state = ViewState::Loading;
        self.loaded = Loaded::default();
        self.schema = None;
        self.records.clear();
        self.total = 0;
        self.options.clear();
        self.draft.clear();
        self.editing = None;
        self.ticket()
    }

    pub fn ticket(&self) -> LoadTicket {
        LoadTicket {
            generation: self.generation,
            table: self.table.clone(),
        }
    }

    fn is_current(&self, ticket: &LoadTicket) -> bool {
        let current = ticket.generation == self.generation && ticket.table == self.table;
        if !current {
            tracing::debug!(table = %ticket.table, generation = ticket.generation, "discarding stale response");
        }
        current
    }

    fn fail_load(&mut self, err: ConsoleError) {
        tracing::warn!(table = %self.table, error = %err, "load failed");
        self.state = ViewState::Error {
            message: err.to_string(),
            resume: Resume::Ready,
        };
    }

    fn settle(&mut self) {
        if self.state == ViewState::Loading && self.loaded.schema && self.loaded.records && self.loaded.options {
            self.state = ViewState::Ready;
        }
    }

    /// Returns false when the ticket is stale and nothing changed.
    pub fn apply_schema(&mut self, ticket: &LoadTicket, result: Result<TableDescriptor, ConsoleError>) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        match result {
            Ok(schema) => {
                self.schema = Some(schema);
                self.loaded.schema = true;
                self.settle();
            }
            Err(e) => self.fail_load(e),
        }
        true
    }

    pub fn apply_records(&mut self, ticket: &LoadTicket, result: Result<Page, ConsoleError>) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        match result {
            Ok(page) => {
                self.records = page.data;
                self.total = page.total;
                self.loaded.records = true;
                self.settle();
            }
            Err(e) => self.fail_load(e),
        }
        true
    }

    pub fn apply_options(&mut self, ticket: &LoadTicket, result: Result<OptionSets, ConsoleError>) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        match result {
            Ok(options) => {
                self.options = options;
                self.loaded.options = true;
                self.settle();
            }
            Err(e) => self.fail_load(e),
        }
        true
    }

    /// Fetch schema, first page and option sets concurrently and apply them.
    pub async fn load(&mut self) {
        let ticket = self.ticket();
        let (schema, page, options) = tokio::join!(
            self.api.describe(&ticket.table),
            self.api.list(&ticket.table, INITIAL_PAGE_SIZE, 0),
            self.resolver.resolve(&ticket.table),
        );
        self.apply_schema(&ticket, schema);
        self.apply_records(&ticket, page);
        self.apply_options(&ticket, options);
    }

    /// Refresh records and option sets in place after a write.
    async fn reload(&mut self) {
        self.generation += 1;
        let ticket = self.ticket();
        let (page, options) = tokio::join!(
            self.api.list(&ticket.table, INITIAL_PAGE_SIZE, 0),
            self.resolver.resolve(&ticket.table),
        );
        self.apply_records(&ticket, page);
        self.apply_options(&ticket, options);
    }

    fn require(&self, allowed: &[ViewState]) -> Result<(), ConsoleError> {
        if allowed.contains(&self.state) {
            Ok(())
        } else {
            Err(ConsoleError::InvalidState(self.state.name()))
        }
    }

    fn bindings(&self) -> &[crate::config::ForeignKeyBinding] {
        self.resolver.bindings().for_table(&self.table)
    }

    /// Load a row into the draft for editing.
    pub fn select_row(&mut self, index: usize) -> Result<(), ConsoleError> {
        self.require(&[ViewState::Ready, ViewState::Editing])?;
        let row = self.records.get(index).ok_or(ConsoleError::NoSuchRow(index))?;
        let pk = self.schema.as_ref().and_then(|s| s.primary_key.as_deref());
        self.editing = pk.and_then(|pk| row.get(pk)).filter(|v| !v.is_null()).cloned();
        self.draft = draft_from_row(row, self.bindings());
        self.state = ViewState::Editing;
        Ok(())
    }

    pub fn set_field(&mut self, column: &str, value: impl Into<FieldValue>) -> Result<(), ConsoleError> {
        self.require(&[ViewState::Ready, ViewState::Editing])?;
        self.draft.insert(column.to_string(), value.into());
        Ok(())
    }

    pub fn cancel_edit(&mut self) {
        if self.state == ViewState::Editing {
            self.draft.clear();
            self.editing = None;
            self.state = ViewState::Ready;
        }
    }

    /// Create from the draft, or update the selected row. On success the page and options are reloaded.
    pub async fn submit(&mut self) -> Result<Written, ConsoleError> {
        self.require(&[ViewState::Ready, ViewState::Editing])?;
        let fields = self.fields().ok_or(ConsoleError::InvalidState("loading"))?;
        let resume = if self.state == ViewState::Editing {
            Resume::Editing
        } else {
            Resume::Ready
        };
        let payload = submission_payload(&self.draft, &fields);
        self.state = ViewState::Submitting;

        let table = self.table.clone();
        let result = match &self.editing {
            Some(id) => self.api.update(&table, id, &payload).await,
            None => self.api.create(&table, &payload).await,
        };
        match result {
            Ok(written) => {
                self.draft.clear();
                self.editing = None;
                self.state = ViewState::Ready;
                self.reload().await;
                Ok(written)
            }
            Err(e) => {
                tracing::warn!(table = %table, error = %e, "submit failed");
                self.state = ViewState::Error {
                    message: e.to_string(),
                    resume,
                };
                Err(e)
            }
        }
    }

    pub fn acknowledge_error(&mut self) {
        if let ViewState::Error { resume, .. } = &self.state {
            self.state = match resume {
                Resume::Editing => ViewState::Editing,
                Resume::Ready => ViewState::Ready,
            };
        }
    }

    pub async fn delete_row(&mut self, index: usize) -> Result<(), ConsoleError> {
        self.require(&[ViewState::Ready, ViewState::Editing])?;
        let row = self.records.get(index).ok_or(ConsoleError::NoSuchRow(index))?;
        let id = self
            .schema
            .as_ref()
            .and_then(|s| s.primary_key.as_deref())
            .and_then(|pk| row.get(pk))
            .filter(|v| !v.is_null())
            .cloned()
            .ok_or(ConsoleError::NoSuchRow(index))?;

        let table = self.table.clone();
        match self.api.delete(&table, &id).await {
            Ok(_) => {
                self.draft.clear();
                self.editing = None;
                self.state = ViewState::Ready;
                self.reload().await;
                Ok(())
            }
            Err(e) => {
                let resume = if self.state == ViewState::Editing {
                    Resume::Editing
                } else {
                    Resume::Ready
                };
                self.state = ViewState::Error {
                    message: e.to_string(),
                    resume,
                };
                Err(e)
            }
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn schema(&self) -> Option<&TableDescriptor> {
        self.schema.as_ref()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn options(&self) -> &OptionSets {
        &self.options
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    /// Form fields for the current schema; selects stay empty until options arrive.
    pub fn fields(&self) -> Option<Vec<FormField>> {
        self.schema
            .as_ref()
            .map(|s| form_fields(s, self.bindings(), &self.options))
    }

    pub fn grid(&self) -> Option<Grid> {
        self.schema
            .as_ref()
            .map(|s| grid(s, &self.records, &self.options, self.total))
    }
}
