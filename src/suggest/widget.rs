//! Suggestion widget state machine
//!
//! One `SuggestWidget` per search input. All inputs arrive as `SuggestMsg`
//! values and all outbound work leaves as `Effect` values, so the transition
//! table can be driven without a terminal. The host owns the event loop: it
//! feeds keystrokes, pointer events and fetch responses in, calls `tick` to
//! fire due debounce timers, and performs the returned fetches.

use std::time::Instant;

use ratatui::layout::{Position, Rect};

use super::autofill::{AutofillReport, FieldBindings, FormHost, apply_candidate};
use super::debouncer::DEFAULT_DEBOUNCE_MS;
use super::dispatcher::{DEFAULT_MIN_QUERY_LEN, Dispatch, QueryDispatcher};
use super::selection::SelectionState;
use crate::candidate::Candidate;

/// Default cap on results requested from the source
pub const DEFAULT_MAX_RESULTS: usize = 10;
/// Default number of dropdown rows visible before scrolling
pub const DEFAULT_MAX_VISIBLE: usize = 8;

/// Widget state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No query issued, dropdown hidden
    Idle,
    /// Request in flight; previous results may still be showing
    AwaitingResponse,
    /// Dropdown visible with at least one candidate
    ShowingResults,
    /// Last query returned nothing or failed; dropdown hidden
    NoResults,
}

/// Navigation keys the widget reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    Up,
    Down,
    Enter,
    Escape,
}

/// Input messages to the state machine
#[derive(Debug, Clone, PartialEq)]
pub enum SuggestMsg {
    /// The search input's value changed through user editing
    InputChanged(String),
    /// The debounce quiet period for this query elapsed
    TimerFired(String),
    Key(NavKey),
    /// Pointer/touch down anywhere on screen
    PointerDown(Position),
    /// Pointer moved without a button held; highlights the row under it
    PointerMoved(Position),
    ResponseReceived {
        seq: u64,
        candidates: Vec<Candidate>,
    },
    ResponseFailed {
        seq: u64,
        error: String,
    },
}

/// Outbound query, tagged with its sequence number
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub seq: u64,
    pub term: String,
    pub limit: usize,
}

/// Work the host must perform after an update
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Issue this query to the suggestion source
    Fetch(FetchRequest),
    /// A candidate was applied to the form
    Applied { index: usize, report: AutofillReport },
    /// The key was handled; suppress the host's default action for it
    ConsumeKey,
}

/// Identifiers of the host elements a widget is attached to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetHandles {
    pub input: String,
    pub dropdown: String,
}

impl WidgetHandles {
    pub fn new(input: impl Into<String>, dropdown: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            dropdown: dropdown.into(),
        }
    }
}

/// Tunables fixed at widget initialization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WidgetOptions {
    pub debounce_ms: u64,
    pub min_query_len: usize,
    pub max_results: usize,
    pub max_visible: usize,
}

impl Default for WidgetOptions {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            min_query_len: DEFAULT_MIN_QUERY_LEN,
            max_results: DEFAULT_MAX_RESULTS,
            max_visible: DEFAULT_MAX_VISIBLE,
        }
    }
}

/// Per-instance suggestion state
#[derive(Debug, Clone)]
pub struct SuggestWidget {
    handles: WidgetHandles,
    bindings: FieldBindings,
    options: WidgetOptions,
    dispatcher: QueryDispatcher,
    /// Last value the user typed into the search input
    query: String,
    /// Candidates from the latest accepted response (None = no query yet)
    suggestions: Option<Vec<Candidate>>,
    selection: SelectionState,
    phase: Phase,
    /// Set by Escape/outside click/selection, cleared by the next accepted response
    dismissed: bool,
    /// Sequence number of the most recently issued query
    last_seq: u64,
    /// Sequence number whose response may still update state
    in_flight: Option<u64>,
    /// Last applied candidate, shown in the detail panel
    detail: Option<Candidate>,
    input_area: Option<Rect>,
    dropdown_area: Option<Rect>,
}

impl SuggestWidget {
    pub fn new(handles: WidgetHandles, bindings: FieldBindings, options: WidgetOptions) -> Self {
        let mut selection = SelectionState::new();
        selection.set_viewport(options.max_visible);
        Self {
            handles,
            bindings,
            options,
            dispatcher: QueryDispatcher::new(options.debounce_ms, options.min_query_len),
            query: String::new(),
            suggestions: None,
            selection,
            phase: Phase::Idle,
            dismissed: false,
            last_seq: 0,
            in_flight: None,
            detail: None,
            input_area: None,
            dropdown_area: None,
        }
    }

    /// Create a widget for a host, or `None` if the host lacks the input or dropdown
    pub fn attach<H: FormHost + ?Sized>(
        handles: WidgetHandles,
        bindings: FieldBindings,
        options: WidgetOptions,
        host: &H,
    ) -> Option<Self> {
        if !host.has_element(&handles.input) || !host.has_element(&handles.dropdown) {
            log::debug!(
                "Suggestion widget not attached: '{}' or '{}' missing",
                handles.input,
                handles.dropdown
            );
            return None;
        }
        Some(Self::new(handles, bindings, options))
    }

    /// Feed one message through the state machine
    pub fn update<H: FormHost + ?Sized>(
        &mut self,
        msg: SuggestMsg,
        host: &mut H,
        now: Instant,
    ) -> Vec<Effect> {
        match msg {
            SuggestMsg::InputChanged(query) => self.on_input(query, now),
            SuggestMsg::TimerFired(query) => self.on_timer(query),
            SuggestMsg::Key(key) => self.on_key(key, host),
            SuggestMsg::PointerDown(position) => self.on_pointer_down(position, host),
            SuggestMsg::PointerMoved(position) => self.on_pointer_moved(position),
            SuggestMsg::ResponseReceived { seq, candidates } => {
                self.on_response(seq, candidates)
            }
            SuggestMsg::ResponseFailed { seq, error } => self.on_failure(seq, &error),
        }
    }

    /// Fire the debounce timer if its quiet period has elapsed
    pub fn tick(&mut self, now: Instant) -> Vec<Effect> {
        match self.dispatcher.poll(now) {
            Some(query) => self.on_timer(query),
            None => Vec::new(),
        }
    }

    fn on_input(&mut self, query: String, now: Instant) -> Vec<Effect> {
        self.query = query;
        match self.dispatcher.notify(&self.query, now) {
            Dispatch::Scheduled => {
                log::debug!("Scheduled suggestion query '{}'", self.query);
            }
            Dispatch::Cleared => {
                self.reset_to_idle();
                self.detail = None;
            }
        }
        Vec::new()
    }

    fn on_timer(&mut self, query: String) -> Vec<Effect> {
        if !self.dispatcher.meets_threshold(&query) {
            return Vec::new();
        }

        self.last_seq = self.last_seq.wrapping_add(1);
        self.in_flight = Some(self.last_seq);
        self.phase = Phase::AwaitingResponse;
        log::debug!("Issuing query {} for '{}'", self.last_seq, query);

        vec![Effect::Fetch(FetchRequest {
            seq: self.last_seq,
            term: query,
            limit: self.options.max_results,
        })]
    }

    fn on_key<H: FormHost + ?Sized>(&mut self, key: NavKey, host: &mut H) -> Vec<Effect> {
        let visible = self.is_dropdown_visible();
        let count = self.suggestions().len();

        match key {
            NavKey::Down if visible => {
                self.selection.navigate_next(count);
                vec![Effect::ConsumeKey]
            }
            NavKey::Up if visible => {
                self.selection.navigate_previous(count);
                vec![Effect::ConsumeKey]
            }
            NavKey::Enter if visible => match self.selection.get_selected() {
                Some(index) => {
                    let mut effects = self.apply(index, host);
                    effects.push(Effect::ConsumeKey);
                    effects
                }
                None => vec![Effect::ConsumeKey],
            },
            NavKey::Escape => {
                self.dismiss();
                if visible {
                    vec![Effect::ConsumeKey]
                } else {
                    Vec::new()
                }
            }
            _ => Vec::new(),
        }
    }

    fn on_pointer_down<H: FormHost + ?Sized>(
        &mut self,
        position: Position,
        host: &mut H,
    ) -> Vec<Effect> {
        if self.input_area.is_some_and(|area| area.contains(position)) {
            return Vec::new();
        }

        let in_dropdown = self.is_dropdown_visible()
            && self.dropdown_area.is_some_and(|area| area.contains(position));
        if in_dropdown {
            return match self.row_at(position) {
                Some(index) => self.apply(index, host),
                None => Vec::new(),
            };
        }

        self.dismiss();
        Vec::new()
    }

    fn on_pointer_moved(&mut self, position: Position) -> Vec<Effect> {
        if !self.is_dropdown_visible() {
            return Vec::new();
        }
        if let Some(index) = self.row_at(position) {
            let count = self.suggestions().len();
            self.selection.select_index(index, count);
        }
        Vec::new()
    }

    fn on_response(&mut self, seq: u64, candidates: Vec<Candidate>) -> Vec<Effect> {
        if self.in_flight != Some(seq) {
            log::debug!(
                "Discarding stale response {} (in flight: {:?})",
                seq,
                self.in_flight
            );
            return Vec::new();
        }

        self.in_flight = None;
        self.dismissed = false;
        self.selection.clear_selection();
        self.phase = if candidates.is_empty() {
            Phase::NoResults
        } else {
            Phase::ShowingResults
        };
        self.suggestions = Some(candidates);
        Vec::new()
    }

    fn on_failure(&mut self, seq: u64, error: &str) -> Vec<Effect> {
        if self.in_flight != Some(seq) {
            log::debug!("Discarding stale failure {}: {}", seq, error);
            return Vec::new();
        }

        log::warn!("Suggestion query {} failed: {}", seq, error);
        self.in_flight = None;
        self.selection.clear_selection();
        self.suggestions = Some(Vec::new());
        self.detail = None;
        self.phase = Phase::NoResults;
        Vec::new()
    }

    fn apply<H: FormHost + ?Sized>(&mut self, index: usize, host: &mut H) -> Vec<Effect> {
        let Some(candidate) = self.suggestions().get(index).cloned() else {
            return Vec::new();
        };

        let report = apply_candidate(&candidate, &self.handles.input, &self.bindings, host);
        log::info!("Applied suggestion '{}'", report.search_value);

        self.query = report.search_value.clone();
        self.detail = Some(candidate);
        self.reset_to_idle();
        self.dismissed = true;

        vec![Effect::Applied { index, report }]
    }

    /// Hide the dropdown and drop pending work without touching field values
    fn dismiss(&mut self) {
        self.reset_to_idle();
        self.dismissed = true;
    }

    fn reset_to_idle(&mut self) {
        self.dispatcher.cancel();
        self.in_flight = None;
        self.suggestions = None;
        self.selection.clear_selection();
        self.phase = Phase::Idle;
    }

    fn row_at(&self, position: Position) -> Option<usize> {
        let area = self.dropdown_area?;
        // Rows sit inside a one-cell border
        let first_row = area.y + 1;
        let last_row = (area.y + area.height).saturating_sub(1);
        if position.y < first_row || position.y >= last_row {
            return None;
        }

        let index = self.selection.scroll_offset() + usize::from(position.y - first_row);
        (index < self.suggestions().len()).then_some(index)
    }

    /// Dropdown visibility, derived from query length, results and dismissal
    pub fn is_dropdown_visible(&self) -> bool {
        self.dispatcher.meets_threshold(&self.query)
            && self.suggestions.as_ref().is_some_and(|s| !s.is_empty())
            && !self.dismissed
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Current suggestion list (empty when no query has completed)
    pub fn suggestions(&self) -> &[Candidate] {
        self.suggestions.as_deref().unwrap_or(&[])
    }

    /// Whether a response has been accepted since the last reset
    pub fn has_response(&self) -> bool {
        self.suggestions.is_some()
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selection.get_selected()
    }

    pub fn detail(&self) -> Option<&Candidate> {
        self.detail.as_ref()
    }

    pub fn handles(&self) -> &WidgetHandles {
        &self.handles
    }

    pub fn bindings(&self) -> &FieldBindings {
        &self.bindings
    }

    pub fn options(&self) -> &WidgetOptions {
        &self.options
    }

    /// When the pending debounce timer fires, for bounding the event loop's wait
    pub fn next_deadline(&self) -> Option<Instant> {
        self.dispatcher.deadline()
    }

    pub fn in_flight_seq(&self) -> Option<u64> {
        self.in_flight
    }

    pub fn last_seq(&self) -> u64 {
        self.last_seq
    }

    /// Record where the search input was drawn, for pointer hit testing
    pub fn set_input_area(&mut self, area: Rect) {
        self.input_area = Some(area);
    }

    /// Record where the dropdown was drawn (None when hidden)
    pub fn set_dropdown_area(&mut self, area: Option<Rect>) {
        self.dropdown_area = area;
    }

    pub fn dropdown_area(&self) -> Option<Rect> {
        self.dropdown_area
    }

    /// Number of rows the rendered dropdown can show
    pub fn set_viewport(&mut self, rows: usize) {
        self.selection.set_viewport(rows);
    }
}

#[cfg(test)]
#[path = "widget_tests.rs"]
mod widget_tests;
