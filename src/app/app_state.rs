use std::time::{Duration, Instant};

use crate::config::Config;
use crate::presets::{self, FrequencyPreset};
use crate::source::{FetchHandle, FetchResponse};
use crate::suggest::{Effect, SuggestMsg, SuggestWidget, WidgetHandles};

use super::form::{DROPDOWN_ID, FREQUENCY_FIELD, Form, SEARCH_FIELD, TIME_FIELDS};

/// Longest the event loop waits for input before re-checking timers and responses
pub const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Application state
pub struct App {
    pub form: Form,
    pub suggest: Option<SuggestWidget>,
    fetcher: Option<FetchHandle>,
    pub status: Option<String>,
    pub preset: Option<&'static FrequencyPreset>,
    pub should_quit: bool,
    /// Set when the form is submitted with Enter
    pub submitted: bool,
}

impl App {
    /// Build the form and attach a suggestion widget to its search field
    ///
    /// Without a fetcher, queries are issued but never answered; responses
    /// can still be fed in with `handle_fetch_response`.
    pub fn new(config: &Config, fetcher: Option<FetchHandle>) -> Self {
        let form = Form::new();
        let suggest = SuggestWidget::attach(
            WidgetHandles::new(SEARCH_FIELD, DROPDOWN_ID),
            config.bindings.to_bindings(),
            config.suggest.widget_options(),
            &form,
        );

        Self {
            form,
            suggest,
            fetcher,
            status: None,
            preset: None,
            should_quit: false,
            submitted: false,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = Some(status.into());
    }

    /// Current text of the search input
    pub fn search_text(&self) -> &str {
        self.form.text(SEARCH_FIELD).unwrap_or_default()
    }

    /// How long the event loop may block waiting for input
    pub fn poll_timeout(&self, now: Instant) -> Duration {
        self.suggest
            .as_ref()
            .and_then(SuggestWidget::next_deadline)
            .map_or(POLL_INTERVAL, |deadline| {
                deadline.saturating_duration_since(now).min(POLL_INTERVAL)
            })
    }

    /// Fire due debounce timers and drain completed fetches
    pub fn tick(&mut self, now: Instant) {
        if let Some(widget) = self.suggest.as_mut() {
            let effects = widget.tick(now);
            self.perform(effects, now);
        }

        while let Some(response) = self.fetcher.as_ref().and_then(FetchHandle::try_recv) {
            self.handle_fetch_response(response, now);
        }
    }

    pub fn handle_fetch_response(&mut self, response: FetchResponse, now: Instant) {
        self.dispatch(response.into_msg(), now);
    }

    /// Feed a message to the widget and carry out the resulting effects
    pub(super) fn dispatch(&mut self, msg: SuggestMsg, now: Instant) -> Vec<Effect> {
        let Some(widget) = self.suggest.as_mut() else {
            return Vec::new();
        };
        let effects = widget.update(msg, &mut self.form, now);
        self.perform(effects.clone(), now);
        effects
    }

    fn perform(&mut self, effects: Vec<Effect>, now: Instant) {
        for effect in effects {
            match effect {
                Effect::Fetch(request) => {
                    let Some(fetcher) = &self.fetcher else {
                        log::debug!("No fetcher, query {} left pending", request.seq);
                        continue;
                    };
                    let seq = request.seq;
                    if !fetcher.send(request) {
                        self.set_status("Suggestion worker stopped");
                        self.dispatch(
                            SuggestMsg::ResponseFailed {
                                seq,
                                error: "fetch worker unavailable".to_string(),
                            },
                            now,
                        );
                    }
                }
                Effect::Applied { report, .. } => {
                    let mut status = format!("Selected {}", report.search_value);
                    if !report.missing.is_empty() {
                        status.push_str(&format!(" (no field for: {})", report.missing.join(", ")));
                    }
                    self.set_status(status);
                }
                Effect::ConsumeKey => {}
            }
        }
    }

    /// Advance to the next frequency preset and rebuild the time fields from it
    pub fn cycle_preset(&mut self) {
        let preset = presets::next_preset(self.preset.map(|p| p.key));
        self.form.set_text(FREQUENCY_FIELD, preset.label);
        for (id, value) in TIME_FIELDS.iter().zip(presets::rebuild_time_fields(preset.key)) {
            self.form.set_text(id, &value);
        }
        self.preset = Some(preset);
        self.set_status(format!("Frequency preset: {}", preset.label));
    }
}

#[cfg(test)]
#[path = "app_state_tests.rs"]
mod app_state_tests;
