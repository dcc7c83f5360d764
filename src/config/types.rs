// Configuration type definitions

use std::time::Duration;

use serde::Deserialize;

use crate::candidate::CandidateField;
use crate::suggest::FieldBindings;
use crate::suggest::WidgetOptions;

pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:5000/api/medication-suggestions";
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Suggestion behaviour section
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SuggestConfig {
    pub endpoint: String,
    pub debounce_ms: u64,
    pub min_query_len: usize,
    pub max_results: usize,
    pub timeout_ms: u64,
    pub max_visible: usize,
}

impl Default for SuggestConfig {
    fn default() -> Self {
        let options = WidgetOptions::default();
        SuggestConfig {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            debounce_ms: options.debounce_ms,
            min_query_len: options.min_query_len,
            max_results: options.max_results,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            max_visible: options.max_visible,
        }
    }
}

impl SuggestConfig {
    pub fn widget_options(&self) -> WidgetOptions {
        WidgetOptions {
            debounce_ms: self.debounce_ms,
            min_query_len: self.min_query_len,
            max_results: self.max_results,
            max_visible: self.max_visible,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Target field id for each candidate attribute; empty string or absent means unbound
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BindingsConfig {
    pub display_name: Option<String>,
    pub brand_name: Option<String>,
    pub dosage: Option<String>,
    pub frequency: Option<String>,
    pub notes: Option<String>,
    pub form: Option<String>,
    pub common_uses: Option<String>,
}

impl Default for BindingsConfig {
    fn default() -> Self {
        BindingsConfig {
            display_name: None,
            brand_name: None,
            dosage: Some("dosage".to_string()),
            frequency: Some("frequency".to_string()),
            notes: Some("notes".to_string()),
            form: Some("form".to_string()),
            common_uses: None,
        }
    }
}

impl BindingsConfig {
    pub fn to_bindings(&self) -> FieldBindings {
        let entries = [
            (CandidateField::DisplayName, &self.display_name),
            (CandidateField::BrandName, &self.brand_name),
            (CandidateField::Dosage, &self.dosage),
            (CandidateField::Frequency, &self.frequency),
            (CandidateField::Notes, &self.notes),
            (CandidateField::Form, &self.form),
            (CandidateField::CommonUses, &self.common_uses),
        ];

        entries
            .into_iter()
            .filter_map(|(field, target)| {
                target
                    .as_deref()
                    .map(str::trim)
                    .filter(|t| !t.is_empty())
                    .map(|t| (field, t))
            })
            .fold(FieldBindings::empty(), |bindings, (field, target)| {
                bindings.bind(field, target)
            })
    }
}

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub suggest: SuggestConfig,
    #[serde(default)]
    pub bindings: BindingsConfig,
}
