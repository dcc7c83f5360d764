//! Frequency presets
//!
//! A fixed table from frequency key to default administration times. Picking
//! a preset rebuilds every time field: slots past the preset's times are blank.

/// Number of time-entry fields on the form
pub const TIME_SLOTS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrequencyPreset {
    pub key: &'static str,
    pub label: &'static str,
    pub times: &'static [&'static str],
}

pub const PRESETS: [FrequencyPreset; 6] = [
    FrequencyPreset {
        key: "once_daily",
        label: "Once daily",
        times: &["08:00"],
    },
    FrequencyPreset {
        key: "twice_daily",
        label: "Twice daily",
        times: &["08:00", "20:00"],
    },
    FrequencyPreset {
        key: "three_times_daily",
        label: "Three times daily",
        times: &["08:00", "14:00", "20:00"],
    },
    FrequencyPreset {
        key: "four_times_daily",
        label: "Four times daily",
        times: &["08:00", "12:00", "16:00", "20:00"],
    },
    FrequencyPreset {
        key: "bedtime",
        label: "At bedtime",
        times: &["21:00"],
    },
    FrequencyPreset {
        key: "as_needed",
        label: "As needed",
        times: &[],
    },
];

pub fn preset(key: &str) -> Option<&'static FrequencyPreset> {
    PRESETS.iter().find(|p| p.key == key)
}

/// Values for all time fields; unknown keys clear every slot
pub fn rebuild_time_fields(key: &str) -> [String; TIME_SLOTS] {
    let times = preset(key).map(|p| p.times).unwrap_or_default();
    std::array::from_fn(|slot| times.get(slot).map(|t| t.to_string()).unwrap_or_default())
}

/// Preset after `current` in table order, wrapping; the first preset when `current` is None
pub fn next_preset(current: Option<&str>) -> &'static FrequencyPreset {
    let next = current
        .and_then(|key| PRESETS.iter().position(|p| p.key == key))
        .map_or(0, |i| (i + 1) % PRESETS.len());
    &PRESETS[next]
}

#[cfg(test)]
#[path = "presets_tests.rs"]
mod presets_tests;
