//! Alias table that rewrites surface intent strings to canonical labels

use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

/// Compiled-in aliases. Keys are lowercase; values are expected to be
/// canonical taxonomy strings.
const BUILTIN_ALIASES: &[(&str, &str)] = &[
    // Navigation
    ("go_to", "navigate_to"),
    ("move_to", "navigate_to"),
    ("travel_to", "navigate_to"),
    ("walk_to", "navigate_to"),
    ("follow", "follow_me"),
    ("follow_user", "follow_me"),
    ("stop", "emergency_stop"),
    ("halt", "emergency_stop"),
    ("freeze", "emergency_stop"),
    // Manipulation
    ("bring", "fetch_object"),
    ("get", "fetch_object"),
    ("retrieve", "fetch_object"),
    ("pick_up", "grasp"),
    ("grab", "grasp"),
    ("take", "grasp"),
    ("put_down", "place_object"),
    ("drop", "release"),
    ("let_go", "release"),
    ("give_me", "hand_over"),
    // Perception
    ("what_can_you_see", "what_do_you_see"),
    ("look_for", "find_object"),
    ("search_for", "find_object"),
    ("locate", "find_object"),
    ("who_is_that", "identify_person"),
    // Information
    ("weather", "get_weather"),
    ("forecast", "get_weather"),
    ("weather_forecast", "get_weather"),
    ("news", "get_news"),
    ("headlines", "get_news"),
    ("latest_news", "get_news"),
    ("what_time", "tell_time"),
    ("time_now", "tell_time"),
    ("current_time", "tell_time"),
    // Social
    ("hello", "greeting"),
    ("hi", "greeting"),
    ("hey", "greeting"),
    ("bye", "goodbye"),
    ("goodbye", "goodbye"),
    ("see_you", "goodbye"),
    ("how_are_you", "how_are_you"),
    ("idle_convo", "small_talk"),
    ("casual_chat", "small_talk"),
    ("joke", "tell_joke"),
    ("funny", "tell_joke"),
    // Task management
    ("remind_me", "set_reminder"),
    ("reminder", "set_reminder"),
    ("alarm", "set_alarm"),
    ("wake_me", "set_alarm"),
    ("cancel_alarm", "stop_alarm"),
    ("delete_alarm", "stop_alarm"),
    // System
    ("what_can_you_do", "help"),
    ("capabilities", "status"),
    ("system_status", "status"),
    ("turn_off", "shutdown"),
    ("power_off", "shutdown"),
];

/// Outcome of a normalization lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalized {
    /// The string to hand to [`crate::IntentLabel::parse`].
    pub canonical: String,
    /// The caller's input, present only when a rewrite happened.
    pub original: Option<String>,
}

/// Read-only alias mapping, shared across classifiers.
#[derive(Debug, Clone)]
pub struct NormalizationTable {
    entries: HashMap<String, String>,
}

impl NormalizationTable {
    /// Process-wide instance of the builtin table.
    pub fn shared() -> Arc<NormalizationTable> {
        static SHARED: OnceLock<Arc<NormalizationTable>> = OnceLock::new();
        SHARED
            .get_or_init(|| Arc::new(NormalizationTable::default()))
            .clone()
    }

    /// Build a table from arbitrary entries. Keys are case-folded and
    /// trimmed; values are stored verbatim and are not validated here.
    pub fn from_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let entries = entries
            .into_iter()
            .map(|(k, v)| (k.as_ref().trim().to_lowercase(), v.into()))
            .collect();
        Self { entries }
    }

    /// Builtin aliases plus `extra`; `extra` wins on conflicting keys.
    pub fn with_entries<I, K, V>(extra: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut table = Self::default();
        for (k, v) in extra {
            table
                .entries
                .insert(k.as_ref().trim().to_lowercase(), v.into());
        }
        table
    }

    /// Rewrite `raw` if its case-folded, trimmed form is a known alias.
    ///
    /// Strings that are not aliases come back untouched with no original
    /// marker, so normalizing a canonical value is a no-op.
    pub fn normalize(&self, raw: &str) -> Normalized {
        let key = raw.trim().to_lowercase();
        match self.entries.get(&key) {
            Some(mapped) if mapped != raw => Normalized {
                canonical: mapped.clone(),
                original: Some(raw.to_string()),
            },
            _ => Normalized {
                canonical: raw.to_string(),
                original: None,
            },
        }
    }

    pub fn get(&self, alias: &str) -> Option<&str> {
        self.entries
            .get(&alias.trim().to_lowercase())
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl Default for NormalizationTable {
    fn default() -> Self {
        Self::from_entries(BUILTIN_ALIASES.iter().copied())
    }
}
