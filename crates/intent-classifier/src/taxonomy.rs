//! Closed set of robot-actionable intents

use serde::{Deserialize, Serialize};
use std::fmt;

/// Every intent the pipeline can emit.
///
/// Declaration order is the label index order a statistical model is trained
/// against; see [`IntentLabel::from_index`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentLabel {
    // Navigation & mobility
    NavigateTo,
    FollowMe,
    StopMoving,
    ComeHere,

    // Manipulation
    FetchObject,
    PlaceObject,
    Grasp,
    Release,
    HandOver,

    // Perception queries
    WhatDoYouSee,
    FindObject,
    IdentifyPerson,
    WhereIs,

    // Information queries
    GetWeather,
    GetNews,
    TellTime,
    AnswerQuestion,

    // Social interaction
    Greeting,
    Goodbye,
    SmallTalk,
    HowAreYou,
    TellJoke,

    // Task management
    SetReminder,
    ListReminders,
    DeleteReminder,
    SetAlarm,
    StopAlarm,

    // System control
    Help,
    Status,
    Shutdown,
    EmergencyStop,

    // Affective
    EmotionExpression,
    ComfortRequest,

    Unknown,
}

/// Conceptual grouping of intents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentDomain {
    Navigation,
    Manipulation,
    Perception,
    Information,
    Social,
    Task,
    System,
    Affective,
    Unknown,
}

const ALL_LABELS: [IntentLabel; 34] = [
    IntentLabel::NavigateTo,
    IntentLabel::FollowMe,
    IntentLabel::StopMoving,
    IntentLabel::ComeHere,
    IntentLabel::FetchObject,
    IntentLabel::PlaceObject,
    IntentLabel::Grasp,
    IntentLabel::Release,
    IntentLabel::HandOver,
    IntentLabel::WhatDoYouSee,
    IntentLabel::FindObject,
    IntentLabel::IdentifyPerson,
    IntentLabel::WhereIs,
    IntentLabel::GetWeather,
    IntentLabel::GetNews,
    IntentLabel::TellTime,
    IntentLabel::AnswerQuestion,
    IntentLabel::Greeting,
    IntentLabel::Goodbye,
    IntentLabel::SmallTalk,
    IntentLabel::HowAreYou,
    IntentLabel::TellJoke,
    IntentLabel::SetReminder,
    IntentLabel::ListReminders,
    IntentLabel::DeleteReminder,
    IntentLabel::SetAlarm,
    IntentLabel::StopAlarm,
    IntentLabel::Help,
    IntentLabel::Status,
    IntentLabel::Shutdown,
    IntentLabel::EmergencyStop,
    IntentLabel::EmotionExpression,
    IntentLabel::ComfortRequest,
    IntentLabel::Unknown,
];

/// Intents whose mishandling can cause physical harm.
pub const SAFETY_CRITICAL: [IntentLabel; 3] = [
    IntentLabel::EmergencyStop,
    IntentLabel::StopMoving,
    IntentLabel::Release,
];

impl IntentLabel {
    /// The full closed set, in label index order.
    pub fn labels() -> &'static [IntentLabel] {
        &ALL_LABELS
    }

    /// Map a canonical string to its label.
    ///
    /// Anything that is not exactly a canonical value (after trimming)
    /// becomes [`IntentLabel::Unknown`]; an unmapped intent is data, not an
    /// error.
    pub fn parse(value: &str) -> IntentLabel {
        let value = value.trim();
        ALL_LABELS
            .iter()
            .copied()
            .find(|label| label.as_str() == value)
            .unwrap_or(IntentLabel::Unknown)
    }

    /// Label for a model output index, if the index is in range.
    pub fn from_index(index: usize) -> Option<IntentLabel> {
        ALL_LABELS.get(index).copied()
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            IntentLabel::NavigateTo => "navigate_to",
            IntentLabel::FollowMe => "follow_me",
            IntentLabel::StopMoving => "stop_moving",
            IntentLabel::ComeHere => "come_here",
            IntentLabel::FetchObject => "fetch_object",
            IntentLabel::PlaceObject => "place_object",
            IntentLabel::Grasp => "grasp",
            IntentLabel::Release => "release",
            IntentLabel::HandOver => "hand_over",
            IntentLabel::WhatDoYouSee => "what_do_you_see",
            IntentLabel::FindObject => "find_object",
            IntentLabel::IdentifyPerson => "identify_person",
            IntentLabel::WhereIs => "where_is",
            IntentLabel::GetWeather => "get_weather",
            IntentLabel::GetNews => "get_news",
            IntentLabel::TellTime => "tell_time",
            IntentLabel::AnswerQuestion => "answer_question",
            IntentLabel::Greeting => "greeting",
            IntentLabel::Goodbye => "goodbye",
            IntentLabel::SmallTalk => "small_talk",
            IntentLabel::HowAreYou => "how_are_you",
            IntentLabel::TellJoke => "tell_joke",
            IntentLabel::SetReminder => "set_reminder",
            IntentLabel::ListReminders => "list_reminders",
            IntentLabel::DeleteReminder => "delete_reminder",
            IntentLabel::SetAlarm => "set_alarm",
            IntentLabel::StopAlarm => "stop_alarm",
            IntentLabel::Help => "help",
            IntentLabel::Status => "status",
            IntentLabel::Shutdown => "shutdown",
            IntentLabel::EmergencyStop => "emergency_stop",
            IntentLabel::EmotionExpression => "emotion_expression",
            IntentLabel::ComfortRequest => "comfort_request",
            IntentLabel::Unknown => "unknown",
        }
    }

    pub fn domain(self) -> IntentDomain {
        use IntentLabel::*;
        match self {
            NavigateTo | FollowMe | StopMoving | ComeHere => IntentDomain::Navigation,
            FetchObject | PlaceObject | Grasp | Release | HandOver => IntentDomain::Manipulation,
            WhatDoYouSee | FindObject | IdentifyPerson | WhereIs => IntentDomain::Perception,
            GetWeather | GetNews | TellTime | AnswerQuestion => IntentDomain::Information,
            Greeting | Goodbye | SmallTalk | HowAreYou | TellJoke => IntentDomain::Social,
            SetReminder | ListReminders | DeleteReminder | SetAlarm | StopAlarm => {
                IntentDomain::Task
            }
            Help | Status | Shutdown | EmergencyStop => IntentDomain::System,
            EmotionExpression | ComfortRequest => IntentDomain::Affective,
            Unknown => IntentDomain::Unknown,
        }
    }

    pub fn is_safety_critical(self) -> bool {
        SAFETY_CRITICAL.contains(&self)
    }

    pub fn is_unknown(self) -> bool {
        self == IntentLabel::Unknown
    }
}

impl fmt::Display for IntentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_mapping_is_bidirectional() {
        for &label in IntentLabel::labels() {
            assert_eq!(IntentLabel::parse(label.as_str()), label);
        }
    }

    #[test]
    fn test_index_order_matches_declaration() {
        for (i, &label) in IntentLabel::labels().iter().enumerate() {
            assert_eq!(label.index(), i);
            assert_eq!(IntentLabel::from_index(i), Some(label));
        }
        assert_eq!(IntentLabel::from_index(IntentLabel::labels().len()), None);
    }

    #[test]
    fn test_parse_unrecognized_is_unknown() {
        assert_eq!(IntentLabel::parse("dance"), IntentLabel::Unknown);
        assert_eq!(IntentLabel::parse(""), IntentLabel::Unknown);
        assert_eq!(IntentLabel::parse("Greeting"), IntentLabel::Unknown);
        assert_eq!(IntentLabel::parse("  greeting "), IntentLabel::Greeting);
    }

    #[test]
    fn test_safety_subset() {
        let critical: Vec<_> = IntentLabel::labels()
            .iter()
            .copied()
            .filter(|l| l.is_safety_critical())
            .collect();
        assert_eq!(critical.len(), 3);
        assert!(IntentLabel::EmergencyStop.is_safety_critical());
        assert!(!IntentLabel::StopAlarm.is_safety_critical());
    }

    #[test]
    fn test_domains() {
        assert_eq!(IntentLabel::Release.domain(), IntentDomain::Manipulation);
        assert_eq!(IntentLabel::EmergencyStop.domain(), IntentDomain::System);
        assert_eq!(IntentLabel::ComfortRequest.domain(), IntentDomain::Affective);
        assert_eq!(IntentLabel::Unknown.domain(), IntentDomain::Unknown);
    }

    #[test]
    fn test_serde_uses_canonical_strings() {
        let json = serde_json::to_string(&IntentLabel::WhatDoYouSee).unwrap();
        assert_eq!(json, "\"what_do_you_see\"");
        let back: IntentLabel = serde_json::from_str("\"emergency_stop\"").unwrap();
        assert_eq!(back, IntentLabel::EmergencyStop);
    }
}
