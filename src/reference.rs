use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Static lookup tables consulted while rendering and composing mood feedback.
///
/// Fields missing from an override file fall back to the built-in tables.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReferenceData {
    /// Year-independent holidays keyed by `MM-DD`.
    pub holidays: BTreeMap<String, String>,
    pub wellness_tips: BTreeMap<String, Vec<String>>,
    pub quotes: Vec<String>,
}

impl Default for ReferenceData {
    fn default() -> Self {
        Self {
            holidays: default_holidays(),
            wellness_tips: default_wellness_tips(),
            quotes: DEFAULT_QUOTES.iter().map(|quote| quote.to_string()).collect(),
        }
    }
}

impl ReferenceData {
    pub fn holiday(&self, key: &str) -> Option<&str> {
        self.holidays.get(key).map(String::as_str)
    }
}

const DEFAULT_HOLIDAYS: [(&str, &str); 12] = [
    ("01-01", "New Year's Day"),
    ("02-25", "EDSA People Power Revolution"),
    ("04-17", "Maundy Thursday"),
    ("04-18", "Good Friday"),
    ("04-19", "Black Saturday"),
    ("05-01", "Labor Day"),
    ("06-12", "Independence Day"),
    ("08-21", "Ninoy Aquino Day"),
    ("08-25", "National Heroes Day"),
    ("11-30", "Bonifacio Day"),
    ("12-25", "Christmas Day"),
    ("12-30", "Rizal Day"),
];

const DEFAULT_TIPS: [(&str, &[&str]); 6] = [
    (
        "happy",
        &[
            "Write down what made today good so you can return to it later.",
            "Share the good mood: send a kind message to someone.",
        ],
    ),
    (
        "calm",
        &[
            "Protect this calm with a short walk or a few minutes outside.",
            "Use the steady energy to plan tomorrow's first task.",
        ],
    ),
    (
        "sad",
        &[
            "Be gentle with yourself and reach out to someone you trust.",
            "A glass of water and some daylight can help more than expected.",
        ],
    ),
    (
        "stressed",
        &[
            "Pick one small task and finish only that one.",
            "Try box breathing: in for four, hold for four, out for four.",
        ],
    ),
    (
        "anxious",
        &[
            "Name five things you can see around you to ground yourself.",
            "Write the worry down, then write one step you can take about it.",
        ],
    ),
    (
        "tired",
        &[
            "Rest is productive too. Take a proper break away from screens.",
            "Go to bed a little earlier tonight.",
        ],
    ),
];

const DEFAULT_QUOTES: [&str; 5] = [
    "Almost everything will work again if you unplug it for a few minutes, including you.",
    "You don't have to see the whole staircase, just take the first step.",
    "Nature does not hurry, yet everything is accomplished.",
    "Small steps every day add up to big results.",
    "Breathe. You are doing better than you think.",
];

fn default_holidays() -> BTreeMap<String, String> {
    DEFAULT_HOLIDAYS
        .iter()
        .map(|(key, name)| (key.to_string(), name.to_string()))
        .collect()
}

fn default_wellness_tips() -> BTreeMap<String, Vec<String>> {
    DEFAULT_TIPS
        .iter()
        .map(|(mood, tips)| {
            (
                mood.to_string(),
                tips.iter().map(|tip| tip.to_string()).collect(),
            )
        })
        .collect()
}
