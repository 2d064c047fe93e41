use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Day of the week a time slot belongs to
///
/// Serialized with the French day names used throughout the stored data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Weekday {
    Lundi,
    Mardi,
    Mercredi,
    Jeudi,
    Vendredi,
    Samedi,
    Dimanche,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Lundi,
        Weekday::Mardi,
        Weekday::Mercredi,
        Weekday::Jeudi,
        Weekday::Vendredi,
        Weekday::Samedi,
        Weekday::Dimanche,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Weekday::Lundi => "Lundi",
            Weekday::Mardi => "Mardi",
            Weekday::Mercredi => "Mercredi",
            Weekday::Jeudi => "Jeudi",
            Weekday::Vendredi => "Vendredi",
            Weekday::Samedi => "Samedi",
            Weekday::Dimanche => "Dimanche",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Weekly availability window, times as "HH:MM"
///
/// Times are kept as the strings the caller supplied so that records
/// round-trip unchanged through import/export. `start_time < end_time`
/// is a precondition enforced at the HTTP boundary, not by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeSlot {
    pub day: Weekday,
    #[serde(rename = "startTime")]
    pub start_time: String,
    #[serde(rename = "endTime")]
    pub end_time: String,
}

impl TimeSlot {
    pub fn new(day: Weekday, start_time: impl Into<String>, end_time: impl Into<String>) -> Self {
        Self {
            day,
            start_time: start_time.into(),
            end_time: end_time.into(),
        }
    }
}

/// Tutor offering lessons
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tutor {
    pub id: String,
    #[serde(rename = "fullName")]
    pub full_name: String,
    pub subjects: Vec<String>,
    pub levels: Vec<String>,
    pub availability: Vec<TimeSlot>,
    /// Years of experience
    #[serde(default, skip_serializing_if = "Option::is_none", serialize_with = "serialize_number")]
    pub experience: Option<f64>,
    /// Rating out of 5
    #[serde(default, skip_serializing_if = "Option::is_none", serialize_with = "serialize_number")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
}

/// Experience level a student would like their tutor to have
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExperienceLevel {
    Beginner,
    Intermediate,
    Advanced,
}

/// Student preferences, stored and returned but not used for scoring
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StudentPreferences {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience: Option<ExperienceLevel>,
    #[serde(
        rename = "maxPricePerHour",
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_number"
    )]
    pub max_price_per_hour: Option<f64>,
    #[serde(rename = "preferredTimeSlots", default, skip_serializing_if = "Option::is_none")]
    pub preferred_time_slots: Option<Vec<TimeSlot>>,
}

/// Student looking for a tutor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub id: String,
    #[serde(rename = "fullName")]
    pub full_name: String,
    #[serde(rename = "requestedSubjects")]
    pub requested_subjects: Vec<String>,
    pub level: String,
    pub availability: Vec<TimeSlot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferences: Option<StudentPreferences>,
}

/// Banded classification of a compatibility score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchType {
    Perfect,
    Partial,
    Limited,
}

/// Scored pairing of one student with one tutor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub tutor: Tutor,
    pub student: Student,
    #[serde(rename = "compatibilityScore")]
    pub compatibility_score: u32,
    #[serde(rename = "matchingSubjects")]
    pub matching_subjects: Vec<String>,
    #[serde(rename = "matchingLevels")]
    pub matching_levels: Vec<String>,
    #[serde(rename = "commonAvailability")]
    pub common_availability: Vec<TimeSlot>,
    #[serde(rename = "matchType")]
    pub match_type: MatchType,
    pub reasons: Vec<String>,
}

/// Ranked matches for one student
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchmakingResult {
    pub student: Student,
    pub matches: Vec<Match>,
    #[serde(rename = "bestMatch", default, skip_serializing_if = "Option::is_none")]
    pub best_match: Option<Match>,
    #[serde(rename = "noMatchesReason", default, skip_serializing_if = "Option::is_none")]
    pub no_matches_reason: Option<String>,
}

/// Import/export document holding both collections
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub tutors: Vec<Tutor>,
    pub students: Vec<Student>,
}

impl Dataset {
    pub fn new(tutors: Vec<Tutor>, students: Vec<Student>) -> Self {
        Self { tutors, students }
    }

    pub fn is_empty(&self) -> bool {
        self.tutors.is_empty() && self.students.is_empty()
    }

    pub fn item_count(&self) -> usize {
        self.tutors.len() + self.students.len()
    }
}

/// Largest magnitude below which every whole `f64` is exactly representable as `i64`
const EXACT_INTEGER_LIMIT: f64 = 9_007_199_254_740_992.0;

/// Write whole numbers as JSON integers so `5` reads back as `5`, not `5.0`
fn serialize_number<S: Serializer>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error> {
    match value {
        Some(v) if v.fract() == 0.0 && v.abs() <= EXACT_INTEGER_LIMIT => serializer.serialize_i64(*v as i64),
        Some(v) => serializer.serialize_f64(*v),
        None => serializer.serialize_none(),
    }
}
