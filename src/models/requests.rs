use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use validator::{Validate, ValidationError};

use crate::core::time::validate_clock_time;
use crate::models::domain::{Student, StudentPreferences, TimeSlot, Tutor};

/// Tutor form payload, used for both creation and replacement
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TutorRequest {
    #[validate(custom(function = "validate_not_blank"))]
    #[serde(rename = "fullName")]
    pub full_name: String,
    #[validate(length(min = 1, message = "at least one subject is required"))]
    pub subjects: Vec<String>,
    #[validate(length(min = 1, message = "at least one level is required"))]
    pub levels: Vec<String>,
    #[validate(
        length(min = 1, message = "at least one availability slot is required"),
        custom(function = "validate_time_slots")
    )]
    pub availability: Vec<TimeSlot>,
    #[validate(range(min = 0.0, message = "experience cannot be negative"))]
    #[serde(default)]
    pub experience: Option<f64>,
    #[validate(range(min = 0.0, max = 5.0, message = "rating must be between 0 and 5"))]
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub bio: Option<String>,
}

impl TutorRequest {
    pub fn into_tutor(self, id: String) -> Tutor {
        Tutor {
            id,
            full_name: self.full_name,
            subjects: self.subjects,
            levels: self.levels,
            availability: self.availability,
            experience: self.experience,
            rating: self.rating,
            bio: self.bio,
        }
    }
}

impl From<&Tutor> for TutorRequest {
    fn from(tutor: &Tutor) -> Self {
        Self {
            full_name: tutor.full_name.clone(),
            subjects: tutor.subjects.clone(),
            levels: tutor.levels.clone(),
            availability: tutor.availability.clone(),
            experience: tutor.experience,
            rating: tutor.rating,
            bio: tutor.bio.clone(),
        }
    }
}

/// Student form payload, used for both creation and replacement
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct StudentRequest {
    #[validate(custom(function = "validate_not_blank"))]
    #[serde(rename = "fullName")]
    pub full_name: String,
    #[validate(length(min = 1, message = "at least one subject is required"))]
    #[serde(rename = "requestedSubjects")]
    pub requested_subjects: Vec<String>,
    #[validate(custom(function = "validate_not_blank"))]
    pub level: String,
    #[validate(
        length(min = 1, message = "at least one availability slot is required"),
        custom(function = "validate_time_slots")
    )]
    pub availability: Vec<TimeSlot>,
    #[validate(custom(function = "validate_preferences"))]
    #[serde(default)]
    pub preferences: Option<StudentPreferences>,
}

impl StudentRequest {
    pub fn into_student(self, id: String) -> Student {
        Student {
            id,
            full_name: self.full_name,
            requested_subjects: self.requested_subjects,
            level: self.level,
            availability: self.availability,
            preferences: self.preferences,
        }
    }
}

impl From<&Student> for StudentRequest {
    fn from(student: &Student) -> Self {
        Self {
            full_name: student.full_name.clone(),
            requested_subjects: student.requested_subjects.clone(),
            level: student.level.clone(),
            availability: student.availability.clone(),
            preferences: student.preferences.clone(),
        }
    }
}

/// Request to rank tutors for a stored student
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FindMatchesRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "student_id", rename = "studentId")]
    pub student_id: String,
    /// Truncates the returned match list; the ranking itself is unaffected
    #[serde(default)]
    pub limit: Option<usize>,
}

/// Query for `GET /matches/best`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BestMatchQuery {
    #[serde(alias = "student_id", rename = "studentId")]
    pub student_id: String,
}

/// Optional filters for `GET /tutors`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TutorFilterQuery {
    pub subject: Option<String>,
    pub level: Option<String>,
}

fn error_with_message(code: &'static str, message: String) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::from(message));
    error
}

fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(error_with_message("blank", "must not be blank".to_string()));
    }
    Ok(())
}

/// Every slot must use wall-clock "HH:MM" times and end after it starts
fn validate_time_slots(slots: &[TimeSlot]) -> Result<(), ValidationError> {
    for slot in slots {
        let start = validate_clock_time(&slot.start_time)
            .map_err(|e| error_with_message("time_format", format!("{} ({})", e, slot.day)))?;
        let end = validate_clock_time(&slot.end_time)
            .map_err(|e| error_with_message("time_format", format!("{} ({})", e, slot.day)))?;

        if start >= end {
            return Err(error_with_message(
                "time_order",
                format!(
                    "slot on {} must end after it starts ({} - {})",
                    slot.day, slot.start_time, slot.end_time
                ),
            ));
        }
    }
    Ok(())
}

fn validate_preferences(preferences: &StudentPreferences) -> Result<(), ValidationError> {
    if matches!(preferences.max_price_per_hour, Some(price) if price < 0.0) {
        return Err(error_with_message(
            "price",
            "maxPricePerHour cannot be negative".to_string(),
        ));
    }
    if let Some(slots) = &preferences.preferred_time_slots {
        validate_time_slots(slots)?;
    }
    Ok(())
}
