use crate::models::TimeSlot;
use thiserror::Error;

/// Errors raised when a slot time is not of the form "HH:MM"
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeSlotError {
    #[error("expected HH:MM, got {0:?}")]
    InvalidFormat(String),

    #[error("time out of range: {0:?}")]
    OutOfRange(String),
}

/// Convert "HH:MM" to minutes since midnight
///
/// Accepts exactly two colon-separated unsigned integer components.
/// Component ranges are not checked here; see [`validate_clock_time`].
pub fn time_to_minutes(time: &str) -> Result<u16, TimeSlotError> {
    let invalid = || TimeSlotError::InvalidFormat(time.to_string());

    let (hours, minutes) = time.split_once(':').ok_or_else(invalid)?;
    let is_numeric = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
    if !is_numeric(hours) || !is_numeric(minutes) {
        return Err(invalid());
    }

    let hours: u16 = hours.parse().map_err(|_| invalid())?;
    let minutes: u16 = minutes.parse().map_err(|_| invalid())?;

    hours
        .checked_mul(60)
        .and_then(|h| h.checked_add(minutes))
        .ok_or_else(|| TimeSlotError::OutOfRange(time.to_string()))
}

/// Convert minutes since midnight back to zero-padded "HH:MM"
pub fn minutes_to_time(minutes: u16) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// Check that a time is a wall-clock "HH:MM" (00:00 through 23:59)
pub fn validate_clock_time(time: &str) -> Result<u16, TimeSlotError> {
    let total = time_to_minutes(time)?;
    let (hours, minutes) = time.split_once(':').unwrap_or_default();
    let in_range = hours.parse::<u16>().map(|h| h < 24).unwrap_or(false)
        && minutes.parse::<u16>().map(|m| m < 60).unwrap_or(false);

    if in_range {
        Ok(total)
    } else {
        Err(TimeSlotError::OutOfRange(time.to_string()))
    }
}

/// Parse a slot into its half-open `[start, end)` minute range
fn slot_bounds(slot: &TimeSlot) -> Option<(u16, u16)> {
    let start = time_to_minutes(&slot.start_time).ok()?;
    let end = time_to_minutes(&slot.end_time).ok()?;
    Some((start, end))
}

/// Overlapping sub-interval of two slots, on `a`'s day
///
/// Slots on different days never overlap, and touching endpoints
/// (one ends at 18:00, the other starts at 18:00) do not count.
/// Slots with unparseable times never overlap anything.
pub fn overlap(a: &TimeSlot, b: &TimeSlot) -> Option<TimeSlot> {
    if a.day != b.day {
        return None;
    }

    let (start1, end1) = slot_bounds(a)?;
    let (start2, end2) = slot_bounds(b)?;

    if start1 < end2 && start2 < end1 {
        Some(TimeSlot {
            day: a.day,
            start_time: minutes_to_time(start1.max(start2)),
            end_time: minutes_to_time(end1.min(end2)),
        })
    } else {
        None
    }
}

/// Every overlap fragment between the two schedules
///
/// A pairwise scan over `student × tutor` in student-major order. Fragments
/// are neither merged nor deduplicated: one student slot crossing two tutor
/// slots yields two entries.
pub fn common_availability(student_slots: &[TimeSlot], tutor_slots: &[TimeSlot]) -> Vec<TimeSlot> {
    student_slots
        .iter()
        .flat_map(|student_slot| {
            tutor_slots
                .iter()
                .filter_map(move |tutor_slot| overlap(student_slot, tutor_slot))
        })
        .collect()
}
