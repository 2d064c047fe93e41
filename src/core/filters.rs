use crate::models::Tutor;

/// Requested subjects the tutor teaches, in the student's order
///
/// Plain membership test: duplicates in the request are kept.
#[inline]
pub fn matching_subjects(requested: &[String], taught: &[String]) -> Vec<String> {
    requested
        .iter()
        .filter(|subject| taught.contains(subject))
        .cloned()
        .collect()
}

/// Tutor levels equal to the student's level
///
/// A tutor listing the level twice yields two entries; only presence
/// matters for scoring.
#[inline]
pub fn matching_levels(student_level: &str, tutor_levels: &[String]) -> Vec<String> {
    tutor_levels
        .iter()
        .filter(|level| level.as_str() == student_level)
        .cloned()
        .collect()
}

/// Tutors teaching `subject` (exact string equality)
pub fn filter_tutors_by_subject(tutors: &[Tutor], subject: &str) -> Vec<Tutor> {
    tutors
        .iter()
        .filter(|tutor| tutor.subjects.iter().any(|s| s == subject))
        .cloned()
        .collect()
}

/// Tutors teaching at `level` (exact string equality)
pub fn filter_tutors_by_level(tutors: &[Tutor], level: &str) -> Vec<Tutor> {
    tutors
        .iter()
        .filter(|tutor| tutor.levels.iter().any(|l| l == level))
        .cloned()
        .collect()
}
