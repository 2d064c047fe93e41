use crate::core::{
    filters::{matching_levels, matching_subjects},
    time::common_availability,
};
use crate::models::{Match, MatchType, Student, Tutor};

/// Weight of the subject overlap term
pub const SUBJECT_WEIGHT: f64 = 40.0;
/// Weight of the level compatibility term
pub const LEVEL_WEIGHT: f64 = 30.0;
/// Weight of the availability overlap term
pub const AVAILABILITY_WEIGHT: f64 = 30.0;
/// Bonus for tutors with at least [`EXPERIENCE_THRESHOLD_YEARS`]
pub const EXPERIENCE_BONUS: f64 = 5.0;
pub const EXPERIENCE_THRESHOLD_YEARS: f64 = 3.0;
/// Bonus for tutors rated at least [`RATING_THRESHOLD`]
pub const RATING_BONUS: f64 = 5.0;
pub const RATING_THRESHOLD: f64 = 4.0;

/// Lower bound of the `perfect` band
pub const PERFECT_THRESHOLD: f64 = 80.0;
/// Lower bound of the `partial` band
pub const PARTIAL_THRESHOLD: f64 = 50.0;

/// Score one student/tutor pairing
///
/// Scoring formula:
/// score = (
///     40 * matched_subjects / requested_subjects +
///     30 * (level offered ? 1 : 0) +
///     30 * overlap_fragments / student_slots +
///     5 if experience >= 3 years +
///     5 if rating >= 4
/// )
///
/// Empty denominators contribute 0. The total is rounded but not clamped:
/// fragment counts can exceed the student's slot count, and the bonuses sit
/// on top of the 100 base points.
pub fn calculate_match(student: &Student, tutor: &Tutor) -> Match {
    let subjects = matching_subjects(&student.requested_subjects, &tutor.subjects);
    let levels = matching_levels(&student.level, &tutor.levels);
    let common = common_availability(&student.availability, &tutor.availability);

    let mut score = 0.0;
    let mut reasons = Vec::new();

    score += ratio(subjects.len(), student.requested_subjects.len()) * SUBJECT_WEIGHT;
    if !subjects.is_empty() {
        reasons.push(format!("Matières communes: {}", subjects.join(", ")));
    }

    if !levels.is_empty() {
        score += LEVEL_WEIGHT;
        reasons.push(format!("Niveau compatible: {}", levels.join(", ")));
    }

    score += ratio(common.len(), student.availability.len()) * AVAILABILITY_WEIGHT;
    if !common.is_empty() {
        reasons.push(format!("Créneaux communs: {} créneau(x)", common.len()));
    }

    if let Some(years) = tutor.experience.filter(|y| *y >= EXPERIENCE_THRESHOLD_YEARS) {
        score += EXPERIENCE_BONUS;
        reasons.push(format!("Tuteur expérimenté ({} ans)", years));
    }

    if let Some(rating) = tutor.rating.filter(|r| *r >= RATING_THRESHOLD) {
        score += RATING_BONUS;
        reasons.push(format!("Tuteur bien noté ({}/5)", rating));
    }

    Match {
        tutor: tutor.clone(),
        student: student.clone(),
        compatibility_score: round_score(score),
        matching_subjects: subjects,
        matching_levels: levels,
        common_availability: common,
        match_type: classify(score),
        reasons,
    }
}

/// Band a raw (unrounded) score
#[inline]
pub fn classify(score: f64) -> MatchType {
    if score >= PERFECT_THRESHOLD {
        MatchType::Perfect
    } else if score >= PARTIAL_THRESHOLD {
        MatchType::Partial
    } else {
        MatchType::Limited
    }
}

/// `part / whole`, or 0 when there is nothing to divide by
#[inline]
fn ratio(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    part as f64 / whole as f64
}

#[inline]
fn round_score(score: f64) -> u32 {
    if score.is_finite() && score > 0.0 {
        score.round() as u32
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{TimeSlot, Weekday};

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn create_test_student(subjects: &[&str], level: &str, availability: Vec<TimeSlot>) -> Student {
        Student {
            id: "s1".to_string(),
            full_name: "Ali Benali".to_string(),
            requested_subjects: strings(subjects),
            level: level.to_string(),
            availability,
            preferences: None,
        }
    }

    fn create_test_tutor(
        subjects: &[&str],
        levels: &[&str],
        availability: Vec<TimeSlot>,
        experience: Option<f64>,
        rating: Option<f64>,
    ) -> Tutor {
        Tutor {
            id: "t1".to_string(),
            full_name: "Ahmed Benali".to_string(),
            subjects: strings(subjects),
            levels: strings(levels),
            availability,
            experience,
            rating,
            bio: None,
        }
    }

    fn monday_evening() -> TimeSlot {
        TimeSlot::new(Weekday::Lundi, "18:00", "20:00")
    }

    #[test]
    fn test_full_match_with_bonuses_reaches_110() {
        let student = create_test_student(&["Mathématiques"], "Lycée", vec![monday_evening()]);
        let tutor = create_test_tutor(
            &["Mathématiques", "Physique"],
            &["Lycée"],
            vec![monday_evening()],
            Some(5.0),
            Some(4.8),
        );

        let m = calculate_match(&student, &tutor);

        assert_eq!(m.compatibility_score, 110);
        assert_eq!(m.match_type, MatchType::Perfect);
        assert_eq!(m.matching_subjects, strings(&["Mathématiques"]));
        assert_eq!(m.matching_levels, strings(&["Lycée"]));
        assert_eq!(m.common_availability, vec![monday_evening()]);
        assert_eq!(
            m.reasons,
            vec![
                "Matières communes: Mathématiques".to_string(),
                "Niveau compatible: Lycée".to_string(),
                "Créneaux communs: 1 créneau(x)".to_string(),
                "Tuteur expérimenté (5 ans)".to_string(),
                "Tuteur bien noté (4.8/5)".to_string(),
            ]
        );
    }

    #[test]
    fn test_partial_subject_overlap() {
        let student = create_test_student(&["Mathématiques", "Chimie", "Anglais"], "Lycée", vec![]);
        let tutor = create_test_tutor(&["Chimie"], &["Collège"], vec![], None, None);

        let m = calculate_match(&student, &tutor);

        // 40 / 3 = 13.33
        assert_eq!(m.compatibility_score, 13);
        assert_eq!(m.match_type, MatchType::Limited);
        assert_eq!(m.reasons, vec!["Matières communes: Chimie".to_string()]);
    }

    #[test]
    fn test_empty_requested_subjects_contribute_zero() {
        let student = create_test_student(&[], "Lycée", vec![monday_evening()]);
        let tutor = create_test_tutor(&["Mathématiques"], &["Lycée"], vec![monday_evening()], None, None);

        let m = calculate_match(&student, &tutor);

        assert_eq!(m.compatibility_score, 60);
        assert_eq!(m.match_type, MatchType::Partial);
    }

    #[test]
    fn test_empty_student_availability_contributes_zero() {
        let student = create_test_student(&["Mathématiques"], "Lycée", vec![]);
        let tutor = create_test_tutor(&["Mathématiques"], &["Lycée"], vec![monday_evening()], None, None);

        let m = calculate_match(&student, &tutor);

        assert_eq!(m.compatibility_score, 70);
        assert!(m.common_availability.is_empty());
    }

    #[test]
    fn test_fragment_count_can_exceed_student_slots() {
        let student = create_test_student(
            &["Mathématiques"],
            "Lycée",
            vec![TimeSlot::new(Weekday::Samedi, "09:00", "18:00")],
        );
        let tutor = create_test_tutor(
            &["Mathématiques"],
            &["Lycée"],
            vec![
                TimeSlot::new(Weekday::Samedi, "09:00", "11:00"),
                TimeSlot::new(Weekday::Samedi, "14:00", "16:00"),
            ],
            None,
            None,
        );

        let m = calculate_match(&student, &tutor);

        // 40 + 30 + 30 * 2/1
        assert_eq!(m.compatibility_score, 130);
        assert_eq!(m.common_availability.len(), 2);
        assert_eq!(m.reasons[2], "Créneaux communs: 2 créneau(x)");
    }

    #[test]
    fn test_bonus_thresholds_are_inclusive() {
        let student = create_test_student(&["Français"], "Lycée", vec![]);
        let at_threshold = create_test_tutor(&[], &[], vec![], Some(3.0), Some(4.0));
        let below = create_test_tutor(&[], &[], vec![], Some(2.9), Some(3.9));

        assert_eq!(calculate_match(&student, &at_threshold).compatibility_score, 10);
        assert_eq!(calculate_match(&student, &below).compatibility_score, 0);
    }

    #[test]
    fn test_zero_experience_gives_no_bonus() {
        let student = create_test_student(&["Français"], "Lycée", vec![]);
        let tutor = create_test_tutor(&[], &[], vec![], Some(0.0), None);

        let m = calculate_match(&student, &tutor);
        assert_eq!(m.compatibility_score, 0);
        assert!(m.reasons.is_empty());
    }

    #[test]
    fn test_classify_bands() {
        assert_eq!(classify(110.0), MatchType::Perfect);
        assert_eq!(classify(80.0), MatchType::Perfect);
        assert_eq!(classify(79.99), MatchType::Partial);
        assert_eq!(classify(50.0), MatchType::Partial);
        assert_eq!(classify(49.99), MatchType::Limited);
        assert_eq!(classify(0.0), MatchType::Limited);
    }

    #[test]
    fn test_match_type_uses_unrounded_score() {
        let student_slots: Vec<TimeSlot> = Weekday::ALL
            .iter()
            .map(|day| TimeSlot::new(*day, "08:00", "20:00"))
            .collect();
        let mut tutor_slots: Vec<TimeSlot> = Weekday::ALL
            .iter()
            .map(|day| TimeSlot::new(*day, "10:00", "11:00"))
            .collect();
        for day in [Weekday::Lundi, Weekday::Mardi, Weekday::Mercredi] {
            tutor_slots.push(TimeSlot::new(day, "14:00", "15:00"));
        }

        let student = create_test_student(&["Mathématiques", "Physique", "Chimie"], "Lycée", student_slots);
        let tutor = create_test_tutor(
            &["Mathématiques", "Physique"],
            &["Collège"],
            tutor_slots,
            Some(4.0),
            Some(4.5),
        );

        let m = calculate_match(&student, &tutor);

        // 40 * 2/3 + 30 * 10/7 + 5 + 5 = 79.52
        assert_eq!(m.common_availability.len(), 10);
        assert_eq!(m.compatibility_score, 80);
        assert_eq!(m.match_type, MatchType::Partial);
    }

    #[test]
    fn test_preferences_do_not_affect_score() {
        let mut student = create_test_student(&["Mathématiques"], "Lycée", vec![monday_evening()]);
        let tutor = create_test_tutor(&["Mathématiques"], &["Lycée"], vec![monday_evening()], None, None);

        let before = calculate_match(&student, &tutor).compatibility_score;
        student.preferences = Some(crate::models::StudentPreferences {
            experience: Some(crate::models::ExperienceLevel::Advanced),
            max_price_per_hour: Some(10.0),
            preferred_time_slots: Some(vec![TimeSlot::new(Weekday::Dimanche, "10:00", "12:00")]),
        });
        let after = calculate_match(&student, &tutor);

        assert_eq!(after.compatibility_score, before);
        assert!(after.student.preferences.is_some());
    }
}
