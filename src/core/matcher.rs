use crate::core::scoring::calculate_match;
use crate::models::{Match, MatchmakingResult, Student, Tutor};
use rayon::prelude::*;

/// Explanation attached to a result with no scoring tutor
pub const NO_MATCHES_REASON: &str = "Aucun tuteur ne correspond aux critères";

/// Student count from which `match_all_students` fans out over rayon
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 64;

/// Matching orchestrator - scores, filters and ranks tutors for students
///
/// # Pipeline Stages
/// 1. Score every student/tutor pair
/// 2. Drop pairs whose rounded score is 0
/// 3. Stable sort by score, descending
///
/// Matching is a pure function of its inputs: nothing is cached or mutated,
/// and ties keep the order in which tutors were supplied.
#[derive(Debug, Clone, Copy)]
pub struct Matcher {
    parallel_threshold: usize,
}

impl Matcher {
    pub fn new(parallel_threshold: usize) -> Self {
        Self { parallel_threshold }
    }

    /// Rank every tutor for one student
    ///
    /// # Arguments
    /// * `student` - The student to match
    /// * `tutors` - Candidate tutors; their order breaks score ties
    ///
    /// # Returns
    /// MatchmakingResult with matches sorted by descending score
    pub fn match_student_to_tutors(&self, student: &Student, tutors: &[Tutor]) -> MatchmakingResult {
        let mut matches: Vec<Match> = tutors
            .iter()
            .map(|tutor| calculate_match(student, tutor))
            .filter(|m| m.compatibility_score > 0)
            .collect();

        // sort_by is stable: equal scores keep tutor input order
        matches.sort_by(|a, b| b.compatibility_score.cmp(&a.compatibility_score));

        let best_match = matches.first().cloned();
        let no_matches_reason = if matches.is_empty() {
            Some(NO_MATCHES_REASON.to_string())
        } else {
            None
        };

        MatchmakingResult {
            student: student.clone(),
            matches,
            best_match,
            no_matches_reason,
        }
    }

    /// Rank tutors for every student, one result per student in input order
    pub fn match_all_students(&self, students: &[Student], tutors: &[Tutor]) -> Vec<MatchmakingResult> {
        if students.len() >= self.parallel_threshold {
            students
                .par_iter()
                .map(|student| self.match_student_to_tutors(student, tutors))
                .collect()
        } else {
            students
                .iter()
                .map(|student| self.match_student_to_tutors(student, tutors))
                .collect()
        }
    }

    /// Highest-ranked match for a student, if any tutor scores
    pub fn best_tutor_for_student(&self, student: &Student, tutors: &[Tutor]) -> Option<Match> {
        self.match_student_to_tutors(student, tutors).best_match
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::new(DEFAULT_PARALLEL_THRESHOLD)
    }
}
