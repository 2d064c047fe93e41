use crate::models::{MatchType, MatchmakingResult};
use serde::{Deserialize, Serialize};

/// Aggregate figures over a batch of matchmaking results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchStats {
    #[serde(rename = "totalTutors")]
    pub total_tutors: usize,
    #[serde(rename = "totalStudents")]
    pub total_students: usize,
    #[serde(rename = "totalMatches")]
    pub total_matches: usize,
    /// Students whose best match is `perfect`
    #[serde(rename = "perfectMatches")]
    pub perfect_matches: usize,
    #[serde(rename = "studentsWithMatches")]
    pub students_with_matches: usize,
    /// Percentage of students with at least one match, rounded
    #[serde(rename = "matchRate")]
    pub match_rate: u32,
}

impl MatchStats {
    pub fn from_results(results: &[MatchmakingResult], total_tutors: usize) -> Self {
        let total_students = results.len();
        let total_matches = results.iter().map(|r| r.matches.len()).sum();
        let perfect_matches = results
            .iter()
            .filter(|r| matches!(&r.best_match, Some(m) if m.match_type == MatchType::Perfect))
            .count();
        let students_with_matches = results.iter().filter(|r| !r.matches.is_empty()).count();

        let match_rate = if total_students > 0 {
            (students_with_matches as f64 / total_students as f64 * 100.0).round() as u32
        } else {
            0
        };

        Self {
            total_tutors,
            total_students,
            total_matches,
            perfect_matches,
            students_with_matches,
            match_rate,
        }
    }
}
