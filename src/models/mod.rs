// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    Dataset, ExperienceLevel, Match, MatchType, MatchmakingResult, Student, StudentPreferences,
    TimeSlot, Tutor, Weekday,
};
pub use requests::{BestMatchQuery, FindMatchesRequest, StudentRequest, TutorFilterQuery, TutorRequest};
pub use responses::{ErrorResponse, HealthResponse, ImportResponse};
