// Core algorithm exports
pub mod filters;
pub mod matcher;
pub mod scoring;
pub mod stats;
pub mod time;

pub use filters::{filter_tutors_by_level, filter_tutors_by_subject, matching_levels, matching_subjects};
pub use matcher::{Matcher, NO_MATCHES_REASON};
pub use scoring::{calculate_match, classify};
pub use stats::MatchStats;
pub use time::{common_availability, minutes_to_time, overlap, time_to_minutes, TimeSlotError};
