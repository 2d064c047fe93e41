//! Tutor Match - tutor/student matching service
//!
//! The core of this library is a pure matching engine: it scores every tutor
//! for a student on subject overlap, school level and shared weekly time
//! slots, then ranks the results with an explanation for each score. The
//! service layer around it stores tutors and students and exposes the engine
//! over HTTP.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{time::{minutes_to_time, time_to_minutes}, MatchStats, Matcher};
pub use models::{Match, MatchType, MatchmakingResult, Student, TimeSlot, Tutor, Weekday};
