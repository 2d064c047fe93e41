use actix_web::{http::StatusCode, web, HttpResponse, Responder};
use validator::Validate;

use crate::core::MatchStats;
use crate::models::{BestMatchQuery, FindMatchesRequest, HealthResponse};
use crate::routes::{error_response, validation_error, AppState};
use crate::services::ResultSet;

/// Configure all match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/matches", web::get().to(list_matches))
        .route("/matches/find", web::post().to(find_matches))
        .route("/matches/best", web::get().to(best_match))
        .route("/matches/stats", web::get().to(match_stats));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let snapshot = state.store.snapshot().await;

    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
        tutors: snapshot.tutors.len(),
        students: snapshot.students.len(),
    })
}

/// Results for every stored student, reused while the data is unchanged
async fn current_results(state: &AppState) -> (ResultSet, usize) {
    let snapshot = state.store.snapshot().await;
    let tutor_count = snapshot.tutors.len();
    let matcher = state.matcher;

    let results = state
        .cache
        .get_or_compute(snapshot.revision, async move {
            tracing::debug!(
                "Matching {} students against {} tutors (revision {})",
                snapshot.students.len(),
                snapshot.tutors.len(),
                snapshot.revision
            );
            matcher.match_all_students(&snapshot.students, &snapshot.tutors)
        })
        .await;

    (results, tutor_count)
}

/// Match all students
///
/// GET /api/v1/matches
async fn list_matches(state: web::Data<AppState>) -> impl Responder {
    let (results, _) = current_results(&state).await;
    HttpResponse::Ok().json(results.as_slice())
}

/// Find matches endpoint
///
/// POST /api/v1/matches/find
///
/// Request body:
/// ```json
/// {
///   "studentId": "string",
///   "limit": 20
/// }
/// ```
async fn find_matches(state: web::Data<AppState>, req: web::Json<FindMatchesRequest>) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for find_matches request: {:?}", errors);
        return validation_error(errors);
    }

    let student_id = &req.student_id;
    let limit = req
        .limit
        .unwrap_or_else(|| state.matching.default_limit())
        .min(state.matching.max_limit());

    let Some(student) = state.store.get_student(student_id).await else {
        return error_response(
            StatusCode::NOT_FOUND,
            "Student not found",
            format!("No student with id {}", student_id),
        );
    };

    let tutors = state.store.tutors().await;
    let mut result = state.matcher.match_student_to_tutors(&student, &tutors);
    let total = result.matches.len();
    result.matches.truncate(limit);

    tracing::info!(
        "Returning {} of {} matches for student {} (from {} tutors)",
        result.matches.len(),
        total,
        student_id,
        tutors.len()
    );

    HttpResponse::Ok().json(result)
}

/// Best tutor for a student
///
/// GET /api/v1/matches/best?studentId={studentId}
///
/// Responds with `null` when no tutor scores above zero.
async fn best_match(state: web::Data<AppState>, query: web::Query<BestMatchQuery>) -> impl Responder {
    let Some(student) = state.store.get_student(&query.student_id).await else {
        return error_response(
            StatusCode::NOT_FOUND,
            "Student not found",
            format!("No student with id {}", query.student_id),
        );
    };

    let tutors = state.store.tutors().await;
    let best = state.matcher.best_tutor_for_student(&student, &tutors);

    HttpResponse::Ok().json(best)
}

/// Dashboard statistics
///
/// GET /api/v1/matches/stats
async fn match_stats(state: web::Data<AppState>) -> impl Responder {
    let (results, tutor_count) = current_results(&state).await;
    HttpResponse::Ok().json(MatchStats::from_results(&results, tutor_count))
}
