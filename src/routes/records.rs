use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

use crate::core::{filter_tutors_by_level, filter_tutors_by_subject};
use crate::models::{Dataset, ImportResponse, StudentRequest, TutorFilterQuery, TutorRequest};
use crate::routes::{store_error, validation_error, AppState};

/// Configure tutor, student and dataset routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/tutors", web::get().to(list_tutors))
        .route("/tutors", web::post().to(create_tutor))
        .route("/tutors/{id}", web::put().to(update_tutor))
        .route("/tutors/{id}", web::delete().to(delete_tutor))
        .route("/students", web::get().to(list_students))
        .route("/students", web::post().to(create_student))
        .route("/students/{id}", web::put().to(update_student))
        .route("/students/{id}", web::delete().to(delete_student))
        .route("/data/export", web::get().to(export_data))
        .route("/data/import", web::post().to(import_data))
        .route("/data", web::delete().to(clear_data));
}

fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// List tutors
///
/// GET /api/v1/tutors?subject={subject}&level={level}
///
/// Both filters are optional and combine with AND.
async fn list_tutors(state: web::Data<AppState>, query: web::Query<TutorFilterQuery>) -> impl Responder {
    let mut tutors = state.store.tutors().await;

    if let Some(subject) = &query.subject {
        tutors = filter_tutors_by_subject(&tutors, subject);
    }
    if let Some(level) = &query.level {
        tutors = filter_tutors_by_level(&tutors, level);
    }

    HttpResponse::Ok().json(tutors)
}

/// Add a tutor
///
/// POST /api/v1/tutors
async fn create_tutor(state: web::Data<AppState>, req: web::Json<TutorRequest>) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_error(errors);
    }

    let tutor = req.into_inner().into_tutor(new_id());
    match state.store.add_tutor(tutor).await {
        Ok(tutor) => {
            state.cache.invalidate_all();
            tracing::info!("Added tutor {} ({})", tutor.id, tutor.full_name);
            HttpResponse::Created().json(tutor)
        }
        Err(e) => store_error(e),
    }
}

/// Replace a tutor's data
///
/// PUT /api/v1/tutors/{id}
async fn update_tutor(
    state: web::Data<AppState>,
    path: web::Path<String>,
    req: web::Json<TutorRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_error(errors);
    }

    match state.store.update_tutor(&path, req.into_inner()).await {
        Ok(tutor) => {
            state.cache.invalidate_all();
            tracing::info!("Updated tutor {}", tutor.id);
            HttpResponse::Ok().json(tutor)
        }
        Err(e) => store_error(e),
    }
}

/// DELETE /api/v1/tutors/{id}
async fn delete_tutor(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    match state.store.delete_tutor(&path).await {
        Ok(tutor) => {
            state.cache.invalidate_all();
            tracing::info!("Deleted tutor {} ({})", tutor.id, tutor.full_name);
            HttpResponse::NoContent().finish()
        }
        Err(e) => store_error(e),
    }
}

/// GET /api/v1/students
async fn list_students(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(state.store.students().await)
}

/// Add a student
///
/// POST /api/v1/students
async fn create_student(state: web::Data<AppState>, req: web::Json<StudentRequest>) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_error(errors);
    }

    let student = req.into_inner().into_student(new_id());
    match state.store.add_student(student).await {
        Ok(student) => {
            state.cache.invalidate_all();
            tracing::info!("Added student {} ({})", student.id, student.full_name);
            HttpResponse::Created().json(student)
        }
        Err(e) => store_error(e),
    }
}

/// Replace a student's data
///
/// PUT /api/v1/students/{id}
async fn update_student(
    state: web::Data<AppState>,
    path: web::Path<String>,
    req: web::Json<StudentRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_error(errors);
    }

    match state.store.update_student(&path, req.into_inner()).await {
        Ok(student) => {
            state.cache.invalidate_all();
            tracing::info!("Updated student {}", student.id);
            HttpResponse::Ok().json(student)
        }
        Err(e) => store_error(e),
    }
}

/// DELETE /api/v1/students/{id}
async fn delete_student(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    match state.store.delete_student(&path).await {
        Ok(student) => {
            state.cache.invalidate_all();
            tracing::info!("Deleted student {} ({})", student.id, student.full_name);
            HttpResponse::NoContent().finish()
        }
        Err(e) => store_error(e),
    }
}

/// Export both collections
///
/// GET /api/v1/data/export
async fn export_data(state: web::Data<AppState>) -> impl Responder {
    let data = state.store.export().await;
    let filename = format!("matchmaking-data-{}.json", chrono::Utc::now().format("%Y-%m-%d"));

    HttpResponse::Ok()
        .insert_header((
            "Content-Disposition",
            format!("attachment; filename=\"{}\"", filename),
        ))
        .json(data)
}

/// Replace both collections
///
/// POST /api/v1/data/import
///
/// Request body:
/// ```json
/// {
///   "tutors": [],
///   "students": []
/// }
/// ```
async fn import_data(state: web::Data<AppState>, req: web::Json<Dataset>) -> impl Responder {
    match state.store.import(req.into_inner()).await {
        Ok(imported) => {
            state.cache.invalidate_all();
            HttpResponse::Ok().json(ImportResponse {
                success: true,
                imported,
            })
        }
        Err(e) => {
            tracing::warn!("Import rejected: {}", e);
            store_error(e)
        }
    }
}

/// DELETE /api/v1/data
async fn clear_data(state: web::Data<AppState>) -> impl Responder {
    match state.store.clear().await {
        Ok(()) => {
            state.cache.invalidate_all();
            tracing::info!("Cleared all tutors and students");
            HttpResponse::NoContent().finish()
        }
        Err(e) => store_error(e),
    }
}
