mod uploads;

use axum::extract::{DefaultBodyLimit, Path};
use axum::routing::post;
use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;

use crate::db::repository;
use crate::error::AppError;
use crate::models::*;
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::PUT,
            axum::http::Method::DELETE,
        ])
        .allow_headers(Any);

    let serve_uploads = ServeDir::new(&state.upload_dir);

    Router::new()
        .route("/api/health", get(health))
        .route("/api/courses", get(list_courses))
        .route("/api/courses/{id}", get(get_course))
        .route("/api/workshops", get(list_workshops))
        .route("/api/testimonials", get(list_testimonials))
        .route("/api/enroll", post(create_enrollment))
        .route(
            "/api/upload",
            post(uploads::upload_document)
                .layer(DefaultBodyLimit::max(uploads::MAX_UPLOAD_BYTES + 64 * 1024)),
        )
        .nest_service("/uploads", serve_uploads)
        .layer(cors)
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    sqlx::query("select 1").execute(&state.db).await?;
    Ok(StatusCode::OK)
}

/// Returns every course with the syllabus column exactly as stored; only the
/// by-id endpoint decodes it.
async fn list_courses(State(state): State<AppState>) -> Result<Json<Vec<Course>>, AppError> {
    let courses = repository::fetch_courses(&state.db).await?;
    Ok(Json(courses))
}

async fn get_course(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<CourseDetail>, AppError> {
    let course = repository::find_course_by_id(&state.db, &id)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(course.into_detail()))
}

async fn list_workshops(State(state): State<AppState>) -> Result<Json<Vec<Workshop>>, AppError> {
    let workshops = repository::fetch_workshops(&state.db).await?;
    Ok(Json(workshops))
}

async fn list_testimonials(
    State(state): State<AppState>,
) -> Result<Json<Vec<Testimonial>>, AppError> {
    let testimonials = repository::fetch_testimonials(&state.db).await?;
    Ok(Json(testimonials))
}

async fn create_enrollment(
    State(state): State<AppState>,
    Json(req): Json<NewEnrollmentRequest>,
) -> Result<(StatusCode, Json<EnrollmentResponse>), AppError> {
    let name = required_field(req.name.as_deref(), "name")?;
    let email = required_field(req.email.as_deref(), "email")?;
    let phone = required_field(req.phone.as_deref(), "phone")?;
    let course_id = required_field(req.course_id.as_deref(), "courseId")?;
    let status = req
        .status
        .as_deref()
        .filter(|s| !s.is_empty())
        .unwrap_or("Pending");

    let enrollment_id =
        repository::insert_enrollment(&state.db, name, email, phone, status, course_id).await?;

    // Persistence is the success criterion; both notifications are
    // best-effort and cannot fail out of the notifier.
    state
        .notifier
        .send(
            &state.admin_email,
            "New enrollment received",
            &format!(
                "New enrollment #{enrollment_id}\n\nName: {name}\nEmail: {email}\nPhone: {phone}\nCourse: {course_id}\nStatus: {status}"
            ),
        )
        .await;
    state
        .notifier
        .send(
            email,
            "Enrollment confirmation",
            &format!(
                "Hi {name},\n\nYour enrollment for course {course_id} was received and is now {status}.\n\nThe CourseHub Team"
            ),
        )
        .await;

    Ok((
        StatusCode::CREATED,
        Json(EnrollmentResponse {
            success: true,
            message: "Enrollment submitted successfully".to_string(),
            enrollment_id,
        }),
    ))
}

fn required_field<'a>(value: Option<&'a str>, field: &str) -> Result<&'a str, AppError> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(AppError::BadRequest(format!(
            "Missing required field: {field}"
        ))),
    }
}
