use chrono::Utc;
use sqlx::SqlitePool;

use crate::models::{Course, Enrollment, Testimonial, Workshop};

pub async fn fetch_courses(db: &SqlitePool) -> Result<Vec<Course>, sqlx::Error> {
    sqlx::query_as::<_, Course>(
        "SELECT id, title, description, instructor, duration, price, image, syllabus, created_at \
         FROM courses",
    )
    .fetch_all(db)
    .await
}

pub async fn find_course_by_id(db: &SqlitePool, id: &str) -> Result<Option<Course>, sqlx::Error> {
    sqlx::query_as::<_, Course>(
        "SELECT id, title, description, instructor, duration, price, image, syllabus, created_at \
         FROM courses WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(db)
    .await
}

/// Inserts the enrollment and returns the store-assigned id. The supplied
/// course id is persisted as-is; no existence check is made against the
/// courses table.
pub async fn insert_enrollment(
    db: &SqlitePool,
    name: &str,
    email: &str,
    phone: &str,
    status: &str,
    course_id: &str,
) -> Result<i64, sqlx::Error> {
    let now = Utc::now().to_rfc3339();

    let result = sqlx::query(
        "INSERT INTO enrollments (name, email, phone, status, course_id, created_at) \
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(name)
    .bind(email)
    .bind(phone)
    .bind(status)
    .bind(course_id)
    .bind(&now)
    .execute(db)
    .await?;

    Ok(result.last_insert_rowid())
}

pub async fn find_enrollment_by_id(
    db: &SqlitePool,
    id: i64,
) -> Result<Option<Enrollment>, sqlx::Error> {
    sqlx::query_as::<_, Enrollment>(
        "SELECT id, name, email, phone, status, course_id, created_at \
         FROM enrollments WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(db)
    .await
}

pub async fn fetch_workshops(db: &SqlitePool) -> Result<Vec<Workshop>, sqlx::Error> {
    sqlx::query_as::<_, Workshop>(
        "SELECT id, title, description, date, location, created_at FROM workshops",
    )
    .fetch_all(db)
    .await
}

pub async fn fetch_testimonials(db: &SqlitePool) -> Result<Vec<Testimonial>, sqlx::Error> {
    sqlx::query_as::<_, Testimonial>(
        "SELECT id, author, role, content, rating, created_at FROM testimonials",
    )
    .fetch_all(db)
    .await
}
