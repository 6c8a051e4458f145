use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;

/// A course row as stored. `syllabus` holds a JSON-encoded array of topics;
/// the list endpoint returns it verbatim and only the by-id endpoint decodes
/// it (see `into_detail`).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub instructor: Option<String>,
    pub duration: Option<String>,
    pub price: Option<f64>,
    pub image: Option<String>,
    pub syllabus: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseDetail {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub instructor: Option<String>,
    pub duration: Option<String>,
    pub price: Option<f64>,
    pub image: Option<String>,
    pub syllabus: Vec<Value>,
    pub created_at: String,
}

impl Course {
    /// Decode the stored syllabus column. A NULL column, malformed JSON, or
    /// JSON that is not an array all degrade to an empty list rather than an
    /// error.
    pub fn syllabus_items(&self) -> Vec<Value> {
        self.syllabus
            .as_deref()
            .and_then(|raw| serde_json::from_str::<Vec<Value>>(raw).ok())
            .unwrap_or_default()
    }

    pub fn into_detail(self) -> CourseDetail {
        let syllabus = self.syllabus_items();
        CourseDetail {
            id: self.id,
            title: self.title,
            description: self.description,
            instructor: self.instructor,
            duration: self.duration,
            price: self.price,
            image: self.image,
            syllabus,
            created_at: self.created_at,
        }
    }
}
