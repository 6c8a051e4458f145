use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Testimonial {
    pub id: i64,
    pub author: String,
    pub role: Option<String>,
    pub content: String,
    pub rating: Option<i64>,
    pub created_at: String,
}
