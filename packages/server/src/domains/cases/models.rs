use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A persisted case-law record.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Case {
    pub id: Uuid,
    pub title: String,
    pub decision_type: Option<String>,
    pub decision_date: Option<DateTime<Utc>>,
    pub office: Option<String>,
    pub court: Option<String>,
    pub case_number: Option<String>,
    pub summary: String,
    pub conclusion: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
