//! API-facing case representation shared by REST and GraphQL.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::domains::cases::models::Case;

#[derive(Debug, Clone, Serialize, juniper::GraphQLObject)]
#[serde(rename_all = "camelCase")]
pub struct CaseData {
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

impl From<Case> for CaseData {
    fn from(case: Case) -> Self {
        Self {
            id: case.id,
            title: case.title,
            decision_type: case.decision_type,
            decision_date: case.decision_date,
            office: case.office,
            court: case.court,
            case_number: case.case_number,
            summary: case.summary,
            conclusion: case.conclusion,
            created_at: case.created_at,
            updated_at: case.updated_at,
        }
    }
}
