//! Case storage behind a trait so the import flow can be exercised
//! in-memory in tests.

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use extraction::ExtractedMetadata;
use sqlx::PgPool;
use std::sync::RwLock;
use uuid::Uuid;

use crate::domains::cases::models::Case;

#[async_trait]
pub trait CaseStore: Send + Sync {
    /// Persist extracted metadata, deduplicating on case number.
    ///
    /// A record with the same case number is updated in place (same id,
    /// same created_at, fresh updated_at). Metadata without a case
    /// number always inserts a new record.
    async fn upsert_by_case_number(&self, metadata: &ExtractedMetadata) -> Result<Case>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Case>>;

    /// Delete a record, returning whether it existed.
    async fn delete_by_id(&self, id: Uuid) -> Result<bool>;
}

/// Production store backed by Postgres.
pub struct PostgresCaseStore {
    pool: PgPool,
}

impl PostgresCaseStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CaseStore for PostgresCaseStore {
    async fn upsert_by_case_number(&self, metadata: &ExtractedMetadata) -> Result<Case> {
        // The ON CONFLICT arm targets the partial unique index on
        // case_number, making concurrent imports of the same case an
        // atomic insert-or-update. NULL case numbers never conflict.
        let case = sqlx::query_as::<_, Case>(
            r#"
            INSERT INTO cases (
                id, title, decision_type, decision_date, office, court,
                case_number, summary, conclusion
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (case_number) WHERE case_number IS NOT NULL
            DO UPDATE SET
                title = EXCLUDED.title,
                decision_type = EXCLUDED.decision_type,
                decision_date = EXCLUDED.decision_date,
                office = EXCLUDED.office,
                court = EXCLUDED.court,
                summary = EXCLUDED.summary,
                conclusion = EXCLUDED.conclusion,
                updated_at = now()
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&metadata.title)
        .bind(&metadata.decision_type)
        .bind(metadata.decision_date)
        .bind(&metadata.office)
        .bind(&metadata.court)
        .bind(normalized_case_number(metadata))
        .bind(&metadata.summary)
        .bind(&metadata.conclusion)
        .fetch_one(&self.pool)
        .await?;

        Ok(case)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Case>> {
        let case = sqlx::query_as::<_, Case>("SELECT * FROM cases WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(case)
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM cases WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

/// Empty case numbers are stored as NULL so they never participate in
/// dedup.
fn normalized_case_number(metadata: &ExtractedMetadata) -> Option<&str> {
    metadata
        .case_number
        .as_deref()
        .filter(|number| !number.is_empty())
}

/// In-memory store for tests.
#[derive(Default)]
pub struct MemoryCaseStore {
    cases: RwLock<Vec<Case>>,
}

impl MemoryCaseStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.cases.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl CaseStore for MemoryCaseStore {
    async fn upsert_by_case_number(&self, metadata: &ExtractedMetadata) -> Result<Case> {
        let mut cases = self.cases.write().unwrap();
        let now = Utc::now();
        let case_number = normalized_case_number(metadata).map(str::to_string);

        if let Some(number) = &case_number {
            if let Some(existing) = cases
                .iter_mut()
                .find(|case| case.case_number.as_deref() == Some(number))
            {
                existing.title = metadata.title.clone();
                existing.decision_type = metadata.decision_type.clone();
                existing.decision_date = metadata.decision_date;
                existing.office = metadata.office.clone();
                existing.court = metadata.court.clone();
                existing.summary = metadata.summary.clone();
                existing.conclusion = metadata.conclusion.clone();
                existing.updated_at = now;
                return Ok(existing.clone());
            }
        }

        let case = Case {
            id: Uuid::new_v4(),
            title: metadata.title.clone(),
            decision_type: metadata.decision_type.clone(),
            decision_date: metadata.decision_date,
            office: metadata.office.clone(),
            court: metadata.court.clone(),
            case_number,
            summary: metadata.summary.clone(),
            conclusion: metadata.conclusion.clone(),
            created_at: now,
            updated_at: now,
        };
        cases.push(case.clone());
        Ok(case)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Case>> {
        Ok(self
            .cases
            .read()
            .unwrap()
            .iter()
            .find(|case| case.id == id)
            .cloned())
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<bool> {
        let mut cases = self.cases.write().unwrap();
        let before = cases.len();
        cases.retain(|case| case.id != id);
        Ok(cases.len() < before)
    }
}
