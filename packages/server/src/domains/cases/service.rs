//! Case operations: import through the extraction pipeline, lookup and
//! deletion.

use std::sync::Arc;

use extraction::{DocumentUpload, MetadataExtractor};
use tracing::info;
use uuid::Uuid;

use crate::common::{ApiError, ApiResult};
use crate::domains::cases::models::Case;
use crate::domains::cases::store::CaseStore;

pub struct CasesService {
    store: Arc<dyn CaseStore>,
    extractor: Arc<dyn MetadataExtractor>,
}

impl CasesService {
    pub fn new(store: Arc<dyn CaseStore>, extractor: Arc<dyn MetadataExtractor>) -> Self {
        Self { store, extractor }
    }

    /// Run the uploaded document through extraction and persist the
    /// result. Nothing is written when extraction fails.
    pub async fn import_case(&self, document: DocumentUpload) -> ApiResult<Case> {
        let metadata = self.extractor.extract(&document).await?;

        let case = self
            .store
            .upsert_by_case_number(&metadata)
            .await
            .map_err(ApiError::Internal)?;

        info!(
            case_id = %case.id,
            case_number = case.case_number.as_deref().unwrap_or("<none>"),
            "Imported case"
        );

        Ok(case)
    }

    pub async fn get_case(&self, id: Uuid) -> ApiResult<Case> {
        self.store
            .find_by_id(id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound(format!("Case {id} not found")))
    }

    /// Delete a case, returning the record as it existed beforehand.
    pub async fn delete_case(&self, id: Uuid) -> ApiResult<Case> {
        let case = self.get_case(id).await?;

        self.store
            .delete_by_id(id)
            .await
            .map_err(ApiError::Internal)?;

        info!(case_id = %case.id, "Deleted case");

        Ok(case)
    }
}
