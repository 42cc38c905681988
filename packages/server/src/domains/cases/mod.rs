//! Case records: persistence, import, retrieval and deletion.

pub mod data;
pub mod models;
pub mod service;
pub mod store;

/// Maximum accepted upload size for case documents (10 MiB).
pub const CASE_FILE_SIZE_LIMIT: usize = 10 * 1024 * 1024;

pub use data::CaseData;
pub use models::Case;
pub use service::CasesService;
pub use store::{CaseStore, MemoryCaseStore, PostgresCaseStore};
