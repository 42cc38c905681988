use std::sync::Arc;

use extraction::DocumentUpload;
use juniper::FieldError;

use crate::domains::auth::AuthService;
use crate::domains::cases::CasesService;
use crate::server::middleware::AuthUser;

/// GraphQL request context
///
/// Shared services plus per-request state: the verified caller (if any)
/// and the file part of a multipart GraphQL request (if any).
pub struct GraphQLContext {
    pub cases: Arc<CasesService>,
    pub auth: Arc<AuthService>,
    pub auth_user: Option<AuthUser>,
    pub upload: Option<DocumentUpload>,
}

impl juniper::Context for GraphQLContext {}

impl GraphQLContext {
    pub fn new(
        cases: Arc<CasesService>,
        auth: Arc<AuthService>,
        auth_user: Option<AuthUser>,
        upload: Option<DocumentUpload>,
    ) -> Self {
        Self {
            cases,
            auth,
            auth_user,
            upload,
        }
    }

    /// Resolver guard for operations that need a verified caller.
    pub fn require_auth(&self) -> Result<&AuthUser, FieldError> {
        self.auth_user
            .as_ref()
            .ok_or_else(|| FieldError::new("Authentication required", juniper::Value::null()))
    }
}
