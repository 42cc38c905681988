//! GraphQL schema definition.

use juniper::{EmptySubscription, FieldError, FieldResult, RootNode};
use uuid::Uuid;

use super::context::GraphQLContext;
use crate::common::ApiError;
use crate::domains::auth::{LoginRequest, LoginResponse};
use crate::domains::cases::CaseData;

/// Render a domain error as a GraphQL field error, keeping the same
/// client-facing message the REST surface uses.
fn to_field_error(err: ApiError) -> FieldError {
    // IntoResponse logs internal sources; do the same here before the
    // detail is discarded.
    if let ApiError::Internal(source) = &err {
        tracing::error!(error = %source, "GraphQL operation failed with internal error");
    }
    FieldError::new(err.to_string(), juniper::Value::null())
}

pub struct Query;

#[juniper::graphql_object(context = GraphQLContext)]
impl Query {
    /// Fetch a case by id
    async fn case(context: &GraphQLContext, id: Uuid) -> FieldResult<CaseData> {
        context.require_auth()?;

        let case = context
            .cases
            .get_case(id)
            .await
            .map_err(to_field_error)?;

        Ok(case.into())
    }
}

pub struct Mutation;

#[juniper::graphql_object(context = GraphQLContext)]
impl Mutation {
    /// Exchange email + password for a bearer token
    async fn login(context: &GraphQLContext, input: LoginRequest) -> FieldResult<LoginResponse> {
        context.auth.login(input).await.map_err(to_field_error)
    }

    /// Import the document attached to this (multipart) request
    async fn import_case(context: &GraphQLContext) -> FieldResult<CaseData> {
        context.require_auth()?;

        let document = context
            .upload
            .clone()
            .ok_or_else(|| FieldError::new("No file uploaded", juniper::Value::null()))?;

        let case = context
            .cases
            .import_case(document)
            .await
            .map_err(to_field_error)?;

        Ok(case.into())
    }

    /// Delete a case, returning the record as it existed beforehand
    async fn delete_case(context: &GraphQLContext, id: Uuid) -> FieldResult<CaseData> {
        context.require_auth()?;

        let case = context
            .cases
            .delete_case(id)
            .await
            .map_err(to_field_error)?;

        Ok(case.into())
    }
}

pub type Schema = RootNode<'static, Query, Mutation, EmptySubscription<GraphQLContext>>;

pub fn create_schema() -> Schema {
    Schema::new(Query, Mutation, EmptySubscription::new())
}
