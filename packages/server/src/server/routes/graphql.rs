//! GraphQL endpoint.
//!
//! Accepts both a plain JSON POST and the multipart request convention
//! used for file uploads: an `operations` part carrying the standard
//! GraphQL request JSON plus a `file` part holding the document. The
//! uploaded document is handed to resolvers through the context rather
//! than as an argument.

use axum::extract::{Extension, FromRequest, Multipart, Request, State};
use axum::http::{header::CONTENT_TYPE, StatusCode};
#[cfg(debug_assertions)]
use axum::response::Html;
use axum::response::{IntoResponse, Response};
use axum::Json;
use extraction::DocumentUpload;
use juniper::http::GraphQLRequest;
use std::sync::Arc;

use crate::common::ApiError;
use crate::domains::cases::CASE_FILE_SIZE_LIMIT;
use crate::server::app::AxumAppState;
use crate::server::graphql::{GraphQLContext, Schema};
use crate::server::middleware::AuthUser;

/// GraphQL POST endpoint
pub async fn graphql_handler(
    State(schema): State<Arc<Schema>>,
    Extension(state): Extension<AxumAppState>,
    request: Request,
) -> Response {
    // Populated by jwt_auth_middleware when a valid token was sent.
    let auth_user = request.extensions().get::<AuthUser>().cloned();

    let is_multipart = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.starts_with("multipart/form-data"))
        .unwrap_or(false);

    let (graphql_request, upload) = if is_multipart {
        let multipart = match Multipart::from_request(request, &()).await {
            Ok(multipart) => multipart,
            Err(e) => {
                return ApiError::BadRequest(format!("Invalid multipart body: {e}"))
                    .into_response()
            }
        };
        match read_graphql_multipart(multipart).await {
            Ok(parts) => parts,
            Err(e) => return e.into_response(),
        }
    } else {
        match Json::<GraphQLRequest>::from_request(request, &()).await {
            Ok(Json(graphql_request)) => (graphql_request, None),
            Err(e) => {
                return ApiError::BadRequest(format!("Invalid GraphQL request: {e}"))
                    .into_response()
            }
        }
    };

    let context = GraphQLContext::new(
        state.cases.clone(),
        state.auth.clone(),
        auth_user,
        upload,
    );

    let response = graphql_request.execute(&schema, &context).await;
    let status = if response.is_ok() {
        StatusCode::OK
    } else {
        StatusCode::BAD_REQUEST
    };

    (status, Json(response)).into_response()
}

/// Parse the multipart upload convention: `operations` (GraphQL request
/// JSON) plus a `file` part.
async fn read_graphql_multipart(
    mut multipart: Multipart,
) -> Result<(GraphQLRequest, Option<DocumentUpload>), ApiError> {
    let mut graphql_request: Option<GraphQLRequest> = None;
    let mut upload: Option<DocumentUpload> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Invalid multipart body: {e}")))?
    {
        match field.name() {
            Some("operations") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("Invalid operations part: {e}")))?;
                let parsed = serde_json::from_str(&text)
                    .map_err(|e| ApiError::BadRequest(format!("Invalid operations JSON: {e}")))?;
                graphql_request = Some(parsed);
            }
            Some("file") => {
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let filename = field.file_name().map(str::to_string);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("Failed to read upload: {e}")))?;

                if bytes.len() > CASE_FILE_SIZE_LIMIT {
                    return Err(ApiError::BadRequest(format!(
                        "File exceeds the maximum allowed size of {CASE_FILE_SIZE_LIMIT} bytes"
                    )));
                }
                if bytes.is_empty() {
                    return Err(ApiError::BadRequest("Uploaded file is empty".to_string()));
                }

                upload = Some(DocumentUpload::new(bytes.to_vec(), content_type, filename));
            }
            _ => {}
        }
    }

    let graphql_request = graphql_request
        .ok_or_else(|| ApiError::BadRequest("Missing operations part".to_string()))?;

    Ok((graphql_request, upload))
}

/// GraphQL playground (GraphiQL)
#[cfg(debug_assertions)]
pub async fn graphql_playground() -> Html<String> {
    Html(
        r#"
<!DOCTYPE html>
<html>
<head>
    <title>GraphQL Playground</title>
    <style>
        body {
            height: 100%;
            margin: 0;
            width: 100%;
            overflow: hidden;
        }
        #graphiql {
            height: 100vh;
        }
    </style>
    <script
        crossorigin
        src="https://unpkg.com/react@18/umd/react.production.min.js"
    ></script>
    <script
        crossorigin
        src="https://unpkg.com/react-dom@18/umd/react-dom.production.min.js"
    ></script>
    <link rel="stylesheet" href="https://unpkg.com/graphiql/graphiql.min.css" />
</head>
<body>
    <div id="graphiql">Loading...</div>
    <script
        src="https://unpkg.com/graphiql/graphiql.min.js"
        type="application/javascript"
    ></script>
    <script>
        const fetcher = GraphiQL.createFetcher({
            url: '/graphql',
        });

        ReactDOM.render(
            React.createElement(GraphiQL, { fetcher: fetcher }),
            document.getElementById('graphiql'),
        );
    </script>
</body>
</html>
"#
        .to_string(),
    )
}
