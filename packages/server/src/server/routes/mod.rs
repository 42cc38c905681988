pub mod auth;
pub mod cases;
pub mod graphql;
pub mod health;

pub use auth::login_handler;
pub use cases::{delete_case_handler, get_case_handler, import_case_handler};
#[cfg(debug_assertions)]
pub use graphql::graphql_playground;
pub use graphql::graphql_handler;
pub use health::health_handler;
