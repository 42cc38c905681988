pub mod auth;
pub mod cases;
