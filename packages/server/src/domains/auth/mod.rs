//! Authentication: password login and JWT issuance/verification.

pub mod jwt;
pub mod models;
pub mod password;
pub mod service;

pub use jwt::{Claims, JwtService};
pub use models::User;
pub use password::{hash_password, verify_password};
pub use service::{AuthService, AuthenticatedUser, LoginRequest, LoginResponse};
