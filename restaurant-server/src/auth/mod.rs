//! Admin authentication
//!
//! - [`JwtService`] issues and verifies bearer tokens
//! - [`CurrentUser`] is the authenticated admin context
//! - [`require_auth`] guards the admin routers
//! - [`password`] hashes and verifies admin passwords

pub mod extractor;
pub mod jwt;
pub mod middleware;
pub mod password;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
pub use middleware::require_auth;
pub use password::{hash_password, verify_password};
