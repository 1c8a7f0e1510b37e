//! Authentication and authorization
//!
//! bcrypt password checks, HS256 bearer tokens and the request extractors
//! that gate protected routes.

pub mod login;
pub mod middleware;
pub mod password;
pub mod token;

pub use login::{Authenticator, LoginOutcome};
pub use middleware::{require_admin, AdminUser, AuthUser};
pub use password::hash_password;
pub use token::{Claims, TokenIssuer, UserIdentity, ADMIN_ROLE};
