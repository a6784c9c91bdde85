//! Authentication adapters.
//!
//! - `JwtSessionValidator` - HS256-signed session tokens for production
//! - `MockSessionValidator` - in-memory token map for tests

mod jwt;
mod mock;

pub use jwt::{JwtConfig, JwtSessionValidator};
pub use mock::MockSessionValidator;
