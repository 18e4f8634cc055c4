//! Account authentication: JWT bearer tokens and argon2 password hashes

mod jwt;
mod middleware;
mod password;

pub use jwt::{Claims, JwtService, TokenKind};
pub use middleware::AuthUser;
pub use password::PasswordService;
