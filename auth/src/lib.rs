//! Authentication utilities library
//!
//! Provides reusable authentication infrastructure for the nido services:
//! - Password hashing (Argon2id)
//! - Opaque secret token generation (session ids, QR bearer credentials)
//!
//! Each service defines its own authentication traits and adapts these
//! implementations. This keeps credential handling in one audited place
//! without coupling services through shared domain logic.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## Secret Tokens
//! ```
//! use auth::SecretToken;
//!
//! let token = SecretToken::generate();
//! assert_eq!(token.len(), 64);
//! assert!(SecretToken::matches(&token, &token));
//! ```

pub mod password;
pub mod token;

// Re-export commonly used items
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use token::SecretToken;
