//! Authentication utilities library
//!
//! Provides reusable authentication infrastructure for the platform services:
//! - Password hashing (Argon2id)
//! - Signed role-claim tokens (HMAC-SHA256)
//!
//! Each service defines its own claim payload and adapts these implementations.
//! This keeps the crate free of domain types while reducing code duplication.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! assert!(!hasher.verify("not_my_password", &hash));
//! ```
//!
//! ## Signed claims
//! ```
//! use auth::TokenCodec;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize)]
//! struct Claim { role: String, iat: i64 }
//!
//! let codec = TokenCodec::new(b"secret_key_at_least_32_bytes_long!");
//! let token = codec.sign(&Claim { role: "staff".into(), iat: 0 }).unwrap();
//! let claim: Claim = codec.verify(&token).unwrap();
//! assert_eq!(claim.role, "staff");
//! ```

pub mod password;
pub mod token;

// Re-export commonly used items
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use token::TokenCodec;
pub use token::TokenError;
