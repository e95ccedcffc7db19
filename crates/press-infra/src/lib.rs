//! # Press Infrastructure
//!
//! Concrete implementations of the ports defined in `press-core`:
//! PostgreSQL repositories via SeaORM, JWT tokens and Argon2 hashing.

pub mod auth;
pub mod database;

pub use auth::{Argon2PasswordService, JwtTokenService};
pub use database::{DatabaseConfig, connect};
