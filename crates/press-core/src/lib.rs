//! # Press Core
//!
//! The domain layer of the Press CMS.
//! This crate contains pure business logic with zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;
pub mod slug;

pub use error::DomainError;
