//! Database connection management and repositories.

mod connections;
pub mod entity;
mod postgres_base;
pub mod postgres_repo;

pub use connections::{DatabaseConfig, connect};
pub use sea_orm::{DbConn, DbErr};
pub use postgres_repo::{
    PostgresCategoryRepository, PostgresPageRepository, PostgresPostRepository,
    PostgresSeoMetadataRepository, PostgresTagRepository, PostgresUserRepository,
};

#[cfg(test)]
mod tests;
