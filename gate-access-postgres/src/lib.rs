pub mod postgres_repositories;
pub mod repository;
pub mod utils;

pub use postgres_repositories::{GateAccessRepositories, PostgresRepositories};
pub use repository::access_log_repository::AccessLogRepositoryImpl;
pub use repository::gate_repository::GateRepositoryImpl;
pub use repository::principal_repository::PrincipalRepositoryImpl;

#[cfg(test)]
pub mod test_helper;
