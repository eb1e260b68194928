use sqlx::PgPool;
use std::sync::Arc;

use crate::repository::access_log_repository::AccessLogRepositoryImpl;
use crate::repository::gate_repository::GateRepositoryImpl;
use crate::repository::principal_repository::PrincipalRepositoryImpl;

/// Builds the PostgreSQL-backed repositories from one shared pool.
///
/// Each scan statement is atomic on its own (insert-one, increment-in-place,
/// array-append), so repositories run directly against the pool rather than
/// inside a shared transaction.
pub struct PostgresRepositories {
    pool: Arc<PgPool>,
}

impl PostgresRepositories {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &Arc<PgPool> {
        &self.pool
    }

    /// Create all repositories sharing the pool
    pub fn create_all_repositories(&self) -> GateAccessRepositories {
        GateAccessRepositories {
            gate_repository: Arc::new(GateRepositoryImpl::new(self.pool.clone())),
            principal_repository: Arc::new(PrincipalRepositoryImpl::new(self.pool.clone())),
            access_log_repository: Arc::new(AccessLogRepositoryImpl::new(self.pool.clone())),
        }
    }
}

pub struct GateAccessRepositories {
    pub gate_repository: Arc<GateRepositoryImpl>,
    pub principal_repository: Arc<PrincipalRepositoryImpl>,
    pub access_log_repository: Arc<AccessLogRepositoryImpl>,
}
