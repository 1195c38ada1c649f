//! Storage implementations for different backends

pub mod in_memory;
pub mod mapper;
#[cfg(feature = "postgres")]
pub mod postgres;

pub use in_memory::InMemoryRepository;
pub use mapper::ModelMapper;
#[cfg(feature = "postgres")]
pub use postgres::{MIGRATOR, PostgresRepository};

use crate::config::StorageConfig;
use crate::core::repository::SearchableRepository;
use crate::entities::{Budget, Expense, Supplier, Team, TeamMember};
use std::sync::Arc;

/// Fields accepted as a search sort key
pub const SORTABLE_FIELDS: &[&str] = &["name", "created_at"];

/// One repository per aggregate, sharing a backend
#[derive(Clone)]
pub struct Repositories {
    pub budgets: Arc<dyn SearchableRepository<Budget>>,
    pub suppliers: Arc<dyn SearchableRepository<Supplier>>,
    pub team_members: Arc<dyn SearchableRepository<TeamMember>>,
    pub teams: Arc<dyn SearchableRepository<Team>>,
    pub expenses: Arc<dyn SearchableRepository<Expense>>,
}

impl Repositories {
    pub fn in_memory() -> Self {
        Self {
            budgets: Arc::new(InMemoryRepository::new()),
            suppliers: Arc::new(InMemoryRepository::new()),
            team_members: Arc::new(InMemoryRepository::new()),
            teams: Arc::new(InMemoryRepository::new()),
            expenses: Arc::new(InMemoryRepository::new()),
        }
    }

    #[cfg(feature = "postgres")]
    pub fn postgres(pool: sqlx::PgPool) -> Self {
        Self {
            budgets: Arc::new(PostgresRepository::new(pool.clone())),
            suppliers: Arc::new(PostgresRepository::new(pool.clone())),
            team_members: Arc::new(PostgresRepository::new(pool.clone())),
            teams: Arc::new(PostgresRepository::new(pool.clone())),
            expenses: Arc::new(PostgresRepository::new(pool)),
        }
    }

    /// Build the configured backend; PostgreSQL connects and migrates first
    pub async fn from_config(config: &StorageConfig) -> anyhow::Result<Self> {
        match config {
            StorageConfig::InMemory => {
                tracing::info!("Using in-memory storage");
                Ok(Self::in_memory())
            }
            #[cfg(feature = "postgres")]
            StorageConfig::Postgres {
                url,
                max_connections,
            } => {
                let pool = sqlx::postgres::PgPoolOptions::new()
                    .max_connections(*max_connections)
                    .connect(url)
                    .await?;
                MIGRATOR.run(&pool).await?;

                tracing::info!(max_connections, "Using PostgreSQL storage");
                Ok(Self::postgres(pool))
            }
            #[cfg(not(feature = "postgres"))]
            StorageConfig::Postgres { .. } => {
                anyhow::bail!("PostgreSQL storage requires the `postgres` feature")
            }
        }
    }
}
