//! Repository traits for entity persistence

use crate::core::error::DomainResult;
use crate::core::search::{SearchParams, SearchResult};
use async_trait::async_trait;

/// CRUD operations for one entity type
///
/// Implementations decide where rows live; callers only see entities.
/// `find_by_id`, `update` and `delete` fail with
/// [`NotFoundError`](crate::core::error::NotFoundError) on unknown ids.
#[async_trait]
pub trait Repository<E>: Send + Sync {
    /// Whether an entity with exactly this name exists
    async fn exists(&self, name: &str) -> DomainResult<bool>;

    async fn insert(&self, entity: &E) -> DomainResult<()>;

    async fn find_by_id(&self, id: &str) -> DomainResult<E>;

    async fn find_all(&self) -> DomainResult<Vec<E>>;

    /// Replace a stored entity; it must already exist
    async fn update(&self, entity: &E) -> DomainResult<()>;

    async fn delete(&self, id: &str) -> DomainResult<()>;
}

/// Repository with paginated, filtered and sorted search
#[async_trait]
pub trait SearchableRepository<E>: Repository<E> {
    /// Fields accepted by `SearchParams::sort`
    fn sortable_fields(&self) -> &[&'static str];

    /// Filter on name (case-insensitive substring), sort on a sortable
    /// field or by `created_at` descending, then paginate
    async fn search(&self, params: &SearchParams) -> DomainResult<SearchResult<E>>;
}
