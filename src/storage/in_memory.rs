//! In-memory repository for testing and development

use crate::core::entity::{Entity, EntityProps};
use crate::core::error::{DomainError, DomainResult, NotFoundError};
use crate::core::repository::{Repository, SearchableRepository};
use crate::core::search::{SearchParams, SearchResult, SortDirection};
use crate::storage::SORTABLE_FIELDS;
use crate::storage::mapper::ModelMapper;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;
use std::cmp::Ordering;
use std::marker::PhantomData;
use std::sync::{Arc, RwLock};

const DATE_FIELDS: &[&str] = &["created_at", "updated_at"];

/// In-memory repository for one entity type
///
/// Rows are kept in their persisted JSON shape, keyed by id in insertion
/// order, and mapped back through [`ModelMapper`] on every read. Uses
/// `RwLock` for thread-safe access; clones share the same rows.
pub struct InMemoryRepository<P> {
    rows: Arc<RwLock<IndexMap<String, Value>>>,
    _marker: PhantomData<P>,
}

impl<P> InMemoryRepository<P> {
    pub fn new() -> Self {
        Self {
            rows: Arc::new(RwLock::new(IndexMap::new())),
            _marker: PhantomData,
        }
    }

    /// Number of stored rows
    pub fn len(&self) -> DomainResult<usize> {
        Ok(self.read()?.len())
    }

    pub fn is_empty(&self) -> DomainResult<bool> {
        Ok(self.len()? == 0)
    }

    fn read(&self) -> DomainResult<std::sync::RwLockReadGuard<'_, IndexMap<String, Value>>> {
        self.rows
            .read()
            .map_err(|e| DomainError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> DomainResult<std::sync::RwLockWriteGuard<'_, IndexMap<String, Value>>> {
        self.rows
            .write()
            .map_err(|e| DomainError::Storage(format!("Failed to acquire write lock: {}", e)))
    }
}

impl<P> Default for InMemoryRepository<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> Clone for InMemoryRepository<P> {
    fn clone(&self) -> Self {
        Self {
            rows: Arc::clone(&self.rows),
            _marker: PhantomData,
        }
    }
}

fn to_entity<P>(row: &Value) -> DomainResult<Entity<P>>
where
    P: EntityProps,
    Entity<P>: ModelMapper,
{
    Entity::<P>::to_entity(row).inspect_err(|e| {
        tracing::warn!(kind = P::KIND, error = %e, "Failed to load stored row");
    })
}

fn row_name(row: &Value) -> Option<&str> {
    row.get("name").and_then(Value::as_str)
}

fn parse_date(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|date| date.with_timezone(&Utc))
}

/// Order two rows on `field`; dates compare chronologically, text by bytes
fn compare_rows(a: &Value, b: &Value, field: &str) -> Ordering {
    match (a.get(field), b.get(field)) {
        (Some(Value::String(a)), Some(Value::String(b))) if DATE_FIELDS.contains(&field) => {
            match (parse_date(a), parse_date(b)) {
                (Some(a), Some(b)) => a.cmp(&b),
                _ => a.cmp(b),
            }
        }
        (Some(Value::String(a)), Some(Value::String(b))) => a.cmp(b),
        (Some(Value::Number(a)), Some(Value::Number(b))) => a
            .as_f64()
            .partial_cmp(&b.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(Value::Null) | None, Some(Value::Null) | None) => Ordering::Equal,
        (Some(Value::Null) | None, _) => Ordering::Less,
        (_, Some(Value::Null) | None) => Ordering::Greater,
        _ => Ordering::Equal,
    }
}

#[async_trait]
impl<P> Repository<Entity<P>> for InMemoryRepository<P>
where
    P: EntityProps + Serialize,
    Entity<P>: ModelMapper,
{
    async fn exists(&self, name: &str) -> DomainResult<bool> {
        let rows = self.read()?;
        Ok(rows.values().any(|row| row_name(row) == Some(name)))
    }

    async fn insert(&self, entity: &Entity<P>) -> DomainResult<()> {
        let row = entity.to_json()?;
        let mut rows = self.write()?;

        if rows.contains_key(entity.id()) {
            return Err(DomainError::Storage(format!(
                "Entity already exists using ID {}",
                entity.id()
            )));
        }
        rows.insert(entity.id().to_string(), row);

        tracing::info!(kind = P::KIND, id = %entity.id(), "Inserted entity");
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Entity<P>> {
        tracing::debug!(kind = P::KIND, id = %id, "Finding entity");
        let rows = self.read()?;
        let row = rows.get(id).ok_or_else(|| NotFoundError::entity(id))?;
        to_entity(row)
    }

    async fn find_all(&self) -> DomainResult<Vec<Entity<P>>> {
        let rows = self.read()?;
        tracing::debug!(kind = P::KIND, count = rows.len(), "Listing entities");
        rows.values().map(to_entity::<P>).collect()
    }

    async fn update(&self, entity: &Entity<P>) -> DomainResult<()> {
        let row = entity.to_json()?;
        let mut rows = self.write()?;

        let stored = rows
            .get_mut(entity.id())
            .ok_or_else(|| NotFoundError::entity(entity.id()))?;
        *stored = row;

        tracing::info!(kind = P::KIND, id = %entity.id(), "Updated entity");
        Ok(())
    }

    async fn delete(&self, id: &str) -> DomainResult<()> {
        let mut rows = self.write()?;

        rows.shift_remove(id).ok_or_else(|| NotFoundError::entity(id))?;

        tracing::info!(kind = P::KIND, id = %id, "Deleted entity");
        Ok(())
    }
}

#[async_trait]
impl<P> SearchableRepository<Entity<P>> for InMemoryRepository<P>
where
    P: EntityProps + Serialize,
    Entity<P>: ModelMapper,
{
    fn sortable_fields(&self) -> &[&'static str] {
        SORTABLE_FIELDS
    }

    async fn search(&self, params: &SearchParams) -> DomainResult<SearchResult<Entity<P>>> {
        let rows = self.read()?;

        let needle = params.filter().map(str::to_lowercase);
        let mut matched: Vec<&Value> = rows
            .values()
            .filter(|row| match &needle {
                Some(needle) => row_name(row)
                    .is_some_and(|name| name.to_lowercase().contains(needle.as_str())),
                None => true,
            })
            .collect();

        match params.sort().filter(|sort| SORTABLE_FIELDS.contains(sort)) {
            Some(sort) => {
                let direction = params.sort_dir().unwrap_or(SortDirection::Asc);
                matched.sort_by(|a, b| match direction {
                    SortDirection::Asc => compare_rows(a, b, sort),
                    SortDirection::Desc => compare_rows(b, a, sort),
                });
            }
            None => matched.sort_by(|a, b| compare_rows(b, a, "created_at")),
        }

        let total = matched.len();
        let items = matched
            .into_iter()
            .skip(params.offset())
            .take(params.limit())
            .map(to_entity::<P>)
            .collect::<DomainResult<Vec<_>>>()?;

        tracing::debug!(
            kind = P::KIND,
            total,
            page = params.page(),
            "Searched entities"
        );
        Ok(SearchResult::new(items, total, params))
    }
}
