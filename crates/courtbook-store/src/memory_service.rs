//! In-memory implementation of the `Service` trait.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use courtbook_core::error::DomainError;
use courtbook_core::identified::IdentifiedEntity;
use courtbook_core::service::{Edit, Service};

/// Keeps entities in a lock-protected map under random `Uuid` keys.
///
/// Every write, including a whole `modify`, runs under the write lock, so
/// concurrent edits of one entity are applied one after the other and none
/// is lost.
#[derive(Debug)]
pub struct MemoryService<E> {
    kind: &'static str,
    entities: RwLock<HashMap<Uuid, E>>,
}

impl<E> MemoryService<E> {
    /// Creates an empty service. `kind` names the entity type in log lines.
    #[must_use]
    pub fn new(kind: &'static str) -> Self {
        Self {
            kind,
            entities: RwLock::new(HashMap::new()),
        }
    }

    /// Creates a service pre-populated with `entities`.
    #[must_use]
    pub fn seeded(kind: &'static str, entities: impl IntoIterator<Item = (Uuid, E)>) -> Self {
        Self {
            kind,
            entities: RwLock::new(entities.into_iter().collect()),
        }
    }

    /// Number of stored entities.
    pub async fn len(&self) -> usize {
        self.entities.read().await.len()
    }

    /// Is nothing stored.
    pub async fn is_empty(&self) -> bool {
        self.entities.read().await.is_empty()
    }
}

#[async_trait]
impl<E> Service<Uuid, E> for MemoryService<E>
where
    E: Clone + Send + Sync + 'static,
{
    async fn create(&self, content: E) -> Result<Uuid, DomainError> {
        let mut entities = self.entities.write().await;
        let mut id = Uuid::new_v4();
        while entities.contains_key(&id) {
            id = Uuid::new_v4();
        }
        entities.insert(id, content);
        debug!(kind = self.kind, %id, "entity created");
        Ok(id)
    }

    async fn fetch(&self, id: Uuid) -> Result<Option<E>, DomainError> {
        Ok(self.entities.read().await.get(&id).cloned())
    }

    async fn fetch_all(&self) -> Result<Vec<IdentifiedEntity<Uuid, E>>, DomainError> {
        Ok(self
            .entities
            .read()
            .await
            .iter()
            .map(|(id, content)| IdentifiedEntity::new(*id, content.clone()))
            .collect())
    }

    async fn update(&self, id: Uuid, content: E) -> Result<bool, DomainError> {
        let mut entities = self.entities.write().await;
        match entities.get_mut(&id) {
            Some(slot) => {
                *slot = content;
                debug!(kind = self.kind, %id, "entity updated");
                Ok(true)
            }
            None => Err(DomainError::NotFound(id.to_string())),
        }
    }

    async fn modify<'a>(&self, id: Uuid, edit: Edit<'a, E>) -> Result<E, DomainError> {
        let mut entities = self.entities.write().await;
        let slot = entities
            .get_mut(&id)
            .ok_or_else(|| DomainError::NotFound(id.to_string()))?;
        let mut working = slot.clone();
        edit(&mut working)?;
        *slot = working;
        debug!(kind = self.kind, %id, "entity modified");
        Ok(slot.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let removed = self.entities.write().await.remove(&id).is_some();
        if removed {
            debug!(kind = self.kind, %id, "entity deleted");
        }
        Ok(removed)
    }
}
