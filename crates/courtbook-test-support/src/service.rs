//! Mock `Service` implementations for handler tests.

use std::fmt::Display;
use std::sync::Mutex;

use async_trait::async_trait;
use courtbook_core::error::DomainError;
use courtbook_core::identified::IdentifiedEntity;
use courtbook_core::service::{Edit, Service};

/// A service holding at most one entity. Every `update` and every applied
/// `modify` is recorded; `fetch` keeps answering with the entity it was
/// created with.
#[derive(Debug)]
pub struct RecordingService<Id, E> {
    stored: Option<(Id, E)>,
    updated: Mutex<Vec<(Id, E)>>,
}

impl<Id, E> RecordingService<Id, E> {
    /// A service that stores `content` under `id`.
    #[must_use]
    pub fn holding(id: Id, content: E) -> Self {
        Self {
            stored: Some((id, content)),
            updated: Mutex::new(Vec::new()),
        }
    }

    /// A service that stores nothing.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            stored: None,
            updated: Mutex::new(Vec::new()),
        }
    }
}

impl<Id: Clone, E: Clone> RecordingService<Id, E> {
    /// Returns a copy of every recorded update.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn updates(&self) -> Vec<(Id, E)> {
        self.updated.lock().unwrap().clone()
    }
}

#[async_trait]
impl<Id, E> Service<Id, E> for RecordingService<Id, E>
where
    Id: PartialEq + Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    async fn fetch(&self, id: Id) -> Result<Option<E>, DomainError> {
        Ok(self
            .stored
            .as_ref()
            .filter(|(stored_id, _)| *stored_id == id)
            .map(|(_, content)| content.clone()))
    }

    async fn fetch_all(&self) -> Result<Vec<IdentifiedEntity<Id, E>>, DomainError> {
        Ok(self
            .stored
            .iter()
            .map(|(id, content)| IdentifiedEntity::new(id.clone(), content.clone()))
            .collect())
    }

    async fn update(&self, id: Id, content: E) -> Result<bool, DomainError> {
        self.updated.lock().unwrap().push((id, content));
        Ok(true)
    }

    async fn modify<'a>(&self, id: Id, edit: Edit<'a, E>) -> Result<E, DomainError> {
        let Some(mut working) = self.fetch(id.clone()).await? else {
            return Err(DomainError::NotFound("entity".into()));
        };
        edit(&mut working)?;
        self.updated.lock().unwrap().push((id, working.clone()));
        Ok(working)
    }
}

/// A service with nothing stored: fetches find nothing, updates and modifies
/// report `NotFound`, deletes remove nothing.
#[derive(Debug)]
pub struct EmptyService;

#[async_trait]
impl<Id, E> Service<Id, E> for EmptyService
where
    Id: Display + Send + Sync + 'static,
    E: Send + Sync + 'static,
{
    async fn fetch(&self, _id: Id) -> Result<Option<E>, DomainError> {
        Ok(None)
    }

    async fn update(&self, id: Id, _content: E) -> Result<bool, DomainError> {
        Err(DomainError::NotFound(id.to_string()))
    }

    async fn modify<'a>(&self, id: Id, _edit: Edit<'a, E>) -> Result<E, DomainError> {
        Err(DomainError::NotFound(id.to_string()))
    }

    async fn delete(&self, _id: Id) -> Result<bool, DomainError> {
        Ok(false)
    }
}

/// A service whose every operation fails with an infrastructure error.
#[derive(Debug)]
pub struct FailingService;

fn refused() -> DomainError {
    DomainError::Infrastructure("connection refused".into())
}

#[async_trait]
impl<Id, E> Service<Id, E> for FailingService
where
    Id: Send + Sync + 'static,
    E: Send + Sync + 'static,
{
    async fn create(&self, _content: E) -> Result<Id, DomainError> {
        Err(refused())
    }

    async fn fetch(&self, _id: Id) -> Result<Option<E>, DomainError> {
        Err(refused())
    }

    async fn fetch_all(&self) -> Result<Vec<IdentifiedEntity<Id, E>>, DomainError> {
        Err(refused())
    }

    async fn update(&self, _id: Id, _content: E) -> Result<bool, DomainError> {
        Err(refused())
    }

    async fn modify<'a>(&self, _id: Id, _edit: Edit<'a, E>) -> Result<E, DomainError> {
        Err(refused())
    }

    async fn delete(&self, _id: Id) -> Result<bool, DomainError> {
        Err(refused())
    }
}
