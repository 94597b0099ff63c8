//! Storage service abstraction.
//!
//! The domain crates never store anything themselves. They talk to a
//! `Service`, which keeps entities under identifiers chosen by the service.
//! Every operation has a default that reports `DomainError::Unsupported`, so a
//! read-only or write-only collaborator only implements what it offers.

use async_trait::async_trait;

use crate::error::DomainError;
use crate::identified::IdentifiedEntity;

/// An in-place change handed to [`Service::modify`]. An error leaves the
/// stored entity as it was.
pub type Edit<'a, E> = Box<dyn FnOnce(&mut E) -> Result<(), DomainError> + Send + 'a>;

/// Create/fetch/update/delete contract for entities of type `E` keyed by `Id`.
#[async_trait]
pub trait Service<Id, E>: Send + Sync
where
    Id: Send + Sync + 'static,
    E: Send + Sync + 'static,
{
    /// Stores a new entity and returns the identifier assigned to it.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidArgument` if the content is rejected,
    /// `DomainError::Unsupported` if the service does not create entities.
    async fn create(&self, _content: E) -> Result<Id, DomainError> {
        Err(DomainError::unsupported("create"))
    }

    /// Fetches the entity stored under `id`, if any.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the storage fails.
    async fn fetch(&self, _id: Id) -> Result<Option<E>, DomainError> {
        Err(DomainError::unsupported("fetch"))
    }

    /// Fetches every stored entity together with its identifier. Services
    /// that cannot enumerate report nothing.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the storage fails.
    async fn fetch_all(&self) -> Result<Vec<IdentifiedEntity<Id, E>>, DomainError> {
        Ok(Vec::new())
    }

    /// Replaces the entity stored under `id`. Returns whether anything was
    /// replaced.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::NotFound` if nothing is stored under `id`.
    async fn update(&self, _id: Id, _content: E) -> Result<bool, DomainError> {
        Err(DomainError::unsupported("update"))
    }

    /// Applies `edit` to the entity stored under `id` and returns the entity
    /// as stored afterwards. No other write to `id` runs between reading the
    /// entity and storing the edited one.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::NotFound` if nothing is stored under `id`, or
    /// the error `edit` returned.
    async fn modify<'a>(&self, _id: Id, _edit: Edit<'a, E>) -> Result<E, DomainError> {
        Err(DomainError::unsupported("modify"))
    }

    /// Removes the entity stored under `id`. Returns whether anything was
    /// removed.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Unsupported` if the service does not delete.
    async fn delete(&self, _id: Id) -> Result<bool, DomainError> {
        Err(DomainError::unsupported("delete"))
    }
}

/// Fetches `id` from `service`, turning an absent entity into
/// `DomainError::NotFound`.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if nothing is stored under `id`, or the
/// service's own error.
pub async fn fetch_required<Id, E, S>(service: &S, id: Id) -> Result<E, DomainError>
where
    Id: Send + Sync + std::fmt::Display + Copy + 'static,
    E: Send + Sync + 'static,
    S: Service<Id, E> + ?Sized,
{
    service
        .fetch(id)
        .await?
        .ok_or_else(|| DomainError::NotFound(id.to_string()))
}

/// Runs `edit` through [`Service::modify`] and hands back the stored entity
/// together with whatever `edit` produced.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if nothing is stored under `id`, the
/// error `edit` returned, or the service's own error.
pub async fn modify_required<Id, E, S, R, F>(
    service: &S,
    id: Id,
    edit: F,
) -> Result<(E, R), DomainError>
where
    Id: Send + Sync + std::fmt::Display + Copy + 'static,
    E: Send + Sync + 'static,
    S: Service<Id, E> + ?Sized,
    R: Send,
    F: FnOnce(&mut E) -> Result<R, DomainError> + Send,
{
    let mut produced = None;
    let entity = service
        .modify(
            id,
            Box::new(|entity: &mut E| -> Result<(), DomainError> {
                produced = Some(edit(entity)?);
                Ok(())
            }),
        )
        .await?;
    let produced = produced.ok_or_else(|| {
        DomainError::Infrastructure(format!("{id}: service did not apply the edit"))
    })?;
    Ok((entity, produced))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ReadOnly;

    #[async_trait]
    impl Service<u32, String> for ReadOnly {
        async fn fetch(&self, id: u32) -> Result<Option<String>, DomainError> {
            Ok((id == 1).then(|| "one".to_owned()))
        }
    }

    /// Stores one string under 1 and edits it in place.
    struct Single(std::sync::Mutex<String>);

    #[async_trait]
    impl Service<u32, String> for Single {
        async fn modify<'a>(&self, id: u32, edit: Edit<'a, String>) -> Result<String, DomainError> {
            if id != 1 {
                return Err(DomainError::NotFound(id.to_string()));
            }
            let mut stored = self
                .0
                .lock()
                .map_err(|e| DomainError::Infrastructure(e.to_string()))?;
            let mut working = stored.clone();
            edit(&mut working)?;
            *stored = working;
            Ok(stored.clone())
        }
    }

    #[tokio::test]
    async fn test_unimplemented_operations_report_unsupported() {
        let service = ReadOnly;

        let created = service.create("two".to_owned()).await;
        let deleted = service.delete(1).await;
        let modified = modify_required(&service, 1, |_: &mut String| Ok(())).await;

        assert!(created.unwrap_err().is_unsupported());
        assert!(deleted.unwrap_err().is_unsupported());
        assert!(modified.unwrap_err().is_unsupported());
        assert!(service.fetch_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_fetch_required_maps_missing_entity_to_not_found() {
        let service = ReadOnly;

        let found = fetch_required(&service, 1).await.unwrap();
        let missing = fetch_required(&service, 7).await;

        assert_eq!(found, "one");
        match missing.unwrap_err() {
            DomainError::NotFound(id) => assert_eq!(id, "7"),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_modify_required_returns_entity_and_edit_result() {
        let service = Single(std::sync::Mutex::new("one".to_owned()));

        let (entity, length) = modify_required(&service, 1, |text: &mut String| {
            text.push_str(" more");
            Ok(text.len())
        })
        .await
        .unwrap();

        assert_eq!(entity, "one more");
        assert_eq!(length, 8);
    }

    #[tokio::test]
    async fn test_failed_edit_leaves_entity_unchanged() {
        let service = Single(std::sync::Mutex::new("one".to_owned()));

        let result = modify_required(&service, 1, |text: &mut String| -> Result<(), DomainError> {
            text.clear();
            Err(DomainError::invalid_argument("no"))
        })
        .await;

        assert!(result.unwrap_err().is_invalid_argument());
        assert_eq!(*service.0.lock().unwrap(), "one");
    }
}
