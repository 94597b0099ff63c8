//! Behavioural tests for `MemoryService`.

use std::sync::Arc;

use courtbook_core::error::DomainError;
use courtbook_core::identified::Identified;
use courtbook_core::service::{Service, fetch_required, modify_required};
use courtbook_store::MemoryService;
use uuid::Uuid;

#[tokio::test]
async fn test_create_then_fetch_returns_stored_entity() {
    // Arrange
    let service: MemoryService<String> = MemoryService::new("note");

    // Act
    let id = service.create("The Duke owes us".to_owned()).await.unwrap();
    let fetched = service.fetch(id).await.unwrap();

    // Assert
    assert_eq!(fetched.as_deref(), Some("The Duke owes us"));
    assert_eq!(service.len().await, 1);
}

#[tokio::test]
async fn test_update_of_missing_entity_is_not_found() {
    // Arrange
    let service: MemoryService<String> = MemoryService::new("note");
    let id = Uuid::new_v4();

    // Act
    let result = service.update(id, "orphan".to_owned()).await;

    // Assert
    match result.unwrap_err() {
        DomainError::NotFound(missing) => assert_eq!(missing, id.to_string()),
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[tokio::test]
async fn test_update_replaces_existing_entity() {
    // Arrange
    let id = Uuid::new_v4();
    let service = MemoryService::seeded("note", [(id, "old".to_owned())]);

    // Act
    let replaced = service.update(id, "new".to_owned()).await.unwrap();

    // Assert
    assert!(replaced);
    assert_eq!(fetch_required(&service, id).await.unwrap(), "new");
}

#[tokio::test]
async fn test_delete_reports_whether_anything_was_removed() {
    // Arrange
    let id = Uuid::new_v4();
    let service = MemoryService::seeded("note", [(id, 1_u8)]);

    // Act
    let first = service.delete(id).await.unwrap();
    let second = service.delete(id).await.unwrap();

    // Assert
    assert!(first);
    assert!(!second);
    assert!(service.is_empty().await);
}

#[tokio::test]
async fn test_fetch_all_pairs_entities_with_their_ids() {
    // Arrange
    let a = Uuid::new_v4();
    let b = Uuid::new_v4();
    let service = MemoryService::seeded("note", [(a, 'a'), (b, 'b')]);

    // Act
    let mut all: Vec<(Uuid, char)> = service
        .fetch_all()
        .await
        .unwrap()
        .into_iter()
        .map(|entity| {
            assert!(entity.id().is_some());
            entity.into_parts()
        })
        .collect();
    all.sort_by_key(|(_, c)| *c);

    // Assert
    assert_eq!(all, vec![(a, 'a'), (b, 'b')]);
}

#[tokio::test]
async fn test_concurrent_creates_get_distinct_ids() {
    // Arrange
    let service: Arc<MemoryService<i32>> = Arc::new(MemoryService::new("counter"));

    // Act
    let handles: Vec<_> = (0..32)
        .map(|n| {
            let service = Arc::clone(&service);
            tokio::spawn(async move { service.create(n).await.unwrap() })
        })
        .collect();
    let mut ids = Vec::new();
    for handle in handles {
        ids.push(handle.await.unwrap());
    }
    ids.sort();
    ids.dedup();

    // Assert
    assert_eq!(ids.len(), 32);
    assert_eq!(service.len().await, 32);
}

#[tokio::test]
async fn test_modify_of_missing_entity_is_not_found() {
    // Arrange
    let service: MemoryService<i32> = MemoryService::new("counter");

    // Act
    let result = modify_required(&service, Uuid::new_v4(), |n: &mut i32| {
        *n += 1;
        Ok(())
    })
    .await;

    // Assert
    assert!(matches!(result, Err(DomainError::NotFound(_))));
}

#[tokio::test]
async fn test_rejected_modify_keeps_stored_entity() {
    // Arrange
    let id = Uuid::new_v4();
    let service = MemoryService::seeded("counter", [(id, 5_i32)]);

    // Act
    let result = modify_required(&service, id, |n: &mut i32| -> Result<(), DomainError> {
        *n = -1;
        Err(DomainError::invalid_argument("negative counter"))
    })
    .await;

    // Assert
    assert!(result.unwrap_err().is_invalid_argument());
    assert_eq!(fetch_required(&service, id).await.unwrap(), 5);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_concurrent_modifies_of_one_entity_are_all_applied() {
    // Arrange
    let id = Uuid::new_v4();
    let service = Arc::new(MemoryService::seeded("counter", [(id, 0_i32)]));

    // Act
    let handles: Vec<_> = (0..400)
        .map(|_| {
            let service = Arc::clone(&service);
            tokio::spawn(async move {
                modify_required(&*service, id, |n: &mut i32| {
                    *n += 1;
                    Ok(*n)
                })
                .await
                .unwrap()
            })
        })
        .collect();
    let mut seen = Vec::new();
    for handle in handles {
        seen.push(handle.await.unwrap().1);
    }
    seen.sort_unstable();

    // Assert
    assert_eq!(fetch_required(&*service, id).await.unwrap(), 400);
    assert_eq!(seen, (1..=400).collect::<Vec<i32>>());
}
