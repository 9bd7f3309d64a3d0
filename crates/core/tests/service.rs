//! Integration tests for the todo service, each against a fresh in-memory
//! store.

use std::time::Duration;

use doable_core::{Database, TodoCreate, TodoService, TodoUpdate, DESCRIPTION_MAX_LEN, TITLE_MAX_LEN};

async fn fresh_service() -> TodoService {
    let db = Database::in_memory().await.expect("in-memory store");
    db.ensure_schema().await.expect("schema creation");
    TodoService::new(db)
}

fn sample_input() -> TodoCreate {
    TodoCreate {
        title: "Test Todo".to_string(),
        description: "This is a test todo item".to_string(),
    }
}

// Mutations within the same test can land on the same clock reading; a short
// pause keeps the updated_at comparisons strict.
async fn let_clock_advance() {
    tokio::time::sleep(Duration::from_millis(5)).await;
}

#[tokio::test]
async fn create_assigns_id_and_stamps_both_timestamps() {
    let service = fresh_service().await;

    let todo = service.create(sample_input()).await.unwrap();

    assert!(todo.id > 0);
    assert_eq!(todo.title, "Test Todo");
    assert_eq!(todo.description, "This is a test todo item");
    assert!(!todo.completed);
    assert_eq!(todo.created_at, todo.updated_at);
}

#[tokio::test]
async fn create_with_minimal_input_defaults_description() {
    let service = fresh_service().await;

    let todo = service
        .create(TodoCreate {
            title: "Minimal Todo".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(todo.title, "Minimal Todo");
    assert_eq!(todo.description, "");
    assert!(!todo.completed);
}

#[tokio::test]
async fn create_accepts_empty_title() {
    // Empty titles are a presentation-layer rule; the store persists them.
    let service = fresh_service().await;

    let todo = service.create(TodoCreate::default()).await.unwrap();

    assert_eq!(todo.title, "");
    assert_eq!(service.get(todo.id).await.unwrap().unwrap().title, "");
}

#[tokio::test]
async fn list_on_empty_store_returns_empty_vec() {
    let service = fresh_service().await;

    let todos = service.list().await.unwrap();

    assert!(todos.is_empty());
}

#[tokio::test]
async fn list_orders_newest_first() {
    let service = fresh_service().await;

    for title in ["First", "Second", "Third"] {
        service
            .create(TodoCreate {
                title: title.to_string(),
                ..Default::default()
            })
            .await
            .unwrap();
    }

    let titles: Vec<String> = service
        .list()
        .await
        .unwrap()
        .into_iter()
        .map(|todo| todo.title)
        .collect();

    assert_eq!(titles, ["Third", "Second", "First"]);
}

#[tokio::test]
async fn get_returns_persisted_todo() {
    let service = fresh_service().await;
    let created = service.create(sample_input()).await.unwrap();

    let retrieved = service.get(created.id).await.unwrap().unwrap();

    assert_eq!(retrieved, created);
}

#[tokio::test]
async fn get_on_missing_id_returns_none() {
    let service = fresh_service().await;

    assert!(service.get(999).await.unwrap().is_none());
}

#[tokio::test]
async fn update_applies_all_present_fields() {
    let service = fresh_service().await;
    let created = service.create(sample_input()).await.unwrap();

    let_clock_advance().await;
    let updated = service
        .update(
            created.id,
            TodoUpdate {
                title: Some("Updated Todo".to_string()),
                description: Some("Updated description".to_string()),
                completed: Some(true),
            },
        )
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.title, "Updated Todo");
    assert_eq!(updated.description, "Updated description");
    assert!(updated.completed);
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at > created.updated_at);
}

#[tokio::test]
async fn partial_update_keeps_absent_fields() {
    let service = fresh_service().await;
    let created = service.create(sample_input()).await.unwrap();

    let_clock_advance().await;
    let updated = service
        .update(
            created.id,
            TodoUpdate {
                completed: Some(true),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.title, created.title);
    assert_eq!(updated.description, created.description);
    assert!(updated.completed);
    assert!(updated.updated_at > created.updated_at);
}

#[tokio::test]
async fn update_on_missing_id_returns_none() {
    let service = fresh_service().await;

    let result = service
        .update(
            999,
            TodoUpdate {
                title: Some("Nobody home".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert!(result.is_none());
}

#[tokio::test]
async fn toggle_flips_completion_and_back() {
    let service = fresh_service().await;
    let created = service.create(sample_input()).await.unwrap();

    let toggled = service.toggle(created.id).await.unwrap().unwrap();
    assert!(toggled.completed);

    let restored = service.toggle(created.id).await.unwrap().unwrap();
    assert!(!restored.completed);
}

#[tokio::test]
async fn toggle_refreshes_updated_at() {
    let service = fresh_service().await;
    let created = service.create(sample_input()).await.unwrap();

    let_clock_advance().await;
    let toggled = service.toggle(created.id).await.unwrap().unwrap();

    assert!(toggled.updated_at > created.updated_at);
    assert_eq!(toggled.created_at, created.created_at);
}

#[tokio::test]
async fn toggle_on_missing_id_returns_none() {
    let service = fresh_service().await;

    assert!(service.toggle(999).await.unwrap().is_none());
}

#[tokio::test]
async fn toggle_leaves_other_rows_untouched() {
    let service = fresh_service().await;
    let first = service
        .create(TodoCreate {
            title: "Todo 1".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();
    service
        .create(TodoCreate {
            title: "Todo 2".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();

    service.toggle(first.id).await.unwrap();

    let todos = service.list().await.unwrap();
    let todo1 = todos.iter().find(|t| t.title == "Todo 1").unwrap();
    let todo2 = todos.iter().find(|t| t.title == "Todo 2").unwrap();
    assert!(todo1.completed);
    assert!(!todo2.completed);
}

#[tokio::test]
async fn delete_removes_the_row() {
    let service = fresh_service().await;
    let created = service.create(sample_input()).await.unwrap();

    assert!(service.delete(created.id).await.unwrap());
    assert!(service.get(created.id).await.unwrap().is_none());
    assert!(service.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn delete_on_missing_id_returns_false() {
    let service = fresh_service().await;

    assert!(!service.delete(999).await.unwrap());
}

#[tokio::test]
async fn boundary_lengths_round_trip_unchanged() {
    let service = fresh_service().await;

    let title = "A".repeat(TITLE_MAX_LEN);
    let description = "B".repeat(DESCRIPTION_MAX_LEN);
    let todo = service
        .create(TodoCreate {
            title: title.clone(),
            description: description.clone(),
        })
        .await
        .unwrap();

    let retrieved = service.get(todo.id).await.unwrap().unwrap();
    assert_eq!(retrieved.title, title);
    assert_eq!(retrieved.description, description);
}

#[tokio::test]
async fn full_lifecycle() {
    let service = fresh_service().await;

    let created = service
        .create(TodoCreate {
            title: "Lifecycle Todo".to_string(),
            description: "Test lifecycle".to_string(),
        })
        .await
        .unwrap();

    let retrieved = service.get(created.id).await.unwrap().unwrap();
    assert_eq!(retrieved.title, "Lifecycle Todo");

    let updated = service
        .update(
            created.id,
            TodoUpdate {
                title: Some("Updated Lifecycle Todo".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.title, "Updated Lifecycle Todo");

    let toggled = service.toggle(created.id).await.unwrap().unwrap();
    assert!(toggled.completed);

    assert!(service.delete(created.id).await.unwrap());
    assert!(service.get(created.id).await.unwrap().is_none());
}

#[tokio::test]
async fn reset_clears_the_store() {
    let service = fresh_service().await;
    service.create(sample_input()).await.unwrap();

    service.database().reset().await.unwrap();

    assert!(service.list().await.unwrap().is_empty());
}
