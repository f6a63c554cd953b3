use group_memory_bot::bot::handlers::archive::attach_birthday_photo_if_pending;
use group_memory_bot::database::{connection::DatabaseManager, models::BirthdayEntry};
use tempfile::TempDir;

/// Helper function to create a test database
async fn create_test_db() -> (DatabaseManager, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let db_path = temp_dir.path().join("test.db");
    let db_url = format!("sqlite:{}", db_path.display());

    let db = DatabaseManager::new(&db_url)
        .await
        .expect("Failed to create test database");

    db.init_schema().await.expect("Failed to initialize schema");

    (db, temp_dir)
}

#[tokio::test]
async fn test_photo_handler_database_operations() {
    let (db, _temp_dir) = create_test_db().await;
    let chat_id = -1001234567890_i64;
    let user_id = 123456789_i64;

    // Register a birthday the way the /birthday command does
    BirthdayEntry::upsert(&db.pool, user_id, chat_id, "alice", "03-15")
        .await
        .expect("Failed to register birthday");

    // The first photo the user posts is stored for the celebration
    let attached = attach_birthday_photo_if_pending(&db, user_id, chat_id, "photo-1")
        .await
        .expect("Failed to attach first photo");
    assert!(attached, "First photo should be attached");

    // A second photo goes through the same flow but must not overwrite
    let attached = attach_birthday_photo_if_pending(&db, user_id, chat_id, "photo-2")
        .await
        .expect("Failed to process second photo");
    assert!(!attached, "Second photo should be ignored");

    let entry = BirthdayEntry::find(&db.pool, user_id, chat_id)
        .await
        .expect("Failed to find birthday")
        .expect("Birthday not found");
    assert_eq!(entry.photo_file_id.as_deref(), Some("photo-1"));
}

#[tokio::test]
async fn test_photo_without_birthday_entry_is_ignored() {
    let (db, _temp_dir) = create_test_db().await;

    let attached = attach_birthday_photo_if_pending(&db, 42, -100, "photo-1")
        .await
        .expect("Failed to process photo");
    assert!(!attached, "Photo without a birthday entry should be ignored");

    assert!(BirthdayEntry::find(&db.pool, 42, -100)
        .await
        .expect("Failed to query birthday")
        .is_none());
}

#[tokio::test]
async fn test_reregistration_reopens_the_photo_slot() {
    let (db, _temp_dir) = create_test_db().await;
    let chat_id = -1001234567890_i64;
    let user_id = 123456789_i64;

    BirthdayEntry::upsert(&db.pool, user_id, chat_id, "alice", "03-15")
        .await
        .expect("Failed to register birthday");
    attach_birthday_photo_if_pending(&db, user_id, chat_id, "photo-1")
        .await
        .expect("Failed to attach first photo");

    // Re-registering clears the stored photo, so the next photo through the
    // handler flow becomes the new celebration photo
    BirthdayEntry::upsert(&db.pool, user_id, chat_id, "alice", "07-04")
        .await
        .expect("Failed to re-register birthday");

    let attached = attach_birthday_photo_if_pending(&db, user_id, chat_id, "photo-2")
        .await
        .expect("Failed to attach replacement photo");
    assert!(attached, "Photo slot should be open again after re-registration");

    let entry = BirthdayEntry::find(&db.pool, user_id, chat_id)
        .await
        .expect("Failed to find birthday")
        .expect("Birthday not found");
    assert_eq!(entry.photo_file_id.as_deref(), Some("photo-2"));
}

#[tokio::test]
async fn test_photo_is_scoped_to_the_chat_of_the_entry() {
    let (db, _temp_dir) = create_test_db().await;
    let user_id = 123456789_i64;

    BirthdayEntry::upsert(&db.pool, user_id, -100, "alice", "03-15")
        .await
        .expect("Failed to register birthday");

    // A photo posted in a chat without an entry attaches nothing
    let attached = attach_birthday_photo_if_pending(&db, user_id, -200, "photo-1")
        .await
        .expect("Failed to process photo");
    assert!(!attached);

    let entry = BirthdayEntry::find(&db.pool, user_id, -100)
        .await
        .expect("Failed to find birthday")
        .expect("Birthday not found");
    assert!(entry.photo_file_id.is_none());
}
