use crate::{
    database::Database,
    models::{User, UserPayload},
    utils::error::AppError,
};
use chrono::{DateTime, Duration, Utc};

const USER_COLUMNS: &str = "id, name, email, phone, created_at, updated_at";

/// Lista todos os usuários em ordem de criação
pub async fn list_users(db: &Database) -> Result<Vec<User>, AppError> {
    let sql = format!("SELECT {USER_COLUMNS} FROM users ORDER BY created_at ASC, id ASC");
    let users = sqlx::query_as::<_, User>(&sql)
        .fetch_all(db.pool())
        .await?;

    Ok(users)
}

pub async fn create_user(db: &Database, payload: UserPayload) -> Result<User, AppError> {
    payload.validate()?;

    let now = Utc::now();
    let sql = format!(
        "INSERT INTO users (name, email, phone, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?) RETURNING {USER_COLUMNS}"
    );
    let user = sqlx::query_as::<_, User>(&sql)
        .bind(&payload.name)
        .bind(&payload.email)
        .bind(payload.phone)
        .bind(now)
        .bind(now)
        .fetch_one(db.pool())
        .await?;

    log::info!("✅ User {} created", user.id);
    Ok(user)
}

pub async fn get_user(db: &Database, id: i64) -> Result<User, AppError> {
    let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?");
    sqlx::query_as::<_, User>(&sql)
        .bind(id)
        .fetch_optional(db.pool())
        .await?
        .ok_or(AppError::NotFound)
}

/// Substitui name, email e phone. Leitura e escrita na mesma transação.
///
/// `BEGIN IMMEDIATE`: o lock de escrita é obtido antes do SELECT, sob o `busy_timeout`.
pub async fn update_user(db: &Database, id: i64, payload: UserPayload) -> Result<User, AppError> {
    payload.validate()?;

    let mut tx = db.pool().begin_with("BEGIN IMMEDIATE").await?;

    let select = format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?");
    let current = sqlx::query_as::<_, User>(&select)
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(AppError::NotFound)?;

    let updated_at = next_updated_at(current.updated_at, Utc::now());
    let update = format!(
        "UPDATE users SET name = ?, email = ?, phone = ?, updated_at = ? \
         WHERE id = ? RETURNING {USER_COLUMNS}"
    );
    let user = sqlx::query_as::<_, User>(&update)
        .bind(&payload.name)
        .bind(&payload.email)
        .bind(payload.phone)
        .bind(updated_at)
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

    tx.commit().await?;

    log::info!("✅ User {} updated", id);
    Ok(user)
}

pub async fn delete_user(db: &Database, id: i64) -> Result<(), AppError> {
    let result = sqlx::query("DELETE FROM users WHERE id = ?")
        .bind(id)
        .execute(db.pool())
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound);
    }

    log::info!("🗑️  User {} deleted", id);
    Ok(())
}

/// `updated_at` sempre avança, mesmo se o relógio não andou desde a última escrita
fn next_updated_at(previous: DateTime<Utc>, now: DateTime<Utc>) -> DateTime<Utc> {
    if now > previous {
        now
    } else {
        previous + Duration::microseconds(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MAX_NAME_LEN;

    fn payload(name: &str, email: &str, phone: i64) -> UserPayload {
        UserPayload {
            name: name.to_string(),
            email: email.to_string(),
            phone,
        }
    }

    #[test]
    fn test_next_updated_at_bumps_stale_clock() {
        let previous = Utc::now();
        let stale = previous - Duration::seconds(3);

        assert!(next_updated_at(previous, stale) > previous);
        assert!(next_updated_at(previous, previous) > previous);

        let later = previous + Duration::seconds(1);
        assert_eq!(next_updated_at(previous, later), later);
    }

    #[tokio::test]
    async fn test_create_then_list() {
        let db = Database::in_memory().await.unwrap();

        let created = create_user(&db, payload("Ann", "ann@x.com", 5551234)).await.unwrap();
        assert_eq!(created.id, 1);
        assert_eq!(created.created_at, created.updated_at);

        let users = list_users(&db).await.unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].name, "Ann");
        assert_eq!(users[0].email, "ann@x.com");
        assert_eq!(users[0].phone, 5551234);
    }

    #[tokio::test]
    async fn test_list_is_ordered_by_creation() {
        let db = Database::in_memory().await.unwrap();
        for (i, name) in ["first", "second", "third"].iter().enumerate() {
            create_user(&db, payload(name, &format!("{name}@x.com"), i as i64))
                .await
                .unwrap();
        }

        let names: Vec<_> = list_users(&db)
            .await
            .unwrap()
            .into_iter()
            .map(|u| u.name)
            .collect();
        assert_eq!(names, vec!["first", "second", "third"]);
    }

    #[tokio::test]
    async fn test_duplicate_email_is_conflict() {
        let db = Database::in_memory().await.unwrap();
        create_user(&db, payload("Ann", "ann@x.com", 1)).await.unwrap();

        let err = create_user(&db, payload("Other", "ann@x.com", 2)).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict));
        assert_eq!(list_users(&db).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_get_missing_user() {
        let db = Database::in_memory().await.unwrap();
        assert!(matches!(get_user(&db, 9999).await, Err(AppError::NotFound)));
    }

    #[tokio::test]
    async fn test_update_keeps_identity_and_advances_updated_at() {
        let db = Database::in_memory().await.unwrap();
        let before = create_user(&db, payload("Ann", "ann@x.com", 5551234)).await.unwrap();

        update_user(&db, before.id, payload("Ann B", "ann@x.com", 5551235))
            .await
            .unwrap();
        let after = get_user(&db, before.id).await.unwrap();

        assert_eq!(after.id, before.id);
        assert_eq!(after.name, "Ann B");
        assert_eq!(after.email, "ann@x.com");
        assert_eq!(after.phone, 5551235);
        assert_eq!(after.created_at, before.created_at);
        assert!(after.updated_at > before.updated_at);
        assert!(after.created_at <= after.updated_at);
    }

    #[tokio::test]
    async fn test_update_to_taken_email_is_conflict() {
        let db = Database::in_memory().await.unwrap();
        create_user(&db, payload("Ann", "ann@x.com", 1)).await.unwrap();
        let bob = create_user(&db, payload("Bob", "bob@x.com", 2)).await.unwrap();

        let err = update_user(&db, bob.id, payload("Bob", "ann@x.com", 2))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict));
        assert_eq!(get_user(&db, bob.id).await.unwrap().email, "bob@x.com");
    }

    #[tokio::test]
    async fn test_update_missing_user() {
        let db = Database::in_memory().await.unwrap();
        let err = update_user(&db, 42, payload("Ann", "ann@x.com", 1)).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound));
    }

    #[tokio::test]
    async fn test_delete_then_get() {
        let db = Database::in_memory().await.unwrap();
        let user = create_user(&db, payload("Ann", "ann@x.com", 1)).await.unwrap();

        delete_user(&db, user.id).await.unwrap();
        assert!(matches!(get_user(&db, user.id).await, Err(AppError::NotFound)));
        assert!(matches!(delete_user(&db, user.id).await, Err(AppError::NotFound)));
    }

    #[tokio::test]
    async fn test_invalid_payload_never_reaches_store() {
        let db = Database::in_memory().await.unwrap();
        let err = create_user(&db, payload("", "ann@x.com", 1)).await.unwrap_err();
        assert!(matches!(err, AppError::ValidationFailed(_)));
        assert!(list_users(&db).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_store_constraints_map_to_validation() {
        let db = Database::in_memory().await.unwrap();

        let err = sqlx::query("INSERT INTO users (name, email, phone) VALUES (?, ?, ?)")
            .bind("a".repeat(MAX_NAME_LEN + 1))
            .bind("long@x.com")
            .bind(1_i64)
            .execute(db.pool())
            .await
            .unwrap_err();
        assert!(matches!(AppError::from(err), AppError::ValidationFailed(_)));

        let err = sqlx::query("INSERT INTO users (name, email, phone) VALUES (NULL, ?, ?)")
            .bind("null@x.com")
            .bind(1_i64)
            .execute(db.pool())
            .await
            .unwrap_err();
        assert!(matches!(AppError::from(err), AppError::ValidationFailed(_)));

        assert!(list_users(&db).await.unwrap().is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_updates_on_file_database() {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite://{}", dir.path().join("users.db").display());
        let db = Database::connect(&url, 5).await.unwrap();
        db.run_migrations().await.unwrap();

        let mut ids = Vec::new();
        for i in 0..20 {
            let user = create_user(&db, payload("user", &format!("user{i}@x.com"), i))
                .await
                .unwrap();
            ids.push(user.id);
        }

        let mut handles = Vec::new();
        for round in 0..10 {
            for (i, id) in ids.iter().copied().enumerate() {
                let db = db.clone();
                handles.push(tokio::spawn(async move {
                    let email = format!("user{i}@x.com");
                    update_user(&db, id, payload(&format!("round {round}"), &email, round))
                        .await
                }));
            }
        }

        let mut failures = 0;
        for handle in handles {
            if handle.await.unwrap().is_err() {
                failures += 1;
            }
        }
        assert_eq!(failures, 0);

        for id in ids {
            let user = get_user(&db, id).await.unwrap();
            assert!(user.name.starts_with("round "));
            assert!(user.created_at < user.updated_at);
        }
    }

    #[tokio::test]
    async fn test_closed_pool_is_store_unavailable() {
        let db = Database::in_memory().await.unwrap();
        db.pool().close().await;
        assert!(matches!(
            list_users(&db).await,
            Err(AppError::StoreUnavailable(_))
        ));
    }
}
