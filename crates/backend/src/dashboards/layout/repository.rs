use chrono::Utc;
use sea_orm::{ConnectionTrait, DatabaseBackend, DatabaseConnection, Statement};

/// Сохранённый JSON раскладки пользователя
pub async fn load_layout_json(db: &DatabaseConnection, user_key: &str) -> anyhow::Result<Option<String>> {
    let row = db
        .query_one(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "SELECT layout_json FROM user_dashboard_layout WHERE user_key = ?",
            [user_key.into()],
        ))
        .await?;

    match row {
        Some(row) => Ok(Some(row.try_get::<String>("", "layout_json")?)),
        None => Ok(None),
    }
}

pub async fn save_layout_json(db: &DatabaseConnection, user_key: &str, layout_json: String) -> anyhow::Result<()> {
    let query = r#"
        INSERT INTO user_dashboard_layout (user_key, layout_json, updated_at)
        VALUES (?, ?, ?)
        ON CONFLICT(user_key) DO UPDATE SET
            layout_json = excluded.layout_json,
            updated_at = excluded.updated_at
    "#;

    db.execute(Statement::from_sql_and_values(
        DatabaseBackend::Sqlite,
        query,
        [
            user_key.into(),
            layout_json.into(),
            Utc::now().to_rfc3339().into(),
        ],
    ))
    .await?;
    Ok(())
}
