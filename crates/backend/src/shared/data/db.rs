use sea_orm::{ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, Statement};
use std::path::Path;

/// Схема хранилища отчётов
const SCHEMA: &[(&str, &str)] = &[
    (
        "a002_organization",
        r#"
        CREATE TABLE IF NOT EXISTS a002_organization (
            id TEXT PRIMARY KEY NOT NULL,
            code TEXT NOT NULL DEFAULT '',
            description TEXT NOT NULL,
            full_name TEXT NOT NULL DEFAULT '',
            inn TEXT NOT NULL DEFAULT '',
            kpp TEXT NOT NULL DEFAULT '',
            comment TEXT,
            is_deleted INTEGER NOT NULL DEFAULT 0,
            created_at TEXT,
            updated_at TEXT
        );
        "#,
    ),
    (
        "organization_member",
        r#"
        CREATE TABLE IF NOT EXISTS organization_member (
            user_key TEXT NOT NULL,
            organization_id TEXT NOT NULL,
            PRIMARY KEY (user_key, organization_id)
        );
        "#,
    ),
    (
        "report_row",
        r#"
        CREATE TABLE IF NOT EXISTS report_row (
            report_kind TEXT NOT NULL,
            report_date TEXT NOT NULL,
            organization_id TEXT NOT NULL,
            row_id TEXT NOT NULL,
            parent_id TEXT,
            level INTEGER NOT NULL DEFAULT 0,
            organization_name TEXT,
            is_total_row INTEGER NOT NULL DEFAULT 0,
            name TEXT NOT NULL DEFAULT '',
            sort_order INTEGER NOT NULL DEFAULT 0,
            payload_json TEXT NOT NULL DEFAULT '{}',
            PRIMARY KEY (report_kind, report_date, row_id)
        );
        "#,
    ),
    (
        "idx_report_row_lookup",
        r#"
        CREATE INDEX IF NOT EXISTS idx_report_row_lookup
            ON report_row (report_kind, report_date, organization_id);
        "#,
    ),
    (
        "user_dashboard_layout",
        r#"
        CREATE TABLE IF NOT EXISTS user_dashboard_layout (
            user_key TEXT PRIMARY KEY NOT NULL,
            layout_json TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );
        "#,
    ),
];

/// Открыть (и при необходимости создать) файл SQLite
pub async fn connect(db_file: &Path) -> anyhow::Result<DatabaseConnection> {
    if let Some(parent) = db_file.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let absolute_path = if db_file.is_absolute() {
        db_file.to_path_buf()
    } else {
        std::env::current_dir()?.join(db_file)
    };
    // Normalize path separators and ensure proper URL form on Windows
    let normalized = absolute_path.to_string_lossy().replace('\\', "/");
    let needs_leading_slash = !normalized.starts_with('/') && normalized.contains(':');
    let prefix = if needs_leading_slash { "/" } else { "" };
    let db_url = format!("sqlite://{}{}?mode=rwc", prefix, normalized);

    tracing::info!("Connecting to database {}", absolute_path.display());
    let conn = Database::connect(&db_url).await?;
    Ok(conn)
}

/// Создать недостающие таблицы
pub async fn bootstrap_schema(conn: &DatabaseConnection) -> anyhow::Result<()> {
    for (name, sql) in SCHEMA {
        conn.execute(Statement::from_string(DatabaseBackend::Sqlite, sql.to_string()))
            .await
            .map_err(|e| anyhow::anyhow!("Failed to create {}: {}", name, e))?;
        tracing::debug!("Schema object {} is ready", name);
    }
    Ok(())
}

/// Подключение + схема
pub async fn initialize_database(db_file: &Path) -> anyhow::Result<DatabaseConnection> {
    let conn = connect(db_file).await?;
    bootstrap_schema(&conn).await?;
    Ok(conn)
}

/// Temporary database for tests
#[cfg(test)]
pub async fn test_connection() -> DatabaseConnection {
    let path = std::env::temp_dir().join(format!("reports-test-{}.db", uuid::Uuid::new_v4()));
    initialize_database(&path).await.unwrap()
}
