use contracts::shared::dashboard_layout::DashboardLayout;
use sea_orm::DatabaseConnection;

use super::repository;

/// Раскладка виджетов пользователя; по умолчанию, если не сохранена или повреждена
pub async fn get_layout(db: &DatabaseConnection, user_key: &str) -> anyhow::Result<DashboardLayout> {
    let mut layout = match repository::load_layout_json(db, user_key).await? {
        Some(json) => serde_json::from_str::<DashboardLayout>(&json).unwrap_or_else(|e| {
            tracing::warn!("Stored layout of '{}' is unreadable, using default: {}", user_key, e);
            DashboardLayout::default()
        }),
        None => DashboardLayout::default(),
    };
    layout.normalize();
    Ok(layout)
}

/// Нормализовать и сохранить раскладку
pub async fn save_layout(
    db: &DatabaseConnection,
    user_key: &str,
    mut layout: DashboardLayout,
) -> anyhow::Result<DashboardLayout> {
    if user_key.trim().is_empty() {
        anyhow::bail!("user_key is empty");
    }
    layout.normalize();
    repository::save_layout_json(db, user_key, serde_json::to_string(&layout)?).await?;
    Ok(layout)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::db::test_connection;
    use contracts::reports::ReportKind;

    #[tokio::test]
    async fn test_default_layout_when_absent() {
        let db = test_connection().await;

        let layout = get_layout(&db, "nobody").await.unwrap();

        assert_eq!(layout, DashboardLayout::default());
    }

    #[tokio::test]
    async fn test_save_then_load_layout() {
        let db = test_connection().await;
        let mut layout = DashboardLayout::default();
        assert!(layout.move_widget(4, 0));
        assert!(layout.set_visible(ReportKind::Payables, false));

        save_layout(&db, "demo", layout.clone()).await.unwrap();
        let loaded = get_layout(&db, "demo").await.unwrap();

        assert_eq!(loaded.widgets[0].widget, ReportKind::PlanFact);
        assert!(!loaded.visible_widgets().contains(&ReportKind::Payables));
        assert_eq!(loaded, layout);
    }

    #[tokio::test]
    async fn test_save_rejects_empty_user() {
        let db = test_connection().await;
        assert!(save_layout(&db, " ", DashboardLayout::default()).await.is_err());
    }
}
