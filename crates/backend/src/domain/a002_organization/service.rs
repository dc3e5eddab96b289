use super::repository;
use contracts::domain::a002_organization::aggregate::Organization;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

/// Пользователь, которому выдаются тестовые организации
pub const DEMO_USER_KEY: &str = "demo";

/// Список организаций; с `user_key` только те, где пользователь состоит
pub async fn list(db: &DatabaseConnection, user_key: Option<&str>) -> anyhow::Result<Vec<Organization>> {
    match user_key {
        Some(user_key) => repository::list_for_member(db, user_key).await,
        None => repository::list_all(db).await,
    }
}

/// Получение организации по ID
pub async fn get_by_id(db: &DatabaseConnection, id: Uuid) -> anyhow::Result<Option<Organization>> {
    repository::get_by_id(db, id).await
}

/// Существующие организации из списка id
pub async fn find_by_ids(db: &DatabaseConnection, ids: &[String]) -> anyhow::Result<Vec<Organization>> {
    repository::find_by_ids(db, ids).await
}

/// Создание новой организации
pub async fn create(db: &DatabaseConnection, organization: Organization) -> anyhow::Result<Uuid> {
    organization
        .validate()
        .map_err(|e| anyhow::anyhow!("Validation failed: {}", e))?;
    repository::insert(db, &organization).await
}

/// Вставка тестовых данных: три организации, доступные пользователю `demo`.
/// Уже существующие (по коду) не дублируются.
pub async fn insert_test_data(db: &DatabaseConnection) -> anyhow::Result<Vec<Organization>> {
    let data = [
        ("ORG-001", "ООО \"Рога и Копыта\"", "Общество с ограниченной ответственностью \"Рога и Копыта\"", "7701234567", "770101001"),
        ("ORG-002", "ИП Иванов", "Индивидуальный предприниматель Иванов Иван Иванович", "500100732259", ""),
        ("ORG-003", "АО \"Север\"", "Акционерное общество \"Север\"", "7802345678", "780201001"),
    ];

    let mut result = Vec::with_capacity(data.len());
    for (code, description, full_name, inn, kpp) in data {
        let organization = match repository::get_by_code(db, code).await? {
            Some(existing) => existing,
            None => {
                let organization = Organization::new_for_insert(
                    code.to_string(),
                    description.to_string(),
                    full_name.to_string(),
                    inn.to_string(),
                    kpp.to_string(),
                    None,
                );
                create(db, organization.clone()).await?;
                tracing::info!("Created test organization {}", code);
                organization
            }
        };
        repository::add_member(db, DEMO_USER_KEY, organization.id.value()).await?;
        result.push(organization);
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::db::test_connection;

    #[tokio::test]
    async fn test_insert_test_data_is_idempotent() {
        let db = test_connection().await;

        let first = insert_test_data(&db).await.unwrap();
        let second = insert_test_data(&db).await.unwrap();

        assert_eq!(first.len(), 3);
        assert_eq!(
            first.iter().map(|o| o.id).collect::<Vec<_>>(),
            second.iter().map(|o| o.id).collect::<Vec<_>>()
        );
        assert_eq!(list(&db, None).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_list_for_member() {
        let db = test_connection().await;
        let orgs = insert_test_data(&db).await.unwrap();

        assert_eq!(list(&db, Some(DEMO_USER_KEY)).await.unwrap().len(), 3);
        assert!(list(&db, Some("stranger")).await.unwrap().is_empty());

        let found = get_by_id(&db, orgs[0].id.value()).await.unwrap();
        assert_eq!(found.map(|o| o.code), Some("ORG-001".to_string()));
    }
}
