use chrono::Utc;
use contracts::domain::a002_organization::aggregate::{Organization, OrganizationId};
use sea_orm::entity::prelude::*;
use sea_orm::{ConnectionTrait, DatabaseBackend, EntityTrait, QueryFilter, QueryOrder, Set, Statement};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "a002_organization")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub code: String,
    pub description: String,
    pub full_name: String,
    pub inn: String,
    pub kpp: String,
    pub comment: Option<String>,
    pub is_deleted: bool,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Organization {
    fn from(m: Model) -> Self {
        let uuid = Uuid::parse_str(&m.id).unwrap_or_else(|_| {
            tracing::warn!("Organization {} has a non-UUID id", m.id);
            Uuid::nil()
        });
        Organization {
            id: OrganizationId(uuid),
            code: m.code,
            description: m.description,
            full_name: m.full_name,
            inn: m.inn,
            kpp: m.kpp,
            comment: m.comment,
            created_at: m.created_at.unwrap_or_else(Utc::now),
            updated_at: m.updated_at.unwrap_or_else(Utc::now),
        }
    }
}

pub async fn list_all(db: &DatabaseConnection) -> anyhow::Result<Vec<Organization>> {
    let items = Entity::find()
        .filter(Column::IsDeleted.eq(false))
        .order_by_asc(Column::Description)
        .all(db)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

/// Организации, в которых состоит пользователь
pub async fn list_for_member(db: &DatabaseConnection, user_key: &str) -> anyhow::Result<Vec<Organization>> {
    let sql = r#"
        SELECT o.*
        FROM a002_organization o
        JOIN organization_member m ON m.organization_id = o.id
        WHERE m.user_key = ? AND o.is_deleted = 0
        ORDER BY o.description
    "#;
    let items = Entity::find()
        .from_raw_sql(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            sql,
            [user_key.into()],
        ))
        .all(db)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

pub async fn get_by_id(db: &DatabaseConnection, id: Uuid) -> anyhow::Result<Option<Organization>> {
    let result = Entity::find_by_id(id.to_string())
        .filter(Column::IsDeleted.eq(false))
        .one(db)
        .await?;
    Ok(result.map(Into::into))
}

/// Those of `ids` that name an existing, not deleted organization
pub async fn find_by_ids(db: &DatabaseConnection, ids: &[String]) -> anyhow::Result<Vec<Organization>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    let items = Entity::find()
        .filter(Column::Id.is_in(ids.iter().cloned()))
        .filter(Column::IsDeleted.eq(false))
        .order_by_asc(Column::Description)
        .all(db)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

pub async fn get_by_code(db: &DatabaseConnection, code: &str) -> anyhow::Result<Option<Organization>> {
    let result = Entity::find()
        .filter(Column::Code.eq(code))
        .filter(Column::IsDeleted.eq(false))
        .one(db)
        .await?;
    Ok(result.map(Into::into))
}

pub async fn insert(db: &DatabaseConnection, aggregate: &Organization) -> anyhow::Result<Uuid> {
    let uuid = aggregate.id.value();
    let active = ActiveModel {
        id: Set(uuid.to_string()),
        code: Set(aggregate.code.clone()),
        description: Set(aggregate.description.clone()),
        full_name: Set(aggregate.full_name.clone()),
        inn: Set(aggregate.inn.clone()),
        kpp: Set(aggregate.kpp.clone()),
        comment: Set(aggregate.comment.clone()),
        is_deleted: Set(false),
        created_at: Set(Some(aggregate.created_at)),
        updated_at: Set(Some(aggregate.updated_at)),
    };
    active.insert(db).await?;
    Ok(uuid)
}

/// Добавить пользователя в организацию (повторное добавление игнорируется)
pub async fn add_member(db: &DatabaseConnection, user_key: &str, organization_id: Uuid) -> anyhow::Result<()> {
    db.execute(Statement::from_sql_and_values(
        DatabaseBackend::Sqlite,
        "INSERT OR IGNORE INTO organization_member (user_key, organization_id) VALUES (?, ?)",
        [user_key.into(), organization_id.to_string().into()],
    ))
    .await?;
    Ok(())
}
