use chrono::NaiveDate;
use contracts::reports::ReportKind;
use sea_orm::{
    ConnectionTrait, DatabaseBackend, DatabaseConnection, FromQueryResult, Statement, TransactionTrait, Value,
};
use serde_json::{Map, Value as JsonValue};

/// Строка отчёта в том виде, в каком она лежит в `report_row`
#[derive(Debug, Clone, FromQueryResult)]
pub struct StoredReportRow {
    pub row_id: String,
    pub parent_id: Option<String>,
    pub level: i32,
    pub organization_id: String,
    pub organization_name: Option<String>,
    pub is_total_row: bool,
    pub name: String,
    pub payload_json: String,
}

impl StoredReportRow {
    /// Plain JSON row of the report: payload measures plus structural fields.
    ///
    /// Organization id and name are only attached to rows without a parent.
    pub fn into_json(self, kind: ReportKind) -> anyhow::Result<JsonValue> {
        let mut object = match serde_json::from_str::<JsonValue>(&self.payload_json)? {
            JsonValue::Object(map) => map,
            JsonValue::Null => Map::new(),
            other => anyhow::bail!("Row {} has a non-object payload: {}", self.row_id, other),
        };

        let parent_id = self.parent_id.filter(|p| !p.is_empty());
        let is_root = parent_id.is_none();

        object.insert("id".into(), JsonValue::String(self.row_id));
        object.insert(
            "parent_id".into(),
            parent_id.map(JsonValue::String).unwrap_or(JsonValue::Null),
        );
        object.insert("level".into(), JsonValue::from(self.level.max(0)));
        object.insert("is_total_row".into(), JsonValue::Bool(self.is_total_row));
        object.insert(kind.name_field().into(), JsonValue::String(self.name));
        if is_root {
            object.insert("organization_id".into(), JsonValue::String(self.organization_id));
            object.insert(
                "organization_name".into(),
                self.organization_name.map(JsonValue::String).unwrap_or(JsonValue::Null),
            );
        }
        Ok(JsonValue::Object(object))
    }
}

/// Входная строка для сохранения снимка отчёта
#[derive(Debug, Clone)]
pub struct NewReportRow {
    pub row_id: String,
    pub parent_id: Option<String>,
    pub level: i32,
    pub is_total_row: bool,
    pub name: String,
    /// Measures of the row, stored as is
    pub payload: JsonValue,
}

fn placeholders(count: usize) -> String {
    vec!["?"; count].join(", ")
}

/// Rows of one report snapshot, ordered by organization and stored order
pub async fn load_rows(
    db: &DatabaseConnection,
    kind: ReportKind,
    report_date: NaiveDate,
    organization_ids: &[String],
) -> anyhow::Result<Vec<StoredReportRow>> {
    if organization_ids.is_empty() {
        return Ok(Vec::new());
    }

    let sql = format!(
        r#"
        SELECT
            r.row_id,
            r.parent_id,
            r.level,
            r.organization_id,
            COALESCE(r.organization_name, o.description) AS organization_name,
            r.is_total_row,
            r.name,
            r.payload_json
        FROM report_row r
        LEFT JOIN a002_organization o ON o.id = r.organization_id
        WHERE r.report_kind = ?
          AND r.report_date = ?
          AND r.organization_id IN ({})
        ORDER BY COALESCE(o.description, r.organization_id), r.organization_id, r.sort_order
        "#,
        placeholders(organization_ids.len())
    );

    let mut values: Vec<Value> = vec![
        kind.code().into(),
        report_date.format("%Y-%m-%d").to_string().into(),
    ];
    values.extend(organization_ids.iter().map(|id| Value::from(id.clone())));

    let rows = StoredReportRow::find_by_statement(Statement::from_sql_and_values(
        DatabaseBackend::Sqlite,
        &sql,
        values,
    ))
    .all(db)
    .await?;

    tracing::debug!(
        "Loaded {} rows of {} for {} on {}",
        rows.len(),
        kind,
        organization_ids.len(),
        report_date
    );
    Ok(rows)
}

/// Replace the snapshot of one organization for a report kind and date
pub async fn replace_rows(
    db: &DatabaseConnection,
    kind: ReportKind,
    report_date: NaiveDate,
    organization_id: &str,
    rows: &[NewReportRow],
) -> anyhow::Result<usize> {
    let date = report_date.format("%Y-%m-%d").to_string();
    let txn = db.begin().await?;

    txn.execute(Statement::from_sql_and_values(
        DatabaseBackend::Sqlite,
        "DELETE FROM report_row WHERE report_kind = ? AND report_date = ? AND organization_id = ?",
        [kind.code().into(), date.clone().into(), organization_id.into()],
    ))
    .await?;

    for (sort_order, row) in rows.iter().enumerate() {
        txn.execute(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            r#"
            INSERT INTO report_row (
                report_kind, report_date, organization_id, row_id, parent_id,
                level, is_total_row, name, sort_order, payload_json
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
            [
                kind.code().into(),
                date.clone().into(),
                organization_id.into(),
                row.row_id.clone().into(),
                row.parent_id.clone().into(),
                row.level.into(),
                row.is_total_row.into(),
                row.name.clone().into(),
                (sort_order as i32).into(),
                row.payload.to_string().into(),
            ],
        ))
        .await?;
    }

    txn.commit().await?;
    Ok(rows.len())
}
