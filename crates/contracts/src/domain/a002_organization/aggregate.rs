use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// ID Type
// ============================================================================

/// Уникальный идентификатор организации
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrganizationId(pub Uuid);

impl OrganizationId {
    pub fn new(value: Uuid) -> Self {
        Self(value)
    }

    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn value(&self) -> Uuid {
        self.0
    }

    pub fn as_string(&self) -> String {
        self.0.to_string()
    }

    pub fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(OrganizationId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Aggregate
// ============================================================================

/// Организация, по которой строятся отчёты
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Organization {
    pub id: OrganizationId,
    pub code: String,
    pub description: String,
    #[serde(rename = "fullName")]
    pub full_name: String,
    pub inn: String,
    pub kpp: String,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Organization {
    /// Создать новую организацию для вставки в БД
    pub fn new_for_insert(
        code: String,
        description: String,
        full_name: String,
        inn: String,
        kpp: String,
        comment: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: OrganizationId::new_v4(),
            code,
            description,
            full_name,
            inn,
            kpp,
            comment,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn to_string_id(&self) -> String {
        self.id.as_string()
    }

    /// Валидация данных
    pub fn validate(&self) -> Result<(), String> {
        if self.description.trim().is_empty() {
            return Err("Описание не может быть пустым".into());
        }
        if self.code.trim().is_empty() {
            return Err("Код не может быть пустым".into());
        }

        // Пустой ИНН допустим для тестовых организаций
        if !self.inn.trim().is_empty() {
            let inn_digits = self.inn.chars().filter(|c| c.is_ascii_digit()).count();
            if inn_digits != 10 && inn_digits != 12 {
                return Err("ИНН должен содержать 10 цифр (для ЮЛ) или 12 цифр (для ИП)".into());
            }
        }

        if !self.kpp.trim().is_empty() {
            let kpp_digits = self.kpp.chars().filter(|c| c.is_ascii_digit()).count();
            if kpp_digits != 9 {
                return Err("КПП должен содержать 9 цифр или быть пустым (для ИП)".into());
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn org(inn: &str, kpp: &str) -> Organization {
        Organization::new_for_insert(
            "ORG-1".into(),
            "Ромашка".into(),
            "ООО \"Ромашка\"".into(),
            inn.into(),
            kpp.into(),
            None,
        )
    }

    #[test]
    fn test_validate() {
        assert!(org("7701234567", "770101001").validate().is_ok());
        assert!(org("", "").validate().is_ok());
        assert!(org("123", "").validate().is_err());
        assert!(org("7701234567", "77").validate().is_err());
    }

    #[test]
    fn test_id_from_string() {
        let id = OrganizationId::new_v4();
        assert_eq!(OrganizationId::from_string(&id.as_string()), Ok(id));
        assert!(OrganizationId::from_string("not-a-uuid").is_err());
    }
}
