//! Budget entity

crate::impl_named_entity!(Budget, BudgetProps, "Budget");

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::audit::AuditFieldsProps;
    use crate::core::entity::{Auditable, EntityProps};
    use crate::core::error::DomainError;
    use crate::core::field::{FieldValue, Record};

    fn messages(value: FieldValue) -> Vec<String> {
        let mut record = Record::new();
        record.insert("name".into(), value);
        BudgetProps::rules()
            .check_all(&record)
            .get("name")
            .map(<[String]>::to_vec)
            .unwrap_or_default()
    }

    #[test]
    fn test_name_rules() {
        let all = vec![
            "name should not be empty".to_string(),
            "name must be a string".to_string(),
            "name must be shorter than or equal to 255 characters".to_string(),
        ];

        assert_eq!(messages(FieldValue::Null), all);
        assert_eq!(messages(FieldValue::String(String::new())), all[..1]);
        assert_eq!(messages(FieldValue::Integer(5)), all[1..]);
        assert_eq!(messages(FieldValue::Boolean(true)), all[1..]);
        assert_eq!(messages(FieldValue::Boolean(false)), all[1..]);
        assert_eq!(messages(FieldValue::String("a".repeat(256))), all[2..]);
        assert!(messages(FieldValue::String("some name".into())).is_empty());
    }

    #[test]
    fn test_create_budget() {
        let budget = Budget::new(
            BudgetProps {
                name: "some name".into(),
            },
            AuditFieldsProps::by("system"),
            None,
        )
        .unwrap();

        assert_eq!(budget.name(), "some name");
        assert_eq!(budget.created_by(), "system");
    }

    #[test]
    fn test_invalid_name_is_rejected() {
        let err = Budget::new(
            BudgetProps { name: "".into() },
            AuditFieldsProps::by("system"),
            None,
        )
        .unwrap_err();

        assert!(matches!(err, DomainError::EntityValidation(_)));
    }

    #[test]
    fn test_change_renames_and_stamps() {
        let mut budget = Budget::new(
            BudgetProps { name: "old".into() },
            AuditFieldsProps::by("system"),
            None,
        )
        .unwrap();

        budget.change("new", "alice").unwrap();
        assert_eq!(budget.name(), "new");
        assert_eq!(budget.updated_by(), "alice");

        assert!(budget.change("", "bob").is_err());
        assert_eq!(budget.name(), "new");
        assert_eq!(budget.updated_by(), "alice");
    }

    #[test]
    fn test_to_json() {
        let budget = Budget::new(
            BudgetProps {
                name: "Marketing".into(),
            },
            AuditFieldsProps::by("system"),
            None,
        )
        .unwrap();

        let json = budget.to_json().unwrap();
        assert_eq!(json["name"], "Marketing");
        assert_eq!(json["id"], budget.id());
    }
}
