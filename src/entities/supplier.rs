//! Supplier entity

crate::impl_named_entity!(Supplier, SupplierProps, "Supplier");

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::audit::AuditFieldsProps;
    use crate::core::entity::Auditable;
    use crate::core::id::UniqueEntityId;

    #[test]
    fn test_create_with_given_id() {
        let id = UniqueEntityId::parse("5490020a-e866-4229-9adc-aa44b83234c4").unwrap();
        let supplier = Supplier::new(
            SupplierProps {
                name: "Acme Corp".into(),
            },
            AuditFieldsProps::by("system"),
            Some(id),
        )
        .unwrap();

        assert_eq!(supplier.id(), "5490020a-e866-4229-9adc-aa44b83234c4");
        assert_eq!(supplier.name(), "Acme Corp");
    }

    #[test]
    fn test_change_too_long_name() {
        let mut supplier = Supplier::new(
            SupplierProps { name: "Acme".into() },
            AuditFieldsProps::by("system"),
            None,
        )
        .unwrap();
        let before = supplier.clone();

        let err = supplier.change(&"a".repeat(256), "alice").unwrap_err();
        assert_eq!(
            err.fields().unwrap().get("name").unwrap(),
            ["name must be shorter than or equal to 255 characters"]
        );
        assert_eq!(supplier, before);
        assert_eq!(supplier.updated_by(), "system");
    }
}
