//! Macros for reducing boilerplate when defining entities

/// Define a reference id: a validated UUID naming another entity
///
/// Reference ids are always required (an empty value is rejected, never
/// generated) and serialize as the raw id string. Their record form is an
/// instance of the id type so rules can check it with `is_instance`.
///
/// # Example
/// ```rust,ignore
/// impl_reference_id!(TeamId);
///
/// let team_id = TeamId::new("47f3b2ad-8844-492a-a1a1-75a8c838daae")?;
/// ```
#[macro_export]
macro_rules! impl_reference_id {
    ($type:ident) => {
        #[derive(
            Debug, Clone, PartialEq, Eq, Hash, ::serde::Serialize, ::serde::Deserialize,
        )]
        #[serde(try_from = "String", into = "String")]
        pub struct $type($crate::core::id::UniqueEntityId);

        impl $type {
            pub const KIND: &'static str = stringify!($type);

            pub fn new(value: &str) -> Result<Self, $crate::core::error::InvalidIdError> {
                $crate::core::id::UniqueEntityId::parse(value).map(Self)
            }

            pub fn value(&self) -> &str {
                self.0.value()
            }

            /// Decode the record form produced by `to_field_value`
            pub fn from_field_value(
                value: &$crate::core::field::FieldValue,
            ) -> Option<Self> {
                let instance = value.as_instance().filter(|i| i.is(Self::KIND))?;
                let raw = instance.fields.get("value")?.as_string()?;
                Self::new(raw).ok()
            }
        }

        impl ::std::fmt::Display for $type {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.value())
            }
        }

        impl ::std::str::FromStr for $type {
            type Err = $crate::core::error::InvalidIdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }

        impl TryFrom<String> for $type {
            type Error = $crate::core::error::InvalidIdError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(&value)
            }
        }

        impl From<$type> for String {
            fn from(id: $type) -> Self {
                id.0.into()
            }
        }

        impl From<$crate::core::id::UniqueEntityId> for $type {
            fn from(id: $crate::core::id::UniqueEntityId) -> Self {
                Self(id)
            }
        }

        impl $crate::core::field::ToFieldValue for $type {
            fn to_field_value(&self) -> $crate::core::field::FieldValue {
                let mut fields = $crate::core::field::Record::new();
                fields.insert(
                    "value".to_string(),
                    $crate::core::field::FieldValue::String(self.value().to_string()),
                );
                $crate::core::field::FieldValue::Instance($crate::core::field::Instance::new(
                    Self::KIND,
                    fields,
                ))
            }
        }
    };
}

/// Define an entity whose only prop is a required `name`
///
/// Generates the props struct, its rules (`name`: not empty, string, at
/// most 255 characters), the `Entity` alias and `new` / `name` / `change`.
///
/// # Example
/// ```rust,ignore
/// impl_named_entity!(Budget, BudgetProps, "Budget");
///
/// let mut budget = Budget::new(
///     BudgetProps { name: "Marketing".into() },
///     AuditFieldsProps::by("system"),
///     None,
/// )?;
/// budget.change("Sales", "alice")?;
/// ```
#[macro_export]
macro_rules! impl_named_entity {
    ($type:ident, $props:ident, $kind:expr) => {
        #[derive(Debug, Clone, PartialEq, ::serde::Serialize)]
        pub struct $props {
            pub name: String,
        }

        impl $crate::core::entity::EntityProps for $props {
            const KIND: &'static str = $kind;

            fn rules() -> $crate::core::validation::RuleSet {
                $crate::entities::name_rules()
            }

            fn to_record(&self) -> $crate::core::field::Record {
                use $crate::core::field::ToFieldValue;

                let mut record = $crate::core::field::Record::new();
                record.insert("name".to_string(), self.name.to_field_value());
                record
            }

            fn from_record(record: &$crate::core::field::Record) -> Option<Self> {
                use $crate::core::field::RecordExt;

                Some(Self {
                    name: record.string("name")?,
                })
            }
        }

        pub type $type = $crate::core::entity::Entity<$props>;

        impl $crate::core::entity::Entity<$props> {
            pub fn new(
                props: $props,
                audit: $crate::core::audit::AuditFieldsProps,
                id: Option<$crate::core::id::UniqueEntityId>,
            ) -> $crate::core::error::DomainResult<Self> {
                Self::create(props, audit, id)
            }

            pub fn name(&self) -> &str {
                &self.props().name
            }

            /// Rename, validating the new name and stamping the audit fields
            pub fn change(
                &mut self,
                name: &str,
                updated_by: &str,
            ) -> $crate::core::error::DomainResult<()> {
                let candidate = $props {
                    name: name.to_string(),
                };
                self.apply(candidate, updated_by)
            }
        }
    };
}
