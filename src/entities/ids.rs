//! Reference ids used between entities

crate::impl_reference_id!(TeamId);
crate::impl_reference_id!(BudgetId);
crate::impl_reference_id!(SupplierId);
crate::impl_reference_id!(TeamMemberId);
