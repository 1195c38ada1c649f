//! Team member entity

crate::impl_named_entity!(TeamMember, TeamMemberProps, "TeamMember");
