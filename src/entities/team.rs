//! Team aggregate and its roles
//!
//! A team owns its roles by value. Every [`RoleName`] must be covered by at
//! least one role, and the same (role, member) pair may appear only once.

use crate::core::audit::AuditFieldsProps;
use crate::core::entity::{Entity, EntityProps};
use crate::core::error::{DomainResult, UnknownVariantError};
use crate::core::field::{FieldValue, Record, RecordExt, ToFieldValue};
use crate::core::id::UniqueEntityId;
use crate::core::validation::validators::{
    custom, each_instance, is_enum, is_instance, not_empty, not_empty_object,
};
use crate::core::validation::RuleSet;
use crate::entities::ids::TeamMemberId;
use crate::entities::name_rules;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoleName {
    Manager,
    Analyst,
    Deputy,
}

impl RoleName {
    pub const ALL: [RoleName; 3] = [RoleName::Manager, RoleName::Analyst, RoleName::Deputy];
    pub const VALUES: &'static [&'static str] = &["manager", "analyst", "deputy"];

    pub fn as_str(&self) -> &'static str {
        match self {
            RoleName::Manager => "manager",
            RoleName::Analyst => "analyst",
            RoleName::Deputy => "deputy",
        }
    }
}

impl fmt::Display for RoleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoleName {
    type Err = UnknownVariantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RoleName::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| UnknownVariantError::new("role name", s))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamRoleProps {
    pub name: RoleName,
    pub team_member_id: TeamMemberId,
}

impl EntityProps for TeamRoleProps {
    const KIND: &'static str = "TeamRole";

    fn rules() -> RuleSet {
        RuleSet::new()
            .field("name")
            .check(not_empty())
            .check(is_enum(RoleName::VALUES))
            .field("team_member_id")
            .check(is_instance(TeamMemberId::KIND))
            .check(not_empty_object())
    }

    fn to_record(&self) -> Record {
        let mut record = Record::new();
        record.insert("name".into(), self.name.as_str().to_field_value());
        record.insert("team_member_id".into(), self.team_member_id.to_field_value());
        record
    }

    fn from_record(record: &Record) -> Option<Self> {
        Some(Self {
            name: record.string("name")?.parse().ok()?,
            team_member_id: TeamMemberId::from_field_value(record.field("team_member_id"))?,
        })
    }
}

pub type TeamRole = Entity<TeamRoleProps>;

impl Entity<TeamRoleProps> {
    pub fn new(
        props: TeamRoleProps,
        audit: AuditFieldsProps,
        id: Option<UniqueEntityId>,
    ) -> DomainResult<Self> {
        Self::create(props, audit, id)
    }

    pub fn name(&self) -> RoleName {
        self.props().name
    }

    pub fn team_member_id(&self) -> &TeamMemberId {
        &self.props().team_member_id
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamProps {
    pub name: String,
    pub roles: Vec<TeamRole>,
}

impl EntityProps for TeamProps {
    const KIND: &'static str = "Team";

    fn rules() -> RuleSet {
        name_rules()
            .field("roles")
            .check(custom("roles are invalid", |value, _| has_every_role(value)))
            .check(each_instance(TeamRoleProps::KIND))
            .check(custom(
                "duplicated roles with the same team member",
                |value, _| !has_duplicates(value),
            ))
            .check(not_empty())
    }

    fn to_record(&self) -> Record {
        let mut record = Record::new();
        record.insert("name".into(), self.name.to_field_value());
        record.insert("roles".into(), self.roles.to_field_value());
        record
    }

    fn from_record(record: &Record) -> Option<Self> {
        let roles = record
            .list("roles")?
            .iter()
            .map(|role| {
                let instance = role.as_instance()?;
                TeamRole::from_record(&instance.fields).ok()
            })
            .collect::<Option<Vec<_>>>()?;

        Some(Self {
            name: record.string("name")?,
            roles,
        })
    }
}

fn role_fields(value: &FieldValue) -> Option<(&str, Option<&str>)> {
    let instance = value.as_instance().filter(|i| i.is(TeamRoleProps::KIND))?;
    let name = instance.fields.field("name").as_string()?;
    let member = instance
        .fields
        .get("team_member_id")
        .and_then(FieldValue::as_instance)
        .and_then(|id| id.fields.get("value"))
        .and_then(FieldValue::as_string);
    Some((name, member))
}

fn has_every_role(value: &FieldValue) -> bool {
    let Some(roles) = value.as_list() else {
        return false;
    };

    let present: HashSet<&str> = roles
        .iter()
        .filter_map(|role| role_fields(role).map(|(name, _)| name))
        .collect();

    RoleName::VALUES.iter().all(|name| present.contains(name))
}

fn has_duplicates(value: &FieldValue) -> bool {
    let Some(roles) = value.as_list() else {
        return false;
    };

    let mut seen = HashSet::new();
    for role in roles {
        match role_fields(role) {
            Some(pair) => {
                if !seen.insert(pair) {
                    return true;
                }
            }
            None => return false,
        }
    }
    false
}

pub type Team = Entity<TeamProps>;

impl Entity<TeamProps> {
    pub fn new(
        props: TeamProps,
        audit: AuditFieldsProps,
        id: Option<UniqueEntityId>,
    ) -> DomainResult<Self> {
        Self::create(props, audit, id)
    }

    pub fn name(&self) -> &str {
        &self.props().name
    }

    pub fn roles(&self) -> &[TeamRole] {
        &self.props().roles
    }

    /// Replace name and roles together
    pub fn change(
        &mut self,
        name: &str,
        roles: Vec<TeamRole>,
        updated_by: &str,
    ) -> DomainResult<()> {
        let candidate = TeamProps {
            name: name.to_string(),
            roles,
        };
        self.apply(candidate, updated_by)
    }
}
