use crate::{
    roster::team::Team,
    types::Id,
};
use rosterdb_core::{
    traits::{EntityKind, EntityValue, FieldDef, FieldValue, FieldValues},
    value::{Value, ValueKind},
};
use serde::{Deserialize, Serialize};

pub type MemberId = Id<Member>;
pub type TeamId = Id<Team>;

///
/// Member
///
/// A roster member. The team reference is a typed id into the arena, not
/// an object reference; it is set through the arena so the team-side
/// membership index can never drift.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Member {
    id: MemberId,
    pub username: Option<String>,
    pub age: i64,
    team: Option<TeamId>,
}

impl Member {
    pub(crate) fn new(
        id: MemberId,
        username: Option<&str>,
        age: i64,
        team: Option<TeamId>,
    ) -> Self {
        Self {
            id,
            username: username.map(ToString::to_string),
            age,
            team,
        }
    }

    #[must_use]
    pub const fn id(&self) -> MemberId {
        self.id
    }

    #[must_use]
    pub const fn team(&self) -> Option<TeamId> {
        self.team
    }
}

///
/// MemberRecord
///
/// Flat query-surface view of one member, with the team reference resolved
/// to the team's name at scan time. This is the entity the query engine
/// sees; `Member` itself stays a plain domain object.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct MemberRecord {
    pub id: u64,
    pub username: Option<String>,
    pub age: i64,
    pub team_name: Option<String>,
}

impl EntityKind for MemberRecord {
    const PATH: &'static str = "roster::member";
    const FIELDS: &'static [FieldDef] = &[
        FieldDef::key("id", ValueKind::Uint),
        FieldDef::nullable("username", ValueKind::Text),
        FieldDef::required("age", ValueKind::Int),
        FieldDef::computed("team_name", ValueKind::Text),
    ];
}

impl FieldValues for MemberRecord {
    fn field_value(&self, field: &str) -> Value {
        match field {
            "id" => Value::Uint(self.id),
            "username" => self.username.to_value(),
            "age" => Value::Int(self.age),
            "team_name" => self.team_name.to_value(),
            _ => Value::Null,
        }
    }
}

impl EntityValue for MemberRecord {}
