use crate::{
    roster::{
        member::{Member, MemberId, MemberRecord, TeamId},
        team::{Team, TeamMembers},
    },
    types::Id,
};
use rosterdb_core::{
    executor::mutation::apply_change,
    query::Change,
    traits::FieldValue,
    value::Value,
};
use std::collections::BTreeMap;

///
/// Roster
///
/// Arena of roster entities. Members and teams are owned here and linked
/// by stable id; the team side's "collection of members" is an index
/// resolved by lookup, never a direct mutable reference, so there are no
/// ownership cycles.
///

#[derive(Debug, Default)]
pub struct Roster {
    members: BTreeMap<MemberId, Member>,
    teams: BTreeMap<TeamId, TeamEntry>,
    next_member: u64,
    next_team: u64,
}

#[derive(Debug)]
struct TeamEntry {
    team: Team,
    members: TeamMembers,
}

impl Roster {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a team and return its id.
    pub fn add_team(&mut self, name: impl Into<String>) -> TeamId {
        self.next_team += 1;
        let id: TeamId = Id::new(self.next_team);

        self.teams.insert(
            id,
            TeamEntry {
                team: Team::new(id, name),
                members: TeamMembers::default(),
            },
        );

        id
    }

    /// Create a member and return its id.
    ///
    /// Setting a team here also registers the member in that team's
    /// collection, maintaining the bidirectional invariant in one place.
    pub fn add_member(
        &mut self,
        username: Option<&str>,
        age: i64,
        team: Option<TeamId>,
    ) -> MemberId {
        self.next_member += 1;
        let id: MemberId = Id::new(self.next_member);

        self.members
            .insert(id, Member::new(id, username, age, team));

        if let Some(team_id) = team
            && let Some(entry) = self.teams.get(&team_id)
        {
            entry.members.add_member(Some(id));
        }

        id
    }

    #[must_use]
    pub fn member(&self, id: MemberId) -> Option<&Member> {
        self.members.get(&id)
    }

    #[must_use]
    pub fn team(&self, id: TeamId) -> Option<&Team> {
        self.teams.get(&id).map(|entry| &entry.team)
    }

    /// The association guard for one team, for callers that mutate the
    /// membership collection directly.
    #[must_use]
    pub fn team_guard(&self, id: TeamId) -> Option<&TeamMembers> {
        self.teams.get(&id).map(|entry| &entry.members)
    }

    /// Resolve one team's member ids through the index.
    #[must_use]
    pub fn team_members(&self, id: TeamId) -> Vec<MemberId> {
        self.teams
            .get(&id)
            .map(|entry| entry.members.ids())
            .unwrap_or_default()
    }

    pub fn members(&self) -> impl Iterator<Item = &Member> {
        self.members.values()
    }

    #[must_use]
    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    /// Build the flat query record for one member, resolving the team
    /// reference to the team name.
    #[must_use]
    pub fn record(&self, member: &Member) -> MemberRecord {
        MemberRecord {
            id: member.id().key(),
            username: member.username.clone(),
            age: member.age,
            team_name: member
                .team()
                .and_then(|team_id| self.team(team_id))
                .map(|team| team.name.clone()),
        }
    }

    /// Apply validated bulk-update changes to one member.
    pub(crate) fn apply_changes(&mut self, id: MemberId, changes: &[Change]) {
        let Some(member) = self.members.get_mut(&id) else {
            return;
        };

        for change in changes {
            match change.field() {
                "username" => {
                    let next = apply_change(change, &member.username.to_value());
                    if let Some(username) = <Option<String>>::from_value(&next) {
                        member.username = username;
                    }
                }
                "age" => {
                    let next = apply_change(change, &Value::Int(member.age));
                    if let Some(age) = i64::from_value(&next) {
                        member.age = age;
                    }
                }
                _ => {}
            }
        }
    }

    /// Remove one member, unregistering it from its team's collection.
    pub(crate) fn remove_member(&mut self, id: MemberId) {
        let Some(member) = self.members.remove(&id) else {
            return;
        };

        if let Some(team_id) = member.team()
            && let Some(entry) = self.teams.get(&team_id)
        {
            entry.members.remove_member(id);
        }
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn member_with_team_registers_in_the_team_index() {
        let mut roster = Roster::new();
        let team_a = roster.add_team("teamA");
        let member1 = roster.add_member(Some("member1"), 10, Some(team_a));

        assert_eq!(roster.team_members(team_a), vec![member1]);
        assert_eq!(roster.member(member1).and_then(|m| m.team()), Some(team_a));
    }

    #[test]
    fn member_without_team_registers_nowhere() {
        let mut roster = Roster::new();
        let team_a = roster.add_team("teamA");
        roster.add_member(Some("loner"), 50, None);

        assert!(roster.team_members(team_a).is_empty());
    }

    #[test]
    fn record_resolves_the_team_name() {
        let mut roster = Roster::new();
        let team_a = roster.add_team("teamA");
        let member1 = roster.add_member(Some("member1"), 10, Some(team_a));

        let member = roster.member(member1).expect("member").clone();
        let record = roster.record(&member);
        assert_eq!(record.team_name.as_deref(), Some("teamA"));
        assert_eq!(record.age, 10);
    }

    #[test]
    fn remove_member_unregisters_from_the_index() {
        let mut roster = Roster::new();
        let team_a = roster.add_team("teamA");
        let member1 = roster.add_member(Some("member1"), 10, Some(team_a));

        roster.remove_member(member1);
        assert!(roster.member(member1).is_none());
        assert!(roster.team_members(team_a).is_empty());
    }
}
