use rosterdb::prelude::*;

/// Seed the canonical roster: teamA with member1/member2 (ages 10/20),
/// teamB with member3/member4 (ages 30/40).
#[must_use]
pub fn seeded_session() -> Session {
    let mut roster = Roster::new();

    let team_a = roster.add_team("teamA");
    let team_b = roster.add_team("teamB");

    roster.add_member(Some("member1"), 10, Some(team_a));
    roster.add_member(Some("member2"), 20, Some(team_a));
    roster.add_member(Some("member3"), 30, Some(team_b));
    roster.add_member(Some("member4"), 40, Some(team_b));

    Session::new(roster)
}
