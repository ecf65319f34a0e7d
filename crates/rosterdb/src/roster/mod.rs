mod arena;
mod member;
mod team;

pub use arena::Roster;
pub use member::{Member, MemberId, MemberRecord, TeamId};
pub use team::{Team, TeamMembers};
