//! RosterDB: typed dynamic queries over an in-memory Member/Team roster.
//!
//! The engine lives in `rosterdb-core`; this crate supplies the roster
//! domain (entities, arena, association guard), the criteria filter layer,
//! the record store, DTO shapes, and the session surface gluing them
//! together.

pub mod dto;
pub mod filter;
pub mod roster;
pub mod session;
pub mod store;
pub mod types;

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No errors, executors, stores, or helpers are re-exported here.
///

pub mod prelude {
    pub use crate::{
        dto::{MemberDto, UserDto},
        filter::MemberFilter,
        roster::{Member, MemberId, MemberRecord, Roster, Team, TeamId, TeamMembers},
        session::Session,
        types::Id,
    };
    pub use rosterdb_core::prelude::*;
}
