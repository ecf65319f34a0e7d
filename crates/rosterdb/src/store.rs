//! Module: store
//! Responsibility: the in-memory record-store implementation of the
//! engine's storage port over the roster arena.
//! Does not own: plan validation or predicate semantics (engine-side).
//! Boundary: the only place roster state is read or written by queries.

use crate::roster::{MemberId, MemberRecord, Roster};
use rosterdb_core::{
    executor::{ExecuteError, StoragePort, mutation},
    query::{MutationOp, MutationPlan},
};

impl StoragePort<MemberRecord> for Roster {
    fn scan(&self) -> Vec<MemberRecord> {
        self.members().map(|member| self.record(member)).collect()
    }

    fn apply(&mut self, plan: &MutationPlan<MemberRecord>) -> Result<u64, ExecuteError> {
        // Match against store state at execution time; snapshots the caller
        // fetched earlier play no part here and are not refreshed.
        let matching: Vec<MemberId> = self
            .members()
            .filter(|member| mutation::matches(plan, &self.record(member)))
            .map(|member| member.id())
            .collect();

        match &plan.op {
            MutationOp::Update(changes) => {
                for id in &matching {
                    self.apply_changes(*id, changes);
                }
            }
            MutationOp::Delete => {
                for id in &matching {
                    self.remove_member(*id);
                }
            }
        }

        Ok(matching.len() as u64)
    }
}
