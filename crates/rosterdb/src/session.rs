use crate::roster::{MemberRecord, Roster};
use rosterdb_core::{
    executor::{AggregateRow, ExecuteError, aggregate, load, mutation},
    projection::RowSet,
    query::{DeleteQuery, Query, QueryError, UpdateQuery},
    traits::EntityKind,
};

///
/// Session
///
/// Ties query intents to the roster store: plans, executes, and hands rows
/// to projection. The session holds no cache; identical queries re-execute
/// against current store state every time.
///

#[derive(Debug, Default)]
pub struct Session {
    roster: Roster,
}

impl Session {
    #[must_use]
    pub const fn new(roster: Roster) -> Self {
        Self { roster }
    }

    #[must_use]
    pub const fn roster(&self) -> &Roster {
        &self.roster
    }

    pub const fn roster_mut(&mut self) -> &mut Roster {
        &mut self.roster
    }

    #[must_use]
    pub fn into_roster(self) -> Roster {
        self.roster
    }

    /// Fetch every matching record.
    pub fn fetch(&self, query: &Query<MemberRecord>) -> Result<Vec<MemberRecord>, QueryError> {
        let plan = query.plan()?;
        Ok(load::execute(&self.roster, &plan)?)
    }

    /// Fetch at most one record; more than one match is an error.
    pub fn fetch_one(
        &self,
        query: &Query<MemberRecord>,
    ) -> Result<Option<MemberRecord>, QueryError> {
        let records = self.fetch(query)?;

        if records.len() > 1 {
            return Err(ExecuteError::NonUnique {
                entity: MemberRecord::PATH,
                found: records.len(),
            }
            .into());
        }

        Ok(records.into_iter().next())
    }

    /// Fetch the first record of the ordered result, if any.
    pub fn fetch_first(
        &self,
        query: &Query<MemberRecord>,
    ) -> Result<Option<MemberRecord>, QueryError> {
        let limited = query.clone().limit(1);
        Ok(self.fetch(&limited)?.into_iter().next())
    }

    /// Fetch matching records projected into flat rows per the query's
    /// selection, ready for a mapping strategy.
    pub fn rows(&self, query: &Query<MemberRecord>) -> Result<RowSet, QueryError> {
        let plan = query.plan()?;
        Ok(load::execute_rows(&self.roster, &plan)?)
    }

    /// Execute an aggregate query: one tuple per group, or a single tuple
    /// over the whole result set when the query has no grouping.
    pub fn aggregate(&self, query: &Query<MemberRecord>) -> Result<Vec<AggregateRow>, QueryError> {
        let plan = query.plan()?;
        Ok(aggregate::execute(&self.roster, &plan)?)
    }

    /// Execute a bulk update and return the affected-row count.
    ///
    /// Records fetched before this call are NOT refreshed; discard or
    /// re-fetch any held snapshot afterwards.
    pub fn update(&mut self, update: &UpdateQuery<MemberRecord>) -> Result<u64, QueryError> {
        let plan = update.plan()?;
        Ok(mutation::execute(&mut self.roster, &plan)?)
    }

    /// Execute a bulk delete and return the affected-row count. Same
    /// staleness caveat as [`Session::update`].
    pub fn delete(&mut self, delete: &DeleteQuery<MemberRecord>) -> Result<u64, QueryError> {
        let plan = delete.plan()?;
        Ok(mutation::execute(&mut self.roster, &plan)?)
    }
}

impl From<Roster> for Session {
    fn from(roster: Roster) -> Self {
        Self::new(roster)
    }
}
