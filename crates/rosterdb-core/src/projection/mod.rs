//! Row-to-shape mapping with three interchangeable strategies:
//! field-direct, property-set, and constructor. All three produce the same
//! output when names and kinds line up; they differ only on mismatch
//! (observable drop vs. fail-fast rejection). Prefer the constructor
//! strategy: it pushes shape mismatches to the typed extraction code and a
//! pre-row shape check instead of per-row name matching.

mod project;
mod row;
mod target;

pub use project::{ProjectError, ProjectReport, project_fields, project_new, project_setters};
pub use row::{Row, RowSet, RowShape};
pub use target::{Column, FieldWrite, FromRow, PropertyWrite};
