//! Typed store predicate and its SQL rendering.
//!
//! # Responsibility
//! - Represent a list/lookup constraint as data: a conjunction of [`Term`]s.
//! - Render that conjunction to a SQL `WHERE` clause with bound parameters.
//!
//! # Invariants
//! - Terms are combined with logical AND; an empty filter matches every row.
//! - User input only ever reaches SQL as a bound parameter.
//! - Substring terms fold Unicode case on both sides and treat the needle as
//!   a literal (no wildcard or pattern syntax).

use crate::db::FOLD_CASE_FN;
use crate::model::time::{to_epoch_ms, Timestamp};
use rusqlite::types::Value;

/// Column a term can constrain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    FirstName,
    LastName,
    Phone,
    Email,
    Name,
    PatientId,
    ProviderId,
    StartTime,
    EndTime,
}

impl Column {
    pub fn as_sql(self) -> &'static str {
        match self {
            Self::FirstName => "first_name",
            Self::LastName => "last_name",
            Self::Phone => "phone",
            Self::Email => "email",
            Self::Name => "name",
            Self::PatientId => "patient_id",
            Self::ProviderId => "provider_id",
            Self::StartTime => "start_time",
            Self::EndTime => "end_time",
        }
    }
}

/// Ordering comparison against a timestamp column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Before,
    AtOrBefore,
    After,
    AtOrAfter,
}

impl Comparison {
    fn as_sql(self) -> &'static str {
        match self {
            Self::Before => "<",
            Self::AtOrBefore => "<=",
            Self::After => ">",
            Self::AtOrAfter => ">=",
        }
    }
}

/// One predicate term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Term {
    /// Any of `columns` contains `needle`, ignoring ASCII case.
    ContainsAny {
        columns: Vec<Column>,
        needle: String,
    },
    /// Exact text match.
    Equals { column: Column, value: String },
    /// `column <op> at` on an epoch-millisecond column.
    Compare {
        column: Column,
        op: Comparison,
        at: Timestamp,
    },
}

impl Term {
    pub fn contains_any(columns: &[Column], needle: impl Into<String>) -> Self {
        Self::ContainsAny {
            columns: columns.to_vec(),
            needle: needle.into(),
        }
    }

    pub fn equals(column: Column, value: impl Into<String>) -> Self {
        Self::Equals {
            column,
            value: value.into(),
        }
    }

    pub fn compare(column: Column, op: Comparison, at: Timestamp) -> Self {
        Self::Compare { column, op, at }
    }

    fn render(&self, sql: &mut String, params: &mut Vec<Value>) {
        match self {
            Self::ContainsAny { columns, needle } => {
                let folded = needle.to_lowercase();
                let clauses = columns
                    .iter()
                    .map(|column| {
                        params.push(Value::Text(folded.clone()));
                        format!(
                            "instr({FOLD_CASE_FN}(coalesce({}, '')), ?) > 0",
                            column.as_sql()
                        )
                    })
                    .collect::<Vec<_>>();
                sql.push_str(&format!("({})", clauses.join(" OR ")));
            }
            Self::Equals { column, value } => {
                sql.push_str(&format!("{} = ?", column.as_sql()));
                params.push(Value::Text(value.clone()));
            }
            Self::Compare { column, op, at } => {
                sql.push_str(&format!("{} {} ?", column.as_sql(), op.as_sql()));
                params.push(Value::Integer(to_epoch_ms(at)));
            }
        }
    }
}

/// Conjunction of terms; the unit the store adapter queries with.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    terms: Vec<Term>,
}

/// Rendered form of a [`Filter`].
#[derive(Debug, Clone, PartialEq)]
pub struct SqlPredicate {
    /// Starts with `WHERE`; always valid even for an empty filter.
    pub where_clause: String,
    pub params: Vec<Value>,
}

impl Filter {
    /// A filter with no constraint.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn and(mut self, term: Term) -> Self {
        self.terms.push(term);
        self
    }

    /// Adds `term` when present; `None` leaves the filter unchanged.
    pub fn and_maybe(self, term: Option<Term>) -> Self {
        match term {
            Some(term) => self.and(term),
            None => self,
        }
    }

    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    pub fn is_unconstrained(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn to_sql(&self) -> SqlPredicate {
        let mut where_clause = String::from("WHERE 1 = 1");
        let mut params = Vec::new();
        for term in &self.terms {
            where_clause.push_str(" AND ");
            term.render(&mut where_clause, &mut params);
        }
        SqlPredicate {
            where_clause,
            params,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Column, Comparison, Filter, Term};
    use chrono::{TimeZone, Utc};
    use rusqlite::types::Value;

    #[test]
    fn empty_filter_renders_tautology() {
        let predicate = Filter::all().to_sql();
        assert_eq!(predicate.where_clause, "WHERE 1 = 1");
        assert!(predicate.params.is_empty());
    }

    #[test]
    fn contains_any_folds_non_ascii_needle() {
        let predicate = Filter::all()
            .and(Term::contains_any(&[Column::LastName], "ŻÓŁĆ"))
            .to_sql();
        assert_eq!(predicate.params, vec![Value::Text("żółć".into())]);
    }

    #[test]
    fn contains_any_binds_folded_needle_per_column() {
        let predicate = Filter::all()
            .and(Term::contains_any(&[Column::FirstName, Column::Email], "ADA"))
            .to_sql();
        assert_eq!(
            predicate.where_clause,
            "WHERE 1 = 1 AND (instr(fold_case(coalesce(first_name, '')), ?) > 0 \
             OR instr(fold_case(coalesce(email, '')), ?) > 0)"
        );
        assert_eq!(
            predicate.params,
            vec![Value::Text("ada".into()), Value::Text("ada".into())]
        );
    }

    #[test]
    fn terms_are_joined_with_and_in_insertion_order() {
        let at = Utc.with_ymd_and_hms(2025, 3, 10, 9, 0, 0).unwrap();
        let predicate = Filter::all()
            .and(Term::equals(Column::ProviderId, "d-1"))
            .and_maybe(None)
            .and(Term::compare(Column::StartTime, Comparison::AtOrAfter, at))
            .to_sql();
        assert_eq!(
            predicate.where_clause,
            "WHERE 1 = 1 AND provider_id = ? AND start_time >= ?"
        );
        assert_eq!(
            predicate.params,
            vec![
                Value::Text("d-1".into()),
                Value::Integer(at.timestamp_millis())
            ]
        );
    }
}
