//! Parameterized filter and listing statement builder
//!
//! Every resource listing is a fixed base statement plus a variable set of
//! predicates chosen from a declarative filter table. Placeholders are
//! positional (`?`), so arguments are pushed in exactly the order their
//! predicates are appended. Listing and count statements are built from the
//! same [`WhereClause`] so pagination totals always match the returned page.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::pagination::PageRequest;

/// A positional statement argument
#[derive(Debug, Clone, PartialEq)]
pub enum SqlArg {
    Text(String),
    Int(i64),
    Null,
}

impl From<String> for SqlArg {
    fn from(value: String) -> Self {
        SqlArg::Text(value)
    }
}

impl From<&str> for SqlArg {
    fn from(value: &str) -> Self {
        SqlArg::Text(value.to_string())
    }
}

impl From<i64> for SqlArg {
    fn from(value: i64) -> Self {
        SqlArg::Int(value)
    }
}

impl From<NaiveDate> for SqlArg {
    fn from(value: NaiveDate) -> Self {
        SqlArg::Text(value.format("%Y-%m-%d").to_string())
    }
}

impl<T: Into<SqlArg>> From<Option<T>> for SqlArg {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(SqlArg::Null)
    }
}

/// Bind a slice of [`SqlArg`] onto any sqlx query builder, in order
///
/// Works for `query`, `query_as` and `query_scalar` alike.
#[macro_export]
macro_rules! bind_args {
    ($query:expr, $args:expr) => {{
        let mut query = $query;
        for arg in $args {
            query = match arg {
                $crate::query::SqlArg::Text(value) => query.bind(value.clone()),
                $crate::query::SqlArg::Int(value) => query.bind(*value),
                $crate::query::SqlArg::Null => query.bind(None::<String>),
            };
        }
        query
    }};
}

/// The SQL fragment a recognized query parameter contributes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Predicate {
    /// `column = ?`
    Exact(&'static str),
    /// `(col_a LIKE ? ESCAPE '\' OR ...)` with the term wrapped in `%...%`
    ///
    /// `%` and `_` in the term match literally.
    Fuzzy(&'static [&'static str]),
    /// JSON list column contains the value
    JsonContains(&'static str),
}

/// Maps one accepted query parameter to its predicate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterSpec {
    pub param: &'static str,
    pub predicate: Predicate,
}

impl FilterSpec {
    pub const fn exact(param: &'static str, column: &'static str) -> Self {
        Self {
            param,
            predicate: Predicate::Exact(column),
        }
    }

    pub const fn fuzzy(param: &'static str, columns: &'static [&'static str]) -> Self {
        Self {
            param,
            predicate: Predicate::Fuzzy(columns),
        }
    }

    pub const fn json_contains(param: &'static str, column: &'static str) -> Self {
        Self {
            param,
            predicate: Predicate::JsonContains(column),
        }
    }
}

/// Escape LIKE wildcards so a search term matches literally
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// A statement with its ordered arguments
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltQuery {
    pub sql: String,
    pub args: Vec<SqlArg>,
}

/// ` WHERE <seed> AND ...` plus the arguments for its placeholders
#[derive(Debug, Clone, PartialEq)]
pub struct WhereClause {
    pub sql: String,
    pub args: Vec<SqlArg>,
}

impl WhereClause {
    /// Build from a seed predicate and the request's query parameters
    ///
    /// Predicates follow the order of `filters`, never the order of `params`.
    /// Unrecognized parameters and empty values are ignored.
    pub fn build(seed: &str, filters: &[FilterSpec], params: &HashMap<String, String>) -> Self {
        let mut sql = format!(" WHERE {}", seed);
        let mut args = Vec::new();

        for filter in filters {
            let Some(value) = params.get(filter.param).map(|v| v.trim()) else {
                continue;
            };
            if value.is_empty() {
                continue;
            }

            match filter.predicate {
                Predicate::Exact(column) => {
                    sql.push_str(&format!(" AND {} = ?", column));
                    args.push(SqlArg::from(value));
                }
                Predicate::Fuzzy(columns) => {
                    let alternatives: Vec<String> = columns
                        .iter()
                        .map(|c| format!("{} LIKE ? ESCAPE '\\'", c))
                        .collect();
                    sql.push_str(&format!(" AND ({})", alternatives.join(" OR ")));
                    let pattern = format!("%{}%", escape_like(value));
                    args.extend(columns.iter().map(|_| SqlArg::Text(pattern.clone())));
                }
                Predicate::JsonContains(column) => {
                    sql.push_str(&format!(
                        " AND EXISTS (SELECT 1 FROM json_each({}) WHERE json_each.value = ?)",
                        column
                    ));
                    args.push(SqlArg::from(value));
                }
            }
        }

        Self { sql, args }
    }

    /// Page of rows: `<select><where> ORDER BY <order> LIMIT ? OFFSET ?`
    pub fn listing(&self, select: &str, order_by: &str, page: PageRequest) -> BuiltQuery {
        let mut args = self.args.clone();
        args.push(SqlArg::Int(page.limit));
        args.push(SqlArg::Int(page.offset()));

        BuiltQuery {
            sql: format!(
                "{}{} ORDER BY {} LIMIT ? OFFSET ?",
                select, self.sql, order_by
            ),
            args,
        }
    }

    /// Total matching rows: `SELECT COUNT(*) FROM <from><where>`
    pub fn count(&self, from: &str) -> BuiltQuery {
        BuiltQuery {
            sql: format!("SELECT COUNT(*) FROM {}{}", from, self.sql),
            args: self.args.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RECORDING_FILTERS: &[FilterSpec] = &[
        FilterSpec::fuzzy("search", &["r.title", "r.album"]),
        FilterSpec::exact("genre", "r.genre"),
        FilterSpec::exact("status", "r.status"),
        FilterSpec::exact("artist_id", "r.artist_id"),
    ];

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_no_filters_keeps_seed() {
        let clause = WhereClause::build("1=1", RECORDING_FILTERS, &HashMap::new());
        assert_eq!(clause.sql, " WHERE 1=1");
        assert!(clause.args.is_empty());
    }

    #[test]
    fn test_args_follow_filter_table_order() {
        // Parameter map order must not matter
        let clause = WhereClause::build(
            "1=1",
            RECORDING_FILTERS,
            &params(&[("artist_id", "a-1"), ("status", "mastered"), ("search", "night")]),
        );

        assert_eq!(
            clause.sql,
            " WHERE 1=1 AND (r.title LIKE ? ESCAPE '\\' OR r.album LIKE ? ESCAPE '\\') AND r.status = ? AND r.artist_id = ?"
        );
        assert_eq!(
            clause.args,
            vec![
                SqlArg::Text("%night%".into()),
                SqlArg::Text("%night%".into()),
                SqlArg::Text("mastered".into()),
                SqlArg::Text("a-1".into()),
            ]
        );
    }

    #[test]
    fn test_unknown_and_empty_params_ignored() {
        let clause = WhereClause::build(
            "1=1",
            RECORDING_FILTERS,
            &params(&[("bogus", "x"), ("genre", "  "), ("status", "draft")]),
        );
        assert_eq!(clause.sql, " WHERE 1=1 AND r.status = ?");
        assert_eq!(clause.args, vec![SqlArg::Text("draft".into())]);
    }

    #[test]
    fn test_search_wildcards_are_literal() {
        let clause = WhereClause::build(
            "1=1",
            RECORDING_FILTERS,
            &params(&[("search", "100%_a\\b")]),
        );
        assert_eq!(
            clause.args,
            vec![
                SqlArg::Text("%100\\%\\_a\\\\b%".into()),
                SqlArg::Text("%100\\%\\_a\\\\b%".into()),
            ]
        );
    }

    #[test]
    fn test_json_contains_predicate() {
        let filters = [FilterSpec::json_contains("genre", "a.genres")];
        let clause = WhereClause::build("a.is_active = 1", &filters, &params(&[("genre", "Pop")]));
        assert_eq!(
            clause.sql,
            " WHERE a.is_active = 1 AND EXISTS (SELECT 1 FROM json_each(a.genres) WHERE json_each.value = ?)"
        );
        assert_eq!(clause.args, vec![SqlArg::Text("Pop".into())]);
    }

    #[test]
    fn test_listing_appends_limit_and_offset_last() {
        let clause = WhereClause::build("1=1", RECORDING_FILTERS, &params(&[("genre", "Pop")]));
        let page = PageRequest { page: 3, limit: 20 };

        let listing = clause.listing("SELECT r.* FROM recordings r", "r.created_at DESC", page);
        assert_eq!(
            listing.sql,
            "SELECT r.* FROM recordings r WHERE 1=1 AND r.genre = ? ORDER BY r.created_at DESC LIMIT ? OFFSET ?"
        );
        assert_eq!(
            listing.args,
            vec![SqlArg::Text("Pop".into()), SqlArg::Int(20), SqlArg::Int(40)]
        );
    }

    #[test]
    fn test_count_shares_predicates() {
        let clause = WhereClause::build(
            "1=1",
            RECORDING_FILTERS,
            &params(&[("search", "x"), ("genre", "Pop")]),
        );
        let count = clause.count("recordings r");

        assert_eq!(count.sql, format!("SELECT COUNT(*) FROM recordings r{}", clause.sql));
        assert_eq!(count.args, clause.args);
    }

    #[test]
    fn test_option_conversion() {
        assert_eq!(SqlArg::from(None::<String>), SqlArg::Null);
        assert_eq!(SqlArg::from(Some(42i64)), SqlArg::Int(42));
        let date = NaiveDate::from_ymd_opt(1995, 3, 15).unwrap();
        assert_eq!(SqlArg::from(Some(date)), SqlArg::Text("1995-03-15".into()));
    }
}
