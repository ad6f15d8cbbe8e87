//! Clause matchers for the body of a CREATE TABLE statement.
//!
//! Each matcher looks at one clause in isolation and either recognizes it or
//! rejects it. A rejection never aborts the surrounding statement.

use regex::Regex;
use std::sync::LazyLock;

use crate::ast::ForeignKey;

struct Matchers {
    column: Regex,
    inline_pk: Regex,
    table_pk: Regex,
    foreign_key: Regex,
}

static MATCHERS: LazyLock<Matchers> = LazyLock::new(|| Matchers {
    column: Regex::new(r"(?i)^(\w+)\s+(\w+)(?:\((\d+)\))?\s*(NOT\s+NULL)?")
        .expect("valid column regex"),
    inline_pk: Regex::new(r"(?i)\bPRIMARY\s+KEY\b").expect("valid inline primary key regex"),
    table_pk: Regex::new(r"(?i)PRIMARY\s+KEY\s*\(([^)]*)\)").expect("valid primary key regex"),
    foreign_key: Regex::new(
        r"(?i)FOREIGN\s+KEY\s*\(\s*(\w+)\s*\)\s*REFERENCES\s*(\w+)\s*\(\s*(\w+)\s*\)",
    )
    .expect("valid foreign key regex"),
});

/// A column definition recognized in a clause, before it gets its index.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct ColumnDef {
    pub name: String,
    pub typ: String,
    pub not_null: bool,
    pub inline_primary: bool,
}

/// Split a table body on commas that sit outside any parentheses.
/// Clauses are trimmed; empty ones are dropped.
pub fn split_clauses(body: &str) -> Vec<&str> {
    let mut clauses = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (i, ch) in body.char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                clauses.push(body[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    clauses.push(body[start..].trim());

    clauses.retain(|c| !c.is_empty());
    clauses
}

/// `<name> <type>[(<digits>)] [NOT NULL]`. Clauses that open with PRIMARY or
/// FOREIGN are constraint headers, not columns.
pub(super) fn match_column(clause: &str) -> Option<ColumnDef> {
    let caps = MATCHERS.column.captures(clause)?;
    let name = &caps[1];

    if name.eq_ignore_ascii_case("primary") || name.eq_ignore_ascii_case("foreign") {
        return None;
    }

    let typ = match caps.get(3) {
        Some(size) => format!("{}({})", &caps[2], size.as_str()),
        None => caps[2].to_string(),
    };

    Some(ColumnDef {
        name: name.to_string(),
        typ,
        not_null: caps.get(4).is_some(),
        inline_primary: has_inline_primary_key(clause),
    })
}

/// `PRIMARY KEY` written as a column modifier, i.e. without a column list.
fn has_inline_primary_key(clause: &str) -> bool {
    MATCHERS
        .inline_pk
        .find_iter(clause)
        .any(|m| !clause[m.end()..].trim_start().starts_with('('))
}

/// `PRIMARY KEY (a, b, ...)`. Names come back in written order, duplicates
/// included.
pub(super) fn match_primary_key(clause: &str) -> Option<Vec<String>> {
    let caps = MATCHERS.table_pk.captures(clause)?;
    let names: Vec<String> = caps[1]
        .split(',')
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(String::from)
        .collect();

    if names.is_empty() { None } else { Some(names) }
}

/// `FOREIGN KEY (col) REFERENCES table (col)`, single column pairs only.
pub(super) fn match_foreign_key(clause: &str) -> Option<ForeignKey> {
    let caps = MATCHERS.foreign_key.captures(clause)?;
    Some(ForeignKey {
        column: caps[1].to_string(),
        ref_table: caps[2].to_string(),
        ref_column: caps[3].to_string(),
    })
}
