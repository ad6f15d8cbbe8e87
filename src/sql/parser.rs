//! Best-effort parser for CREATE TABLE statements.

use regex::Regex;
use std::sync::LazyLock;
use tracing::{debug, trace};

use super::clause::{match_column, match_foreign_key, match_primary_key, split_clauses};
use crate::ast::{Column, Schema, Table};

static STATEMENT_SPLIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)CREATE TABLE").expect("valid statement split regex"));

static TABLE_HEAD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(\w+)\s*\((.*)\);?").expect("valid table head regex"));

/// Parse DDL text into a Schema.
///
/// Never fails: statements and clauses that aren't understood are skipped.
/// Column indices are numbered from 1 across the whole input.
pub fn parse_ddl(input: &str) -> Schema {
    let normalized = normalize(input);
    let mut tables = Vec::new();
    let mut next_index = 1;

    for fragment in STATEMENT_SPLIT.split(&normalized).filter(|f| !f.is_empty()) {
        let (table, index) = parse_statement(fragment, next_index);
        next_index = index;

        match table {
            Some(table) => {
                trace!(
                    table = %table.name,
                    columns = table.columns.len(),
                    foreign_keys = table.foreign_keys.len(),
                    "parsed table"
                );
                tables.push(table);
            }
            None => debug!(fragment = %fragment.trim(), "skipping unrecognized statement"),
        }
    }

    debug!(tables = tables.len(), "parsed schema");
    Schema { tables }
}

/// Flatten the input onto one line. Literal `\n` escapes count as breaks.
fn normalize(input: &str) -> String {
    input.replace(['\r', '\n', '\t'], " ").replace("\\n", " ")
}

/// Parse one fragment following `CREATE TABLE`.
///
/// Takes the next free column index and hands back the next free index
/// after this statement, so numbering stays continuous across tables.
fn parse_statement(fragment: &str, mut next_index: usize) -> (Option<Table>, usize) {
    let Some(caps) = TABLE_HEAD.captures(fragment) else {
        return (None, next_index);
    };

    let mut table = Table::new(&caps[1]);

    for clause in split_clauses(&caps[2]) {
        let mut recognized = false;

        if let Some(def) = match_column(clause) {
            if def.inline_primary {
                table.primary_keys.push(def.name.clone());
            }
            table.columns.push(Column {
                name: def.name,
                typ: def.typ,
                is_primary: def.inline_primary,
                not_null: def.not_null,
                index: next_index,
            });
            next_index += 1;
            recognized = true;
        }

        if let Some(names) = match_primary_key(clause) {
            for name in &names {
                if let Some(col) = table.columns.iter_mut().find(|c| &c.name == name) {
                    col.is_primary = true;
                }
            }
            table.primary_keys.extend(names);
            recognized = true;
        }

        if let Some(fk) = match_foreign_key(clause) {
            table.foreign_keys.push(fk);
            recognized = true;
        }

        if !recognized {
            debug!(table = %table.name, %clause, "ignoring clause");
        }
    }

    (Some(table), next_index)
}
