//! SQL DDL to schema conversion module.

mod clause;
mod parser;

pub use clause::split_clauses;
pub use parser::parse_ddl;
