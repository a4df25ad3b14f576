use std::fmt;

use serde::Serialize;

/// Coarse routing classification of a statement by its leading keyword.
///
/// This complements the scanner's EXECUTE BLOCK flag: the caller picks an
/// execution path (row-returning query, DML with change counts, DDL, block
/// execution) without parsing the statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatementKind {
    Query,
    Dml,
    Ddl,
    Transaction,
    ExecuteBlock,
    ExecuteProcedure,
    Unknown,
}

impl StatementKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatementKind::Query => "query",
            StatementKind::Dml => "dml",
            StatementKind::Ddl => "ddl",
            StatementKind::Transaction => "transaction",
            StatementKind::ExecuteBlock => "execute block",
            StatementKind::ExecuteProcedure => "execute procedure",
            StatementKind::Unknown => "unknown",
        }
    }
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Skip whitespace and any run of line/block comments at the start of the
/// text. An unterminated comment swallows the rest of the input.
pub fn strip_leading_comments(sql: &str) -> &str {
    let mut remaining = sql;

    loop {
        let trimmed = remaining.trim_start();

        if trimmed.starts_with("--") {
            match trimmed.find('\n') {
                Some(line_end) => {
                    remaining = &trimmed[line_end + 1..];
                    continue;
                }
                None => return "",
            }
        }

        if trimmed.starts_with("/*") {
            match trimmed.find("*/") {
                Some(block_end) => {
                    remaining = &trimmed[block_end + 2..];
                    continue;
                }
                None => return "",
            }
        }

        return trimmed;
    }
}

/// First whitespace-delimited token after leading comments, uppercased.
pub fn leading_keyword(sql: &str) -> Option<String> {
    strip_leading_comments(sql)
        .split_whitespace()
        .next()
        .map(|token| token.to_uppercase())
}

pub fn is_query_statement(sql: &str) -> bool {
    matches!(classify_statement(sql), StatementKind::Query)
}

pub fn classify_statement(sql: &str) -> StatementKind {
    let mut tokens = strip_leading_comments(sql).split_whitespace();
    let first = match tokens.next() {
        Some(token) => token.to_uppercase(),
        None => return StatementKind::Unknown,
    };

    match first.as_str() {
        "SELECT" | "WITH" => StatementKind::Query,
        "INSERT" | "UPDATE" | "DELETE" | "MERGE" => StatementKind::Dml,
        "CREATE" | "RECREATE" | "ALTER" | "DROP" | "COMMENT" | "DECLARE" | "GRANT" | "REVOKE" => {
            StatementKind::Ddl
        }
        "COMMIT" | "ROLLBACK" | "SAVEPOINT" | "RELEASE" => StatementKind::Transaction,
        "SET" => {
            // SET TRANSACTION opens a transaction; every other SET statement
            // (GENERATOR, STATISTICS) alters an object.
            if tokens
                .next()
                .unwrap_or("")
                .eq_ignore_ascii_case("transaction")
            {
                StatementKind::Transaction
            } else {
                StatementKind::Ddl
            }
        }
        "EXECUTE" => {
            // The token after EXECUTE may carry a parenthesis glued on, as in
            // "execute block(x int)".
            let second: String = tokens
                .next()
                .unwrap_or("")
                .chars()
                .take_while(char::is_ascii_alphabetic)
                .collect();
            if second.eq_ignore_ascii_case("block") {
                StatementKind::ExecuteBlock
            } else {
                StatementKind::ExecuteProcedure
            }
        }
        _ => StatementKind::Unknown,
    }
}
