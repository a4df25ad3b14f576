//! Statement preparation for Firebird-style query tools.
//!
//! The core is [`StatementScanner`], a single-pass character scanner that
//! rewrites `:name` tokens into positional `?` placeholders, extracts the
//! ordered parameters to bind, and detects EXECUTE BLOCK statements. Around
//! it sit the [`VariableCatalog`] of pre-bound names and a coarse
//! leading-keyword statement classifier for execution routing.

pub mod error;
pub mod statement;
pub mod variables;

pub use error::{BindError, BindResult, CatalogError, FaultSink, LogFaultSink, ScanFault};
pub use statement::{
    classify_statement, is_query_statement, leading_keyword, strip_leading_comments, Parameter,
    ScannedStatement, StatementKind, StatementScanner,
};
pub use variables::VariableCatalog;
