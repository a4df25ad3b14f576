use serde::Serialize;

use crate::error::{BindError, BindResult};

/// Label prefix for parameters synthesized from bare `?` placeholders.
/// Not an identifier character, so scanned names can never collide with it.
pub(crate) const POSITIONAL_PREFIX: char = '№';

/// A placeholder extracted from statement text, to be bound before execution.
///
/// Named parameters come from `:name` tokens; positional ones are synthesized
/// for bare `?` placeholders and labeled `№1`, `№2`, … after their position
/// in the display sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Parameter {
    name: String,
    value: Option<String>,
}

impl Parameter {
    pub(crate) fn named(name: String) -> Self {
        Parameter { name, value: None }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// True for synthesized `№k` labels.
    pub fn is_positional(&self) -> bool {
        self.name.starts_with(POSITIONAL_PREFIX)
    }
}

/// Result of scanning one statement: the rewritten text plus everything the
/// caller needs to bind and route it.
///
/// The scan-derived structure is fixed at construction; parameter values are
/// the only thing that changes afterwards, via [`ScannedStatement::set_value`].
#[derive(Debug, Clone)]
pub struct ScannedStatement {
    processed_sql: String,
    // Distinct parameters in first-occurrence order; doubles as the entity
    // arena the occurrence list points into.
    params: Vec<Parameter>,
    occurrences: Vec<usize>,
    execute_block: bool,
}

impl ScannedStatement {
    pub(crate) fn new(
        processed_sql: String,
        params: Vec<Parameter>,
        occurrences: Vec<usize>,
        execute_block: bool,
    ) -> Self {
        ScannedStatement {
            processed_sql,
            params,
            occurrences,
            execute_block,
        }
    }

    /// The statement with every parameter token rewritten to a positional `?`.
    pub fn processed_sql(&self) -> &str {
        &self.processed_sql
    }

    /// Whether the statement opens with the EXECUTE BLOCK keyword pair and
    /// needs the caller's block execution path.
    pub fn is_execute_block(&self) -> bool {
        self.execute_block
    }

    /// Distinct parameters, one per name, in first-occurrence order. This is
    /// the sequence a parameter-entry form prompts for.
    pub fn display_parameters(&self) -> &[Parameter] {
        &self.params
    }

    /// Every placeholder occurrence in input order. Repeated names yield the
    /// same entity each time, so this may be longer than the display sequence.
    pub fn parameters(&self) -> impl Iterator<Item = &Parameter> + '_ {
        self.occurrences.iter().map(|&idx| &self.params[idx])
    }

    pub fn parameter_count(&self) -> usize {
        self.occurrences.len()
    }

    /// Assign a value to the distinct parameter with exactly this name. Every
    /// occurrence of the name sees the assignment.
    pub fn set_value(&mut self, name: &str, value: Option<String>) -> BindResult<()> {
        match self.params.iter_mut().find(|p| p.name == name) {
            Some(param) => {
                param.value = value;
                Ok(())
            }
            None => Err(BindError::UnknownParameter(name.to_string())),
        }
    }

    /// Occurrence-order values for positional binding against the `?`
    /// placeholders of the processed SQL.
    pub fn values_in_order(&self) -> Vec<Option<&str>> {
        self.occurrences
            .iter()
            .map(|&idx| self.params[idx].value.as_deref())
            .collect()
    }
}
