use crate::error::{FaultSink, LogFaultSink, ScanFault};

use super::types::{Parameter, ScannedStatement, POSITIONAL_PREFIX};

const EXECUTE_KEYWORD: &str = "execute";
const BLOCK_KEYWORD: &str = "block";

/// Lexical context the scanner is inside at the current character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Default,
    InQuote,
    LineComment,
    BlockComment,
    ArrayLiteral,
    ParameterName,
    MatchingExecuteKeyword,
    MatchingBlockKeyword,
}

/// Single-pass statement scanner with one character of lookahead.
///
/// Rewrites `:name` tokens into positional `?` placeholders, collects the
/// parameters to bind (the per-occurrence sequence and the distinct display
/// sequence), and detects a leading EXECUTE BLOCK. Quoted literals, comments
/// and `[1,2:3]` array literals stream through untouched, masking anything
/// parameter-like inside them.
///
/// A scan never fails: per-character faults go to the configured
/// [`FaultSink`] and the scan keeps going, so the caller always gets a
/// best-effort result.
pub struct StatementScanner<'a> {
    variables: &'a str,
    sink: &'a dyn FaultSink,
}

impl<'a> StatementScanner<'a> {
    pub fn new() -> Self {
        StatementScanner {
            variables: "",
            sink: &LogFaultSink,
        }
    }

    /// Catalog blob of pre-bound names, each wrapped as `<name>`. Tokens found
    /// in it (case-insensitively) stay `:name` in the processed SQL instead of
    /// becoming parameters.
    pub fn with_variables(mut self, variables: &'a str) -> Self {
        self.variables = variables;
        self
    }

    pub fn with_fault_sink(mut self, sink: &'a dyn FaultSink) -> Self {
        self.sink = sink;
        self
    }

    pub fn scan(&self, sql: &str) -> ScannedStatement {
        let mut run = ScanRun::new(self.variables, sql.len());
        let chars: Vec<char> = sql.chars().collect();
        let len = chars.len();
        let mut i = 0usize;
        while i < len {
            let c = chars[i];
            let next = if i + 1 < len { Some(chars[i + 1]) } else { None };
            run.position = i;
            match run.step(c, next) {
                Ok(consumed) => i += consumed,
                Err(fault) => {
                    // Fail-soft: report and keep scanning in whatever state
                    // the fault left behind.
                    self.sink.report("statement scan", &fault);
                    i += 1;
                }
            }
        }
        run.finish()
    }
}

impl Default for StatementScanner<'_> {
    fn default() -> Self {
        Self::new()
    }
}

struct ScanRun {
    variables_lower: String,
    state: ScanState,
    quote: char,
    name: String,
    keyword_index: usize,
    // "first" gates EXECUTE matching to the leading token of the statement;
    // "second" gates BLOCK matching to the token right after a full EXECUTE.
    // Whitespace is transparent to both; any other Default-state character
    // clears them.
    first: bool,
    second: bool,
    position: usize,
    out: String,
    params: Vec<Parameter>,
    occurrences: Vec<usize>,
    execute_block: bool,
}

impl ScanRun {
    fn new(variables: &str, sql_len: usize) -> Self {
        ScanRun {
            variables_lower: variables.to_lowercase(),
            state: ScanState::Default,
            quote: '\'',
            name: String::new(),
            keyword_index: 0,
            first: true,
            second: false,
            position: 0,
            out: String::with_capacity(sql_len),
            params: Vec::new(),
            occurrences: Vec::new(),
            execute_block: false,
        }
    }

    /// Process one character under the current state. Returns how many input
    /// characters the step consumed: two only for a doubled quote delimiter.
    fn step(&mut self, c: char, next: Option<char>) -> Result<usize, ScanFault> {
        match self.state {
            ScanState::Default => self.step_default(c, next),
            ScanState::InQuote => {
                self.out.push(c);
                if c == self.quote {
                    if next == Some(self.quote) {
                        // Doubled delimiter escapes itself; consume the pair
                        // and stay inside the literal.
                        self.out.push(self.quote);
                        return Ok(2);
                    }
                    self.state = ScanState::Default;
                }
                Ok(1)
            }
            ScanState::LineComment => {
                self.out.push(c);
                if c == '\n' {
                    self.state = ScanState::Default;
                }
                Ok(1)
            }
            ScanState::BlockComment => {
                self.out.push(c);
                // The closing '/' is left for the next iteration, which runs
                // it through Default like any other character.
                if c == '*' && next == Some('/') {
                    self.state = ScanState::Default;
                }
                Ok(1)
            }
            ScanState::ArrayLiteral => {
                if c.is_ascii_digit() || matches!(c, ':' | ' ' | ',' | '\t' | '\n' | '\r') {
                    self.out.push(c);
                    Ok(1)
                } else {
                    // Exit character gets full Default treatment in the same
                    // step, keyword flags included.
                    self.state = ScanState::Default;
                    self.step_default(c, next)
                }
            }
            ScanState::ParameterName => {
                if is_name_char(c) {
                    self.name.push(c);
                    if next.is_none() {
                        // Name runs to the end of the input; finalize here.
                        self.finalize_parameter()?;
                        self.state = ScanState::Default;
                    }
                    Ok(1)
                } else {
                    self.finalize_parameter()?;
                    self.state = ScanState::Default;
                    self.step_default(c, next)
                }
            }
            ScanState::MatchingExecuteKeyword => {
                self.out.push(c);
                let expected = EXECUTE_KEYWORD.as_bytes()[self.keyword_index] as char;
                if c.eq_ignore_ascii_case(&expected) {
                    self.keyword_index += 1;
                    if self.keyword_index == EXECUTE_KEYWORD.len() {
                        self.second = true;
                        self.state = ScanState::Default;
                    }
                } else {
                    self.first = false;
                    self.state = ScanState::Default;
                }
                Ok(1)
            }
            ScanState::MatchingBlockKeyword => {
                self.out.push(c);
                let expected = BLOCK_KEYWORD.as_bytes()[self.keyword_index] as char;
                if c.eq_ignore_ascii_case(&expected) {
                    self.keyword_index += 1;
                    if self.keyword_index == BLOCK_KEYWORD.len() {
                        self.execute_block = true;
                        self.state = ScanState::Default;
                    }
                } else {
                    self.second = false;
                    self.state = ScanState::Default;
                }
                Ok(1)
            }
        }
    }

    fn step_default(&mut self, c: char, next: Option<char>) -> Result<usize, ScanFault> {
        match c {
            '\'' | '"' => {
                self.quote = c;
                self.out.push(c);
                self.state = ScanState::InQuote;
            }
            '-' if next == Some('-') => {
                // First dash is emitted here; the rest of the comment streams
                // through LineComment until the newline.
                self.out.push(c);
                self.state = ScanState::LineComment;
            }
            '/' if next == Some('*') => {
                self.out.push(c);
                self.state = ScanState::BlockComment;
            }
            '[' => {
                self.out.push(c);
                self.state = ScanState::ArrayLiteral;
            }
            '?' => self.push_positional(),
            ':' if next.is_some_and(is_name_char) => {
                // Substitute the placeholder up front; the name itself is
                // collected by ParameterName and resolved at finalization.
                self.out.push('?');
                self.name.clear();
                self.state = ScanState::ParameterName;
            }
            ':' => self.out.push(c),
            'e' | 'E' if self.first => {
                self.out.push(c);
                self.keyword_index = 1;
                self.state = ScanState::MatchingExecuteKeyword;
            }
            'b' | 'B' if self.second => {
                self.out.push(c);
                self.keyword_index = 1;
                self.state = ScanState::MatchingBlockKeyword;
            }
            ' ' | '\t' | '\r' | '\n' => self.out.push(c),
            _ => {
                self.first = false;
                self.second = false;
                self.out.push(c);
            }
        }
        Ok(1)
    }

    /// Resolve the accumulated `:name` token: pre-bound names get their text
    /// restored, everything else lands in the parameter table.
    fn finalize_parameter(&mut self) -> Result<(), ScanFault> {
        let name = std::mem::take(&mut self.name);
        if self.is_prebound(&name) {
            // The caller binds this one by name at a later stage; put the
            // original token back in place of the placeholder.
            match self.out.pop() {
                Some('?') => {
                    self.out.push(':');
                    self.out.push_str(&name);
                    Ok(())
                }
                Some(other) => {
                    self.out.push(other);
                    Err(self.fault("pre-bound name not preceded by its placeholder"))
                }
                None => Err(self.fault("pre-bound name with no emitted text")),
            }
        } else {
            let idx = match self.params.iter().position(|p| p.name() == name) {
                Some(existing) => existing,
                None => {
                    self.params.push(Parameter::named(name));
                    self.params.len() - 1
                }
            };
            self.occurrences.push(idx);
            Ok(())
        }
    }

    fn push_positional(&mut self) {
        let label = format!("{}{}", POSITIONAL_PREFIX, self.params.len() + 1);
        self.params.push(Parameter::named(label));
        self.occurrences.push(self.params.len() - 1);
        self.out.push('?');
    }

    fn is_prebound(&self, name: &str) -> bool {
        self.variables_lower
            .contains(&format!("<{}>", name.to_lowercase()))
    }

    fn fault(&self, message: &'static str) -> ScanFault {
        ScanFault {
            position: self.position,
            message,
        }
    }

    fn finish(self) -> ScannedStatement {
        tracing::debug!(
            occurrences = self.occurrences.len(),
            distinct = self.params.len(),
            execute_block = self.execute_block,
            "statement scanned"
        );
        ScannedStatement::new(self.out, self.params, self.occurrences, self.execute_block)
    }
}

/// Characters that may appear in a `:name` token: Unicode letters and digits,
/// `_`, and `$`.
fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}
