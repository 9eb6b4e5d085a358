//! Formatting processor.
//!
//! Renders a [`Segment`] sequence into a query string (or a template for the
//! compiler), substituting column, string and directive markers.
//!
//! # Example
//!
//! ```ignore
//! use fluentq::{Processor, ProcessMode, Segment, Value};
//!
//! let processor = Processor::new(&driver);
//! let sql = processor.process_formatted(
//!     &[
//!         Segment::text("SELECT * FROM"),
//!         Segment::ident("users"),
//!         Segment::text("WHERE [id] = %%i"),
//!         Value::from(7).into(),
//!     ],
//!     ProcessMode::Build,
//! )?;
//! ```

pub(crate) mod scanner;


use bitflags::bitflags;

use crate::compiler::{CompiledTemplate, Compiler};
use crate::config::ProcessorConfig;
use crate::directive::{DIRECTIVE_PREFIX, Directive};
use crate::driver::{Driver, EqualityMode};
use crate::error::{QueryError, QueryResult};
use crate::quote::Quoter;
use crate::token::Segment;
use crate::trace;
use crate::value::{Value, ValueMap};

use scanner::Span;

bitflags! {
    /// Marker substitutions to perform.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Replacements: u8 {
        /// `"` → dialect string delimiter.
        const STRING = 1;
        /// `[path]` → quoted identifier.
        const COLUMN = 2;
        /// `%%name` → directive applied to the next segment.
        const FORMATTING = 4;
    }
}

/// Which substitution passes [`Processor::process_formatted`] runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProcessMode {
    /// Column and string markers only; directives are left for the compiler.
    Compile,
    /// Everything.
    #[default]
    Build,
    /// Directives only; the text was already processed in `Compile` mode.
    Finish,
}

impl ProcessMode {
    pub fn replacements(self) -> Replacements {
        match self {
            ProcessMode::Compile => Replacements::COLUMN | Replacements::STRING,
            ProcessMode::Build => Replacements::all(),
            ProcessMode::Finish => Replacements::FORMATTING,
        }
    }
}

/// The formatting processor for one driver.
#[derive(Debug, Clone)]
pub struct Processor<D> {
    quoter: Quoter<D>,
    compiler: Compiler,
}

impl<D: Driver> Processor<D> {
    /// Create a processor with the default configuration.
    pub fn new(driver: D) -> Self {
        Self::with_config(driver, ProcessorConfig::default())
    }

    pub fn with_config(driver: D, config: ProcessorConfig) -> Self {
        Self {
            compiler: Compiler::with_config(config.clone()),
            quoter: Quoter::with_config(driver, config),
        }
    }

    pub fn quoter(&self) -> &Quoter<D> {
        &self.quoter
    }

    pub fn driver(&self) -> &D {
        self.quoter.driver()
    }

    pub fn config(&self) -> &ProcessorConfig {
        self.quoter.config()
    }

    pub fn compiler(&self) -> &Compiler {
        &self.compiler
    }

    /// Compile a template string.
    pub fn compile(&self, template: &str) -> QueryResult<CompiledTemplate> {
        self.compiler.compile(template)
    }

    /// Complete a compiled template with positional arguments.
    pub fn complete(&self, template: &CompiledTemplate, args: &[Value]) -> QueryResult<String> {
        template.complete(&self.quoter, args)
    }

    pub fn quote_value(&self, value: &Value) -> QueryResult<String> {
        self.quoter.quote_value(value)
    }

    pub fn quote_identifier(&self, identifier: &str) -> String {
        self.quoter.quote_identifier(identifier)
    }

    pub fn process_identifiers<I, S>(&self, identifiers: I) -> String
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.quoter.process_identifiers(identifiers)
    }

    pub fn process_array(&self, values: &[Value], glue: &str) -> QueryResult<String> {
        self.quoter.process_array(values, glue)
    }

    pub fn process_hash(
        &self,
        pairs: &ValueMap,
        glue: &str,
        mode: EqualityMode,
    ) -> QueryResult<String> {
        self.quoter.process_hash(pairs, glue, mode)
    }

    pub fn null(&self) -> String {
        self.quoter.null()
    }

    /// Render a segment sequence.
    ///
    /// Segments are joined by a single space. A `%%name` directive in a text
    /// segment consumes the next segment as its argument.
    ///
    /// Error positions are byte offsets within the text segment that holds
    /// the marker, not within the rendered output.
    pub fn process_formatted(&self, sequence: &[Segment], mode: ProcessMode) -> QueryResult<String> {
        let replacements = mode.replacements();
        let mut output = String::new();
        let mut consumed = 0;
        let mut i = 0;

        while i < sequence.len() {
            if i > 0 {
                output.push(' ');
            }
            match &sequence[i] {
                Segment::Text(text) => {
                    self.render_text(text, sequence, &mut i, &mut consumed, replacements, &mut output)?
                }
                Segment::Ident(name) => output.push_str(&self.quote_identifier(name)),
                // Opaque text is only emitted under raw fallback.
                Segment::Value(value @ Value::Opaque(_)) => {
                    output.push_str(&self.quote_value(value)?)
                }
                Segment::Value(value) => match value.to_text() {
                    Some(text) => output.push_str(&text),
                    None => output.push_str(&self.quote_value(value)?),
                },
            }
            i += 1;
        }

        Ok(output)
    }

    fn render_text(
        &self,
        text: &str,
        sequence: &[Segment],
        position: &mut usize,
        consumed: &mut usize,
        replacements: Replacements,
        output: &mut String,
    ) -> QueryResult<()> {
        for span in scanner::scan(text) {
            match span {
                Span::Literal(s) => output.push_str(s),
                Span::Quote if replacements.contains(Replacements::STRING) => {
                    output.push_str(&self.quoter.string_delimiter())
                }
                Span::Quote => output.push('"'),
                Span::Column(path) if replacements.contains(Replacements::COLUMN) => {
                    output.push_str(&self.quote_identifier(path))
                }
                Span::Column(path) => {
                    output.push('[');
                    output.push_str(path);
                    output.push(']');
                }
                Span::Directive { name, offset }
                    if replacements.contains(Replacements::FORMATTING) =>
                {
                    let Some(directive) = self.resolve(name, offset)? else {
                        output.push_str(DIRECTIVE_PREFIX);
                        output.push_str(name);
                        continue;
                    };
                    *consumed += 1;
                    *position += 1;
                    let argument = sequence.get(*position).ok_or(QueryError::MissingArgument {
                        index: *consumed,
                        position: offset,
                    })?;
                    output.push_str(&directive.apply(&self.quoter, &argument.to_value())?);
                }
                Span::Directive { name, .. } => {
                    output.push_str(DIRECTIVE_PREFIX);
                    output.push_str(name);
                }
            }
        }
        Ok(())
    }

    /// Look up a directive name, applying the unknown directive policy.
    ///
    /// `Ok(None)` means the marker is kept verbatim.
    fn resolve(&self, name: &str, offset: usize) -> QueryResult<Option<Directive>> {
        if let Some(directive) = Directive::from_name(name) {
            return Ok(Some(directive));
        }
        if !self.config().preserves_unknown() {
            return Err(QueryError::unknown_directive(name, offset));
        }
        trace::unknown_directive_preserved(self.config(), name, offset);
        Ok(None)
    }

    /// Process a single marker text (`[a.b]`, `"..."` or `%%name`).
    ///
    /// Markers whose replacement is not enabled are returned unchanged. A
    /// formatting directive without an argument is applied to NULL.
    pub fn process_directive(
        &self,
        directive: &str,
        argument: Option<&Value>,
        replacements: Replacements,
    ) -> QueryResult<String> {
        if replacements.contains(Replacements::COLUMN)
            && directive.starts_with('[')
            && directive.ends_with(']')
            && directive.len() > 2
        {
            return Ok(self.quote_identifier(&directive[1..directive.len() - 1]));
        }
        if replacements.contains(Replacements::STRING) && directive.ends_with('"') {
            return Ok(directive.replace('"', &self.quoter.string_delimiter()));
        }
        if replacements.contains(Replacements::FORMATTING) {
            if let Some(name) = directive.strip_prefix(DIRECTIVE_PREFIX) {
                return self.process_formatting(name, argument.unwrap_or(&Value::Null));
            }
        }
        Ok(directive.to_string())
    }

    /// Apply the directive called `name` to `argument`.
    pub fn process_formatting(&self, name: &str, argument: &Value) -> QueryResult<String> {
        match self.resolve(name, 0)? {
            Some(directive) => directive.apply(&self.quoter, argument),
            None => Ok(format!("{DIRECTIVE_PREFIX}{name}")),
        }
    }
}
