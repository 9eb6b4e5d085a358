//! Template compiler.
//!
//! [`Compiler::compile`] turns a template into a [`CompiledTemplate`]: literal
//! fragments interleaved with unbound directives. The compiled form is
//! immutable and can be completed any number of times.
//!
//! # Example
//! ```ignore
//! use fluentq::{Compiler, Quoter, Value};
//!
//! let template = Compiler::new().compile("SELECT * FROM users WHERE id = %%i")?;
//! let sql = template.complete(&Quoter::new(&driver), &[Value::from(7)])?;
//! ```

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

use crate::config::ProcessorConfig;
use crate::directive::{DIRECTIVE_PREFIX, Directive};
use crate::driver::Driver;
use crate::error::{QueryError, QueryResult};
use crate::processor::scanner::word_len;
use crate::quote::Quoter;
use crate::trace;
use crate::value::Value;

/// Matches a known directive name at the start of a split part.
fn directive_matcher() -> &'static Regex {
    static MATCHER: OnceLock<Regex> = OnceLock::new();
    MATCHER.get_or_init(|| {
        let names: Vec<&str> = Directive::ALL.iter().map(|d| d.name()).collect();
        Regex::new(&format!("^({})(?:[^0-9A-Za-z_]|$)", names.join("|")))
            .expect("invalid built-in directive regex")
    })
}

/// One piece of a compiled template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
    Literal(String),
    /// An unbound directive; `position` is the byte offset of its `%%`.
    Directive {
        directive: Directive,
        position: usize,
    },
}

/// A parsed, reusable template.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompiledTemplate {
    fragments: Vec<Fragment>,
}

impl CompiledTemplate {
    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    /// Directives in evaluation order.
    pub fn directives(&self) -> impl Iterator<Item = Directive> + '_ {
        self.fragments.iter().filter_map(|f| match f {
            Fragment::Directive { directive, .. } => Some(*directive),
            Fragment::Literal(_) => None,
        })
    }

    pub fn directive_count(&self) -> usize {
        self.directives().count()
    }

    /// `true` when the template has no directives.
    pub fn is_static(&self) -> bool {
        self.directive_count() == 0
    }

    /// Bind `args` to the directives in order and render the final string.
    ///
    /// The Nth directive takes `args[N - 1]`. Running out of arguments fails
    /// with [`QueryError::MissingArgument`]; surplus arguments are ignored.
    pub fn complete<D: Driver>(&self, quoter: &Quoter<D>, args: &[Value]) -> QueryResult<String> {
        let mut cursor = args.iter();
        let mut index = 0;
        let mut output = String::new();

        for fragment in &self.fragments {
            match fragment {
                Fragment::Literal(text) => output.push_str(text),
                Fragment::Directive {
                    directive,
                    position,
                } => {
                    index += 1;
                    let argument = cursor.next().ok_or(QueryError::MissingArgument {
                        index,
                        position: *position,
                    })?;
                    output.push_str(&directive.apply(quoter, argument)?);
                }
            }
        }

        trace::template_completed(quoter.config(), index, args.len());
        Ok(output)
    }
}

impl fmt::Display for CompiledTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for fragment in &self.fragments {
            match fragment {
                Fragment::Literal(text) => f.write_str(text)?,
                Fragment::Directive { directive, .. } => write!(f, "{directive}")?,
            }
        }
        Ok(())
    }
}

/// Compiles templates into [`CompiledTemplate`]s.
#[derive(Debug, Clone, Default)]
pub struct Compiler {
    config: ProcessorConfig,
}

impl Compiler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ProcessorConfig) -> Self {
        Self { config }
    }

    /// Compile `template`.
    ///
    /// The template is split on `%%`. Text before the first `%%` is literal.
    /// Each later part either starts with a known directive name followed by
    /// a non-word character (or the end), or is folded back into the literal
    /// text with its `%%` restored. A part starting with an unknown word is
    /// an error unless the config preserves unknown directives.
    pub fn compile(&self, template: &str) -> QueryResult<CompiledTemplate> {
        let mut parts = template.split(DIRECTIVE_PREFIX);
        let mut buffer = parts.next().unwrap_or_default().to_string();
        let mut offset = buffer.len();
        let mut fragments = Vec::new();

        for part in parts {
            let position = offset;
            offset += DIRECTIVE_PREFIX.len() + part.len();

            if let Some(directive) = self.match_directive(part) {
                if !buffer.is_empty() {
                    fragments.push(Fragment::Literal(std::mem::take(&mut buffer)));
                }
                fragments.push(Fragment::Directive {
                    directive,
                    position,
                });
                buffer.push_str(&part[directive.name().len()..]);
                continue;
            }

            let name = &part[..word_len(part)];
            if !name.is_empty() {
                if !self.config.preserves_unknown() {
                    return Err(QueryError::unknown_directive(name, position));
                }
                trace::unknown_directive_preserved(&self.config, name, position);
            }
            buffer.push_str(DIRECTIVE_PREFIX);
            buffer.push_str(part);
        }

        if !buffer.is_empty() {
            fragments.push(Fragment::Literal(buffer));
        }

        let compiled = CompiledTemplate { fragments };
        trace::template_compiled(
            &self.config,
            template,
            compiled.fragments.len(),
            compiled.directive_count(),
        );
        Ok(compiled)
    }

    fn match_directive(&self, part: &str) -> Option<Directive> {
        let name = directive_matcher().captures(part)?.get(1)?;
        Directive::from_name(name.as_str())
    }
}
