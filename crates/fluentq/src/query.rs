//! Token-stack queries and their compiled form.
//!
//! # Example
//! ```ignore
//! use fluentq::{Query, Value};
//!
//! let mut q = Query::new(&driver);
//! q.push_token("select", vec![Value::symbol("id")])
//!     .push_token("from", vec![Value::symbol("users")])
//!     .push_token("where", vec!["[id] = %%i".into()]);
//!
//! let compiled = q.compile()?;
//! let sql = compiled.build(&[Value::from(7)])?;
//! ```

use crate::compiler::CompiledTemplate;
use crate::config::ProcessorConfig;
use crate::driver::{BuildMode, Driver};
use crate::error::QueryResult;
use crate::processor::Processor;
use crate::token::{Token, TokenStack};
use crate::value::Value;

/// A query recorded as a token stack, rendered by its driver.
#[derive(Debug, Clone)]
pub struct Query<'d, D: ?Sized> {
    driver: &'d D,
    config: ProcessorConfig,
    tokens: TokenStack,
}

impl<'d, D: Driver + ?Sized> Query<'d, D> {
    pub fn new(driver: &'d D) -> Self {
        Self::with_config(driver, ProcessorConfig::default())
    }

    pub fn with_config(driver: &'d D, config: ProcessorConfig) -> Self {
        Self {
            driver,
            config,
            tokens: TokenStack::new(),
        }
    }

    /// Record a call.
    pub fn push_token(&mut self, name: impl Into<String>, arguments: Vec<Value>) -> &mut Self {
        self.tokens.push_token(name, arguments);
        self
    }

    /// Record free query text.
    pub fn query(&mut self, arguments: Vec<Value>) -> &mut Self {
        self.tokens.push_raw(arguments);
        self
    }

    pub fn push(&mut self, token: Token) -> &mut Self {
        self.tokens.push(token);
        self
    }

    pub fn tokens(&self) -> &TokenStack {
        &self.tokens
    }

    /// Name of the first token (`select`, `insert`, ...).
    pub fn query_type(&self) -> Option<&str> {
        self.tokens.query_type()
    }

    pub fn config(&self) -> &ProcessorConfig {
        &self.config
    }

    /// Render the final query string.
    pub fn build(&self) -> QueryResult<String> {
        self.driver
            .build_query(&self.tokens, BuildMode::Build, &self.config)
    }

    /// Build this query and wrap it for use as a `%%sql` argument.
    pub fn to_subquery(&self) -> QueryResult<Value> {
        self.build().map(Value::Subquery)
    }

    /// Render the query with directives left in place and compile it.
    pub fn compile(&self) -> QueryResult<CompiledQuery<'d, D>> {
        let template = self
            .driver
            .build_query(&self.tokens, BuildMode::Prepare, &self.config)?;
        CompiledQuery::new(self.driver, self.config.clone(), &template)
    }
}

/// A query compiled once and built many times with different arguments.
#[derive(Debug, Clone)]
pub struct CompiledQuery<'d, D: ?Sized> {
    processor: Processor<&'d D>,
    template: CompiledTemplate,
}

impl<'d, D: Driver + ?Sized> CompiledQuery<'d, D> {
    /// Compile an already-rendered template for `driver`.
    pub fn new(driver: &'d D, config: ProcessorConfig, template: &str) -> QueryResult<Self> {
        let processor = Processor::with_config(driver, config);
        let template = processor.compile(template)?;
        Ok(Self {
            processor,
            template,
        })
    }

    /// Complete the template with positional arguments.
    pub fn build(&self, args: &[Value]) -> QueryResult<String> {
        self.processor.complete(&self.template, args)
    }

    pub fn template(&self) -> &CompiledTemplate {
        &self.template
    }
}
