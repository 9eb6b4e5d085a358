//! Query tokens.
//!
//! A query is recorded as an ordered list of [`Token`]s (`select(...)`,
//! `from(...)`, raw text, ...). Drivers turn a [`TokenStack`] into a
//! sequence of [`Segment`]s which the processor renders.

use crate::value::Value;

/// A recorded query call: a name plus its arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    name: String,
    arguments: Vec<Value>,
    alias: Option<String>,
}

impl Token {
    /// Name carried by raw tokens.
    pub const RAW_NAME: &'static str = " ";

    pub fn new(name: impl Into<String>, arguments: Vec<Value>) -> Self {
        Self {
            name: name.into(),
            arguments,
            alias: None,
        }
    }

    /// A raw token: free query text not associated with any call.
    pub fn raw(arguments: Vec<Value>) -> Self {
        Self::new(Self::RAW_NAME, arguments)
    }

    /// The reported name: the alias if one is set, otherwise the recorded name.
    pub fn name(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }

    pub fn original_name(&self) -> &str {
        &self.name
    }

    pub fn arguments(&self) -> &[Value] {
        &self.arguments
    }

    pub fn set_alias(&mut self, alias: impl Into<String>) {
        self.alias = Some(alias.into());
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.set_alias(alias);
        self
    }

    pub fn is_raw(&self) -> bool {
        self.name == Self::RAW_NAME
    }
}

/// Ordered list of tokens making up one query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenStack {
    tokens: Vec<Token>,
}

impl TokenStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a call.
    pub fn push_token(&mut self, name: impl Into<String>, arguments: Vec<Value>) -> &mut Self {
        self.tokens.push(Token::new(name, arguments));
        self
    }

    /// Record raw query text.
    pub fn push_raw(&mut self, arguments: Vec<Value>) -> &mut Self {
        self.tokens.push(Token::raw(arguments));
        self
    }

    pub fn push(&mut self, token: Token) -> &mut Self {
        self.tokens.push(token);
        self
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn first(&self) -> Option<&Token> {
        self.tokens.first()
    }

    /// The query type: name of the first token.
    pub fn query_type(&self) -> Option<&str> {
        self.first().map(Token::name)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }
}

impl<'a> IntoIterator for &'a TokenStack {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

/// One element of the sequence rendered by the processor.
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    /// Template text, scanned for markers.
    Text(String),
    /// Bare identifier, rendered quoted.
    Ident(String),
    /// Any other value, rendered through its text conversion.
    Value(Value),
}

impl Segment {
    pub fn text(text: impl Into<String>) -> Self {
        Segment::Text(text.into())
    }

    pub fn ident(name: impl Into<String>) -> Self {
        Segment::Ident(name.into())
    }

    /// The segment as a directive argument.
    pub fn to_value(&self) -> Value {
        match self {
            Segment::Text(s) => Value::Text(s.clone()),
            Segment::Ident(s) => Value::Symbol(s.clone()),
            Segment::Value(v) => v.clone(),
        }
    }
}

impl From<&str> for Segment {
    fn from(v: &str) -> Self {
        Segment::Text(v.to_string())
    }
}

impl From<String> for Segment {
    fn from(v: String) -> Self {
        Segment::Text(v)
    }
}

impl From<Value> for Segment {
    fn from(v: Value) -> Self {
        match v {
            Value::Text(s) => Segment::Text(s),
            Value::Symbol(s) => Segment::Ident(s),
            other => Segment::Value(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alias_overrides_reported_name() {
        let token = Token::new("select", vec![]).with_alias("pick");
        assert_eq!(token.name(), "pick");
        assert_eq!(token.original_name(), "select");
    }

    #[test]
    fn stack_reports_query_type() {
        let mut stack = TokenStack::new();
        assert_eq!(stack.query_type(), None);
        stack
            .push_token("select", vec![Value::symbol("id")])
            .push_raw(vec!["LIMIT 1".into()]);
        assert_eq!(stack.query_type(), Some("select"));
        assert_eq!(stack.len(), 2);
        assert!(stack.tokens()[1].is_raw());
    }

    #[test]
    fn segments_convert_to_arguments() {
        assert_eq!(Segment::ident("id").to_value(), Value::symbol("id"));
        assert_eq!(Segment::from(Value::from(3)).to_value(), Value::Integer(3));
        assert_eq!(Segment::from(Value::from("x")), Segment::text("x"));
    }
}
