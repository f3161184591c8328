use log::{debug, warn};
use matcher_framework::builders::{string_end, string_start};
use matcher_framework::{
    Buffer, Fragment, MatchConfig, MatchResult, Matcher, MaxLength, Pattern,
};
use std::fmt;
use std::ops::{Add, BitOr};
use std::sync::Arc;

/// A pattern with a name, usable anywhere a pattern is.
///
/// Consuming wraps the inner result in [`Fragment::Named`], so callers can
/// tell which grammar produced each part of a larger parse. A grammar may
/// carry a *bad pattern*: when it matches the whole text of an otherwise
/// successful match, the match is turned into a failure. This keeps the main
/// pattern simple, e.g. a hexadecimal literal that rejects `-0x0000`
/// without spelling out "any digit but not all zeros".
#[derive(Clone)]
pub struct NamedGrammar {
    name: Arc<str>,
    pattern: Pattern,
    rejection: Option<Rejection>,
}

#[derive(Clone)]
struct Rejection {
    pattern: Pattern,
    anchored: Pattern,
}

impl Rejection {
    fn new(pattern: Pattern) -> Self {
        let anchored = string_start() + pattern.clone() + string_end();
        Self { pattern, anchored }
    }

    /// Whether the bad pattern covers all of `text`.
    fn matches(&self, text: &str, config: &MatchConfig) -> MatchResult<bool> {
        let mut buffer = Buffer::with_config(text, config.clone());
        match self.anchored.consume(&mut buffer) {
            Ok(_) => Ok(true),
            Err(error) if error.is_recoverable() => Ok(false),
            Err(error) => Err(error),
        }
    }
}

impl NamedGrammar {
    pub fn new(name: impl Into<Arc<str>>, pattern: impl Into<Pattern>) -> Self {
        Self {
            name: name.into(),
            pattern: pattern.into(),
            rejection: None,
        }
    }

    /// Rejects matches whose full text also matches `bad`.
    pub fn with_bad_pattern(mut self, bad: impl Into<Pattern>) -> Self {
        self.rejection = Some(Rejection::new(bad.into()));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    pub fn bad_pattern(&self) -> Option<&Pattern> {
        self.rejection.as_ref().map(|rejection| &rejection.pattern)
    }

    /// Matches a prefix of `input`.
    ///
    /// Trailing text is left alone: `float().parse("2.0+1")` yields `2.0`.
    pub fn parse(&self, input: &str) -> MatchResult<Parsed> {
        self.parse_with_config(input, MatchConfig::default())
    }

    pub fn parse_with_config(&self, input: &str, config: MatchConfig) -> MatchResult<Parsed> {
        debug!("parsing {:?} as {}", input, self.name);
        let mut buffer = Buffer::with_config(input, config);
        let fragment = self.match_inner(&mut buffer)?;
        Ok(self.parsed(&buffer, fragment))
    }

    /// Like [`parse`](NamedGrammar::parse), but fails unless all of `input`
    /// was consumed.
    pub fn parse_complete(&self, input: &str) -> MatchResult<Parsed> {
        let mut buffer = Buffer::new(input);
        let fragment = self.match_inner(&mut buffer)?;
        if !buffer.is_eof() {
            return Err(buffer.failure(format!("Expected end of input after {}", self.name)));
        }
        Ok(self.parsed(&buffer, fragment))
    }

    fn parsed(&self, buffer: &Buffer, fragment: Fragment) -> Parsed {
        Parsed {
            name: Arc::clone(&self.name),
            input: Arc::from(buffer.input()),
            fragment,
            consumed: buffer.position(),
        }
    }

    fn match_inner(&self, buffer: &mut Buffer) -> MatchResult<Fragment> {
        let start = buffer.position();
        let fragment = self.pattern.consume(buffer)?;
        if let Some(rejection) = &self.rejection {
            let text = fragment.text();
            if rejection.matches(&text, buffer.config())? {
                warn!("{} rejected {:?}: matches {}", self.name, text, rejection.pattern);
                let consumed = buffer.position() - start;
                buffer.retreat(consumed);
                return Err(buffer.failure(format!("Invalid match {:?} in {}", text, self.name)));
            }
        }
        Ok(fragment)
    }
}

impl Matcher for NamedGrammar {
    fn consume(&self, buffer: &mut Buffer) -> MatchResult<Fragment> {
        let fragment = self.match_inner(buffer)?;
        Ok(Fragment::named(Arc::clone(&self.name), fragment))
    }

    fn minimum_length(&self) -> usize {
        self.pattern.minimum_length()
    }

    fn maximum_length(&self) -> MaxLength {
        self.pattern.maximum_length()
    }
}

/// Shows the grammar by name, so patterns built from grammars read as
/// `Any(Integer, Float)`.
impl fmt::Debug for NamedGrammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl From<NamedGrammar> for Pattern {
    fn from(grammar: NamedGrammar) -> Self {
        let matcher: Arc<dyn Matcher> = Arc::new(grammar);
        Pattern::from(matcher)
    }
}

impl<P: Into<Pattern>> Add<P> for NamedGrammar {
    type Output = Pattern;

    fn add(self, rhs: P) -> Pattern {
        Pattern::from(self) + rhs.into()
    }
}

impl Add<NamedGrammar> for Pattern {
    type Output = Pattern;

    fn add(self, rhs: NamedGrammar) -> Pattern {
        self + Pattern::from(rhs)
    }
}

impl<P: Into<Pattern>> BitOr<P> for NamedGrammar {
    type Output = Pattern;

    fn bitor(self, rhs: P) -> Pattern {
        Pattern::from(self) | rhs.into()
    }
}

impl BitOr<NamedGrammar> for Pattern {
    type Output = Pattern;

    fn bitor(self, rhs: NamedGrammar) -> Pattern {
        self | Pattern::from(rhs)
    }
}

/// The result of running a [`NamedGrammar`] on an input string.
#[derive(Debug, Clone, PartialEq)]
pub struct Parsed {
    name: Arc<str>,
    input: Arc<str>,
    fragment: Fragment,
    consumed: usize,
}

impl Parsed {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The whole input, including anything after the match.
    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn fragment(&self) -> &Fragment {
        &self.fragment
    }

    pub fn into_fragment(self) -> Fragment {
        self.fragment
    }

    /// Symbols consumed from the start of the input.
    pub fn consumed(&self) -> usize {
        self.consumed
    }

    /// Indexes into a list result.
    pub fn get(&self, index: usize) -> Option<&Fragment> {
        self.fragment.get(index)
    }

    /// The matched text.
    pub fn text(&self) -> String {
        self.fragment.text()
    }

    /// The result tagged with the grammar's name, as it would appear inside
    /// another grammar's result.
    pub fn to_named(&self) -> Fragment {
        Fragment::named(Arc::clone(&self.name), self.fragment.clone())
    }

    /// Constructor form, e.g. `Integer("123")`.
    pub fn repr(&self) -> String {
        format!("{}({:?})", self.name, self.input)
    }
}

impl fmt::Display for Parsed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.fragment.text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use matcher_framework::builders::*;
    use matcher_framework::fragment;

    fn signed_digits() -> NamedGrammar {
        NamedGrammar::new("Signed", group(optional("-") + chars("0123456789")))
            .with_bad_pattern(literal("-") + chars("0"))
    }

    #[test]
    fn test_bad_pattern_rejects_full_match() {
        let grammar = signed_digits();
        assert_eq!(grammar.parse("-12").unwrap().text(), "-12");
        assert_eq!(grammar.parse("0").unwrap().text(), "0");
        assert!(grammar.parse("-00").is_err());
        // Only a full match of the bad pattern rejects.
        assert_eq!(grammar.parse("-001").unwrap().text(), "-001");
    }

    #[test]
    fn test_rejection_restores_buffer() {
        let grammar = signed_digits();
        let mut buffer = Buffer::new("x-0");
        buffer.advance(1);
        let error = grammar.consume(&mut buffer).unwrap_err();
        assert!(error.is_recoverable());
        assert_eq!(buffer.position(), 1);
        assert_eq!(
            error.to_string(),
            "Invalid match \"-0\" in Signed at 1:2"
        );
    }

    #[test]
    fn test_consume_tags_fragment() {
        let grammar = NamedGrammar::new("Pair", chars("ab") + chars("12"));
        let mut buffer = Buffer::new("ab12");
        let fragment = grammar.consume(&mut buffer).unwrap();
        assert_eq!(fragment.name(), Some("Pair"));
        assert_eq!(fragment.inner(), &fragment!(["ab", "12"]));
    }

    #[test]
    fn test_parsed_accessors() {
        let grammar = NamedGrammar::new("Pair", chars("ab") + chars("12"));
        let parsed = grammar.parse("ab12!").unwrap();
        assert_eq!(parsed.name(), "Pair");
        assert_eq!(parsed.input(), "ab12!");
        assert_eq!(parsed.consumed(), 4);
        assert_eq!(parsed.get(1), Some(&Fragment::from("12")));
        assert_eq!(parsed.to_string(), "ab12");
        assert_eq!(parsed.repr(), "Pair(\"ab12!\")");
        assert!(grammar.parse_complete("ab12!").is_err());
        assert!(grammar.parse_complete("ab12").is_ok());
    }

    #[test]
    fn test_grammar_as_pattern() {
        let pattern = signed_digits() + "!";
        assert_eq!(pattern.to_string(), "Sequence(Signed + Literal(\"!\"))");
        let fragment = Matcher::parse(&pattern, "-5!").unwrap();
        assert_eq!(
            fragment,
            Fragment::list(vec![Fragment::named("Signed", "-5".into()), "!".into()])
        );
    }
}
