use crate::error::GrammarError;
use crate::grammar::{NamedGrammar, Parsed};
use log::debug;
use matcher_framework::{Pattern, RuleSet};
use std::collections::HashMap;
use std::fmt;

/// Named grammars that may refer to each other, including recursively.
///
/// Build it in two phases: [`declare`](GrammarSet::declare) the names other
/// grammars need before they exist and [`define`](GrammarSet::define) every
/// grammar, then call [`resolve`](GrammarSet::resolve) to check that nothing
/// was left undefined. References stop matching once the set is dropped, so
/// keep it alive for as long as its grammars are in use.
#[derive(Default)]
pub struct GrammarSet {
    rules: RuleSet,
    grammars: HashMap<String, NamedGrammar>,
}

impl GrammarSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a pattern that matches the grammar `name` once it is defined.
    pub fn declare(&mut self, name: &str) -> Pattern {
        self.rules.declare(name)
    }

    /// Adds a grammar under its own name.
    pub fn define(&mut self, grammar: NamedGrammar) -> Result<(), GrammarError> {
        let name = grammar.name().to_string();
        self.rules.define(&name, Pattern::from(grammar.clone()))?;
        debug!("defined grammar `{}`", name);
        self.grammars.insert(name, grammar);
        Ok(())
    }

    /// Checks that every declared grammar has been defined.
    pub fn resolve(&self) -> Result<(), GrammarError> {
        self.rules.resolve()?;
        Ok(())
    }

    /// A pattern referring to a declared or defined grammar.
    pub fn reference(&self, name: &str) -> Result<Pattern, GrammarError> {
        Ok(self.rules.reference(name)?)
    }

    pub fn get(&self, name: &str) -> Option<&NamedGrammar> {
        self.grammars.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.grammars.contains_key(name)
    }

    /// Grammar names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.rules.names()
    }

    pub fn len(&self) -> usize {
        self.grammars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grammars.is_empty()
    }

    /// Runs the grammar `name` on a prefix of `input`.
    pub fn parse(&self, name: &str, input: &str) -> Result<Parsed, GrammarError> {
        let grammar = self
            .get(name)
            .ok_or_else(|| GrammarError::UnknownGrammar(name.to_string()))?;
        Ok(grammar.parse(input)?)
    }
}

impl fmt::Debug for GrammarSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GrammarSet")
            .field("rules", &self.rules)
            .finish()
    }
}
