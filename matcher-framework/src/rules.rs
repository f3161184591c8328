use crate::buffer::Buffer;
use crate::error::{MatchError, MatchResult, PatternError};
use crate::pattern::{Pattern, PatternKind};
use crate::traits::{Matched, Matcher};
use log::debug;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock, Weak};

struct Slot {
    name: Arc<str>,
    pattern: OnceLock<Pattern>,
}

/// An arena of named patterns that may refer to each other.
///
/// Rules are built in two phases. First every rule is declared or defined;
/// references handed out by [`declare`](RuleSet::declare) and
/// [`reference`](RuleSet::reference) can be used inside other patterns before
/// their target exists. Then [`resolve`](RuleSet::resolve) checks that every
/// declared rule received a definition.
///
/// References hold weak pointers, so recursive rules do not keep themselves
/// alive. Patterns taken out of the set stop matching once the set is
/// dropped.
#[derive(Default)]
pub struct RuleSet {
    slots: HashMap<Arc<str>, Arc<Slot>>,
    order: Vec<Arc<str>>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&mut self, name: &str) -> Arc<Slot> {
        if let Some(slot) = self.slots.get(name) {
            return Arc::clone(slot);
        }
        let name: Arc<str> = Arc::from(name);
        let slot = Arc::new(Slot {
            name: Arc::clone(&name),
            pattern: OnceLock::new(),
        });
        self.slots.insert(Arc::clone(&name), Arc::clone(&slot));
        self.order.push(name);
        slot
    }

    /// Declares a rule and returns a reference to it.
    ///
    /// Declaring the same name twice returns references to the same rule.
    pub fn declare(&mut self, name: &str) -> Pattern {
        let slot = self.slot(name);
        Pattern::new(PatternKind::Rule(RuleRef::to(&slot)))
    }

    /// Gives a rule its pattern, declaring it first if needed.
    pub fn define(&mut self, name: &str, pattern: Pattern) -> Result<(), PatternError> {
        let slot = self.slot(name);
        slot.pattern
            .set(pattern)
            .map_err(|_| PatternError::DuplicateRule(name.to_string()))?;
        debug!("defined rule `{}`", name);
        Ok(())
    }

    /// Returns a reference to a rule that was already declared or defined.
    pub fn reference(&self, name: &str) -> Result<Pattern, PatternError> {
        self.slots
            .get(name)
            .map(|slot| Pattern::new(PatternKind::Rule(RuleRef::to(slot))))
            .ok_or_else(|| PatternError::UnknownRule(name.to_string()))
    }

    /// Checks that every declared rule has a definition.
    pub fn resolve(&self) -> Result<(), PatternError> {
        let undefined: Vec<String> = self
            .order
            .iter()
            .filter(|name| self.slots[*name].pattern.get().is_none())
            .map(|name| name.to_string())
            .collect();
        if !undefined.is_empty() {
            return Err(PatternError::UndefinedRules(undefined));
        }
        debug!("resolved {} rules", self.order.len());
        Ok(())
    }

    /// Returns a rule's definition.
    pub fn get(&self, name: &str) -> Option<&Pattern> {
        self.slots.get(name).and_then(|slot| slot.pattern.get())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.slots.contains_key(name)
    }

    /// Rule names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(|name| name.as_ref())
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl fmt::Debug for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for name in &self.order {
            match self.slots[name].pattern.get() {
                Some(pattern) => map.entry(name, &format_args!("{}", pattern)),
                None => map.entry(name, &format_args!("<undefined>")),
            };
        }
        map.finish()
    }
}

/// A by-name reference to a rule in a [`RuleSet`].
#[derive(Clone)]
pub struct RuleRef {
    name: Arc<str>,
    slot: Weak<Slot>,
}

impl RuleRef {
    fn to(slot: &Arc<Slot>) -> Self {
        Self {
            name: Arc::clone(&slot.name),
            slot: Arc::downgrade(slot),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the rule has been defined and its set is still alive.
    pub fn is_resolved(&self) -> bool {
        self.with_target(|_| ()).is_some()
    }

    fn with_target<T>(&self, f: impl FnOnce(&Pattern) -> T) -> Option<T> {
        let slot = self.slot.upgrade()?;
        let pattern = slot.pattern.get()?;
        Some(f(pattern))
    }

    fn unresolved(&self) -> MatchError {
        MatchError::UnresolvedRule {
            name: self.name.to_string(),
        }
    }

    /// Matches the rule's pattern one nesting level deeper.
    ///
    /// Rule references are the only way to build a recursive pattern, so
    /// counting them here bounds recursion of every grammar.
    pub(crate) fn consume(&self, buffer: &mut Buffer) -> MatchResult<Matched> {
        let slot = self.slot.upgrade().ok_or_else(|| self.unresolved())?;
        let pattern = slot.pattern.get().ok_or_else(|| self.unresolved())?;
        buffer.enter()?;
        let result = pattern.consume_tracked(buffer);
        buffer.leave();
        result
    }

    pub(crate) fn rollback(&self, matched: &Matched) -> Option<(Matched, usize)> {
        self.with_target(|pattern| pattern.rollback(matched))
            .flatten()
    }

    pub(crate) fn minimum_length(&self) -> usize {
        0
    }
}

impl fmt::Debug for RuleRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rule({:?})", self.name)
    }
}

impl PartialEq for RuleRef {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && Weak::ptr_eq(&self.slot, &other.slot)
    }
}
