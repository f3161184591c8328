use crate::buffer::Buffer;
use crate::error::{MatchResult, PatternError};
use crate::fragment::Fragment;
use crate::pattern::Pattern;
use crate::traits::Matched;
use regex::{Captures, Regex, RegexBuilder};
use std::fmt;

/// Which capture group(s) a regex match reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Groups {
    One(usize),
    Many(Vec<usize>),
}

impl Default for Groups {
    fn default() -> Self {
        Groups::One(0)
    }
}

/// Options for [`regex_with`](crate::builders::regex_with).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegexOptions {
    /// Capture group(s) returned as the fragment.
    pub groups: Groups,
    /// Capture group whose end the cursor advances to.
    pub advance: usize,
    pub case_insensitive: bool,
    pub multi_line: bool,
    pub dot_matches_new_line: bool,
}

impl RegexOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn group(mut self, group: usize) -> Self {
        self.groups = Groups::One(group);
        self
    }

    pub fn groups(mut self, groups: impl IntoIterator<Item = usize>) -> Self {
        self.groups = Groups::Many(groups.into_iter().collect());
        self
    }

    pub fn advance(mut self, group: usize) -> Self {
        self.advance = group;
        self
    }

    pub fn case_insensitive(mut self, yes: bool) -> Self {
        self.case_insensitive = yes;
        self
    }

    pub fn multi_line(mut self, yes: bool) -> Self {
        self.multi_line = yes;
        self
    }

    pub fn dot_matches_new_line(mut self, yes: bool) -> Self {
        self.dot_matches_new_line = yes;
        self
    }
}

/// Matches a regular expression anchored at the cursor.
#[derive(Debug, Clone)]
pub struct RegexMatcher {
    source: String,
    compiled: Regex,
    options: RegexOptions,
}

impl RegexMatcher {
    pub fn new(source: &str, options: RegexOptions) -> Result<Self, PatternError> {
        let compiled = RegexBuilder::new(&format!(r"\A(?:{})", source))
            .case_insensitive(options.case_insensitive)
            .multi_line(options.multi_line)
            .dot_matches_new_line(options.dot_matches_new_line)
            .build()?;

        let group_count = compiled.captures_len();
        let requested = match &options.groups {
            Groups::One(group) => vec![*group],
            Groups::Many(groups) => groups.clone(),
        };
        if let Some(&group) = requested
            .iter()
            .chain(std::iter::once(&options.advance))
            .find(|&&group| group >= group_count)
        {
            return Err(PatternError::NoSuchGroup {
                pattern: source.to_string(),
                group,
            });
        }

        Ok(Self {
            source: source.to_string(),
            compiled,
            options,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn options(&self) -> &RegexOptions {
        &self.options
    }

    pub(crate) fn consume(
        &self,
        buffer: &mut Buffer,
        expected: &Pattern,
    ) -> MatchResult<Matched> {
        let start = buffer.position();
        let rest = buffer.rest();
        let Some(captures) = self.compiled.captures(rest) else {
            return Err(buffer.expected(expected));
        };

        let end_byte = captures
            .get(self.options.advance)
            .or_else(|| captures.get(0))
            .map_or(0, |m| m.end());
        let fragment = match &self.options.groups {
            Groups::One(group) => group_fragment(buffer, start, rest, &captures, *group),
            Groups::Many(groups) => Fragment::List(
                groups
                    .iter()
                    .map(|&group| match group_fragment(buffer, start, rest, &captures, group) {
                        Fragment::Empty => Fragment::from(""),
                        fragment => fragment,
                    })
                    .collect(),
            ),
        };
        let advance = rest[..end_byte].chars().count();
        buffer.advance(advance);
        Ok(Matched::fixed(fragment))
    }

    pub(crate) fn fmt_args(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.source)?;
        match &self.options.groups {
            Groups::One(0) => {}
            Groups::One(group) => write!(f, ", group={}", group)?,
            Groups::Many(groups) => write!(f, ", group={:?}", groups)?,
        }
        if self.options.advance != 0 {
            write!(f, ", advance={}", self.options.advance)?;
        }
        if self.options.case_insensitive {
            f.write_str(", case_insensitive=true")?;
        }
        if self.options.multi_line {
            f.write_str(", multi_line=true")?;
        }
        if self.options.dot_matches_new_line {
            f.write_str(", dot_matches_new_line=true")?;
        }
        Ok(())
    }
}

/// Converts a capture group into a fragment backed by the buffer's text.
fn group_fragment(
    buffer: &Buffer,
    start: usize,
    rest: &str,
    captures: &Captures<'_>,
    group: usize,
) -> Fragment {
    match captures.get(group) {
        Some(m) => {
            let from = start + rest[..m.start()].chars().count();
            let to = from + m.as_str().chars().count();
            Fragment::Text(buffer.text(from, to))
        }
        None => Fragment::Empty,
    }
}

impl PartialEq for RegexMatcher {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source && self.options == other.options
    }
}
