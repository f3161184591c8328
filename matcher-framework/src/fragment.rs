use common_framework::TextSlice;
use std::fmt;
use std::sync::Arc;

/// Output of a successful match.
///
/// A leaf is a span of matched text; combinators nest leaves in ordered
/// lists. `Empty` is what zero-width patterns produce and is never added to a
/// parent list, whereas an empty `List` (an optional that matched nothing) is.
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum Fragment {
    Empty,
    Text(TextSlice),
    List(Vec<Fragment>),
    /// The result of a named grammar, tagged with its name.
    Named { name: Arc<str>, fragment: Box<Fragment> },
}

impl Fragment {
    pub fn text_of(text: impl Into<TextSlice>) -> Self {
        Fragment::Text(text.into())
    }

    pub fn list(items: impl IntoIterator<Item = Fragment>) -> Self {
        Fragment::List(items.into_iter().collect())
    }

    pub fn named(name: impl Into<Arc<str>>, fragment: Fragment) -> Self {
        Fragment::Named {
            name: name.into(),
            fragment: Box::new(fragment),
        }
    }

    /// True only for [`Fragment::Empty`], the result of a zero-width match.
    ///
    /// An empty list is something: parents keep it as an item.
    pub fn is_nothing(&self) -> bool {
        matches!(self, Fragment::Empty)
    }

    /// Concatenates all text in the fragment tree.
    pub fn text(&self) -> String {
        let mut out = String::new();
        self.write_text(&mut out);
        out
    }

    fn write_text(&self, out: &mut String) {
        match self {
            Fragment::Empty => {}
            Fragment::Text(slice) => out.push_str(slice),
            Fragment::List(items) => items.iter().for_each(|item| item.write_text(out)),
            Fragment::Named { fragment, .. } => fragment.write_text(out),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Fragment::Text(slice) => Some(slice.as_str()),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Fragment]> {
        match self {
            Fragment::List(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the grammar name of a `Named` fragment.
    pub fn name(&self) -> Option<&str> {
        match self {
            Fragment::Named { name, .. } => Some(name),
            _ => None,
        }
    }

    /// Returns the fragment wrapped by a `Named` fragment, or `self`.
    pub fn inner(&self) -> &Fragment {
        match self {
            Fragment::Named { fragment, .. } => fragment,
            other => other,
        }
    }

    /// Indexes into a list fragment.
    pub fn get(&self, index: usize) -> Option<&Fragment> {
        self.as_list().and_then(|items| items.get(index))
    }

    /// Number of items in a list fragment; leaves count as one, `Empty` as zero.
    pub fn len(&self) -> usize {
        match self {
            Fragment::Empty => 0,
            Fragment::List(items) => items.len(),
            _ => 1,
        }
    }

    /// True when [`len`](Fragment::len) is zero: `Empty` or an empty list.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Collects the leaves of the tree, in order, into one flat list.
    ///
    /// Named fragments are leaves: their inner structure is kept.
    pub fn flatten(self) -> Vec<Fragment> {
        let mut out = Vec::new();
        self.flatten_into(&mut out);
        out
    }

    fn flatten_into(self, out: &mut Vec<Fragment>) {
        match self {
            Fragment::Empty => {}
            Fragment::List(items) => items.into_iter().for_each(|item| item.flatten_into(out)),
            leaf => out.push(leaf),
        }
    }

    /// Collapses the tree into a single text leaf.
    pub fn grouped(self) -> Fragment {
        match self {
            Fragment::Text(_) => self,
            other => Fragment::Text(TextSlice::owned(other.text())),
        }
    }
}

impl fmt::Debug for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fragment::Empty => f.write_str("Empty"),
            Fragment::Text(slice) => fmt::Debug::fmt(slice, f),
            Fragment::List(items) => f.debug_list().entries(items).finish(),
            Fragment::Named { name, fragment } => write!(f, "{}({:?})", name, fragment.text()),
        }
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text())
    }
}

impl From<&str> for Fragment {
    fn from(text: &str) -> Self {
        Fragment::Text(TextSlice::owned(text))
    }
}

impl From<String> for Fragment {
    fn from(text: String) -> Self {
        Fragment::Text(TextSlice::owned(text))
    }
}

impl From<TextSlice> for Fragment {
    fn from(slice: TextSlice) -> Self {
        Fragment::Text(slice)
    }
}

impl<T: Into<Fragment>> From<Vec<T>> for Fragment {
    fn from(items: Vec<T>) -> Self {
        Fragment::List(items.into_iter().map(Into::into).collect())
    }
}

impl PartialEq<&str> for Fragment {
    fn eq(&self, other: &&str) -> bool {
        self.as_text() == Some(*other)
    }
}

/// Builds a [`Fragment`] from nested string literals and brackets.
///
/// ```ignore
/// fragment!(["pre-", ["uno", "uno"], "-post"])
/// ```
#[macro_export]
macro_rules! fragment {
    ([$($item:tt),* $(,)?]) => {
        $crate::Fragment::List(vec![$($crate::fragment!($item)),*])
    };
    ($text:expr) => {
        $crate::Fragment::from($text)
    };
}
