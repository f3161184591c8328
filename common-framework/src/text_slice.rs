use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Deref;
use std::sync::Arc;

/// Immutable slice referencing a shared text buffer.
///
/// The slice keeps an `Arc<str>` alive so that it can be freely cloned and
/// moved around without worrying about lifetimes. It implements `Deref<Target =
/// str>` which allows it to be used transparently as `&str` in most places.
///
/// Offsets are byte offsets into the shared buffer and always sit on
/// character boundaries. Two slices are equal when their text is equal,
/// regardless of which buffer they point into.
#[derive(Clone)]
pub struct TextSlice {
    buffer: Arc<str>,
    start: usize,
    end: usize,
}

impl TextSlice {
    /// Creates a new slice from the given shared buffer and byte range.
    pub fn new(buffer: Arc<str>, start: usize, end: usize) -> Self {
        debug_assert!(start <= end);
        debug_assert!(end <= buffer.len());
        debug_assert!(buffer.is_char_boundary(start) && buffer.is_char_boundary(end));
        Self { buffer, start, end }
    }

    /// Creates a slice that covers the entire buffer.
    pub fn from_arc(buffer: Arc<str>) -> Self {
        let end = buffer.len();
        Self {
            buffer,
            start: 0,
            end,
        }
    }

    /// Creates a slice owning a freshly allocated copy of `text`.
    pub fn owned(text: impl Into<String>) -> Self {
        Self::from_arc(Arc::from(text.into()))
    }

    /// Returns an empty slice.
    pub fn empty() -> Self {
        Self::from_arc(Arc::from(""))
    }

    /// Returns the length in bytes.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Returns `true` if the slice is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the underlying shared buffer.
    pub fn buffer(&self) -> Arc<str> {
        Arc::clone(&self.buffer)
    }

    /// Returns the start offset.
    pub fn start(&self) -> usize {
        self.start
    }

    /// Returns the end offset.
    pub fn end(&self) -> usize {
        self.end
    }

    /// Returns the text as a `&str`.
    pub fn as_str(&self) -> &str {
        &self.buffer[self.start..self.end]
    }

    /// Returns a slice with the last character removed, or `None` when empty.
    pub fn without_last_char(&self) -> Option<Self> {
        let last = self.as_str().chars().next_back()?;
        Some(Self {
            buffer: Arc::clone(&self.buffer),
            start: self.start,
            end: self.end - last.len_utf8(),
        })
    }
}

impl fmt::Debug for TextSlice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_str(), f)
    }
}

impl fmt::Display for TextSlice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Deref for TextSlice {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        self.as_str()
    }
}

impl AsRef<str> for TextSlice {
    fn as_ref(&self) -> &str {
        self
    }
}

impl From<&str> for TextSlice {
    fn from(text: &str) -> Self {
        Self::owned(text)
    }
}

impl From<String> for TextSlice {
    fn from(text: String) -> Self {
        Self::owned(text)
    }
}

impl PartialEq<&str> for TextSlice {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl PartialEq<str> for TextSlice {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<TextSlice> for &str {
    fn eq(&self, other: &TextSlice) -> bool {
        *self == other.as_str()
    }
}

impl PartialEq for TextSlice {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for TextSlice {}

impl Hash for TextSlice {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_str().hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slice_views_shared_buffer() {
        let buffer: Arc<str> = Arc::from("hello world");
        let slice = TextSlice::new(Arc::clone(&buffer), 6, 11);
        assert_eq!(slice, "world");
        assert_eq!(slice.len(), 5);
        assert!(Arc::ptr_eq(&slice.buffer(), &buffer));
    }

    #[test]
    fn test_equality_ignores_buffer_identity() {
        let a = TextSlice::new(Arc::from("xabx"), 1, 3);
        let b = TextSlice::owned("ab");
        assert_eq!(a, b);
    }

    #[test]
    fn test_without_last_char_unicode() {
        let slice = TextSlice::owned("aあ");
        let shorter = slice.without_last_char().unwrap();
        assert_eq!(shorter, "a");
        let empty = shorter.without_last_char().unwrap();
        assert!(empty.is_empty());
        assert!(empty.without_last_char().is_none());
    }

    #[test]
    fn test_display_and_debug() {
        let slice = TextSlice::owned("a\tb");
        assert_eq!(slice.to_string(), "a\tb");
        assert_eq!(format!("{:?}", slice), "\"a\\tb\"");
    }
}
