/*!
 * Inline String Optimization
 * Zero-allocation strings for process ids and short labels
 */

use serde::{Deserialize, Serialize};
use smartstring::alias::String as SmartString;
use std::fmt;

/// Inline-optimized string that stores short strings (≤23 bytes) without heap allocation
///
/// Process ids ("P1", "P17"), queue labels ("Q2") and most error details fit
/// inline, which matters because every logged frame deep-copies the full
/// process table.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct InlineString {
    inner: SmartString,
}

impl InlineString {
    /// Create new empty inline string
    #[inline]
    pub fn new() -> Self {
        Self {
            inner: SmartString::new(),
        }
    }

    /// Get string slice
    #[inline(always)]
    pub fn as_str(&self) -> &str {
        self.inner.as_str()
    }

    /// Check if string is stored inline (no heap allocation)
    #[inline]
    pub fn is_inline(&self) -> bool {
        self.inner.is_inline()
    }

    /// Get length
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Check if empty
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl Default for InlineString {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl From<&str> for InlineString {
    #[inline]
    fn from(s: &str) -> Self {
        Self {
            inner: SmartString::from(s),
        }
    }
}

impl From<String> for InlineString {
    #[inline]
    fn from(s: String) -> Self {
        Self {
            inner: SmartString::from(s),
        }
    }
}

impl From<InlineString> for String {
    #[inline]
    fn from(s: InlineString) -> Self {
        s.inner.into()
    }
}

impl AsRef<str> for InlineString {
    #[inline(always)]
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::ops::Deref for InlineString {
    type Target = str;

    #[inline(always)]
    fn deref(&self) -> &Self::Target {
        self.as_str()
    }
}

impl fmt::Display for InlineString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::borrow::Borrow<str> for InlineString {
    #[inline(always)]
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl PartialEq<&str> for InlineString {
    #[inline]
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_process_ids_are_inline() {
        for id in ["P1", "P2", "P10", "P9999", "worker-a"] {
            let s = InlineString::from(id);
            assert!(s.is_inline(), "id '{}' should be inline", id);
            assert_eq!(s.as_str(), id);
        }
    }

    #[test]
    fn test_ordering_is_lexicographic() {
        let mut ids: Vec<InlineString> = ["P3", "P1", "P10", "P2"]
            .iter()
            .map(|s| InlineString::from(*s))
            .collect();
        ids.sort();
        let sorted: Vec<&str> = ids.iter().map(|s| s.as_str()).collect();
        assert_eq!(sorted, vec!["P1", "P10", "P2", "P3"]);
    }

    #[test]
    fn test_serialization() {
        let s = InlineString::from("P7");
        let json = serde_json::to_string(&s).unwrap();
        assert_eq!(json, "\"P7\"");
        let back: InlineString = serde_json::from_str(&json).unwrap();
        assert_eq!(s, back);
    }
}
