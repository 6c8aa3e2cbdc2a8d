//! Insertion-ordered string set used for node labels and context tags.

use super::FastMap;
use serde::de::{SeqAccess, Visitor};
use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// An insertion-ordered set of strings.
///
/// Equality ignores order; iteration, `slice` and the diff callbacks of
/// [`StringSet::replace`] all follow insertion order.
#[derive(Debug, Clone, Default)]
pub struct StringSet {
    items: FastMap<String, ()>,
}

impl StringSet {
    pub fn new() -> Self {
        StringSet {
            items: FastMap::new(),
        }
    }

    /// Builds a set from anything yielding strings, keeping first-seen order.
    pub fn of<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = StringSet::new();
        for item in items {
            set.add(item);
        }
        set
    }

    /// Returns `true` if the string was not already present.
    pub fn add(&mut self, s: impl Into<String>) -> bool {
        self.items.insert(s.into(), ())
    }

    /// Absorbs every element of `other`.
    pub fn add_set(&mut self, other: &StringSet) {
        for s in other.iter() {
            self.add(s);
        }
    }

    pub fn remove(&mut self, s: &str) -> bool {
        self.items.remove(s).is_some()
    }

    pub fn has(&self, s: &str) -> bool {
        self.items.contains(s)
    }

    pub fn has_all<'x>(&self, items: impl IntoIterator<Item = &'x str>) -> bool {
        items.into_iter().all(|s| self.has(s))
    }

    pub fn has_any<'x>(&self, items: impl IntoIterator<Item = &'x str>) -> bool {
        items.into_iter().any(|s| self.has(s))
    }

    pub fn has_all_set(&self, other: &StringSet) -> bool {
        other.iter().all(|s| self.has(s))
    }

    pub fn has_any_set(&self, other: &StringSet) -> bool {
        other.iter().any(|s| self.has(s))
    }

    /// Elements present in both sets, in this set's insertion order.
    pub fn intersect(&self, other: &StringSet) -> StringSet {
        StringSet::of(self.iter().filter(|s| other.has(s)))
    }

    /// The first `n` elements in insertion order.
    pub fn clone_n(&self, n: usize) -> StringSet {
        StringSet::of(self.iter().take(n))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.items.keys().map(String::as_str)
    }

    pub fn slice(&self) -> Vec<&str> {
        self.iter().collect()
    }

    pub fn sorted_slice(&self) -> Vec<&str> {
        let mut v = self.slice();
        v.sort_unstable();
        v
    }

    /// Makes this set equal to `other`, reporting the diff: `on_removed`
    /// is called exactly once for each element of `self \ other` (in this
    /// set's insertion order), then `on_added` exactly once for each
    /// element of `other \ self` (in `other`'s insertion order).
    pub fn replace(
        &mut self,
        other: &StringSet,
        mut on_removed: impl FnMut(&str),
        mut on_added: impl FnMut(&str),
    ) {
        for s in self.iter() {
            if !other.has(s) {
                on_removed(s);
            }
        }
        let mut items = FastMap::new();
        for s in other.iter() {
            if !self.has(s) {
                on_added(s);
            }
            items.insert(s.to_string(), ());
        }
        self.items = items;
    }
}

impl PartialEq for StringSet {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.has_all_set(other)
    }
}

impl Eq for StringSet {}

impl fmt::Display for StringSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, s) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", s)?;
        }
        Ok(())
    }
}

impl<S: Into<String>> FromIterator<S> for StringSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        StringSet::of(iter)
    }
}

impl Serialize for StringSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for s in self.iter() {
            seq.serialize_element(s)?;
        }
        seq.end()
    }
}

impl<'de> Deserialize<'de> for StringSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SetVisitor;

        impl<'de> Visitor<'de> for SetVisitor {
            type Value = StringSet;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a sequence of strings")
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<StringSet, A::Error> {
                let mut set = StringSet::new();
                while let Some(s) = seq.next_element::<String>()? {
                    set.add(s);
                }
                Ok(set)
            }
        }

        deserializer.deserialize_seq(SetVisitor)
    }
}
