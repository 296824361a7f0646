//! Attribute lists.
//!
//! An [`Attrs`] is the ordered `(name, value)` list written on an XML tag.
//! Values are `Cow`s: anything passed through unchanged keeps borrowing the
//! tokenizer's buffer, while substituted values are owned by the list.

use smallvec::SmallVec;
use std::borrow::Cow;

/// A single `name="value"` pair.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Attr<'a> {
    pub name: Cow<'a, str>,
    pub value: Cow<'a, str>,
}

impl<'a> Attr<'a> {
    pub fn new(name: impl Into<Cow<'a, str>>, value: impl Into<Cow<'a, str>>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Clear both name and value.
    ///
    /// A cleared attribute stays in the list (so positions are stable) but is
    /// skipped by [`Attrs::get`] and should be ignored by processors.
    pub fn clear(&mut self) {
        self.name = Cow::Borrowed("");
        self.value = Cow::Borrowed("");
    }

    /// Whether the attribute was cleared by [`Attr::clear`].
    pub fn is_cleared(&self) -> bool {
        self.name.is_empty()
    }

    /// Whether the value still borrows from its source.
    pub fn is_borrowed(&self) -> bool {
        matches!(self.value, Cow::Borrowed(_))
    }

    pub fn into_owned(self) -> Attr<'static> {
        Attr {
            name: Cow::Owned(self.name.into_owned()),
            value: Cow::Owned(self.value.into_owned()),
        }
    }
}

/// An ordered list of attributes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Attrs<'a> {
    items: SmallVec<[Attr<'a>; 8]>,
}

impl<'a> Attrs<'a> {
    /// Create an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: SmallVec::with_capacity(capacity),
        }
    }

    /// Build a list from borrowed `(name, value)` pairs.
    pub fn from_pairs(pairs: &[(&'a str, &'a str)]) -> Self {
        pairs.iter().copied().collect()
    }

    /// Append an attribute.
    pub fn push(&mut self, name: impl Into<Cow<'a, str>>, value: impl Into<Cow<'a, str>>) {
        self.items.push(Attr::new(name, value));
    }

    pub fn push_attr(&mut self, attr: Attr<'a>) {
        self.items.push(attr);
    }

    /// Value of the first attribute called `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        if name.is_empty() {
            return None;
        }
        self.items
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_ref())
    }

    /// Check if an attribute with this name is present.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Attr<'a>> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Attr<'a>> {
        self.items.iter_mut()
    }

    /// Iterate over attributes that were not cleared, as string pairs.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.items
            .iter()
            .filter(|a| !a.is_cleared())
            .map(|a| (a.name.as_ref(), a.value.as_ref()))
    }

    /// Number of attributes, cleared ones included.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Detach the list from the buffer it borrows from.
    pub fn into_owned(self) -> Attrs<'static> {
        Attrs {
            items: self.items.into_iter().map(Attr::into_owned).collect(),
        }
    }
}

impl<'a, N, V> FromIterator<(N, V)> for Attrs<'a>
where
    N: Into<Cow<'a, str>>,
    V: Into<Cow<'a, str>>,
{
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().map(|(n, v)| Attr::new(n, v)).collect(),
        }
    }
}

impl<'a> FromIterator<Attr<'a>> for Attrs<'a> {
    fn from_iter<I: IntoIterator<Item = Attr<'a>>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<'s, 'a> IntoIterator for &'s Attrs<'a> {
    type Item = &'s Attr<'a>;
    type IntoIter = std::slice::Iter<'s, Attr<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
