use indexmap::IndexMap;
use indexmap::map::Entry;
use smol_str::SmolStr;
use std::ops::{Index, IndexMut};


// ─── Record ─────────────────────────────────────────────────────────────────

/// An ordered map from string keys to nullable values of one element type.
///
/// A `Record` preserves insertion order: iteration, [`keys`](Record::keys),
/// [`values`](Record::values) and serialization all observe the order keys
/// were first inserted, and overwriting a key never moves it.
///
/// Every key is in one of three states: absent, present with a value, or
/// present with *no* value (the "stored null" state, `put(key, None)`).
/// [`contains_key`](Record::contains_key), [`keys`](Record::keys) and
/// [`values`](Record::values) see stored-null keys; [`get`](Record::get),
/// [`iter`](Record::iter), [`get_all`](Record::get_all) and serialization
/// do not. That asymmetry is part of the contract, not an accident.
///
/// Values may themselves be `Record`s (e.g. through `serde_json::Value`),
/// forming a tree. The structure has no internal locking; the conditional
/// operations (`put_if_absent`, `remove_if_available`, `replace_if_available`)
/// are plain check-then-act sequences and rely on exclusive ownership.
#[derive(Debug, Clone, PartialEq)]
pub struct Record<T> {
    entries: IndexMap<SmolStr, Option<T>>,
}

impl<T> Record<T> {
    pub fn new() -> Self {
        Record {
            entries: IndexMap::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Record {
            entries: IndexMap::with_capacity(capacity),
        }
    }

    /// Build a record from key/value pairs, in the order the source yields
    /// them. Later duplicate keys overwrite earlier ones in place.
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: Into<SmolStr>,
        V: Into<Option<T>>,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut record = Record::new();
        record.put_all(pairs);
        record
    }

    // ─── Writes ─────────────────────────────────────────────────────────────

    /// Insert or overwrite a key. An existing key keeps its original
    /// position. Pass `None` to store the null state for the key.
    ///
    /// Returns the previous value, if the key held one.
    pub fn put(&mut self, key: impl Into<SmolStr>, value: impl Into<Option<T>>) -> Option<T> {
        self.entries.insert(key.into(), value.into()).flatten()
    }

    /// Apply [`put`](Record::put) for every pair, in the source's order.
    pub fn put_all<K, V, I>(&mut self, pairs: I)
    where
        K: Into<SmolStr>,
        V: Into<Option<T>>,
        I: IntoIterator<Item = (K, V)>,
    {
        for (key, value) in pairs {
            self.put(key, value);
        }
    }

    /// Store `value` if the key is absent or currently null.
    ///
    /// Returns `None` when the value was stored ("it is now set"), otherwise
    /// the existing value, leaving the record unchanged. This is a plain
    /// check-then-act, not a CAS.
    pub fn put_if_absent(&mut self, key: impl Into<SmolStr>, value: T) -> Option<&T> {
        match self.entries.entry(key.into()) {
            Entry::Occupied(mut occupied) => {
                if occupied.get().is_none() {
                    occupied.insert(Some(value));
                    None
                } else {
                    occupied.into_mut().as_ref()
                }
            }
            Entry::Vacant(vacant) => {
                vacant.insert(Some(value));
                None
            }
        }
    }

    /// Remove a key, shifting later entries down so the relative order of
    /// the remaining keys is preserved. No-op on an absent key.
    pub fn remove(&mut self, key: &str) -> Option<T> {
        self.entries.shift_remove(key).flatten()
    }

    /// Remove the key only if it currently holds a value equal to
    /// `expected`. Returns whether the removal happened.
    pub fn remove_if_available(&mut self, key: &str, expected: &T) -> bool
    where
        T: PartialEq,
    {
        if self.get(key) == Some(expected) {
            self.entries.shift_remove(key);
            true
        } else {
            false
        }
    }

    /// Overwrite the key only if it is present (with any value, null
    /// included). Returns the previous value. No-op on an absent key.
    pub fn replace(&mut self, key: &str, value: T) -> Option<T> {
        match self.entries.get_mut(key) {
            Some(slot) => slot.replace(value),
            None => None,
        }
    }

    /// If the key holds a value equal to `expected`, write the matched value
    /// back and return `true`.
    ///
    /// The write-back stores a clone of `expected`, so apart from the return
    /// value the call is observably a no-op. This mirrors the reference
    /// behavior, which never takes a distinct replacement value.
    pub fn replace_if_available(&mut self, key: &str, expected: &T) -> bool
    where
        T: Clone + PartialEq,
    {
        match self.entries.get_mut(key) {
            Some(slot) if slot.as_ref() == Some(expected) => {
                *slot = Some(expected.clone());
                true
            }
            _ => false,
        }
    }

    /// Drop every entry whose value fails the predicate, keeping the rest in
    /// order. Stored-null entries reach the predicate as `None`.
    pub fn filter(&mut self, mut predicate: impl FnMut(Option<&T>) -> bool) {
        self.entries.retain(|_, value| predicate(value.as_ref()));
    }

    /// Replace every value with `transform(value, key)`, in iteration order,
    /// over the full storage (stored-null entries included).
    pub fn replace_all(&mut self, mut transform: impl FnMut(Option<T>, &str) -> Option<T>) {
        for (key, slot) in self.entries.iter_mut() {
            let current = slot.take();
            *slot = transform(current, key.as_str());
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    // ─── Reads ──────────────────────────────────────────────────────────────

    /// Look up a key. Returns `None` both for an absent key and for a key in
    /// the stored-null state; use [`contains_key`](Record::contains_key) to
    /// tell the two apart.
    pub fn get(&self, key: &str) -> Option<&T> {
        self.entries.get(key).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut T> {
        self.entries.get_mut(key).and_then(Option::as_mut)
    }

    /// Like [`get`](Record::get), but falls back to `default` when the key
    /// is absent *or* holds the null state.
    pub fn get_or_default(&self, key: &str, default: T) -> T
    where
        T: Clone,
    {
        self.get(key).cloned().unwrap_or(default)
    }

    /// Whether the key exists at all, stored-null state included.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Whether some entry holds a value equal to `value`. Stored-null
    /// entries never match.
    pub fn contains_value(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.entries
            .values()
            .any(|slot| slot.as_ref() == Some(value))
    }

    /// Number of keys, stored-null keys included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All keys in insertion order, stored-null keys included.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(SmolStr::as_str)
    }

    /// All value slots in insertion order; a stored-null entry yields `None`.
    pub fn values(&self) -> impl Iterator<Item = Option<&T>> {
        self.entries.values().map(Option::as_ref)
    }

    /// Visit `(value, key)` for every entry in iteration order, over the
    /// full storage. Side effects only; the record is not mutated.
    pub fn for_each(&self, mut visitor: impl FnMut(Option<&T>, &str)) {
        for (key, slot) in self.entries.iter() {
            visitor(slot.as_ref(), key.as_str());
        }
    }

    /// Iterate the non-null entries in insertion order. This is the view
    /// used by serialization and `IntoIterator`; stored-null keys are
    /// skipped.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            inner: self.entries.iter(),
        }
    }

    /// Materialize the non-null entries as a plain ordered map.
    ///
    /// The canonical "plain form": JSON and byte serialization carry exactly
    /// these entries, and the mapper reads its source rows from it.
    #[doc(alias = "getProperties")]
    pub fn get_all(&self) -> IndexMap<SmolStr, T>
    where
        T: Clone,
    {
        self.entries
            .iter()
            .filter_map(|(key, slot)| slot.as_ref().map(|value| (key.clone(), value.clone())))
            .collect()
    }
}

impl<T> Default for Record<T> {
    fn default() -> Self {
        Record::new()
    }
}

// ─── Indexing sugar ─────────────────────────────────────────────────────────

/// `record["key"]` is equivalent to `record.get("key").unwrap()`.
///
/// Panics if the key is absent or holds the null state; the named methods
/// are the canonical, total API.
impl<T> Index<&str> for Record<T> {
    type Output = T;

    fn index(&self, key: &str) -> &T {
        self.get(key)
            .unwrap_or_else(|| panic!("record has no value for key {key:?}"))
    }
}

impl<T> IndexMut<&str> for Record<T> {
    fn index_mut(&mut self, key: &str) -> &mut T {
        self.get_mut(key)
            .unwrap_or_else(|| panic!("record has no value for key {key:?}"))
    }
}

// ─── Iteration ──────────────────────────────────────────────────────────────

/// Borrowing iterator over the non-null entries, in insertion order.
pub struct Iter<'a, T> {
    inner: indexmap::map::Iter<'a, SmolStr, Option<T>>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = (&'a str, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        for (key, slot) in self.inner.by_ref() {
            if let Some(value) = slot.as_ref() {
                return Some((key.as_str(), value));
            }
        }
        None
    }
}

/// Owning iterator over the non-null entries, in insertion order.
pub struct IntoIter<T> {
    inner: indexmap::map::IntoIter<SmolStr, Option<T>>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = (SmolStr, T);

    fn next(&mut self) -> Option<Self::Item> {
        for (key, slot) in self.inner.by_ref() {
            if let Some(value) = slot {
                return Some((key, value));
            }
        }
        None
    }
}

impl<'a, T> IntoIterator for &'a Record<T> {
    type Item = (&'a str, &'a T);
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> IntoIterator for Record<T> {
    type Item = (SmolStr, T);
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            inner: self.entries.into_iter(),
        }
    }
}

impl<T, K, V> FromIterator<(K, V)> for Record<T>
where
    K: Into<SmolStr>,
    V: Into<Option<T>>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Record::from_pairs(iter)
    }
}

impl<T, K, V> Extend<(K, V)> for Record<T>
where
    K: Into<SmolStr>,
    V: Into<Option<T>>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.put_all(iter);
    }
}

// ─── Constructor macro ──────────────────────────────────────────────────────

/// Build a [`Record`] from `key => value` pairs.
///
/// ```
/// use recmap::{record, Record};
///
/// let rec: Record<i64> = record! {
///     "id" => 1,
///     "count" => 2,
/// };
/// assert_eq!(rec.get("id"), Some(&1));
/// ```
#[macro_export]
macro_rules! record {
    () => {
        $crate::Record::new()
    };
    ($($key:expr => $value:expr),* $(,)?) => {{
        let mut record = $crate::Record::new();
        $(
            record.put($key, $value);
        )*
        record
    }};
}
