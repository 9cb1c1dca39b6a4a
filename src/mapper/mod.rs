use crate::record::Record;
use rustc_hash::FxHashMap;
use smol_str::SmolStr;
use tracing::trace;

pub mod rule;

pub use rule::{Row, Rule};

#[cfg(test)]
mod tests;

// ─── Setter capability ──────────────────────────────────────────────────────

/// The destination side of [`map`]: one named-field assignment.
///
/// Rust has no runtime method discovery, so destinations enumerate their
/// settable fields by matching on `field` and returning `false` for names
/// they do not support. The mapper treats `false` as "skip this entry",
/// never as an error.
pub trait FieldSetter<T> {
    fn set_field(&mut self, field: &str, value: T) -> bool;
}

// ─── Rule table ─────────────────────────────────────────────────────────────

/// One entry of the rule table: either a plain rename or a full [`Rule`].
#[derive(Debug)]
pub enum RuleEntry<T> {
    Rename(SmolStr),
    Rule(Rule<T>),
}

/// The rule table consumed by [`map`], keyed by the source field name as it
/// appears in the record.
#[derive(Debug)]
pub struct Rules<T> {
    entries: FxHashMap<SmolStr, RuleEntry<T>>,
}

impl<T> Rules<T> {
    pub fn new() -> Self {
        Rules {
            entries: FxHashMap::default(),
        }
    }

    /// Map `source` onto the destination field `target`, value unchanged.
    pub fn rename(mut self, source: impl Into<SmolStr>, target: impl Into<SmolStr>) -> Self {
        self.entries
            .insert(source.into(), RuleEntry::Rename(target.into()));
        self
    }

    /// Map `source` through a full [`Rule`].
    pub fn rule(mut self, source: impl Into<SmolStr>, rule: Rule<T>) -> Self {
        self.entries.insert(source.into(), RuleEntry::Rule(rule));
        self
    }

    fn get(&self, source: &str) -> Option<&RuleEntry<T>> {
        self.entries.get(source)
    }
}

impl<T> Default for Rules<T> {
    fn default() -> Self {
        Rules::new()
    }
}

// ─── Mapper ─────────────────────────────────────────────────────────────────

/// Copy every non-null entry of `source` into the matching setter capability
/// of `destination`.
///
/// For each entry, in the record's iteration order:
///
/// 1. the rule table is consulted under the *original* source key;
/// 2. a rename maps to that target with the value unchanged, a [`Rule`]
///    maps to its target with [`Rule::resolve`]d value, and an unlisted key
///    falls back to the camel-cased key (`right_level` → `rightLevel`) with
///    the value unchanged;
/// 3. the destination's [`FieldSetter::set_field`] is invoked once with the
///    result. An unsupported field is silently skipped.
///
/// The destination is only ever mutated through its setter capability, and
/// each source entry produces at most one setter call. Panics from a
/// transform or a setter propagate unmodified.
pub fn map<T, D>(source: &Record<T>, destination: &mut D, rules: &Rules<T>)
where
    T: Clone,
    D: FieldSetter<T>,
{
    let row = source.get_all();
    for (key, value) in &row {
        let (field, resolved) = match rules.get(key) {
            Some(RuleEntry::Rename(target)) => (target.clone(), value.clone()),
            Some(RuleEntry::Rule(rule)) => {
                (SmolStr::new(rule.target()), rule.resolve(value, &row))
            }
            None => (camel_case(key), value.clone()),
        };
        if !destination.set_field(&field, resolved) {
            trace!(key = %key, field = %field, "destination has no setter, skipping");
        }
    }
}

/// Collapse underscores into camel case (`right_level` → `rightLevel`);
/// keys without underscores are used as-is.
fn camel_case(key: &str) -> SmolStr {
    if !key.contains('_') {
        return SmolStr::new(key);
    }
    let mut out = String::with_capacity(key.len());
    for part in key.split('_').filter(|p| !p.is_empty()) {
        if out.is_empty() {
            out.push_str(part);
        } else {
            let mut chars = part.chars();
            if let Some(first) = chars.next() {
                out.extend(first.to_uppercase());
                out.push_str(chars.as_str());
            }
        }
    }
    SmolStr::from(out)
}
