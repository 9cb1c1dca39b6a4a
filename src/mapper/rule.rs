use indexmap::IndexMap;
use smol_str::SmolStr;

/// The full source row a transform can read, i.e. the record's materialized
/// non-null entries in insertion order.
pub type Row<T> = IndexMap<SmolStr, T>;

// ─── Rule ───────────────────────────────────────────────────────────────────

/// A renaming/transformation instruction for one source field.
///
/// A rule always carries the target field name; the value specifier decides
/// what the mapper hands to the destination's setter:
///
/// - [`Rule::new`] passes the source value through unchanged
/// - [`Rule::transform`] derives it from `(value, row)` — the row gives a
///   transform access to the other source fields
/// - [`Rule::constant`] replaces it regardless of the source value
pub struct Rule<T> {
    target: SmolStr,
    value: RuleValue<T>,
}

enum RuleValue<T> {
    Passthrough,
    Constant(T),
    Transform(Box<dyn Fn(&T, &Row<T>) -> T>),
}

impl<T> Rule<T> {
    /// Rename only; the value passes through unchanged.
    pub fn new(target: impl Into<SmolStr>) -> Self {
        Rule {
            target: target.into(),
            value: RuleValue::Passthrough,
        }
    }

    /// Rename and replace the value with a constant.
    pub fn constant(target: impl Into<SmolStr>, value: T) -> Self {
        Rule {
            target: target.into(),
            value: RuleValue::Constant(value),
        }
    }

    /// Rename and derive the value with `transform(value, row)`.
    pub fn transform(
        target: impl Into<SmolStr>,
        transform: impl Fn(&T, &Row<T>) -> T + 'static,
    ) -> Self {
        Rule {
            target: target.into(),
            value: RuleValue::Transform(Box::new(transform)),
        }
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    /// Resolve the value this rule produces for a source entry. Whatever a
    /// transform panics with is propagated as-is; rules neither catch nor
    /// wrap.
    pub fn resolve(&self, value: &T, row: &Row<T>) -> T
    where
        T: Clone,
    {
        match &self.value {
            RuleValue::Passthrough => value.clone(),
            RuleValue::Constant(constant) => constant.clone(),
            RuleValue::Transform(transform) => transform(value, row),
        }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Rule<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.value {
            RuleValue::Passthrough => write!(f, "Rule({:?})", self.target),
            RuleValue::Constant(c) => write!(f, "Rule({:?}, const {:?})", self.target, c),
            RuleValue::Transform(_) => write!(f, "Rule({:?}, transform)", self.target),
        }
    }
}
