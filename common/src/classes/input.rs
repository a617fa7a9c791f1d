//! Class inputs and the flattening pass.

use std::borrow::Cow;

use serde_json::Value;

/// One argument to [`merge`](super::merge).
///
/// Inputs nest arbitrarily: lists may contain strings, conditional maps, or
/// further lists. Absent values (`false`, `None`, the empty string) are
/// skipped, and so is anything that cannot carry a class name.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub enum ClassInput<'a> {
    /// Contributes nothing.
    #[default]
    Absent,
    /// Whitespace-separated class tokens.
    Tokens(Cow<'a, str>),
    /// Class names paired with an include flag, kept in the given order.
    Conditional(Vec<(Cow<'a, str>, bool)>),
    /// Nested inputs, flattened depth-first.
    List(Vec<ClassInput<'a>>),
}

impl<'a> ClassInput<'a> {
    /// Builds a conditional mapping from `(name, include)` pairs.
    ///
    /// # Examples
    ///
    /// ```
    /// use stockroom_common::classes::{ClassInput, merge};
    ///
    /// let active = true;
    /// let input = ClassInput::conditional([("font-bold", active), ("opacity-50", !active)]);
    /// assert_eq!(merge([input]), "font-bold");
    /// ```
    pub fn conditional<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, bool)>,
        K: Into<Cow<'a, str>>,
    {
        Self::Conditional(
            entries
                .into_iter()
                .map(|(name, include)| (name.into(), include))
                .collect(),
        )
    }

    /// Returns `true` when the input cannot contribute any token.
    #[must_use]
    pub fn is_absent(&self) -> bool {
        match self {
            Self::Absent => true,
            Self::Tokens(text) => text.trim().is_empty(),
            Self::Conditional(entries) => entries
                .iter()
                .all(|(name, include)| !include || name.trim().is_empty()),
            Self::List(items) => items.iter().all(Self::is_absent),
        }
    }
}

/// Flattens `inputs` into class tokens in declaration order.
///
/// The walk keeps an explicit stack so that pathologically deep nesting
/// cannot exhaust the thread stack.
pub(crate) fn flatten<'s>(inputs: &'s [ClassInput<'_>]) -> Vec<&'s str> {
    let mut tokens = Vec::new();
    let mut pending = vec![inputs.iter()];

    while let Some(frame) = pending.last_mut() {
        let Some(input) = frame.next() else {
            pending.pop();
            continue;
        };

        match input {
            ClassInput::Absent => {}
            ClassInput::Tokens(text) => tokens.extend(text.split_whitespace()),
            ClassInput::Conditional(entries) => tokens.extend(
                entries
                    .iter()
                    .filter(|(_, include)| *include)
                    .flat_map(|(name, _)| name.split_whitespace()),
            ),
            ClassInput::List(items) => pending.push(items.iter()),
        }
    }

    tokens
}

impl<'a> From<&'a str> for ClassInput<'a> {
    fn from(value: &'a str) -> Self {
        Self::Tokens(Cow::Borrowed(value))
    }
}

impl<'a> From<&'a String> for ClassInput<'a> {
    fn from(value: &'a String) -> Self {
        Self::Tokens(Cow::Borrowed(value.as_str()))
    }
}

impl From<String> for ClassInput<'_> {
    fn from(value: String) -> Self {
        Self::Tokens(Cow::Owned(value))
    }
}

impl<'a> From<Cow<'a, str>> for ClassInput<'a> {
    fn from(value: Cow<'a, str>) -> Self {
        Self::Tokens(value)
    }
}

/// Both `false` and a stray `true` are non-contributing leaves.
impl From<bool> for ClassInput<'_> {
    fn from(_: bool) -> Self {
        Self::Absent
    }
}

impl From<()> for ClassInput<'_> {
    fn from((): ()) -> Self {
        Self::Absent
    }
}

impl<'a, T> From<Option<T>> for ClassInput<'a>
where
    T: Into<ClassInput<'a>>,
{
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Absent, Into::into)
    }
}

impl<'a> From<(&'a str, bool)> for ClassInput<'a> {
    fn from((name, include): (&'a str, bool)) -> Self {
        Self::Conditional(vec![(Cow::Borrowed(name), include)])
    }
}

impl<'a, T> From<Vec<T>> for ClassInput<'a>
where
    T: Into<ClassInput<'a>>,
{
    fn from(items: Vec<T>) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }
}

impl<'a, T, const N: usize> From<[T; N]> for ClassInput<'a>
where
    T: Into<ClassInput<'a>>,
{
    fn from(items: [T; N]) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }
}

impl<'a, T> From<&[T]> for ClassInput<'a>
where
    T: Clone + Into<ClassInput<'a>>,
{
    fn from(items: &[T]) -> Self {
        Self::List(items.iter().cloned().map(Into::into).collect())
    }
}

/// Interprets untyped JSON the way a loosely typed caller would pass it.
///
/// Strings are token lists, arrays nest, and objects are conditional maps in
/// which only a literal `true` includes the key. Numbers, `null`, booleans,
/// and non-boolean map values contribute nothing.
impl<'a> From<&'a Value> for ClassInput<'a> {
    fn from(value: &'a Value) -> Self {
        match value {
            Value::String(text) => Self::Tokens(Cow::Borrowed(text.as_str())),
            Value::Array(items) => Self::List(items.iter().map(Self::from).collect()),
            Value::Object(entries) => Self::Conditional(
                entries
                    .iter()
                    .map(|(name, include)| (Cow::Borrowed(name.as_str()), include.as_bool() == Some(true)))
                    .collect(),
            ),
            Value::Null | Value::Bool(_) | Value::Number(_) => Self::Absent,
        }
    }
}
