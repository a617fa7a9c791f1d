//! Deterministic composition of utility-first style classes.
//!
//! [`merge`] flattens loosely shaped inputs into class tokens and resolves
//! conflicts so that, for every utility group, only the last-declared token
//! survives. Tokens the classification table does not recognise pass through
//! unchanged, deduplicated by exact match.
//!
//! ```
//! use stockroom_common::classes;
//!
//! let disabled = false;
//! let merged = classes!("px-2 py-1 bg-muted", ("opacity-50", disabled), "p-3 bg-primary");
//! assert_eq!(merged, "p-3 bg-primary");
//! ```

mod groups;
mod input;
mod token;
mod validators;

use std::borrow::Cow;
use std::collections::HashSet;
use std::fmt;

use once_cell::sync::Lazy;

pub use groups::{ClassGroups, GroupRule, GroupTable, Matcher, ValueKind};
pub use input::ClassInput;

use input::flatten;
use token::{Token, arbitrary_property, without_postfix};

static DEFAULT_TABLE: Lazy<GroupTable> = Lazy::new(GroupTable::tailwind_v3);

/// Returns the shared Tailwind CSS v3 classification table.
#[must_use]
pub fn default_table() -> &'static GroupTable {
    &DEFAULT_TABLE
}

/// Merges class inputs with the default table.
///
/// # Examples
///
/// ```
/// use stockroom_common::classes::merge;
///
/// assert_eq!(merge(["p-2 text-sm", "p-4"]), "text-sm p-4");
/// assert_eq!(merge([Some("flex"), None]), "flex");
/// ```
#[must_use]
pub fn merge<'a, I>(inputs: I) -> String
where
    I: IntoIterator,
    I::Item: Into<ClassInput<'a>>,
{
    ClassMerger::default().merge(inputs)
}

/// Merges a heterogeneous list of class inputs with the default table.
///
/// Each argument may be any type convertible into
/// [`ClassInput`](crate::classes::ClassInput).
#[macro_export]
macro_rules! classes {
    ($($input:expr),* $(,)?) => {
        $crate::classes::ClassMerger::default()
            .resolve(&[$($crate::classes::ClassInput::from($input)),*])
    };
}

/// Conflict resolver bound to a classification table.
#[derive(Clone, Copy)]
pub struct ClassMerger<'t> {
    table: &'t dyn ClassGroups,
}

impl Default for ClassMerger<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ClassMerger<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassMerger")
            .field("table", &self.table.version())
            .finish()
    }
}

impl ClassMerger<'static> {
    /// Merger using [`default_table`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            table: default_table(),
        }
    }
}

impl<'t> ClassMerger<'t> {
    /// Merger using a caller-supplied table.
    #[must_use]
    pub fn with_table(table: &'t dyn ClassGroups) -> Self {
        Self { table }
    }

    /// Table in use.
    #[must_use]
    pub fn table(&self) -> &'t dyn ClassGroups {
        self.table
    }

    /// Converts `inputs` and resolves them.
    #[must_use]
    pub fn merge<'a, I>(&self, inputs: I) -> String
    where
        I: IntoIterator,
        I::Item: Into<ClassInput<'a>>,
    {
        let collected: Vec<ClassInput<'a>> = inputs.into_iter().map(Into::into).collect();
        self.resolve(&collected)
    }

    /// Resolves already converted inputs into a space-separated class list.
    #[must_use]
    pub fn resolve(&self, inputs: &[ClassInput<'_>]) -> String {
        let tokens = flatten(inputs);
        let mut claimed: HashSet<String> = HashSet::new();
        let mut survivors: Vec<&str> = Vec::with_capacity(tokens.len());

        for &raw in tokens.iter().rev() {
            let token = Token::parse(raw);
            let Some((group, overrides)) = self.group_of(token.utility()) else {
                survivors.push(raw);
                continue;
            };

            let prefix = token.key_prefix();
            if !claimed.insert(format!("{prefix}{group}")) {
                continue;
            }
            claimed.extend(overrides.iter().map(|other| format!("{prefix}{other}")));
            survivors.push(raw);
        }

        survivors.reverse();
        let mut emitted = HashSet::with_capacity(survivors.len());
        survivors.retain(|token| emitted.insert(*token));
        survivors.join(" ")
    }

    /// Group of `utility` and the groups it overrides.
    ///
    /// A postfix (`/7` in `text-lg/7`) is stripped before lookup, otherwise
    /// catch-all colour rules would swallow it. The full utility is tried
    /// when the stripped form is unknown.
    fn group_of(&self, utility: &str) -> Option<(Cow<'t, str>, &'t [&'t str])> {
        if let Some(property) = arbitrary_property(utility) {
            return Some((Cow::Owned(format!("[{property}]")), &[]));
        }

        let table = self.table;
        let group = without_postfix(utility)
            .and_then(|head| table.classify(head))
            .or_else(|| table.classify(utility))?;
        Some((Cow::Borrowed(group), table.conflicts(group)))
    }
}
