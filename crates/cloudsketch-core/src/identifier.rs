//! Identifier management using string interning
//!
//! Nodes and clusters are referred to by [`Id`] handles. The handles are
//! `Copy`, cheap to compare, and print as the name used in the generated
//! Graphviz source.

use std::{
    fmt,
    sync::{Mutex, MutexGuard, OnceLock},
};

use string_interner::{DefaultStringInterner, DefaultSymbol};

/// Global string interner backing every [`Id`].
static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

fn interner() -> MutexGuard<'static, DefaultStringInterner> {
    INTERNER
        .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Interned identifier for a diagram element.
///
/// # Examples
///
/// ```
/// use cloudsketch_core::identifier::Id;
///
/// let gateway = Id::new("gateway");
/// assert_eq!(gateway, "gateway");
///
/// let first = Id::indexed("node", 0);
/// assert_eq!(first, "node_0");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id(DefaultSymbol);

impl Id {
    /// Creates an `Id` for `name`, reusing the existing symbol if the name
    /// was interned before.
    pub fn new(name: &str) -> Self {
        Self(interner().get_or_intern(name))
    }

    /// Creates the `index`-th identifier of a family, spelled `{prefix}_{index}`.
    ///
    /// The canvas hands out node and cluster ids this way so that the same
    /// declarations always produce the same Graphviz source.
    pub fn indexed(prefix: &str, index: usize) -> Self {
        Self::new(&format!("{prefix}_{index}"))
    }

    /// Returns the interned string.
    pub fn as_string(&self) -> String {
        interner()
            .resolve(self.0)
            .map(str::to_string)
            .unwrap_or_default()
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_string())
    }
}

impl From<&str> for Id {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl PartialEq<str> for Id {
    fn eq(&self, other: &str) -> bool {
        interner().resolve(self.0) == Some(other)
    }
}

impl PartialEq<&str> for Id {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}
