//! Tri-state attribute values.

/// A style attribute value that is never set, explicitly cleared, or set.
///
/// `Cleared` records that a user removed a value that was previously set.
/// For emptiness and serialization it behaves exactly like `Unset`; it is
/// kept distinct so editors can tell "reverted" apart from "never touched".
///
/// # Example
///
/// ```
/// use tincture_scheme::StyleValue;
///
/// let bold: StyleValue<bool> = StyleValue::Set(true);
/// assert!(bold.is_set());
/// assert_eq!(bold.resolve(&false), true);
///
/// let cleared: StyleValue<bool> = StyleValue::Cleared;
/// assert!(!cleared.is_set());
/// assert_eq!(cleared.resolve(&false), false);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StyleValue<T> {
    /// Never assigned.
    Unset,
    /// Assigned at some point, then reverted to the type default.
    Cleared,
    /// An explicit value.
    Set(T),
}

impl<T> Default for StyleValue<T> {
    fn default() -> Self {
        Self::Unset
    }
}

impl<T> StyleValue<T> {
    /// Check if this value is explicitly set.
    pub fn is_set(&self) -> bool {
        matches!(self, StyleValue::Set(_))
    }

    /// Check if this value was explicitly cleared.
    pub fn is_cleared(&self) -> bool {
        matches!(self, StyleValue::Cleared)
    }

    /// Get the inner value if set.
    pub fn as_set(&self) -> Option<&T> {
        match self {
            StyleValue::Set(v) => Some(v),
            _ => None,
        }
    }

    /// Map the inner value, keeping the unset/cleared state.
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> StyleValue<U> {
        match self {
            StyleValue::Set(v) => StyleValue::Set(f(v)),
            StyleValue::Cleared => StyleValue::Cleared,
            StyleValue::Unset => StyleValue::Unset,
        }
    }
}

impl<T: Clone> StyleValue<T> {
    /// The effective value: the explicit one if set, `default` otherwise.
    pub fn resolve(&self, default: &T) -> T {
        match self {
            StyleValue::Set(v) => v.clone(),
            StyleValue::Cleared | StyleValue::Unset => default.clone(),
        }
    }
}

impl<T> From<T> for StyleValue<T> {
    fn from(value: T) -> Self {
        StyleValue::Set(value)
    }
}
