//! Normalisation of the optional caller context into associated data.

use std::fmt;

/// Associated data mixed into the tag, never into the ciphertext or the
/// container.
///
/// Absent and zero-length contexts normalise to the same empty value, so a
/// container sealed with one opens with the other.
#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub struct AssociatedData<'a>(&'a [u8]);

impl<'a> AssociatedData<'a> {
    /// Normalise an optional context.
    pub fn normalize(context: Option<&'a [u8]>) -> Self {
        Self(context.unwrap_or_default())
    }

    /// The canonical "no context" value.
    pub fn empty() -> Self {
        Self(&[])
    }

    /// Bytes fed to the MAC.
    pub fn as_bytes(&self) -> &'a [u8] {
        self.0
    }

    /// `true` when no context bytes are bound.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of context bytes bound into the tag.
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl<'a> From<Option<&'a [u8]>> for AssociatedData<'a> {
    fn from(context: Option<&'a [u8]>) -> Self {
        Self::normalize(context)
    }
}

impl fmt::Debug for AssociatedData<'_> {
    // Contexts are caller data; only the length is shown.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AssociatedData")
            .field("len", &self.0.len())
            .finish()
    }
}
