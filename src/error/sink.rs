//! Collection of non-fatal scan errors

use super::MoxError;

/// Receives every error the scanner recovers from.
pub trait DiagnosticSink {
    fn report(&mut self, error: MoxError);
}

impl<F> DiagnosticSink for F
where
    F: FnMut(MoxError),
{
    fn report(&mut self, error: MoxError) {
        self(error)
    }
}

/// A sink that keeps every reported error in order.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Diagnostics {
    errors: Vec<MoxError>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether anything has been reported since creation or the last `clear`
    pub fn had_error(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MoxError> {
        self.errors.iter()
    }

    /// Forget everything reported so far
    pub fn clear(&mut self) {
        self.errors.clear();
    }

    pub fn into_vec(self) -> Vec<MoxError> {
        self.errors
    }
}

impl DiagnosticSink for Diagnostics {
    fn report(&mut self, error: MoxError) {
        tracing::debug!(error = %error, "scan error reported");
        self.errors.push(error);
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a MoxError;
    type IntoIter = std::slice::Iter<'a, MoxError>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
