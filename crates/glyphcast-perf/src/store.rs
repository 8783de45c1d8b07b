#![forbid(unsafe_code)]

//! State store collaborator: the player's shared UI state.

/// Accessor pair over the state store that owns the sampling parameter.
///
/// The controller only ever reads and writes the `sample` field; every other
/// field in the store is opaque to it. Writes are partial updates of that
/// single field, never a full-record merge, so unrelated state passes
/// through untouched.
pub trait StateStore {
    /// Current sampling parameter, if present and numeric.
    fn sample(&self) -> Option<i32>;

    /// Write a new sampling parameter. Called only when the proposed value
    /// differs from the current one.
    fn set_sample(&mut self, sample: i32);
}
