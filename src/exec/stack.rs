use glam::DMat4;

use crate::foundation::math;

/// Returned by [`TransformStack::pop`] when only the base entry is left.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("transform stack underflow")]
pub struct StackUnderflow;

/// Stack of cumulative coordinate systems, mirroring `push`/`pop` scoping.
///
/// Never empty: the bottom entry is the frame's base coordinate system.
#[derive(Clone, Debug, PartialEq)]
pub struct TransformStack {
    entries: Vec<DMat4>,
}

impl Default for TransformStack {
    fn default() -> Self {
        Self::new()
    }
}

impl TransformStack {
    /// A stack holding a single identity matrix.
    pub fn new() -> Self {
        Self {
            entries: vec![math::identity()],
        }
    }

    /// Number of entries (`>= 1`).
    pub fn depth(&self) -> usize {
        self.entries.len()
    }

    /// The current cumulative transform.
    pub fn current(&self) -> &DMat4 {
        &self.entries[self.entries.len() - 1]
    }

    /// Duplicate the top entry so a later `pop` restores it exactly.
    pub fn push(&mut self) {
        let top = *self.current();
        self.entries.push(top);
    }

    /// Remove and return the top entry; the base entry can never be popped.
    pub fn pop(&mut self) -> Result<DMat4, StackUnderflow> {
        if self.entries.len() <= 1 {
            return Err(StackUnderflow);
        }
        self.entries.pop().ok_or(StackUnderflow)
    }

    /// Overwrite the top entry.
    pub fn replace_top(&mut self, m: DMat4) {
        let last = self.entries.len() - 1;
        self.entries[last] = m;
    }

    /// `current() * m`: `m` acts first, in the current local frame.
    pub fn compose(&self, m: &DMat4) -> DMat4 {
        math::multiply(self.current(), m)
    }

    /// Fold `m` into the top entry (`top = top * m`).
    pub fn apply(&mut self, m: &DMat4) {
        let next = self.compose(m);
        self.replace_top(next);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/exec/stack.rs"]
mod tests;
