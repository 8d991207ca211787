//! Traversal state carried through one validation.
//!
//! [`ValidationContext`] tracks how deep the engine has descended and carries
//! the structural limits that bound the walk. A fresh context is created per
//! request; nothing in it outlives the call.

use crate::config::Limits;

/// Depth tracking plus the limits the engine enforces on untrusted trees.
#[derive(Debug, Clone, Copy)]
pub struct ValidationContext {
    depth: usize,
    limits: Limits,
}

impl ValidationContext {
    pub fn new(limits: Limits) -> Self {
        Self { depth: 0, limits }
    }

    /// Returns a context one level deeper, used when entering a nested
    /// object or a sequence of objects.
    pub fn descend(&self) -> Self {
        Self {
            depth: self.depth + 1,
            limits: self.limits,
        }
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn max_depth(&self) -> usize {
        self.limits.max_depth
    }

    pub fn max_array_len(&self) -> usize {
        self.limits.max_array_len
    }

    /// True once the walk is deeper than the configured maximum.
    pub fn depth_exceeded(&self) -> bool {
        self.depth > self.limits.max_depth
    }
}

impl Default for ValidationContext {
    fn default() -> Self {
        Self::new(Limits::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descend_increments_depth_only() {
        let limits = Limits {
            max_depth: 2,
            max_array_len: 7,
        };
        let root = ValidationContext::new(limits);
        let child = root.descend();

        assert_eq!(root.depth(), 0);
        assert_eq!(child.depth(), 1);
        assert_eq!(child.max_depth(), 2);
        assert_eq!(child.max_array_len(), 7);
    }

    #[test]
    fn test_depth_exceeded_past_max() {
        let ctx = ValidationContext::new(Limits {
            max_depth: 1,
            max_array_len: 10,
        });
        assert!(!ctx.depth_exceeded());
        assert!(!ctx.descend().depth_exceeded());
        assert!(ctx.descend().descend().depth_exceeded());
    }
}
