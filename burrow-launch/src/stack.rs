//! Per-launch child stack allocation
//!
//! clone(2) does not allocate a stack for the child; the caller supplies one.
//! Each launch owns its own region so that sequential or overlapping launches
//! never share stack memory while a child is live.

/// Default child stack size (1 MiB)
pub const DEFAULT_STACK_SIZE: usize = 1024 * 1024;

/// Smallest stack size accepted for a launch
pub const MIN_STACK_SIZE: usize = 16 * 1024;

/// Heap-allocated stack region for one child process
///
/// The region is owned by the launch that created it and must stay alive
/// until the child has been reaped; the child uses it as its call stack
/// until it execs or exits.
#[derive(Debug)]
pub struct ChildStack {
    mem: Vec<u8>,
}

impl ChildStack {
    /// Allocate a zeroed stack region of `size` bytes
    #[must_use]
    pub fn new(size: usize) -> Self {
        Self { mem: vec![0; size] }
    }

    /// Size of the region in bytes
    #[must_use]
    pub fn size(&self) -> usize {
        self.mem.len()
    }

    /// Mutable view of the region, as clone(2) expects
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.mem
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stack_allocation() {
        let stack = ChildStack::new(DEFAULT_STACK_SIZE);
        assert_eq!(stack.size(), DEFAULT_STACK_SIZE);
    }

    #[test]
    fn test_stacks_are_distinct_regions() {
        let mut a = ChildStack::new(MIN_STACK_SIZE);
        let mut b = ChildStack::new(MIN_STACK_SIZE);

        let a_ptr = a.as_mut_slice().as_ptr();
        let b_ptr = b.as_mut_slice().as_ptr();
        assert_ne!(a_ptr, b_ptr);
    }
}
