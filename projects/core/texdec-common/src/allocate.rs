//! Memory allocation utilities for cache line aligned allocations.
//!
//! Pixel buffers are allocated aligned to the processor's cache line size so
//! that SIMD decode paths can use aligned loads and stores on whole rows.
//!
//! ## Cache Line Sizes by Architecture
//!
//! - **x86/x86_64**: 64 bytes (Intel/AMD mainstream)
//! - **aarch64**: 64 bytes (ARM64 typical, but can vary)
//! - **Other architectures**: 64 bytes (conservative default)

use core::alloc::Layout;

use safe_allocator_api::RawAlloc;
use thiserror::Error;

/// Errors that can occur while allocating pixel storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AllocateError {
    /// The requested size cannot be represented as an allocation layout.
    #[error("requested allocation size is not a representable layout")]
    InvalidLayout,

    /// The allocator could not provide the requested memory.
    #[error("the allocator could not provide the requested memory")]
    OutOfMemory,
}

/// Allocates data aligned to the processor's cache line size.
///
/// # Parameters
///
/// - `num_bytes`: The number of bytes to allocate
///
/// # Returns
///
/// A [`RawAlloc`] containing the allocated data. The memory is *not*
/// zero-initialized; callers that hand slices of it out must fill it first.
pub fn allocate_cache_line_aligned(num_bytes: usize) -> Result<RawAlloc, AllocateError> {
    // Note: These are typical values - actual cache line sizes can vary by processor model.
    const CACHE_LINE_SIZE: usize = 64;

    let layout = Layout::from_size_align(num_bytes, CACHE_LINE_SIZE)
        .map_err(|_| AllocateError::InvalidLayout)?;
    RawAlloc::new(layout).map_err(|_| AllocateError::OutOfMemory)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocation_is_cache_line_aligned() {
        let alloc = allocate_cache_line_aligned(4096).unwrap();
        assert_eq!(alloc.as_ptr() as usize % 64, 0);
        assert!(alloc.len() >= 4096);
    }

    #[test]
    fn oversized_request_fails_cleanly() {
        // isize::MAX overflows the layout rounding rules.
        assert!(allocate_cache_line_aligned(usize::MAX).is_err());
    }
}
