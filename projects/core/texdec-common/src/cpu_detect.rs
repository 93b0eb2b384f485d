//! Helpers for CPU feature detection without using std.
//!
//! This module provides CPU feature detection for SIMD instruction sets using
//! the `cpufeatures` crate. These functions are used to determine at runtime
//! which optimized decode paths can be safely executed on the current CPU.
//!
//! The functions are minimal overhead, they have an init that's called once,
//! and every subsequent call simply loads and compares a bool.

/// Checks if the CPU supports SSE2 (Streaming SIMD Extensions 2) instructions.
///
/// SSE2 is widely available on virtually all x86-64 processors and is the
/// baseline vector path for the 15/16-bit linear decoders.
///
/// # Returns
/// `true` if the CPU supports SSE2 instructions, `false` otherwise.
#[inline]
#[cfg(any(target_arch = "x86_64", target_arch = "x86"))]
pub fn has_sse2() -> bool {
    cpufeatures::new!(cpuid_sse2, "sse2");
    cpuid_sse2::get()
}

/// Checks if the CPU supports SSSE3 (Supplemental SSE3) instructions.
///
/// SSSE3 provides `pshufb`, which the 24-bit and 32-bit linear decoders use
/// for byte swizzling.
///
/// # Returns
/// `true` if the CPU supports SSSE3 instructions, `false` otherwise.
#[inline]
#[cfg(any(target_arch = "x86_64", target_arch = "x86"))]
pub fn has_ssse3() -> bool {
    cpufeatures::new!(cpuid_ssse3, "ssse3");
    cpuid_ssse3::get()
}
