//! Platform-specific address source implementations.
//!
//! # Platform Support
//!
//! - **Unix** (Linux, macOS, BSDs): `getifaddrs(3)` via the `nix` crate.

#[cfg(unix)]
mod unix;

#[cfg(unix)]
pub use unix::IfaddrsSource;

// Re-export platform-specific source as PlatformSource for convenience
#[cfg(unix)]
pub use unix::IfaddrsSource as PlatformSource;
