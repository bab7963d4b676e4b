//! EOA Delegation Verifier helpers library.

#[cfg(any(feature = "dev", test))]
pub use tracing;

#[macro_use]
mod macros;
