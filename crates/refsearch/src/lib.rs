//! Public facade crate for `refsearch`.
//!
//! This crate intentionally contains no IO or provider-specific logic of its
//! own. It re-exports the backend-agnostic types/traits and pipeline from
//! `refsearch-core`; the CLI binary wires them to the live providers in
//! `refsearch-local`.

pub use refsearch_core::*;
