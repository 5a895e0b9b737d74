//! bgen IR - Value-Equatable Model Types
//!
//! This crate contains the data structures that flow between pipeline stages:
//! - `EqSeq` for order-sensitive sequences with value equality
//! - `MemberModel` for one data member of a target type
//! - `BuilderSpec` for the full description of one builder to generate
//! - `DeclarationId`, `BuilderKey` and `ArtifactId` identities
//! - `GeneratedArtifact` for named generated text
//! - `Structural` for walking a value's shape in cache-safety checks
//!
//! # Cache Compatibility
//!
//! Every type crossing a stage boundary has:
//! - Clone: cached outputs are handed out again verbatim
//! - Eq + `PartialEq`: early cutoff compares by value, never by identity
//! - Hash: inputs are memoization keys
//! - Debug: required for test failure output
//!
//! None of them hold a reference to symbol-provider state. `Structural`
//! makes that checkable: a value reports its shape recursively, and provider
//! handles report themselves as foreign.

mod artifact;
mod member;
mod seq;
mod spec;
pub mod structure;

pub use artifact::{ArtifactId, GeneratedArtifact};
pub use member::{MemberModel, Visibility};
pub use seq::EqSeq;
pub use spec::{BuilderKey, BuilderSpec, DeclarationId};
pub use structure::{Shape, Structural};
