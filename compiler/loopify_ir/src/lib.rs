//! Loopify IR - tagged tree node model
//!
//! This crate contains the data structures every other Loopify crate shares:
//! - [`Tag`], the closed enumeration of node kinds
//! - [`Schema`], the per-tag field registry with legacy field aliases
//! - [`Node`] and [`Value`], the tree itself
//! - [`constructor`], the tag-indexed rebuild table used by the instantiator
//! - [`build`], typed helpers for assembling well-formed nodes
//!
//! # Design Philosophy
//!
//! - **Schema is data**: field tables are authored constants, never derived.
//! - **Closed dispatch**: tag-to-constructor lookup is a `match`, not a
//!   name-keyed registry.
//! - **Spans are metadata**: they ride along on every node but never take
//!   part in structural comparison.

pub mod build;
mod construct;
mod error;
mod node;
pub mod schema;
mod span;
pub mod stack;
mod tag;

pub use construct::{constructor, rebuild, Constructor};
pub use error::IrError;
pub use node::{Fields, Node, Value};
pub use schema::{standard_fields, FieldDesc, FieldFlags, FieldKind, Schema};
pub use span::Span;
pub use tag::Tag;
