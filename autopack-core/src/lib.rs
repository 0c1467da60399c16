//! # autopack-core
//!
//! Archive format recognition and target negotiation for the `autopack`
//! dispatcher.
//!
//! This crate decides *what* should happen to a path: it classifies sources by
//! binary signature and extension, infers whether the user wants to compress
//! or decompress, filters file lists, and resolves conflicts with existing
//! targets through an abstract [`Interaction`]. It never runs archiving tools
//! itself.

pub mod conflict;
pub mod error;
pub mod extension;
pub mod filter;
pub mod interaction;
pub mod kind;
pub mod recognize;
pub mod signature;
pub mod split_zip;
pub mod stats;
pub mod threading;

pub use conflict::{resolve_existing_target, Resolution};
pub use error::{Error, Result};
pub use filter::{FilterOutcome, FilterSet};
pub use interaction::{Interaction, ScriptedInteraction};
pub use kind::{FileKind, OperationKind};
pub use recognize::{ensure_distinct, recognize, recognize_source_type, RecognitionResult};
pub use stats::OperationStats;
pub use threading::Threading;
