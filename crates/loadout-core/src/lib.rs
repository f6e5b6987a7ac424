//! # Loadout Core
//!
//! Data model, schema types, and error taxonomy for the loadout build
//! decoder.
//!
//! A "build string" packs a player's talent selections into a base64-like
//! text code. This crate owns the vocabulary shared by the decoder and
//! its callers: node definitions, decoded selection records, the talent
//! schema (canonical node order plus node index), and the error types.
//! The decoding machinery itself lives in `loadout-codec`.

pub mod error;
pub mod schema;
pub mod types;

pub use error::{Error, Result};
pub use schema::{SchemaRegistry, TalentSchema};
pub use types::{Node, NodeId, NodeKind, NodeOrigin, SelectionRecord, SelectionTable};
