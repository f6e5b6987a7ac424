//! # Loadout Codec
//!
//! Decoder for compact base64-packed talent build strings, plus the
//! calibration search used to pin down the reverse-engineered bitstream
//! grammar.
//!
//! The pipeline is a pure function of its inputs:
//!
//! ```text
//! build string → bytes → bit reader → selection decoder → selection table
//! ```
//!
//! guided by a [`TalentSchema`] (canonical node order and node index,
//! supplied by an external dataset) and a [`DecoderConfig`] (one
//! hypothesis about the bit grammar). Because parts of the grammar are
//! unconfirmed, [`calibrate`] brute-forces the configuration space
//! against a reference build whose correct decode is known and returns
//! the best-fitting hypothesis.
//!
//! ## Example
//!
//! ```
//! use loadout_codec::{decode_selections, DecoderConfig};
//! use loadout_codec::{Node, NodeId, NodeOrigin, TalentSchema};
//!
//! let schema = TalentSchema::new(
//!     vec![NodeId(10), NodeId(11)],
//!     [
//!         Node::single(NodeId(10), NodeOrigin::Class, 1),
//!         Node::choice(NodeId(11), NodeOrigin::Spec, 2),
//!     ],
//! );
//! let table = decode_selections("Aw", &schema, DecoderConfig::default())?;
//! assert!(table[&NodeId(10)].taken);
//! assert_eq!(table[&NodeId(11)].chosen_alternative, Some(0));
//! # Ok::<(), loadout_codec::Error>(())
//! ```

mod bits;
mod bytes;
mod calibrate;
mod config;
mod decode;

pub use bits::BitReader;
pub use bytes::decode_code;
pub use calibrate::{
    calibrate, candidate_configs, score_selections, CalibrationCandidate, CalibrationReference,
    MAX_HEADER_FIELDS,
};
pub use config::{ChoiceBitWidth, DecoderConfig, RankEncoding};
pub use decode::decode_selections;

// Re-export the shared model so callers need only one crate.
pub use loadout_core::{
    Error, Node, NodeId, NodeKind, NodeOrigin, Result, SchemaRegistry, SelectionRecord,
    SelectionTable, TalentSchema,
};
