//! Decoder configuration: one hypothesis about the bitstream grammar.
//!
//! The exact layout of the build string payload is reverse-engineered,
//! not documented. Several details remain unconfirmed, so each is kept
//! as a closed tagged variant rather than collapsed to a single guess;
//! [`crate::calibrate`] enumerates them exhaustively against a known
//! reference answer set.

use serde::{Deserialize, Serialize};

/// Bit width of the alternative field on a taken Choice node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ChoiceBitWidth {
    /// Always 1 bit.
    FixedOneBit,
    /// Always 2 bits.
    FixedTwoBits,
    /// 1 bit for up to 2 alternatives, 2 bits otherwise.
    #[default]
    ByAlternativeCount,
}

impl ChoiceBitWidth {
    /// Number of bits the alternative field occupies for a node with the
    /// given alternative count.
    #[inline]
    pub fn field_width(self, alternative_count: u8) -> usize {
        match self {
            ChoiceBitWidth::FixedOneBit => 1,
            ChoiceBitWidth::FixedTwoBits => 2,
            ChoiceBitWidth::ByAlternativeCount => {
                if alternative_count <= 2 {
                    1
                } else {
                    2
                }
            }
        }
    }
}

/// How the rank field of a taken Single node maps to ranks spent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RankEncoding {
    /// Field stores `ranks - 1`.
    #[default]
    OffsetByOne,
    /// Field stores the rank directly; 0 is substituted with 1.
    Raw,
    /// Always a 3-bit raw field regardless of the computed width; 0 is
    /// substituted with 1.
    FixedThreeBitRaw,
}

/// One complete hypothesis about the bitstream grammar.
///
/// A plain value type: two configurations with equal fields are the same
/// hypothesis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct DecoderConfig {
    /// Variable-length integers to skip before the selection stream.
    pub header_field_count: u32,
    /// Width policy for Choice alternative fields.
    pub choice_bit_width: ChoiceBitWidth,
    /// Whether a discarded flag bit follows each Choice alternative field.
    pub choice_trailing_bit: bool,
    /// Rank field interpretation for Single nodes.
    pub rank_encoding: RankEncoding,
}
