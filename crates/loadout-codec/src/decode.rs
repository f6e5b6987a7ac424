//! Selection decoder: replays the canonical node order against the
//! bitstream and reconstructs the per-node selection table.

use tracing::debug;

use loadout_core::{Node, NodeKind, Result, SelectionRecord, SelectionTable, TalentSchema};

use crate::bits::BitReader;
use crate::bytes::decode_code;
use crate::config::{DecoderConfig, RankEncoding};

/// Bit width of the rank field for a Single node.
///
/// Wide enough to represent `max_ranks - 1` distinct values.
#[inline]
fn rank_field_width(max_ranks: u8) -> usize {
    match max_ranks {
        0 | 1 => 0,
        2 => 1,
        3 | 4 => 2,
        5..=8 => 3,
        _ => 4,
    }
}

/// Decode a build string into a selection table.
///
/// Walks the schema's canonical order, consuming one "taken" bit per node
/// plus a kind-dependent payload for taken nodes, as parameterized by
/// `config`. Ids in the canonical order with no entry in the node index
/// still consume their bits (under Single/max-rank-1 defaults) so that
/// every subsequent node stays aligned, but emit no record.
///
/// Short or truncated payloads decode to mostly-not-taken tables rather
/// than failing; only the base64 stage can error.
///
/// # Errors
///
/// [`loadout_core::Error::MalformedInput`] when `code` is not valid
/// base64.
pub fn decode_selections(
    code: &str,
    schema: &TalentSchema,
    config: DecoderConfig,
) -> Result<SelectionTable> {
    let bytes = decode_code(code)?;
    let mut bits = BitReader::new(&bytes);

    // Header fields carry no meaning downstream; only their length matters.
    for _ in 0..config.header_field_count {
        let _ = bits.read_varint();
    }

    let mut table = SelectionTable::with_capacity(schema.indexed_len());
    for &id in schema.traversal_order() {
        let node = schema.node(id);
        let record = decode_node(&mut bits, node, config);
        if node.is_some() {
            table.insert(id, record);
        }
    }

    debug!(
        nodes = schema.len(),
        records = table.len(),
        trailing_bytes = bits.bytes_remaining(),
        "decoded selection table"
    );
    Ok(table)
}

/// Consume one node's bit grammar and build its record.
///
/// `node` is `None` for ids absent from the index; the default
/// Single/max-rank-1 grammar is consumed purely for alignment and the
/// returned record is discarded by the caller.
fn decode_node(
    bits: &mut BitReader<'_>,
    node: Option<&Node>,
    config: DecoderConfig,
) -> SelectionRecord {
    let (kind, max_ranks, alternative_count) = match node {
        Some(n) => (n.kind, n.max_ranks, n.alternative_count),
        None => (NodeKind::Single, 1, 1),
    };

    let taken = bits.read_bits(1) == 1;
    if !taken {
        return SelectionRecord::not_taken(max_ranks);
    }

    match kind {
        NodeKind::Choice => {
            let width = config.choice_bit_width.field_width(alternative_count);
            let raw = bits.read_bits(width) as u8;
            if config.choice_trailing_bit {
                let _ = bits.read_bits(1);
            }
            // An over-wide width hypothesis can read a value past the
            // node's alternative range; keep the record in range.
            let chosen = raw.min(alternative_count.saturating_sub(1));
            SelectionRecord {
                taken: true,
                ranks_taken: 1,
                max_ranks,
                chosen_alternative: Some(chosen),
            }
        }
        NodeKind::Single => {
            let width = rank_field_width(max_ranks);
            let ranks = if width == 0 {
                1
            } else {
                match config.rank_encoding {
                    RankEncoding::OffsetByOne => bits.read_bits(width) as u8 + 1,
                    RankEncoding::Raw => {
                        let raw = bits.read_bits(width) as u8;
                        raw.max(1)
                    }
                    RankEncoding::FixedThreeBitRaw => {
                        let raw = bits.read_bits(3) as u8;
                        raw.max(1)
                    }
                }
            };
            SelectionRecord {
                taken: true,
                ranks_taken: ranks.min(max_ranks),
                max_ranks,
                chosen_alternative: None,
            }
        }
    }
}
