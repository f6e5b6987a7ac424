//! Calibration search over the decoder configuration space.
//!
//! The bitstream grammar carries several unconfirmed details (header
//! length, choice field width, rank encoding). Calibration brute-forces
//! every combination against a reference build string whose correct
//! decode is known, scores each candidate, and returns the best fit.
//! The space is small (a few hundred combinations), so the search is
//! exhaustive rather than heuristic.

use std::collections::BTreeSet;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use loadout_core::{Error, NodeId, Result, SelectionTable, TalentSchema};

use crate::config::{ChoiceBitWidth, DecoderConfig, RankEncoding};
use crate::decode::decode_selections;

/// Upper bound (inclusive) on the header varint count explored.
pub const MAX_HEADER_FIELDS: u32 = 15;

/// Score weight per expected-taken node, awarded or deducted.
const TAKEN_WEIGHT: i32 = 2;

/// Bonus (or penalty) for the fully-taken alternative track assertion.
/// Large enough to dominate ties among configurations that already match
/// most individual node expectations.
const TRACK_BONUS: i32 = 10;

const CHOICE_WIDTHS: [ChoiceBitWidth; 3] = [
    ChoiceBitWidth::FixedOneBit,
    ChoiceBitWidth::FixedTwoBits,
    ChoiceBitWidth::ByAlternativeCount,
];

const RANK_ENCODINGS: [RankEncoding; 3] = [
    RankEncoding::OffsetByOne,
    RankEncoding::Raw,
    RankEncoding::FixedThreeBitRaw,
];

/// Known-correct reference decode to score candidates against.
///
/// An explicit immutable value passed into each [`calibrate`] call, so
/// runs against different reference builds can coexist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalibrationReference {
    /// The reference-encoded build string.
    pub code: String,
    /// Node ids expected to be taken under a correct decode.
    pub expected_taken: BTreeSet<NodeId>,
    /// Member nodes of each alternative track in the designated
    /// choice-group, one inner list per track.
    pub alternative_tracks: Vec<Vec<NodeId>>,
    /// Whether to score the "exactly one track fully taken" assertion.
    pub require_full_track: bool,
}

/// One scored configuration hypothesis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalibrationCandidate {
    /// The configuration that produced `score`.
    pub config: DecoderConfig,
    /// Score under the reference answer set; higher fits better.
    pub score: i32,
}

/// Enumerate the full configuration space.
///
/// Order is lexicographic over (header field count, choice width,
/// trailing bit, rank encoding), with enum variants in declaration
/// order and `false` before `true`. Ties in score break toward the
/// earliest configuration in this sequence, so the order is part of the
/// contract.
pub fn candidate_configs() -> Vec<DecoderConfig> {
    let mut configs = Vec::with_capacity(
        (MAX_HEADER_FIELDS as usize + 1) * CHOICE_WIDTHS.len() * 2 * RANK_ENCODINGS.len(),
    );
    for header_field_count in 0..=MAX_HEADER_FIELDS {
        for &choice_bit_width in &CHOICE_WIDTHS {
            for choice_trailing_bit in [false, true] {
                for &rank_encoding in &RANK_ENCODINGS {
                    configs.push(DecoderConfig {
                        header_field_count,
                        choice_bit_width,
                        choice_trailing_bit,
                        rank_encoding,
                    });
                }
            }
        }
    }
    configs
}

/// Score one decoded table against the reference answer set.
///
/// Each expected-taken node contributes ±2. When the full-track
/// assertion is enabled, the track with the most taken members earns
/// +10 if all of its members are taken and −10 otherwise.
pub fn score_selections(table: &SelectionTable, reference: &CalibrationReference) -> i32 {
    let is_taken = |id: &NodeId| table.get(id).is_some_and(|r| r.taken);

    let mut score = 0;
    for id in &reference.expected_taken {
        score += if is_taken(id) { TAKEN_WEIGHT } else { -TAKEN_WEIGHT };
    }

    if reference.require_full_track {
        let best_track = reference
            .alternative_tracks
            .iter()
            .max_by_key(|track| track.iter().filter(|id| is_taken(id)).count());
        if let Some(track) = best_track {
            let complete = track.iter().all(|id| is_taken(id));
            score += if complete { TRACK_BONUS } else { -TRACK_BONUS };
        }
    }

    score
}

/// Search the configuration space and return the best-scoring candidate.
///
/// Candidates whose decode fails hard are dropped from ranking.
/// Evaluation runs in parallel; the winner is the highest score, with
/// ties broken toward the earliest enumeration index, so the result is
/// deterministic regardless of scheduling.
///
/// # Errors
///
/// [`Error::NoViableConfiguration`] when every candidate failed to
/// decode or none scored above zero.
pub fn calibrate(
    reference: &CalibrationReference,
    schema: &TalentSchema,
) -> Result<CalibrationCandidate> {
    let configs = candidate_configs();
    let best = configs
        .into_par_iter()
        .enumerate()
        .filter_map(|(index, config)| {
            let table = decode_selections(&reference.code, schema, config).ok()?;
            let score = score_selections(&table, reference);
            trace!(index, score, ?config, "scored calibration candidate");
            Some((index, CalibrationCandidate { config, score }))
        })
        .reduce_with(|a, b| {
            if b.1.score > a.1.score || (b.1.score == a.1.score && b.0 < a.0) {
                b
            } else {
                a
            }
        });

    match best {
        Some((index, candidate)) if candidate.score > 0 => {
            debug!(
                index,
                score = candidate.score,
                config = ?candidate.config,
                "calibration selected configuration"
            );
            Ok(candidate)
        }
        _ => Err(Error::NoViableConfiguration),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use loadout_core::SelectionRecord;

    fn taken_record() -> SelectionRecord {
        SelectionRecord {
            taken: true,
            ranks_taken: 1,
            max_ranks: 1,
            chosen_alternative: None,
        }
    }

    fn reference(
        expected: &[u32],
        tracks: &[&[u32]],
        require_full_track: bool,
    ) -> CalibrationReference {
        CalibrationReference {
            code: String::new(),
            expected_taken: expected.iter().copied().map(NodeId).collect(),
            alternative_tracks: tracks
                .iter()
                .map(|t| t.iter().copied().map(NodeId).collect())
                .collect(),
            require_full_track,
        }
    }

    #[test]
    fn enumeration_is_lexicographic_and_complete() {
        let configs = candidate_configs();
        assert_eq!(configs.len(), 16 * 3 * 2 * 3);

        // First candidate: all option indices at zero.
        assert_eq!(
            configs[0],
            DecoderConfig {
                header_field_count: 0,
                choice_bit_width: ChoiceBitWidth::FixedOneBit,
                choice_trailing_bit: false,
                rank_encoding: RankEncoding::OffsetByOne,
            }
        );
        // The rank encoding is the fastest-varying axis.
        assert_eq!(configs[1].rank_encoding, RankEncoding::Raw);
        assert_eq!(configs[1].choice_bit_width, ChoiceBitWidth::FixedOneBit);
        // Last candidate: all option indices at their maximum.
        assert_eq!(
            configs[configs.len() - 1],
            DecoderConfig {
                header_field_count: MAX_HEADER_FIELDS,
                choice_bit_width: ChoiceBitWidth::ByAlternativeCount,
                choice_trailing_bit: true,
                rank_encoding: RankEncoding::FixedThreeBitRaw,
            }
        );
        // No duplicates.
        let unique: std::collections::HashSet<_> = configs.iter().copied().collect();
        assert_eq!(unique.len(), configs.len());
    }

    #[test]
    fn scoring_rewards_and_penalizes_symmetrically() {
        let reference = reference(&[1, 2, 3], &[], false);
        let mut table = SelectionTable::new();
        table.insert(NodeId(1), taken_record());
        table.insert(NodeId(2), taken_record());
        // Node 3 missing from the table counts as not taken.
        assert_eq!(score_selections(&table, &reference), 2 + 2 - 2);
    }

    #[test]
    fn full_track_bonus_follows_the_best_track() {
        let mut table = SelectionTable::new();
        table.insert(NodeId(10), taken_record());
        table.insert(NodeId(11), taken_record());
        table.insert(NodeId(20), taken_record());

        // Track [10, 11] has two taken members and is complete.
        let complete = reference(&[], &[&[10, 11], &[20, 21]], true);
        assert_eq!(score_selections(&table, &complete), TRACK_BONUS);

        // Track [10, 11, 12] has the most taken members but is incomplete.
        let incomplete = reference(&[], &[&[10, 11, 12], &[20]], true);
        assert_eq!(score_selections(&table, &incomplete), -TRACK_BONUS);

        // Assertion disabled: tracks contribute nothing.
        let disabled = reference(&[], &[&[10, 11, 12], &[20]], false);
        assert_eq!(score_selections(&table, &disabled), 0);
    }

    #[test]
    fn calibrate_rejects_an_unscorable_space() {
        use loadout_core::{Node, NodeOrigin};

        let schema = TalentSchema::new(
            vec![NodeId(1)],
            [Node::single(NodeId(1), NodeOrigin::Class, 1)],
        );

        // Malformed reference code: every candidate is dropped.
        let mut bad = reference(&[1], &[], false);
        bad.code = "not base64 !!!".to_owned();
        assert!(matches!(
            calibrate(&bad, &schema),
            Err(Error::NoViableConfiguration)
        ));

        // Decodable but nothing expected: no candidate can score above zero.
        let empty = reference(&[], &[], false);
        assert!(matches!(
            calibrate(&empty, &schema),
            Err(Error::NoViableConfiguration)
        ));
    }
}
