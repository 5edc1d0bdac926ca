use crate::core::normalize::{clean_name, clean_time_value, normalize_gender, to_nullable_int};
use crate::models::{CheckpointDefinition, CheckpointSplit, ParticipantRecord, RawResultRow};
use std::cmp::Ordering;

/// Fixed upstream field keys for the participant columns
const KEY_OVERALL_RANK: &str = "Overall Rank";
const KEY_GENDER_RANK: &str = "Gender Rank";
const KEY_BIB: &str = "BIB";
const KEY_NAME: &str = "Name";
const KEY_GENDER: &str = "GENDER";
const KEY_NATION: &str = "Nation";
const KEY_CLUB: &str = "Club";
const KEY_FINISH_TIME: &str = "Finish Time";
const KEY_NET_TIME: &str = "NetTime";
const KEY_GAP: &str = "Gap";
const KEY_STATUS: &str = "Status";

/// Maps raw provider rows into ranked, normalized participant records
///
/// The builder never fails: malformed numerics degrade to 0/None and
/// corrupted strings go through the normalization rules, so a dirty
/// feed still yields a presentable leaderboard.
#[derive(Debug, Clone, Default)]
pub struct LeaderboardBuilder;

impl LeaderboardBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Build a ranked leaderboard from raw rows and the category's
    /// checkpoint definitions
    ///
    /// Sort order: effective rank first (unranked entries sort last),
    /// then natural/alphanumeric bib comparison. Given bib uniqueness
    /// this is a total order.
    pub fn build(
        &self,
        rows: &[RawResultRow],
        checkpoints: &[CheckpointDefinition],
    ) -> Vec<ParticipantRecord> {
        let mut definitions: Vec<&CheckpointDefinition> = checkpoints.iter().collect();
        definitions.sort_by_key(|d| d.order_index);

        let mut records: Vec<ParticipantRecord> = rows
            .iter()
            .map(|row| self.map_row(row, &definitions))
            .collect();

        records.sort_by(|a, b| {
            a.effective_rank()
                .cmp(&b.effective_rank())
                .then_with(|| natural_cmp(&a.bib, &b.bib))
        });

        records
    }

    fn map_row(
        &self,
        row: &RawResultRow,
        definitions: &[&CheckpointDefinition],
    ) -> ParticipantRecord {
        let checkpoints = definitions
            .iter()
            .map(|def| self.map_split(row, def))
            .collect();

        ParticipantRecord {
            overall_rank: to_nullable_int(row.get_opt_str(KEY_OVERALL_RANK).as_deref())
                .unwrap_or(0),
            gender_rank: to_nullable_int(row.get_opt_str(KEY_GENDER_RANK).as_deref()).unwrap_or(0),
            bib: row.get_str(KEY_BIB),
            name: clean_name(&row.get_str(KEY_NAME)),
            gender: normalize_gender(&row.get_str(KEY_GENDER)),
            nation: row.get_str(KEY_NATION),
            club: row.get_str(KEY_CLUB),
            finish_time: clean_time_value(row.get_opt_str(KEY_FINISH_TIME).as_deref()),
            net_time: clean_time_value(row.get_opt_str(KEY_NET_TIME).as_deref()),
            gap: clean_time_value(row.get_opt_str(KEY_GAP).as_deref()),
            status: row.get_str(KEY_STATUS),
            checkpoints,
        }
    }

    fn map_split(&self, row: &RawResultRow, def: &CheckpointDefinition) -> CheckpointSplit {
        // A definition with no declared key for a field yields a null
        // split field, as does an absent value under a declared key.
        let opt_field = |key: &Option<String>| key.as_ref().and_then(|k| row.get_opt_str(k));

        CheckpointSplit {
            name: def.name.clone(),
            time: clean_time_value(row.get_opt_str(&def.time_field_key).as_deref()),
            segment: clean_time_value(opt_field(&def.segment_field_key).as_deref()),
            overall_rank: to_nullable_int(opt_field(&def.overall_rank_field_key).as_deref()),
            gender_rank: to_nullable_int(opt_field(&def.gender_rank_field_key).as_deref()),
        }
    }
}

/// Numeric-aware string comparison: "9" sorts before "10", "A2" before
/// "A10"
///
/// Digit runs are compared by value (leading zeros break ties), other
/// characters byte-wise.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut ai = a.chars().peekable();
    let mut bi = b.chars().peekable();

    loop {
        match (ai.peek().copied(), bi.peek().copied()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(ac), Some(bc)) => {
                if ac.is_ascii_digit() && bc.is_ascii_digit() {
                    let an = take_digits(&mut ai);
                    let bn = take_digits(&mut bi);
                    let ord = cmp_digit_run(&an, &bn);
                    if ord != Ordering::Equal {
                        return ord;
                    }
                } else {
                    let ord = ac.cmp(&bc);
                    if ord != Ordering::Equal {
                        return ord;
                    }
                    ai.next();
                    bi.next();
                }
            }
        }
    }
}

fn take_digits(iter: &mut std::iter::Peekable<std::str::Chars>) -> String {
    let mut run = String::new();
    while let Some(c) = iter.peek() {
        if c.is_ascii_digit() {
            run.push(*c);
            iter.next();
        } else {
            break;
        }
    }
    run
}

fn cmp_digit_run(a: &str, b: &str) -> Ordering {
    let a_stripped = a.trim_start_matches('0');
    let b_stripped = b.trim_start_matches('0');

    a_stripped
        .len()
        .cmp(&b_stripped.len())
        .then_with(|| a_stripped.cmp(b_stripped))
        // Same value: fewer leading zeros first, keeps the order total
        .then_with(|| a.len().cmp(&b.len()))
}
