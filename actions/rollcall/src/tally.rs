//! Per-group vote counts parsed from the source's string-valued tally maps.

use crate::error::{Error, Result};
use crate::raw::{RawTally, RawVoteRecord};
use crate::types::{Party, VotePosition, VoteType};
use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;

/// The four tally groups every vote record carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TallyGroup {
    Democratic,
    Republican,
    Independent,
    Total,
}

impl TallyGroup {
    pub const ALL: [TallyGroup; 4] = [
        TallyGroup::Democratic,
        TallyGroup::Republican,
        TallyGroup::Independent,
        TallyGroup::Total,
    ];

    /// `None` for the total group
    pub fn party(&self) -> Option<Party> {
        match self {
            TallyGroup::Democratic => Some(Party::D),
            TallyGroup::Republican => Some(Party::R),
            TallyGroup::Independent => Some(Party::I),
            TallyGroup::Total => None,
        }
    }

    pub fn raw<'r>(&self, record: &'r RawVoteRecord) -> &'r RawTally {
        match self {
            TallyGroup::Democratic => &record.democratic,
            TallyGroup::Republican => &record.republican,
            TallyGroup::Independent => &record.independent,
            TallyGroup::Total => &record.total,
        }
    }
}

impl fmt::Display for TallyGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TallyGroup::Democratic => "democratic",
            TallyGroup::Republican => "republican",
            TallyGroup::Independent => "independent",
            TallyGroup::Total => "total",
        };
        f.write_str(s)
    }
}

const MAJORITY_KEY: &str = "majority_position";

/// Source key for each categorical position
fn position_key(position: VotePosition) -> &'static str {
    match position {
        VotePosition::Yes => "yes",
        VotePosition::No => "no",
        VotePosition::Present => "present",
        VotePosition::Abstain => "not_voting",
    }
}

fn parse_count(group: TallyGroup, key: &str, raw: &RawTally) -> Result<u64> {
    let value = raw.get(key);
    value
        .and_then(|v| v.trim().parse::<u64>().ok())
        .ok_or_else(|| Error::TallyParse {
            group,
            key: key.to_string(),
            value: value.cloned(),
        })
}

/// Counts for one group, plus the group's majority position when reported
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupTally {
    pub counts: IndexMap<VotePosition, u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub majority: Option<VotePosition>,
}

impl GroupTally {
    pub fn parse(group: TallyGroup, raw: &RawTally) -> Result<Self> {
        let counts = VotePosition::ALL
            .iter()
            .map(|&position| Ok((position, parse_count(group, position_key(position), raw)?)))
            .collect::<Result<IndexMap<_, _>>>()?;

        let majority = match raw.get(MAJORITY_KEY) {
            None => None,
            Some(label) => Some(VotePosition::from_label(label).ok_or_else(|| Error::TallyParse {
                group,
                key: MAJORITY_KEY.to_string(),
                value: Some(label.clone()),
            })?),
        };

        Ok(GroupTally { counts, majority })
    }

    pub fn get(&self, position: VotePosition) -> u64 {
        self.counts.get(&position).copied().unwrap_or(0)
    }
}

/// A yes/no vote broken down by party, with the threshold it was held to
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YeaNayBreakdown {
    pub groups: IndexMap<TallyGroup, GroupTally>,
    pub vote_type: VoteType,
}

impl YeaNayBreakdown {
    pub fn from_record(record: &RawVoteRecord, vote_type: VoteType) -> Result<Self> {
        let groups = TallyGroup::ALL
            .iter()
            .map(|&group| Ok((group, GroupTally::parse(group, group.raw(record))?)))
            .collect::<Result<IndexMap<_, _>>>()?;
        Ok(YeaNayBreakdown { groups, vote_type })
    }

    /// Count for one group and position; a group absent from the breakdown counts zero
    pub fn get(&self, group: TallyGroup, position: VotePosition) -> u64 {
        self.groups.get(&group).map_or(0, |tally| tally.get(position))
    }

    pub fn majority(&self, group: TallyGroup) -> Option<VotePosition> {
        self.groups.get(&group).and_then(|tally| tally.majority)
    }

    /// Votes cast: yes, no and not voting from the total group. Present is left out.
    pub fn total_votes(&self) -> u64 {
        [VotePosition::Yes, VotePosition::No, VotePosition::Abstain]
            .iter()
            .map(|&position| self.get(TallyGroup::Total, position))
            .sum()
    }

    /// Whether the yes count reached the vote type's threshold of votes cast
    pub fn passed(&self) -> bool {
        let (num, den) = self.vote_type.threshold();
        let yes = self.get(TallyGroup::Total, VotePosition::Yes) as u128;
        yes * den as u128 >= self.total_votes() as u128 * num as u128
    }
}

/// Per-group nominee counts for a speaker election, in source order
pub type NomineeTally = IndexMap<String, u64>;

/// Parse a speaker election's tallies: every key other than the majority position
/// is a nominee name (or "Not Voting") with a count.
pub fn nominee_tallies(record: &RawVoteRecord) -> Result<IndexMap<TallyGroup, NomineeTally>> {
    TallyGroup::ALL
        .iter()
        .map(|&group| {
            let raw = group.raw(record);
            let counts = raw
                .keys()
                .filter(|key| key.as_str() != MAJORITY_KEY)
                .map(|key| Ok((key.clone(), parse_count(group, key, raw)?)))
                .collect::<Result<NomineeTally>>()?;
            Ok((group, counts))
        })
        .collect()
}
