//! Per-member positions for a classified vote.

use crate::error::{Error, Result};
use crate::member::{self, Nominee, VotingMember, NOT_VOTING};
use crate::raw::{RawVotePosition, RawVoteRecord};
use crate::types::VotePosition;
use crate::vote::{self, VoteRecord};
use indexmap::IndexMap;
use serde::Serialize;
use std::collections::HashMap;

/// Members grouped by the position they took
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegislativePositions {
    pub positions: IndexMap<VotePosition, Vec<VotingMember>>,
}

impl LegislativePositions {
    pub fn get(&self, position: VotePosition) -> &[VotingMember] {
        self.positions.get(&position).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The position a member took, if they are in the set
    pub fn position_of(&self, member_id: &str) -> Option<VotePosition> {
        self.positions
            .iter()
            .find(|(_, members)| members.iter().any(|m| m.id == member_id))
            .map(|(position, _)| *position)
    }

    pub fn len(&self) -> usize {
        self.positions.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NomineeVotes {
    pub nominee: Nominee,
    pub voters: Vec<VotingMember>,
}

/// Members grouped by the nominee they voted for
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpeakerPositions {
    pub winner: VotingMember,
    pub nominees: Vec<NomineeVotes>,
}

impl SpeakerPositions {
    pub fn voters_for(&self, nominee_name: &str) -> Option<&[VotingMember]> {
        self.nominees
            .iter()
            .find(|n| n.nominee.name() == nominee_name)
            .map(|n| n.voters.as_slice())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum VotePositionSet {
    Legislative(LegislativePositions),
    Speaker(SpeakerPositions),
}

/// Classify a record that carries full position data and build its position set.
pub fn normalize_with_positions(record: &RawVoteRecord) -> Result<(VoteRecord, VotePositionSet)> {
    let vote = vote::classify(record)?;
    let positions = build_positions(&vote, record)?;
    Ok((vote, positions))
}

/// Build the position set for `vote` from the record it was classified from.
pub fn build_positions(vote: &VoteRecord, record: &RawVoteRecord) -> Result<VotePositionSet> {
    let positions = record
        .positions
        .as_deref()
        .ok_or_else(|| Error::classification("record has no member positions", record))?;

    match vote {
        VoteRecord::Speaker(_) => speaker_positions(record, positions).map(VotePositionSet::Speaker),
        VoteRecord::Legislative(_) | VoteRecord::Motion(_) => {
            legislative_positions(record, positions).map(VotePositionSet::Legislative)
        }
    }
}

fn voting_member(record: &RawVoteRecord, position: &RawVotePosition) -> Result<VotingMember> {
    VotingMember::from_position(position).ok_or_else(|| {
        Error::classification(format!("member {} has no party", position.member_id), record)
    })
}

fn vote_label<'p>(record: &RawVoteRecord, position: &'p RawVotePosition) -> Result<&'p str> {
    position.vote_position.as_deref().ok_or_else(|| {
        Error::classification(format!("member {} has no vote position", position.member_id), record)
    })
}

/// Partition positions by category. "Not Voting" entries are left out; any other
/// label that isn't a known position fails the record.
pub fn legislative_positions(
    record: &RawVoteRecord,
    positions: &[RawVotePosition],
) -> Result<LegislativePositions> {
    let mut grouped: IndexMap<VotePosition, Vec<VotingMember>> =
        VotePosition::ALL.iter().map(|&p| (p, Vec::new())).collect();

    for position in positions {
        let label = vote_label(record, position)?;
        if label.trim() == NOT_VOTING {
            continue;
        }
        let category = VotePosition::from_label(label).ok_or_else(|| {
            Error::classification(
                format!("member {} has unknown position {label:?}", position.member_id),
                record,
            )
        })?;
        grouped
            .entry(category)
            .or_default()
            .push(voting_member(record, position)?);
    }

    Ok(LegislativePositions { positions: grouped })
}

/// Group voters by nominee. Candidates come from the total tally's keys; a choice
/// that resolves to none of them still gets its own entry so no voter is dropped.
pub fn speaker_positions(
    record: &RawVoteRecord,
    positions: &[RawVotePosition],
) -> Result<SpeakerPositions> {
    let context = format!("winner of roll call {}", record.roll_call);
    let winner = member::find_member(&record.result, positions, &context)?;

    let mut nominees: Vec<NomineeVotes> = Vec::new();
    for key in record.total.keys().filter(|k| k.as_str() != "majority_position") {
        let Some(nominee) = member::find_or_name(key, positions) else {
            continue;
        };
        if !nominees.iter().any(|n| n.nominee.name() == nominee.name()) {
            nominees.push(NomineeVotes {
                nominee,
                voters: Vec::new(),
            });
        }
    }

    // Many members share a choice string; resolve each distinct one once.
    let mut resolved: HashMap<&str, Option<Nominee>> = HashMap::new();
    for position in positions {
        let label = vote_label(record, position)?;
        let choice = resolved
            .entry(label)
            .or_insert_with(|| member::find_or_name(label, positions));
        let Some(choice) = choice else {
            continue;
        };

        let voter = voting_member(record, position)?;
        match nominees.iter_mut().find(|n| n.nominee.name() == choice.name()) {
            Some(entry) => entry.voters.push(voter),
            None => nominees.push(NomineeVotes {
                nominee: choice.clone(),
                voters: vec![voter],
            }),
        }
    }

    Ok(SpeakerPositions { winner, nominees })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{position, raw_vote, tally};

    #[test]
    fn test_partition_is_total_and_skips_not_voting() {
        let mut record = raw_vote("On Passage");
        record.positions = Some(vec![
            position("A000001", "Alma Adams", "NC", "Yes"),
            position("B000002", "Don Bacon", "NE", "No"),
            position("C000003", "Kat Cammack", "FL", "Present"),
            position("D000004", "Danny Davis", "IL", "Not Voting"),
            position("E000005", "Tom Emmer", "MN", "Aye"),
        ]);

        let (vote, set) = normalize_with_positions(&record).unwrap();
        assert!(matches!(vote, VoteRecord::Legislative(_)));
        let VotePositionSet::Legislative(set) = set else {
            panic!("expected legislative positions");
        };
        assert_eq!(set.len(), 4);
        assert_eq!(set.get(VotePosition::Yes).len(), 2);
        assert_eq!(set.position_of("C000003"), Some(VotePosition::Present));
        assert_eq!(set.position_of("D000004"), None);
        assert!(set.get(VotePosition::Abstain).is_empty());
    }

    #[test]
    fn test_unknown_label_fails() {
        let mut record = raw_vote("On Passage");
        record.positions = Some(vec![position("A000001", "Alma Adams", "NC", "Maybe")]);
        assert!(matches!(
            normalize_with_positions(&record),
            Err(Error::Classification { .. })
        ));
    }

    #[test]
    fn test_missing_positions_fail() {
        let record = raw_vote("On Passage");
        assert!(normalize_with_positions(&record).is_err());
    }

    #[test]
    fn test_speaker_positions() {
        let mut record = raw_vote("Election of the Speaker");
        record.vote_type = "QUORUM".to_string();
        record.result = "Ryan (WI)".to_string();
        record.total = tally(&[
            ("Ryan (WI)", "2"),
            ("Pelosi", "1"),
            ("Cooper", "0"),
            ("Not Voting", "1"),
        ]);
        record.positions = Some(vec![
            position("R000570", "Paul Ryan", "WI", "Ryan (WI)"),
            position("R000577", "Tim Ryan", "OH", "Ryan (WI)"),
            position("P000197", "Nancy Pelosi", "CA", "Pelosi"),
            position("X000001", "Pat Absent", "TX", "Not Voting"),
        ]);

        let (_, set) = normalize_with_positions(&record).unwrap();
        let VotePositionSet::Speaker(set) = set else {
            panic!("expected speaker positions");
        };
        assert_eq!(set.winner.id, "R000570");

        let names: Vec<&str> = set.nominees.iter().map(|n| n.nominee.name()).collect();
        assert_eq!(names, vec!["Paul Ryan", "Nancy Pelosi", "Cooper"]);

        let for_ryan: Vec<&str> = set
            .voters_for("Paul Ryan")
            .unwrap()
            .iter()
            .map(|m| m.id.as_str())
            .collect();
        assert_eq!(for_ryan, vec!["R000570", "R000577"]);
        assert_eq!(set.voters_for("Cooper").map(<[_]>::len), Some(0));
        assert!(matches!(set.nominees[2].nominee, Nominee::Named(_)));
    }

    #[test]
    fn test_speaker_winner_must_resolve() {
        let mut record = raw_vote("Election of the Speaker");
        record.vote_type = "QUORUM".to_string();
        record.result = "Boehner".to_string();
        record.total = tally(&[("Boehner", "1")]);
        record.positions = Some(vec![position("P000197", "Nancy Pelosi", "CA", "Boehner")]);
        assert!(matches!(
            normalize_with_positions(&record),
            Err(Error::MemberNotFound { .. })
        ));
    }
}
