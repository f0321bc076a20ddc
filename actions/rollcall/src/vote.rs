//! Classification of raw roll-call records into typed votes.

use crate::error::{Error, Result};
use crate::goal::{self, VoteGoal};
use crate::raw::RawVoteRecord;
use crate::reference;
use crate::tally::{self, NomineeTally, TallyGroup, YeaNayBreakdown};
use crate::types::{BillMeta, TieBreak, VoteMeta, VotePosition, VoteSubject, VoteType};
use chrono::{NaiveDate, NaiveTime};
use indexmap::IndexMap;
use serde::Serialize;

/// The question the House asks when electing its Speaker
pub const SPEAKER_QUESTION: &str = "Election of the Speaker";

/// Procedural motions the source files under a pseudo bill number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MotionKind {
    Adjourn,
    Journal,
    Quorum,
    Motion,
    Treaty,
}

/// Lowercased bill-number prefixes, checked in order
const MOTION_PREFIXES: &[(&str, MotionKind)] = &[
    ("adjourn", MotionKind::Adjourn),
    ("journal", MotionKind::Journal),
    ("quorum", MotionKind::Quorum),
    ("motion", MotionKind::Motion),
    ("treatydoc", MotionKind::Treaty),
    ("treaty.doc", MotionKind::Treaty),
];

impl MotionKind {
    /// Match a bill number such as `JOURNAL` or `Treaty.Doc.116-1`
    pub fn from_number(number: &str) -> Option<Self> {
        let number = number.trim().to_lowercase();
        MOTION_PREFIXES
            .iter()
            .find(|(prefix, _)| number.starts_with(prefix))
            .map(|(_, kind)| *kind)
    }

    pub fn label(&self) -> &'static str {
        match self {
            MotionKind::Adjourn => "Motion to Adjourn",
            MotionKind::Journal => "House Journal",
            MotionKind::Quorum => "Quorum Call",
            MotionKind::Motion => "Procedural Motion",
            MotionKind::Treaty => "Treaty Document",
        }
    }
}

/// A yes/no vote on legislation, an amendment, a nomination, or nothing in particular
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegislativeVote {
    pub meta: VoteMeta,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<VoteSubject>,
    /// eg: "On Passage"
    pub question: String,
    /// Usually names what is being voted on, eg: "For the People Act"
    pub description: String,
    pub vote_type: VoteType,
    pub date: NaiveDate,
    pub time: NaiveTime,
    /// eg: "Passed", "Agreed to"
    pub result: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tie_break: Option<TieBreak>,
    pub votes: YeaNayBreakdown,
}

impl LegislativeVote {
    pub fn from_raw(record: &RawVoteRecord) -> Result<Self> {
        let subject = reference::parse_subject(record)?;
        Self::with_subject(record, subject)
    }

    fn with_subject(record: &RawVoteRecord, subject: Option<VoteSubject>) -> Result<Self> {
        let vote_type = vote_type(record)?;
        Ok(LegislativeVote {
            meta: meta(record),
            subject,
            question: record.question.clone(),
            description: record.description.clone(),
            vote_type,
            date: record.date,
            time: record.time,
            result: record.result.clone(),
            tie_break: tie_break(record)?,
            votes: YeaNayBreakdown::from_record(record, vote_type)?,
        })
    }

    pub fn get(&self, group: TallyGroup, position: VotePosition) -> u64 {
        self.votes.get(group, position)
    }

    pub fn total_votes(&self) -> u64 {
        self.votes.total_votes()
    }

    pub fn passed(&self) -> bool {
        self.votes.passed()
    }

    pub fn bill(&self) -> Option<&BillMeta> {
        self.subject.as_ref().and_then(VoteSubject::bill)
    }

    pub fn goal(&self) -> Option<VoteGoal> {
        goal::categorize(&self.question, &self.description)
    }
}

/// The House's election of its Speaker, tallied by nominee
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpeakerVote {
    pub meta: VoteMeta,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bill: Option<BillMeta>,
    pub question: String,
    pub description: String,
    pub vote_type: VoteType,
    pub date: NaiveDate,
    pub time: NaiveTime,
    /// Display name of the winner, eg: "Ryan (WI)"
    pub winner: String,
    pub votes: IndexMap<TallyGroup, NomineeTally>,
}

impl SpeakerVote {
    pub fn from_raw(record: &RawVoteRecord) -> Result<Self> {
        let bill = match reference::parse_subject(record)? {
            None => None,
            Some(VoteSubject::Bill { bill, .. }) => Some(bill),
            Some(VoteSubject::Amendment { .. }) => {
                return Err(Error::classification(
                    "speaker election references an amendment",
                    record,
                ))
            }
            Some(VoteSubject::Nomination { .. }) => {
                return Err(Error::classification(
                    "speaker election references a nomination",
                    record,
                ))
            }
        };

        Ok(SpeakerVote {
            meta: meta(record),
            bill,
            question: record.question.clone(),
            description: record.description.clone(),
            vote_type: vote_type(record)?,
            date: record.date,
            time: record.time,
            winner: record.result.clone(),
            votes: tally::nominee_tallies(record)?,
        })
    }

    /// Nominee names from the total tally, "Not Voting" included
    pub fn nominees(&self) -> impl Iterator<Item = &str> {
        self.votes
            .get(&TallyGroup::Total)
            .into_iter()
            .flat_map(|tally| tally.keys().map(String::as_str))
    }

    pub fn count(&self, group: TallyGroup, nominee: &str) -> u64 {
        self.votes
            .get(&group)
            .and_then(|tally| tally.get(nominee))
            .copied()
            .unwrap_or(0)
    }
}

/// A procedural vote filed under a motion keyword instead of a bill
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MotionVote {
    pub motion: MotionKind,
    #[serde(flatten)]
    pub vote: LegislativeVote,
}

impl MotionVote {
    pub fn from_raw(record: &RawVoteRecord) -> Result<Self> {
        let bill = record
            .bill
            .as_ref()
            .ok_or_else(|| Error::classification("motion vote has no bill reference", record))?;
        let number = bill
            .number
            .as_deref()
            .ok_or_else(|| Error::classification("motion vote bill reference has no number", record))?;
        let motion = MotionKind::from_number(number).ok_or_else(|| {
            Error::classification(format!("unknown motion type {number:?}"), record)
        })?;

        // The pseudo bill is the motion itself; there is no subject to parse.
        Ok(MotionVote {
            motion,
            vote: LegislativeVote::with_subject(record, None)?,
        })
    }
}

/// One classified roll call
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum VoteRecord {
    Legislative(LegislativeVote),
    Speaker(SpeakerVote),
    Motion(MotionVote),
}

impl VoteRecord {
    pub fn meta(&self) -> &VoteMeta {
        match self {
            VoteRecord::Legislative(vote) => &vote.meta,
            VoteRecord::Speaker(vote) => &vote.meta,
            VoteRecord::Motion(motion) => &motion.vote.meta,
        }
    }

    pub fn question(&self) -> &str {
        match self {
            VoteRecord::Legislative(vote) => &vote.question,
            VoteRecord::Speaker(vote) => &vote.question,
            VoteRecord::Motion(motion) => &motion.vote.question,
        }
    }

    pub fn description(&self) -> &str {
        match self {
            VoteRecord::Legislative(vote) => &vote.description,
            VoteRecord::Speaker(vote) => &vote.description,
            VoteRecord::Motion(motion) => &motion.vote.description,
        }
    }

    pub fn date(&self) -> NaiveDate {
        match self {
            VoteRecord::Legislative(vote) => vote.date,
            VoteRecord::Speaker(vote) => vote.date,
            VoteRecord::Motion(motion) => motion.vote.date,
        }
    }

    pub fn goal(&self) -> Option<VoteGoal> {
        goal::categorize(self.question(), self.description())
    }

    /// The yes/no breakdown, for the variants that have one
    pub fn yea_nay(&self) -> Option<&LegislativeVote> {
        match self {
            VoteRecord::Legislative(vote) => Some(vote),
            VoteRecord::Motion(motion) => Some(&motion.vote),
            VoteRecord::Speaker(_) => None,
        }
    }
}

/// Whether the record's bill number names a procedural motion
pub fn is_motion(record: &RawVoteRecord) -> bool {
    record
        .bill
        .as_ref()
        .and_then(|bill| bill.number.as_deref())
        .and_then(MotionKind::from_number)
        .is_some()
}

/// Assign a raw record to exactly one vote variant.
///
/// A speaker election is recognised by its question alone; motions by their bill
/// number; everything else is a legislative vote.
pub fn classify(record: &RawVoteRecord) -> Result<VoteRecord> {
    if record.question == SPEAKER_QUESTION {
        SpeakerVote::from_raw(record).map(VoteRecord::Speaker)
    } else if is_motion(record) {
        MotionVote::from_raw(record).map(VoteRecord::Motion)
    } else {
        LegislativeVote::from_raw(record).map(VoteRecord::Legislative)
    }
}

fn meta(record: &RawVoteRecord) -> VoteMeta {
    VoteMeta {
        congress: record.congress,
        chamber: record.chamber,
        session: record.session,
        roll_call: record.roll_call,
        source: record.source.clone(),
    }
}

fn vote_type(record: &RawVoteRecord) -> Result<VoteType> {
    VoteType::from_code(&record.vote_type).ok_or_else(|| {
        Error::classification(format!("unknown vote type {:?}", record.vote_type), record)
    })
}

fn tie_break(record: &RawVoteRecord) -> Result<Option<TieBreak>> {
    let Some(breaker) = record
        .tie_breaker
        .as_deref()
        .map(str::trim)
        .filter(|b| !b.is_empty())
    else {
        return Ok(None);
    };

    let vote = record
        .tie_breaker_vote
        .as_deref()
        .and_then(VotePosition::from_label)
        .ok_or_else(|| Error::classification("tie breaker has no readable vote", record))?;

    Ok(Some(TieBreak {
        breaker: breaker.to_string(),
        vote,
    }))
}
