//! Pass/fail decisions read out of a bill's free-text action log.

use crate::bill::BillVoteOverview;
use crate::patterns;
use crate::types::{BillAction, Chamber, VoteResult};
use chrono::NaiveDate;
use regex::Regex;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::OnceLock;

/// How a decision was reached, and the roll call behind it when there was one
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BillVote {
    pub voice: bool,
    pub result: VoteResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overview: Option<BillVoteOverview>,
}

/// A chamber's decision on a bill, derived from one action
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BillDecision {
    pub chamber: Chamber,
    pub date: NaiveDate,
    pub description: String,
    pub action_type: String,
    pub vote: BillVote,
}

/// Action description shapes that carry a decision, in the order they are tried
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecisionShape {
    /// A recorded vote; the regex captures the roll-call number
    RollCall(&'static str),
    /// Voice vote recognised by a literal phrase
    VoicePhrase(&'static str),
    /// Voice vote recognised by a regex
    VoicePattern(&'static str),
}

pub const DECISION_SHAPES: &[DecisionShape] = &[
    DecisionShape::RollCall(r"Roll no\. (\d+)"),
    DecisionShape::RollCall(r"Record Vote Number: (\d+)\."),
    DecisionShape::VoicePhrase(
        "On motion to suspend the rules and pass the bill, as amended Agreed to by voice vote.",
    ),
    DecisionShape::VoicePattern(r"Passed Senate .* by .*\."),
    DecisionShape::VoicePattern(r"(Senate|House) agreed to the (Senate|House) amendment to .* by .*\."),
    DecisionShape::VoicePattern(r"Senate concurred .* by .*\."),
];

fn compiled_shapes() -> &'static HashMap<&'static str, Regex> {
    static SHAPES: OnceLock<HashMap<&'static str, Regex>> = OnceLock::new();
    SHAPES.get_or_init(|| {
        patterns::compile_table(DECISION_SHAPES.iter().filter_map(|shape| match *shape {
            DecisionShape::RollCall(p) | DecisionShape::VoicePattern(p) => Some(p),
            DecisionShape::VoicePhrase(_) => None,
        }))
    })
}

impl DecisionShape {
    /// The vote this shape reads from `description`, if it applies. Roll-call
    /// numbers are per chamber, so only overviews from `chamber` are linked.
    fn read(&self, description: &str, chamber: Chamber, overviews: &[BillVoteOverview]) -> Option<BillVote> {
        match *self {
            DecisionShape::RollCall(pattern) => {
                let roll_call: u32 = compiled_shapes()
                    .get(pattern)?
                    .captures(description)?
                    .get(1)?
                    .as_str()
                    .parse()
                    .ok()?;
                let overview = overviews
                    .iter()
                    .find(|o| o.chamber == chamber && o.roll_call == roll_call)
                    .cloned();
                let result = match &overview {
                    Some(overview) => overview_result(&overview.result),
                    None if description.contains("Failed") => VoteResult::Fail,
                    None => VoteResult::Pass,
                };
                Some(BillVote {
                    voice: false,
                    result,
                    overview,
                })
            }
            DecisionShape::VoicePhrase(phrase) => description.contains(phrase).then(voice_pass),
            DecisionShape::VoicePattern(pattern) => compiled_shapes()
                .get(pattern)
                .is_some_and(|re| re.is_match(description))
                .then(voice_pass),
        }
    }
}

fn voice_pass() -> BillVote {
    BillVote {
        voice: true,
        result: VoteResult::Pass,
        overview: None,
    }
}

fn overview_result(result: &str) -> VoteResult {
    if result == "Failed" || result.contains("Rejected") {
        VoteResult::Fail
    } else {
        VoteResult::Pass
    }
}

/// Read a decision out of one action. Actions without a recognisable decision
/// yield `None`.
pub fn to_decision(action: &BillAction, overviews: &[BillVoteOverview]) -> Option<BillDecision> {
    let vote = DECISION_SHAPES
        .iter()
        .find_map(|shape| shape.read(&action.description, action.chamber, overviews))?;

    Some(BillDecision {
        chamber: action.chamber,
        date: action.date,
        description: action.description.clone(),
        action_type: action.action_type.clone(),
        vote,
    })
}

/// The most recent decision taken in `chamber`. Decisions on the same day keep
/// their list order, so the first one listed wins.
pub fn latest_in(decisions: &[BillDecision], chamber: Chamber) -> Option<&BillDecision> {
    decisions
        .iter()
        .filter(|d| d.chamber == chamber)
        .fold(None, |latest: Option<&BillDecision>, d| match latest {
            Some(l) if l.date >= d.date => Some(l),
            _ => Some(d),
        })
}
