//! The major milestones of a bill's path through Congress.
//!
//! Committee referrals, debate and the like are left out; the timeline covers
//! introduction, each chamber's decision, reconciliation and the President.

use crate::bill::{BillDetails, BillVoteOverview};
use crate::decision::{self, BillDecision};
use crate::types::{Chamber, VotePosition, VoteResult};
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "stage", content = "chamber", rename_all = "snake_case")]
pub enum MilestoneStage {
    Introduced,
    Passed(Chamber),
    Failed(Chamber),
    /// The chamber has not decided yet
    Pending(Chamber),
    ResolvingDifferences,
    SentToPresident,
    Vetoed,
    SignedIntoLaw,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimelineMilestone {
    pub stage: MilestoneStage,
    /// Display label, eg: "Passed in the House (234 yea - 193 nay)"
    pub status: String,
    pub date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overview: Option<BillVoteOverview>,
    pub result: Option<VoteResult>,
}

impl TimelineMilestone {
    fn new(stage: MilestoneStage, status: impl Into<String>, date: Option<NaiveDate>) -> Self {
        TimelineMilestone {
            stage,
            status: status.into(),
            date,
            overview: None,
            result: None,
        }
    }

    fn chamber(decision: Option<&BillDecision>, chamber: Chamber) -> Self {
        let Some(decision) = decision else {
            return Self::new(
                MilestoneStage::Pending(chamber),
                format!("Voted on in the {chamber}"),
                None,
            );
        };

        let (stage, verb) = match decision.vote.result {
            VoteResult::Pass => (MilestoneStage::Passed(chamber), "Passed"),
            VoteResult::Fail => (MilestoneStage::Failed(chamber), "Failed"),
        };
        let tally = match &decision.vote.overview {
            Some(o) => format!(
                "({} yea - {} nay)",
                o.count(VotePosition::Yes),
                o.count(VotePosition::No)
            ),
            None => "(voice vote)".to_string(),
        };

        TimelineMilestone {
            stage,
            status: format!("{verb} in the {chamber} {tally}"),
            date: Some(decision.date),
            overview: decision.vote.overview.clone(),
            result: Some(decision.vote.result),
        }
    }

    fn is_chamber(&self) -> bool {
        matches!(
            self.stage,
            MilestoneStage::Passed(_) | MilestoneStage::Failed(_) | MilestoneStage::Pending(_)
        )
    }
}

/// Simple resolutions only need their own chamber
fn simple_resolution_chamber(bill_type: &str) -> Option<Chamber> {
    match bill_type {
        "hres" => Some(Chamber::House),
        "sres" => Some(Chamber::Senate),
        _ => None,
    }
}

/// Concurrent resolutions never go to the President
fn is_concurrent_resolution(bill_type: &str) -> bool {
    matches!(bill_type, "hconres" | "sconres" | "jconres")
}

/// Build the timeline from the bill's own action log.
pub fn create_timeline(bill: &BillDetails) -> Vec<TimelineMilestone> {
    build_timeline(bill, &bill.history())
}

/// Build the timeline for `bill` from an already extracted decision list.
pub fn build_timeline(bill: &BillDetails, decisions: &[BillDecision]) -> Vec<TimelineMilestone> {
    let mut list = vec![TimelineMilestone {
        result: Some(VoteResult::Pass),
        ..TimelineMilestone::new(
            MilestoneStage::Introduced,
            "Introduced",
            Some(bill.dates.introduced),
        )
    }];

    let house = decision::latest_in(decisions, Chamber::House);
    let senate = decision::latest_in(decisions, Chamber::Senate);
    let bill_type = bill.meta.bill_type.as_str();

    if let Some(chamber) = simple_resolution_chamber(bill_type) {
        let decision = match chamber {
            Chamber::House => house,
            Chamber::Senate => senate,
        };
        list.push(TimelineMilestone::chamber(decision, chamber));
        return list;
    }

    let passed = |d: &BillDecision| d.vote.result == VoteResult::Pass;
    let house_failed = house.map_or(true, |h| !passed(h));
    let house_after = matches!((house, senate), (Some(h), Some(s)) if h.date > s.date);

    match senate {
        Some(s) if house_failed || house_after => {
            list.push(TimelineMilestone::chamber(Some(s), Chamber::Senate));
            if passed(s) {
                list.push(TimelineMilestone::chamber(house, Chamber::House));
            }
        }
        _ => {
            list.push(TimelineMilestone::chamber(house, Chamber::House));
            if house.map_or(true, passed) {
                list.push(TimelineMilestone::chamber(senate, Chamber::Senate));
            }
        }
    }

    let both_chambers = list.iter().filter(|m| m.is_chamber()).count() == 2;
    if both_chambers {
        if let Some(action) = bill
            .actions
            .iter()
            .find(|a| a.action_type == "ResolvingDifferences")
        {
            list.push(TimelineMilestone::new(
                MilestoneStage::ResolvingDifferences,
                "Resolving Differences",
                Some(action.date),
            ));
        }
    }

    if is_concurrent_resolution(bill_type) {
        return list;
    }

    let ended_in_failure = list
        .last()
        .is_some_and(|m| m.result == Some(VoteResult::Fail));
    if ended_in_failure {
        return list;
    }

    let action_date = |needle: &str| {
        bill.actions
            .iter()
            .find(|a| a.description.contains(needle))
            .map(|a| a.date)
    };

    list.push(TimelineMilestone::new(
        MilestoneStage::SentToPresident,
        "Sent to President",
        action_date("Presented to President"),
    ));

    if bill.dates.vetoed.is_some() {
        list.push(TimelineMilestone {
            result: Some(VoteResult::Fail),
            ..TimelineMilestone::new(
                MilestoneStage::Vetoed,
                "Vetoed",
                action_date("Vetoed by President."),
            )
        });
    } else {
        list.push(TimelineMilestone::new(
            MilestoneStage::SignedIntoLaw,
            "Signed Into Law",
            action_date("Became Public Law"),
        ));
    }

    list
}
