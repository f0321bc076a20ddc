//! A snapshot of one bill: identity, sponsor, dates, actions and the roll calls taken on it.

use crate::decision::{self, BillDecision};
use crate::error::{Error, Result};
use crate::goal::{self, VoteGoal};
use crate::raw::{RawBillDetails, RawVoteOverview};
use crate::reference::ReferenceKind;
use crate::timeline::{self, TimelineMilestone};
use crate::types::{BillAction, BillMeta, Chamber, Party, SponsorMeta, VotePosition};
use chrono::{NaiveDate, NaiveTime};
use indexmap::IndexMap;
use serde::Serialize;

/// A roll call taken on a bill, as listed on the bill
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BillVoteOverview {
    pub chamber: Chamber,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub roll_call: u32,
    /// eg: "On Passage", "On Agreeing to the Amendment"
    pub question: String,
    /// eg: "Agreed to", "Passed", "Failed"
    pub result: String,
    pub votes: IndexMap<VotePosition, u64>,
}

impl BillVoteOverview {
    pub fn from_raw(raw: &RawVoteOverview) -> Self {
        BillVoteOverview {
            chamber: raw.chamber,
            date: raw.date,
            time: raw.time,
            roll_call: raw.roll_call,
            question: raw.question.clone(),
            result: raw.result.clone(),
            votes: IndexMap::from([
                (VotePosition::Yes, raw.total_yes),
                (VotePosition::No, raw.total_no),
                (VotePosition::Abstain, raw.total_not_voting),
            ]),
        }
    }

    pub fn count(&self, position: VotePosition) -> u64 {
        self.votes.get(&position).copied().unwrap_or(0)
    }

    /// Goal of the roll call, from its question alone
    pub fn goal(&self) -> Option<VoteGoal> {
        goal::categorize(&self.question, "")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BillLinks {
    pub gpo: Option<String>,
    pub congress: Option<String>,
    pub govtrack: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BillDates {
    pub introduced: NaiveDate,
    pub last_vote: Option<NaiveDate>,
    pub house_passage: Option<NaiveDate>,
    pub senate_passage: Option<NaiveDate>,
    pub enacted: Option<NaiveDate>,
    pub vetoed: Option<NaiveDate>,
}

/// In-depth details about a bill
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BillDetails {
    pub meta: BillMeta,
    /// Usually a paragraph rather than a title
    pub title: String,
    /// Nickname of the bill; the full title when none is given
    pub short_title: String,
    pub sponsor: SponsorMeta,
    pub links: BillLinks,
    pub dates: BillDates,
    /// Whether the bill is still before Congress
    pub active: bool,
    pub cosponsors: IndexMap<Party, u32>,
    pub withdrawn_cosponsors: u32,
    pub subject: String,
    /// Name of the primary committee
    pub committee: String,
    pub committees: Vec<String>,
    pub subcommittees: Vec<String>,
    pub summary: Option<String>,
    pub short_summary: Option<String>,
    pub actions: Vec<BillAction>,
    /// Roll calls only; voice votes are not listed
    pub votes: Vec<BillVoteOverview>,
}

impl BillDetails {
    pub fn from_raw(raw: &RawBillDetails) -> Result<Self> {
        let malformed = || Error::MalformedReference {
            kind: ReferenceKind::Bill,
            value: raw.bill_id.clone(),
        };

        let mut id_parts = raw.bill_id.splitn(2, '-');
        let slug = raw
            .bill_slug
            .clone()
            .or_else(|| id_parts.next().map(str::to_string))
            .filter(|s| !s.is_empty())
            .ok_or_else(malformed)?;
        let congress = raw
            .congress
            .as_deref()
            .or_else(|| raw.bill_id.rsplit('-').next())
            .and_then(|c| c.trim().parse::<u32>().ok())
            .ok_or_else(malformed)?;

        let state = raw.sponsor_state.trim();
        if state.is_empty() {
            return Err(malformed());
        }

        Ok(BillDetails {
            meta: BillMeta {
                slug,
                congress,
                name: raw.bill.clone().unwrap_or_else(|| raw.number.clone()),
                bill_type: raw.bill_type.clone(),
                id: raw.bill_id.clone(),
            },
            title: raw.title.clone(),
            short_title: raw.short_title.clone().unwrap_or_else(|| raw.title.clone()),
            sponsor: SponsorMeta {
                id: raw.sponsor_id.clone(),
                name: raw.sponsor.clone(),
                party: raw.sponsor_party,
                state: state.to_string(),
                title: raw.sponsor_title.clone(),
            },
            links: BillLinks {
                gpo: raw.gpo_pdf_uri.clone(),
                congress: raw.congressdotgov_url.clone(),
                govtrack: raw.govtrack_url.clone(),
            },
            dates: BillDates {
                introduced: raw.introduced_date,
                last_vote: raw.last_vote,
                house_passage: raw.house_passage,
                senate_passage: raw.senate_passage,
                enacted: raw.enacted,
                vetoed: raw.vetoed,
            },
            active: raw.active,
            cosponsors: IndexMap::from([
                (Party::D, raw.cosponsors_by_party.d),
                (Party::R, raw.cosponsors_by_party.r),
                (Party::I, raw.cosponsors_by_party.i),
            ]),
            withdrawn_cosponsors: raw.withdrawn_cosponsors,
            subject: raw.primary_subject.clone(),
            committee: raw.committees.clone(),
            committees: raw.committee_codes.clone().unwrap_or_default(),
            subcommittees: raw.subcommittee_codes.clone().unwrap_or_default(),
            summary: raw.summary.clone(),
            short_summary: raw.summary_short.clone(),
            actions: raw.actions.clone().unwrap_or_default(),
            votes: raw
                .votes
                .as_deref()
                .unwrap_or_default()
                .iter()
                .map(BillVoteOverview::from_raw)
                .collect(),
        })
    }

    pub fn total_cosponsors(&self) -> u32 {
        self.cosponsors.values().sum()
    }

    /// Look up an action by its position in the log
    pub fn action(&self, id: u32) -> Option<&BillAction> {
        self.actions.iter().find(|a| a.id == id)
    }

    /// Every decision found in the action log, in log order
    pub fn history(&self) -> Vec<BillDecision> {
        self.actions
            .iter()
            .filter_map(|action| decision::to_decision(action, &self.votes))
            .collect()
    }

    pub fn timeline(&self) -> Vec<TimelineMilestone> {
        timeline::create_timeline(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::raw_bill;

    #[test]
    fn test_from_raw_fills_defaults() {
        let mut raw = raw_bill("hr1-116", "hr");
        raw.bill_slug = None;
        raw.congress = None;
        raw.short_title = None;
        raw.title = "For the People Act of 2019".to_string();

        let bill = BillDetails::from_raw(&raw).unwrap();
        assert_eq!(bill.meta.slug, "hr1");
        assert_eq!(bill.meta.congress, 116);
        assert_eq!(bill.meta.name, "H.R.1");
        assert_eq!(bill.short_title, "For the People Act of 2019");
        assert_eq!(bill.total_cosponsors(), 0);
    }

    #[test]
    fn test_bad_congress_is_malformed() {
        let mut raw = raw_bill("hr1-abc", "hr");
        raw.congress = None;
        assert!(matches!(
            BillDetails::from_raw(&raw),
            Err(Error::MalformedReference { kind: ReferenceKind::Bill, .. })
        ));
    }

    #[test]
    fn test_overview_goal_uses_question() {
        let overview = BillVoteOverview::from_raw(&RawVoteOverview {
            chamber: Chamber::House,
            date: NaiveDate::from_ymd_opt(2019, 3, 8).unwrap(),
            time: NaiveTime::from_hms_opt(11, 21, 0).unwrap(),
            roll_call: 118,
            question: "On Passage".to_string(),
            result: "Passed".to_string(),
            total_yes: 234,
            total_no: 193,
            total_not_voting: 5,
        });
        assert_eq!(overview.goal(), Some(VoteGoal::Pass));
        assert_eq!(overview.count(VotePosition::Yes), 234);
        assert_eq!(overview.count(VotePosition::Present), 0);
    }
}
