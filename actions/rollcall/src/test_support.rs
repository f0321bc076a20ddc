//! Builders for raw records used across the unit tests.

use crate::bill::BillVoteOverview;
use crate::raw::{RawBillDetails, RawCosponsorsByParty, RawTally, RawVoteOverview, RawVotePosition, RawVoteRecord};
use crate::types::{BillAction, Chamber, Party};
use chrono::{NaiveDate, NaiveTime};

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

pub fn tally(entries: &[(&str, &str)]) -> RawTally {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn zero_tally() -> RawTally {
    tally(&[("yes", "0"), ("no", "0"), ("present", "0"), ("not_voting", "0")])
}

/// House roll call 1 of the 116th Congress, all tallies zero
pub fn raw_vote(question: &str) -> RawVoteRecord {
    RawVoteRecord {
        congress: 116,
        chamber: Chamber::House,
        session: 1,
        roll_call: 1,
        source: "https://clerk.house.gov/evs/2019/roll001.xml".to_string(),
        url: None,
        vote_uri: None,
        bill: None,
        amendment: None,
        nomination: None,
        question: question.to_string(),
        description: String::new(),
        vote_type: "YEA-AND-NAY".to_string(),
        date: date("2019-03-08"),
        time: NaiveTime::from_hms_opt(11, 21, 0).unwrap(),
        result: "Passed".to_string(),
        tie_breaker: None,
        tie_breaker_vote: None,
        democratic: zero_tally(),
        republican: zero_tally(),
        independent: zero_tally(),
        total: zero_tally(),
        positions: None,
    }
}

pub fn position(member_id: &str, name: &str, state: &str, vote_position: &str) -> RawVotePosition {
    RawVotePosition {
        member_id: member_id.to_string(),
        name: name.to_string(),
        party: Some(Party::R),
        state: state.to_string(),
        vote_position: Some(vote_position.to_string()),
        dw_nominate: None,
        district: None,
    }
}

pub fn action(id: u32, chamber: Chamber, on: &str, action_type: &str, description: &str) -> BillAction {
    BillAction {
        id,
        chamber,
        action_type: action_type.to_string(),
        date: date(on),
        description: description.to_string(),
    }
}

pub fn raw_overview(chamber: Chamber, on: &str, roll_call: u32, result: &str, yes: u64, no: u64) -> RawVoteOverview {
    RawVoteOverview {
        chamber,
        date: date(on),
        time: NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
        roll_call,
        question: "On Passage".to_string(),
        result: result.to_string(),
        total_yes: yes,
        total_no: no,
        total_not_voting: 0,
    }
}

pub fn overview(chamber: Chamber, on: &str, roll_call: u32, result: &str, yes: u64, no: u64) -> BillVoteOverview {
    BillVoteOverview::from_raw(&raw_overview(chamber, on, roll_call, result, yes, no))
}

/// A bill introduced on 2019-01-02 with no actions or votes
pub fn raw_bill(bill_id: &str, bill_type: &str) -> RawBillDetails {
    let slug = bill_id.split('-').next().unwrap_or(bill_id).to_string();
    RawBillDetails {
        bill_id: bill_id.to_string(),
        bill_slug: Some(slug),
        congress: Some("116".to_string()),
        bill: None,
        bill_type: bill_type.to_string(),
        number: "H.R.1".to_string(),
        title: "A bill".to_string(),
        short_title: Some("A bill".to_string()),
        sponsor_title: "Rep.".to_string(),
        sponsor: "John Sarbanes".to_string(),
        sponsor_id: "S001168".to_string(),
        sponsor_party: Party::D,
        sponsor_state: "CA".to_string(),
        gpo_pdf_uri: None,
        congressdotgov_url: None,
        govtrack_url: None,
        introduced_date: date("2019-01-02"),
        active: true,
        last_vote: None,
        house_passage: None,
        senate_passage: None,
        enacted: None,
        vetoed: None,
        cosponsors: 0,
        cosponsors_by_party: RawCosponsorsByParty::default(),
        withdrawn_cosponsors: 0,
        primary_subject: String::new(),
        committees: String::new(),
        committee_codes: None,
        subcommittee_codes: None,
        summary: None,
        summary_short: None,
        actions: None,
        votes: None,
    }
}
