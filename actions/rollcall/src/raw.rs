//! Records as delivered by the congressional data source, already decoded from JSON.
//!
//! Field names follow the source. Nothing here is validated beyond what serde needs to
//! build the struct; interpretation happens in [`crate::vote`] and [`crate::bill`].

use crate::types::{BillAction, Chamber, Party};
use chrono::{NaiveDate, NaiveTime};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A per-group tally as given by the source, keyed by position (or nominee) name.
/// Values are kept as strings and parsed by [`crate::tally`].
pub type RawTally = IndexMap<String, String>;

/// One roll-call event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawVoteRecord {
    pub congress: u32,
    pub chamber: Chamber,
    pub session: u32,
    pub roll_call: u32,
    #[serde(default)]
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vote_uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bill: Option<RawBillRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amendment: Option<RawAmendmentRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nomination: Option<RawNominationRef>,
    pub question: String,
    #[serde(default)]
    pub description: String,
    pub vote_type: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    #[serde(default)]
    pub result: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tie_breaker: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tie_breaker_vote: Option<String>,
    #[serde(default, deserialize_with = "tally_map")]
    pub democratic: RawTally,
    #[serde(default, deserialize_with = "tally_map")]
    pub republican: RawTally,
    #[serde(default, deserialize_with = "tally_map")]
    pub independent: RawTally,
    #[serde(default, deserialize_with = "tally_map")]
    pub total: RawTally,
    /// Present only when full position data was requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub positions: Option<Vec<RawVotePosition>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawBillRef {
    /// eg: "hjres46-116"
    #[serde(default)]
    pub bill_id: Option<String>,
    /// eg: "H.J.RES.46", or a motion keyword such as "JOURNAL"
    #[serde(default)]
    pub number: Option<String>,
    #[serde(default)]
    pub sponsor_id: Option<String>,
    #[serde(default)]
    pub api_uri: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub latest_action: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawAmendmentRef {
    #[serde(default)]
    pub number: Option<String>,
    #[serde(default)]
    pub api_uri: Option<String>,
    #[serde(default)]
    pub sponsor_id: Option<String>,
    #[serde(default)]
    pub sponsor: Option<String>,
    #[serde(default)]
    pub sponsor_uri: Option<String>,
    #[serde(default)]
    pub sponsor_party: Option<String>,
    #[serde(default)]
    pub sponsor_state: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawNominationRef {
    #[serde(default)]
    pub nomination_id: Option<String>,
    #[serde(default)]
    pub number: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub agency: Option<String>,
}

/// A single member's position on a roll call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawVotePosition {
    pub member_id: String,
    pub name: String,
    #[serde(default)]
    pub party: Option<Party>,
    pub state: String,
    #[serde(default)]
    pub vote_position: Option<String>,
    #[serde(default)]
    pub dw_nominate: Option<f64>,
    #[serde(default, deserialize_with = "opt_stringly")]
    pub district: Option<String>,
}

/// Full details of a bill, including its action log and roll-call overviews.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawBillDetails {
    pub bill_id: String,
    #[serde(default)]
    pub bill_slug: Option<String>,
    #[serde(default, deserialize_with = "opt_stringly")]
    pub congress: Option<String>,
    #[serde(default)]
    pub bill: Option<String>,
    pub bill_type: String,
    #[serde(default)]
    pub number: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub short_title: Option<String>,
    #[serde(default)]
    pub sponsor_title: String,
    #[serde(alias = "sponsor_name")]
    pub sponsor: String,
    pub sponsor_id: String,
    pub sponsor_party: Party,
    pub sponsor_state: String,
    #[serde(default)]
    pub gpo_pdf_uri: Option<String>,
    #[serde(default)]
    pub congressdotgov_url: Option<String>,
    #[serde(default)]
    pub govtrack_url: Option<String>,
    pub introduced_date: NaiveDate,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub last_vote: Option<NaiveDate>,
    #[serde(default)]
    pub house_passage: Option<NaiveDate>,
    #[serde(default)]
    pub senate_passage: Option<NaiveDate>,
    #[serde(default)]
    pub enacted: Option<NaiveDate>,
    #[serde(default)]
    pub vetoed: Option<NaiveDate>,
    #[serde(default)]
    pub cosponsors: u32,
    #[serde(default)]
    pub cosponsors_by_party: RawCosponsorsByParty,
    #[serde(default)]
    pub withdrawn_cosponsors: u32,
    #[serde(default)]
    pub primary_subject: String,
    #[serde(default)]
    pub committees: String,
    #[serde(default)]
    pub committee_codes: Option<Vec<String>>,
    #[serde(default, alias = "subcomittee_codes")]
    pub subcommittee_codes: Option<Vec<String>>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub summary_short: Option<String>,
    #[serde(default)]
    pub actions: Option<Vec<BillAction>>,
    #[serde(default)]
    pub votes: Option<Vec<RawVoteOverview>>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawCosponsorsByParty {
    #[serde(rename = "D", default)]
    pub d: u32,
    #[serde(rename = "R", default)]
    pub r: u32,
    #[serde(rename = "I", default)]
    pub i: u32,
}

/// A roll call taken on a bill, as listed on the bill itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawVoteOverview {
    pub chamber: Chamber,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub roll_call: u32,
    pub question: String,
    pub result: String,
    pub total_yes: u64,
    pub total_no: u64,
    pub total_not_voting: u64,
}

/// Deserialize a tally map whose values may be numeric strings or plain JSON numbers.
/// Nulls are dropped so that an absent `majority_position` reads as absent.
fn tally_map<'de, D>(deserializer: D) -> std::result::Result<RawTally, D::Error>
where
    D: Deserializer<'de>,
{
    let values = Option::<IndexMap<String, Value>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(values
        .into_iter()
        .filter_map(|(key, value)| stringly(value).map(|v| (key, v)))
        .collect())
}

fn opt_stringly<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Value>::deserialize(deserializer)?.and_then(stringly))
}

fn stringly(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}
