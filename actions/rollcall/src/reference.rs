//! Parsing of the bill / amendment / nomination cross-references attached to a vote.

use crate::error::{Error, Result};
use crate::patterns;
use crate::raw::{RawAmendmentRef, RawBillRef, RawNominationRef, RawVoteRecord};
use crate::types::{AmendmentMeta, BillMeta, Chamber, NominationMeta, Party, SponsorMeta, VoteSubject};
use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::sync::OnceLock;

/// Which kind of reference failed to parse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReferenceKind {
    Bill,
    Amendment,
    Nomination,
}

impl fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ReferenceKind::Bill => "bill",
            ReferenceKind::Amendment => "amendment",
            ReferenceKind::Nomination => "nomination",
        };
        f.write_str(s)
    }
}

const BILL_ID_PATTERN: &str = r"^([a-z]+)(\d+)-(\d+)$";

fn bill_id_regex() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    patterns::cached(&RE, BILL_ID_PATTERN)
}

/// Parse a bill id of the form `<type><number>-<congress>`, eg `hjres46-116`.
///
/// `name` is the display number given alongside the id (eg `H.J.RES.46`); the slug is
/// used when the source omits it.
pub fn parse_bill_id(bill_id: &str, name: Option<&str>) -> Result<BillMeta> {
    let malformed = || Error::MalformedReference {
        kind: ReferenceKind::Bill,
        value: bill_id.to_string(),
    };

    let caps = bill_id_regex()
        .and_then(|re| re.captures(bill_id.trim()))
        .ok_or_else(malformed)?;

    let bill_type = &caps[1];
    let number = &caps[2];
    let congress: u32 = caps[3].parse().map_err(|_| malformed())?;
    let slug = format!("{bill_type}{number}");

    Ok(BillMeta {
        name: name
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| slug.clone()),
        slug,
        congress,
        bill_type: bill_type.to_string(),
        id: bill_id.trim().to_string(),
    })
}

/// Parse the bill reference, if the record carries one with an id.
pub fn parse_bill(raw: &RawBillRef) -> Result<Option<(BillMeta, Option<String>)>> {
    let Some(bill_id) = non_blank(raw.bill_id.as_deref()) else {
        return Ok(None);
    };
    let meta = parse_bill_id(bill_id, raw.number.as_deref())?;
    let title = non_blank(raw.title.as_deref()).map(str::to_string);
    Ok(Some((meta, title)))
}

/// Parse the amendment reference. Its sponsor must be fully described.
pub fn parse_amendment(raw: &RawAmendmentRef, chamber: Chamber) -> Result<Option<AmendmentMeta>> {
    let Some(number) = non_blank(raw.number.as_deref()) else {
        return Ok(None);
    };
    let malformed = || Error::MalformedReference {
        kind: ReferenceKind::Amendment,
        value: number.to_string(),
    };

    let id = non_blank(raw.sponsor_id.as_deref()).ok_or_else(malformed)?;
    let name = non_blank(raw.sponsor.as_deref()).ok_or_else(malformed)?;
    let party = raw
        .sponsor_party
        .as_deref()
        .and_then(Party::from_code)
        .ok_or_else(malformed)?;
    let state = non_blank(raw.sponsor_state.as_deref()).ok_or_else(malformed)?;

    Ok(Some(AmendmentMeta {
        number: number.to_string(),
        sponsor: SponsorMeta {
            id: id.to_string(),
            name: name.to_string(),
            party,
            state: state.to_string(),
            title: chamber.member_title().to_string(),
        },
    }))
}

pub fn parse_nomination(raw: &RawNominationRef) -> Option<NominationMeta> {
    let id = non_blank(raw.nomination_id.as_deref())?;
    Some(NominationMeta {
        id: id.to_string(),
        number: raw.number.clone().unwrap_or_default(),
        name: raw.name.clone().unwrap_or_default(),
        agency: raw.agency.clone().unwrap_or_default(),
    })
}

/// Resolve the record's references into a single subject.
///
/// Amendment votes routinely name the amended bill as well, so that pair folds into
/// [`VoteSubject::Amendment`]. A nomination alongside anything else is a contract
/// violation by the source.
pub fn parse_subject(record: &RawVoteRecord) -> Result<Option<VoteSubject>> {
    let bill = match &record.bill {
        Some(raw) => parse_bill(raw)?,
        None => None,
    };
    let amendment = match &record.amendment {
        Some(raw) => parse_amendment(raw, record.chamber)?,
        None => None,
    };
    let nomination = record.nomination.as_ref().and_then(parse_nomination);

    match (bill, amendment, nomination) {
        (None, None, None) => Ok(None),
        (Some((bill, title)), None, None) => Ok(Some(VoteSubject::Bill { bill, title })),
        (bill, Some(amendment), None) => Ok(Some(VoteSubject::Amendment {
            amendment,
            bill: bill.map(|(meta, _)| meta),
        })),
        (None, None, Some(nomination)) => Ok(Some(VoteSubject::Nomination { nomination })),
        (_, _, Some(_)) => Err(Error::classification(
            "nomination vote also references a bill or amendment",
            record,
        )),
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::raw_vote;

    #[test]
    fn test_parse_bill_id() {
        let meta = parse_bill_id("hjres46-116", Some("H.J.RES.46")).unwrap();
        assert_eq!(meta.bill_type, "hjres");
        assert_eq!(meta.slug, "hjres46");
        assert_eq!(meta.congress, 116);
        assert_eq!(meta.name, "H.J.RES.46");
        assert_eq!(meta.id, "hjres46-116");
    }

    #[test]
    fn test_parse_bill_id_without_name_uses_slug() {
        let meta = parse_bill_id("s756-115", None).unwrap();
        assert_eq!(meta.name, "s756");
        assert_eq!(meta.bill_type, "s");
    }

    #[test]
    fn test_malformed_bill_ids() {
        for bad in ["hjres-116", "46-116", "HR1-116", "hr1", "hr1-116-2", ""] {
            match parse_bill_id(bad, None) {
                Err(Error::MalformedReference { kind, value }) => {
                    assert_eq!(kind, ReferenceKind::Bill);
                    assert_eq!(value, bad);
                }
                other => panic!("expected malformed reference for {bad:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_amendment_requires_sponsor() {
        let raw = RawAmendmentRef {
            number: Some("H.AMDT.95".to_string()),
            sponsor_id: Some("S001145".to_string()),
            sponsor: Some("Jan Schakowsky".to_string()),
            sponsor_party: None,
            sponsor_state: Some("IL".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            parse_amendment(&raw, Chamber::House),
            Err(Error::MalformedReference { kind: ReferenceKind::Amendment, .. })
        ));

        let complete = RawAmendmentRef {
            sponsor_party: Some("D".to_string()),
            ..raw
        };
        let meta = parse_amendment(&complete, Chamber::House).unwrap().unwrap();
        assert_eq!(meta.sponsor.title, "Rep.");
        assert_eq!(meta.sponsor.party, Party::D);
    }

    #[test]
    fn test_subject_amendment_keeps_bill() {
        let mut record = raw_vote("On Agreeing to the Amendment");
        record.bill = Some(RawBillRef {
            bill_id: Some("hr1-116".to_string()),
            number: Some("H.R.1".to_string()),
            ..Default::default()
        });
        record.amendment = Some(RawAmendmentRef {
            number: Some("H.AMDT.95".to_string()),
            sponsor_id: Some("S001145".to_string()),
            sponsor: Some("Jan Schakowsky".to_string()),
            sponsor_party: Some("D".to_string()),
            sponsor_state: Some("IL".to_string()),
            ..Default::default()
        });

        match parse_subject(&record).unwrap() {
            Some(VoteSubject::Amendment { amendment, bill }) => {
                assert_eq!(amendment.number, "H.AMDT.95");
                assert_eq!(bill.map(|b| b.slug), Some("hr1".to_string()));
            }
            other => panic!("unexpected subject {other:?}"),
        }
    }

    #[test]
    fn test_subject_nomination_with_bill_is_rejected() {
        let mut record = raw_vote("On the Nomination");
        record.bill = Some(RawBillRef {
            bill_id: Some("hr1-116".to_string()),
            ..Default::default()
        });
        record.nomination = Some(RawNominationRef {
            nomination_id: Some("PN1-116".to_string()),
            ..Default::default()
        });
        assert!(matches!(
            parse_subject(&record),
            Err(Error::Classification { .. })
        ));
    }

    #[test]
    fn test_empty_references_are_absent() {
        let mut record = raw_vote("On Passage");
        record.bill = Some(RawBillRef::default());
        record.nomination = Some(RawNominationRef::default());
        assert_eq!(parse_subject(&record).unwrap(), None);
    }
}
