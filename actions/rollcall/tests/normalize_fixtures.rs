use rollcall::pipeline::{normalize_bills, normalize_vote_positions, normalize_votes};
use rollcall::prelude::*;
use rollcall::tally::TallyGroup;
use rollcall::types::{Chamber, VotePosition, VoteSubject};
use rollcall::{explain, RawBillDetails};

const SPEAKER: &str = include_str!("fixtures/votes/116/1/roll002.json");
const PASSAGE_AND_JOURNAL: &str = include_str!("fixtures/votes/116/1/roll118.json");
const HR1: &str = include_str!("fixtures/bills/116/hr1.json");

fn records() -> Vec<RawVoteRecord> {
    let mut records: Vec<RawVoteRecord> = serde_json::from_str(PASSAGE_AND_JOURNAL).unwrap();
    records.insert(0, serde_json::from_str(SPEAKER).unwrap());
    records
}

#[test]
fn test_classify_fixture_records() {
    let batch = normalize_votes(records(), 5).unwrap();
    assert!(batch.failures.is_empty());
    assert_eq!(batch.records.len(), 3);

    let VoteRecord::Speaker(speaker) = &batch.records[0] else {
        panic!("expected a speaker election");
    };
    assert_eq!(speaker.winner, "Pelosi");
    assert_eq!(speaker.count(TallyGroup::Total, "Pelosi"), 2);
    let nominees: Vec<&str> = speaker.nominees().collect();
    assert_eq!(nominees, vec!["Pelosi", "McCarthy", "Bass", "Not Voting"]);

    let VoteRecord::Legislative(passage) = &batch.records[1] else {
        panic!("expected a legislative vote");
    };
    assert!(matches!(passage.subject, Some(VoteSubject::Bill { .. })));
    assert_eq!(passage.bill().map(|b| b.id.as_str()), Some("hr1-116"));
    assert_eq!(passage.get(TallyGroup::Democratic, VotePosition::Yes), 2);
    assert_eq!(passage.votes.majority(TallyGroup::Republican), Some(VotePosition::No));
    assert!(passage.passed());

    let VoteRecord::Motion(journal) = &batch.records[2] else {
        panic!("expected a motion");
    };
    assert_eq!(journal.motion.label(), "House Journal");
    assert!(journal.vote.subject.is_none());
    assert_eq!(journal.vote.total_votes(), 431);
}

#[test]
fn test_explain_passage() {
    let batch = normalize_votes(records(), 5).unwrap();
    let Some(passage) = batch.records[1].yea_nay() else {
        panic!("expected a yes/no vote");
    };
    let text = explain(passage).unwrap();
    assert!(text.starts_with("This was a vote to pass H.R.1,"), "{text}");
}

#[test]
fn test_records_without_positions_fail_in_isolation() {
    let batch = normalize_vote_positions(records(), 5).unwrap();
    assert_eq!(batch.records.len(), 2);
    assert_eq!(batch.failures.len(), 1);
    assert_eq!(batch.failures[0].record.roll_call, 119);

    let err = normalize_vote_positions(records(), 0).unwrap_err();
    assert!(matches!(err, Error::TooManyFailures { failures: 1, threshold: 0 }));
}

#[test]
fn test_bill_fixture() {
    let raw: RawBillDetails = serde_json::from_str(HR1).unwrap();
    let batch = normalize_bills(vec![raw], 5).unwrap();
    let bill = &batch.records[0];

    assert_eq!(bill.meta.congress, 116);
    assert_eq!(bill.total_cosponsors(), 236);
    assert_eq!(bill.action(2).map(|a| a.chamber), Some(Chamber::House));

    let history = bill.history();
    assert_eq!(history.len(), 1);
    assert!(!history[0].vote.voice);
    assert_eq!(history[0].vote.overview.as_ref().map(|o| o.roll_call), Some(118));

    let statuses: Vec<String> = bill.timeline().into_iter().map(|m| m.status).collect();
    insta::assert_snapshot!(statuses.join("\n"), @r"
    Introduced
    Passed in the House (234 yea - 193 nay)
    Voted on in the Senate
    Sent to President
    Signed Into Law
    ");
}
