use std::fs;
use std::path::{Path, PathBuf};

use rollcall::prelude::*;
use rollcall::processor::{BillEntry, VoteEntry};
use rollcall::timeline::MilestoneStage;
use rollcall::types::{Chamber, VotePosition};

fn fixtures(kind: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(kind)
}

async fn collect(config: Config) -> Vec<Result<Entry>> {
    RecordProcessor::new(config).process().collect().await
}

fn votes(entries: Vec<Result<Entry>>) -> Vec<VoteEntry> {
    entries
        .into_iter()
        .map(|entry| match entry.unwrap() {
            Entry::Vote(vote) => vote,
            Entry::Bill(bill) => panic!("unexpected bill entry {}", bill.bill_id),
        })
        .collect()
}

fn write(dir: &Path, name: &str, contents: &str) {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, contents).unwrap();
}

#[tokio::test]
async fn test_votes_are_classified_in_path_order() {
    let config = ConfigBuilder::new(fixtures("votes")).build().unwrap();
    let entries = votes(collect(config).await);

    let files: Vec<&str> = entries.iter().map(|e| e.file.as_str()).collect();
    assert_eq!(
        files,
        vec!["116/1/roll002.json", "116/1/roll118.json", "116/1/roll118.json"]
    );

    let kinds: Vec<&str> = entries
        .iter()
        .map(|e| match &e.vote {
            VoteRecord::Speaker(_) => "speaker",
            VoteRecord::Legislative(_) => "legislative",
            VoteRecord::Motion(_) => "motion",
        })
        .collect();
    assert_eq!(kinds, vec!["speaker", "legislative", "motion"]);

    assert_eq!(entries[1].goal, Some(VoteGoal::Pass));
    assert!(entries[2].positions.is_none());
}

#[tokio::test]
async fn test_positions_are_resolved() {
    let config = ConfigBuilder::new(fixtures("votes")).build().unwrap();
    let entries = votes(collect(config).await);

    let Some(VotePositionSet::Speaker(speaker)) = &entries[0].positions else {
        panic!("expected speaker positions");
    };
    assert_eq!(speaker.winner.id, "P000197");
    let for_pelosi: Vec<&str> = speaker
        .voters_for("Nancy Pelosi")
        .unwrap()
        .iter()
        .map(|m| m.id.as_str())
        .collect();
    assert_eq!(for_pelosi, vec!["P000197", "A000370"]);
    assert_eq!(speaker.voters_for("Bass").map(<[_]>::len), Some(0));

    let Some(VotePositionSet::Legislative(legislative)) = &entries[1].positions else {
        panic!("expected legislative positions");
    };
    assert_eq!(legislative.get(VotePosition::Yes).len(), 2);
    assert_eq!(legislative.position_of("M001165"), Some(VotePosition::No));
}

#[tokio::test]
async fn test_nominee_order_follows_the_file() {
    let config = ConfigBuilder::new(fixtures("votes")).limit(1).build().unwrap();
    let entries = votes(collect(config).await);

    let VoteRecord::Speaker(speaker) = &entries[0].vote else {
        panic!("expected a speaker election");
    };
    let nominees: Vec<&str> = speaker.nominees().collect();
    assert_eq!(nominees, vec!["Pelosi", "McCarthy", "Bass", "Not Voting"]);

    let Some(VotePositionSet::Speaker(positions)) = &entries[0].positions else {
        panic!("expected speaker positions");
    };
    let names: Vec<&str> = positions.nominees.iter().map(|n| n.nominee.name()).collect();
    assert_eq!(names, vec!["Nancy Pelosi", "Kevin McCarthy", "Bass"]);
}

#[tokio::test]
async fn test_descending_with_limit() {
    let config = ConfigBuilder::new(fixtures("votes"))
        .sort_order(SortOrder::Descending)
        .limit(1)
        .build()
        .unwrap();
    let entries = votes(collect(config).await);

    assert_eq!(entries.len(), 2);
    assert!(entries.iter().all(|e| e.file == "116/1/roll118.json"));
}

#[tokio::test]
async fn test_bills_get_decisions_and_timeline() {
    let config = ConfigBuilder::new(fixtures("bills"))
        .kind(RecordKind::Bills)
        .build()
        .unwrap();
    let entries = collect(config).await;
    assert_eq!(entries.len(), 1);

    let BillEntry {
        bill_id,
        decisions,
        timeline,
        ..
    } = match entries.into_iter().next().unwrap().unwrap() {
        Entry::Bill(bill) => bill,
        Entry::Vote(_) => panic!("unexpected vote entry"),
    };

    assert_eq!(bill_id, "hr1-116");
    assert_eq!(decisions.len(), 1);
    assert_eq!(decisions[0].chamber, Chamber::House);

    let stages: Vec<MilestoneStage> = timeline.iter().map(|m| m.stage).collect();
    assert_eq!(
        stages,
        vec![
            MilestoneStage::Introduced,
            MilestoneStage::Passed(Chamber::House),
            MilestoneStage::Pending(Chamber::Senate),
            MilestoneStage::SentToPresident,
            MilestoneStage::SignedIntoLaw,
        ]
    );
    insta::assert_snapshot!(timeline[1].status.as_str(), @"Passed in the House (234 yea - 193 nay)");
    assert_eq!(timeline[2].status, "Voted on in the Senate");
}

#[tokio::test]
async fn test_failures_are_isolated() {
    let dir = tempfile::tempdir().unwrap();
    let good = fs::read_to_string(fixtures("votes").join("116/1/roll002.json")).unwrap();
    write(dir.path(), "a/good.json", &good);
    write(dir.path(), "b/broken.json", "{ not json");
    write(dir.path(), "c/notes.txt", "ignored");

    let config = ConfigBuilder::new(dir.path()).build().unwrap();
    let entries = collect(config).await;

    assert_eq!(entries.len(), 2);
    assert!(entries[0].is_ok());
    assert!(matches!(entries[1], Err(Error::Json(_))));
}

#[tokio::test]
async fn test_too_many_failures_stops_the_stream() {
    let dir = tempfile::tempdir().unwrap();
    for i in 0..8 {
        write(dir.path(), &format!("bad{i}.json"), "[]x");
    }

    let config = ConfigBuilder::new(dir.path())
        .failure_threshold(5)
        .build()
        .unwrap();
    let entries = collect(config).await;

    assert_eq!(entries.len(), 7);
    assert!(entries[..6].iter().all(|e| matches!(e, Err(Error::Json(_)))));
    assert!(matches!(
        entries[6],
        Err(Error::TooManyFailures {
            failures: 6,
            threshold: 5
        })
    ));
}

#[tokio::test]
async fn test_paths_from_stdin() {
    let dir = fixtures("votes");
    let config = ConfigBuilder::new(&dir).build().unwrap();
    let paths = vec![
        dir.join("116/1/roll002.json").display().to_string(),
        dir.join("missing.json").display().to_string(),
        String::new(),
    ];

    let entries: Vec<Result<Entry>> = RecordProcessor::process_from_stdin(&config, paths.into_iter())
        .collect()
        .await;
    let entries = votes(entries);
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].file, "116/1/roll002.json");
}
