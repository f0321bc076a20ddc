use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A chamber of Congress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Chamber {
    #[serde(alias = "house")]
    House,
    #[serde(alias = "senate")]
    Senate,
}

impl Chamber {
    pub fn name(&self) -> &'static str {
        match self {
            Chamber::House => "House",
            Chamber::Senate => "Senate",
        }
    }

    /// Title used for members of this chamber
    pub fn member_title(&self) -> &'static str {
        match self {
            Chamber::House => "Rep.",
            Chamber::Senate => "Sen.",
        }
    }
}

impl fmt::Display for Chamber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Political party: the two main parties, and independents for everyone else
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Party {
    D,
    R,
    #[serde(alias = "ID")]
    I,
}

impl Party {
    /// Informal abbreviation, like `Dem`
    pub fn abbrev(&self) -> &'static str {
        match self {
            Party::D => "Dem",
            Party::R => "Rep",
            Party::I => "Ind",
        }
    }

    pub fn full(&self) -> &'static str {
        match self {
            Party::D => "Democrat",
            Party::R => "Republican",
            Party::I => "Independent",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim() {
            "D" => Some(Party::D),
            "R" => Some(Party::R),
            "I" | "ID" => Some(Party::I),
            _ => None,
        }
    }
}

/// A position in a yes/no vote
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum VotePosition {
    Yes,
    No,
    Present,
    Abstain,
}

impl VotePosition {
    pub const ALL: [VotePosition; 4] = [
        VotePosition::Yes,
        VotePosition::No,
        VotePosition::Present,
        VotePosition::Abstain,
    ];

    /// Parse a position label as the source writes it. Senate trial votes use
    /// "Guilty"/"Not Guilty" in place of yes/no.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim() {
            "Yes" | "Yea" | "Aye" | "Guilty" => Some(VotePosition::Yes),
            "No" | "Nay" | "Not Guilty" => Some(VotePosition::No),
            "Present" => Some(VotePosition::Present),
            "Not Voting" | "Not_Voting" | "Abstain" => Some(VotePosition::Abstain),
            _ => None,
        }
    }

    pub fn short(&self) -> &'static str {
        match self {
            VotePosition::Yes => "Yea",
            VotePosition::No => "Nay",
            VotePosition::Present => "Present",
            VotePosition::Abstain => "Abs",
        }
    }

    /// Present is categorically an abstention
    pub fn group(&self) -> VotePosition {
        match self {
            VotePosition::Present => VotePosition::Abstain,
            other => *other,
        }
    }
}

impl fmt::Display for VotePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            VotePosition::Yes => "Yes",
            VotePosition::No => "No",
            VotePosition::Present => "Present",
            VotePosition::Abstain => "Abstain",
        };
        f.write_str(s)
    }
}

/// Pass/fail outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteResult {
    Pass,
    Fail,
}

/// The kind of vote taken, which determines the margin required to pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VoteType {
    #[serde(rename = "1/2")]
    OneHalf,
    #[serde(rename = "YEA-AND-NAY")]
    YeaAndNay,
    #[serde(rename = "RECORDED VOTE")]
    Recorded,
    #[serde(rename = "2/3")]
    TwoThirds,
    #[serde(rename = "2/3 YEA-AND-NAY")]
    TwoThirdsYeaAndNay,
    #[serde(rename = "2/3 RECORDED VOTE")]
    TwoThirdsRecorded,
    #[serde(rename = "3/5")]
    ThreeFifths,
    #[serde(rename = "QUORUM")]
    Quorum,
}

impl VoteType {
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim() {
            "1/2" => Some(VoteType::OneHalf),
            "YEA-AND-NAY" => Some(VoteType::YeaAndNay),
            "RECORDED VOTE" => Some(VoteType::Recorded),
            "2/3" => Some(VoteType::TwoThirds),
            "2/3 YEA-AND-NAY" | "2/3 YAY-AND-NAY" => Some(VoteType::TwoThirdsYeaAndNay),
            "2/3 RECORDED VOTE" => Some(VoteType::TwoThirdsRecorded),
            "3/5" => Some(VoteType::ThreeFifths),
            "QUORUM" => Some(VoteType::Quorum),
            _ => None,
        }
    }

    /// Required share of votes cast, as `(numerator, denominator)`
    pub fn threshold(&self) -> (u64, u64) {
        match self {
            VoteType::OneHalf | VoteType::YeaAndNay | VoteType::Recorded | VoteType::Quorum => {
                (1, 2)
            }
            VoteType::TwoThirds | VoteType::TwoThirdsYeaAndNay | VoteType::TwoThirdsRecorded => {
                (2, 3)
            }
            VoteType::ThreeFifths => (3, 5),
        }
    }

    pub fn required_fraction(&self) -> f64 {
        let (num, den) = self.threshold();
        num as f64 / den as f64
    }
}

/// Identifies one roll call within a session
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct VoteMeta {
    pub congress: u32,
    pub chamber: Chamber,
    pub session: u32,
    pub roll_call: u32,
    pub source: String,
}

/// Bill identity parsed from an id such as `hjres46-116`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct BillMeta {
    /// eg: hjres46
    pub slug: String,
    /// eg: 116
    pub congress: u32,
    /// eg: H.J.RES.46 (not the title of the bill)
    pub name: String,
    /// eg: hjres
    pub bill_type: String,
    /// eg: hjres46-116
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct SponsorMeta {
    pub id: String,
    pub name: String,
    pub party: Party,
    pub state: String,
    /// Either "Rep." or "Sen."
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AmendmentMeta {
    /// eg: H.AMDT.95
    pub number: String,
    pub sponsor: SponsorMeta,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NominationMeta {
    /// Includes the congress, eg: PN1-116
    pub id: String,
    pub number: String,
    /// Name of the nominee
    pub name: String,
    pub agency: String,
}

/// What a vote was taken on. At most one subject exists per vote; an amendment vote
/// may also name the bill being amended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum VoteSubject {
    Bill {
        bill: BillMeta,
        title: Option<String>,
    },
    Amendment {
        amendment: AmendmentMeta,
        bill: Option<BillMeta>,
    },
    Nomination {
        nomination: NominationMeta,
    },
}

impl VoteSubject {
    /// The bill voted on, directly or through an amendment
    pub fn bill(&self) -> Option<&BillMeta> {
        match self {
            VoteSubject::Bill { bill, .. } => Some(bill),
            VoteSubject::Amendment { bill, .. } => bill.as_ref(),
            VoteSubject::Nomination { .. } => None,
        }
    }
}

/// Present on Senate votes decided by the Vice President's tie-breaking vote
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TieBreak {
    pub breaker: String,
    pub vote: VotePosition,
}

/// One entry of a bill's procedural log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillAction {
    /// Position in the log; not necessarily chronological
    pub id: u32,
    pub chamber: Chamber,
    pub action_type: String,
    #[serde(rename = "datetime", alias = "date")]
    pub date: NaiveDate,
    pub description: String,
}
