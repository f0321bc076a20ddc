//! Normalization of congressional roll-call votes and bill action logs.
//!
//! Raw records, already decoded from the source's JSON, go in; typed votes,
//! per-member positions, procedural goals, bill decisions and milestone timelines
//! come out. Every function here is pure over its inputs. The [`processor`] module
//! adds file discovery and streaming on top for the `rollcall` binary.

pub mod bill;
pub mod config;
pub mod decision;
pub mod error;
pub mod goal;
pub mod member;
mod patterns;
pub mod pipeline;
pub mod positions;
pub mod processor;
pub mod raw;
pub mod reference;
pub mod tally;
pub mod timeline;
pub mod types;
pub mod vote;

#[cfg(test)]
mod test_support;

pub use bill::{BillDetails, BillVoteOverview};
pub use config::{resolve_data_dir, Config, ConfigBuilder, FileConfig, RecordKind, SortOrder};
pub use decision::{to_decision, BillDecision, BillVote};
pub use error::{Error, Result};
pub use goal::{categorize, explain, VoteGoal};
pub use member::{find_member, find_or_name, NamedNominee, Nominee, VotingMember};
pub use pipeline::{normalize_bills, normalize_vote_positions, normalize_votes, TransformFailure};
pub use positions::{build_positions, VotePositionSet};
pub use processor::{Entry, RecordProcessor};
pub use raw::{RawBillDetails, RawVotePosition, RawVoteRecord};
pub use tally::{TallyGroup, YeaNayBreakdown};
pub use timeline::{create_timeline, TimelineMilestone};
pub use types::{BillAction, Chamber, Party, VotePosition, VoteResult, VoteType};
pub use vote::{classify, LegislativeVote, MotionKind, MotionVote, SpeakerVote, VoteRecord};

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::bill::BillDetails;
    pub use crate::config::{
        resolve_data_dir, Config, ConfigBuilder, FileConfig, RecordKind, SortOrder, DATA_DIR_ENV,
    };
    pub use crate::error::{Error, Result};
    pub use crate::goal::{categorize, VoteGoal};
    pub use crate::positions::VotePositionSet;
    pub use crate::processor::{Entry, RecordProcessor};
    pub use crate::raw::{RawBillDetails, RawVoteRecord};
    pub use crate::timeline::TimelineMilestone;
    pub use crate::vote::{classify, VoteRecord};
    pub use futures::StreamExt;
}
