//! Batch normalization. Every record is handled on its own; a failure is recorded
//! alongside the raw record and the batch carries on until the failure threshold
//! is exceeded.

use crate::bill::BillDetails;
use crate::error::{Error, Result};
use crate::positions::{self, VotePositionSet};
use crate::raw::{RawBillDetails, RawVoteRecord};
use crate::vote::{self, VoteRecord};
use tracing::{debug, warn};

/// Default number of failed records a batch tolerates
pub const DEFAULT_FAILURE_THRESHOLD: usize = 5;

/// A raw record that could not be normalized, with the reason
#[derive(Debug)]
pub struct TransformFailure<R> {
    pub record: R,
    pub error: Error,
}

/// The outcome of normalizing many records
#[derive(Debug)]
pub struct Batch<T, R> {
    pub records: Vec<T>,
    pub failures: Vec<TransformFailure<R>>,
}

impl<T, R> Default for Batch<T, R> {
    fn default() -> Self {
        Batch {
            records: Vec::new(),
            failures: Vec::new(),
        }
    }
}

pub type VoteBatch = Batch<VoteRecord, RawVoteRecord>;
pub type PositionBatch = Batch<(VoteRecord, VotePositionSet), RawVoteRecord>;
pub type BillBatch = Batch<BillDetails, RawBillDetails>;

/// Something that can name itself in a log line
pub trait Describe {
    fn describe(&self) -> String;
}

impl Describe for RawVoteRecord {
    fn describe(&self) -> String {
        format!(
            "{} {} session {} roll call {}",
            self.congress, self.chamber, self.session, self.roll_call
        )
    }
}

impl Describe for RawBillDetails {
    fn describe(&self) -> String {
        self.bill_id.clone()
    }
}

/// Normalize each record with `transform`. Fails with [`Error::TooManyFailures`] as
/// soon as more than `threshold` records have failed.
pub fn normalize_all<R, T, F>(
    records: impl IntoIterator<Item = R>,
    threshold: usize,
    transform: F,
) -> Result<Batch<T, R>>
where
    R: Describe,
    F: Fn(&R) -> Result<T>,
{
    let mut batch = Batch::default();

    for record in records {
        match transform(&record) {
            Ok(normalized) => batch.records.push(normalized),
            Err(error) => {
                warn!(record = %record.describe(), %error, "failed to normalize record");
                batch.failures.push(TransformFailure { record, error });
                if batch.failures.len() > threshold {
                    return Err(Error::TooManyFailures {
                        failures: batch.failures.len(),
                        threshold,
                    });
                }
            }
        }
    }

    debug!(
        normalized = batch.records.len(),
        failed = batch.failures.len(),
        "batch complete"
    );
    Ok(batch)
}

pub fn normalize_votes(
    records: impl IntoIterator<Item = RawVoteRecord>,
    threshold: usize,
) -> Result<VoteBatch> {
    normalize_all(records, threshold, vote::classify)
}

/// Normalize records that carry full position data
pub fn normalize_vote_positions(
    records: impl IntoIterator<Item = RawVoteRecord>,
    threshold: usize,
) -> Result<PositionBatch> {
    normalize_all(records, threshold, positions::normalize_with_positions)
}

pub fn normalize_bills(
    records: impl IntoIterator<Item = RawBillDetails>,
    threshold: usize,
) -> Result<BillBatch> {
    normalize_all(records, threshold, BillDetails::from_raw)
}
