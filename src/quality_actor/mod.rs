//! # Quality Actor
//!
//! Owns the inspection reports, newest first. Reports are dated from the
//! [`Clock`](crate::clock::Clock) context and are immutable once filed.

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::QualityClient;
use crate::ids;
use crate::model::QualityReport;
use collection_actor::CollectionActor;

/// Creates the quality actor, seeded with `reports`, and its client.
pub fn new(
    buffer_size: usize,
    reports: Vec<QualityReport>,
) -> (CollectionActor<QualityReport>, QualityClient) {
    let next_report_id = ids::sequence(
        "QC",
        2,
        ids::next_number("QC", reports.iter().map(|r| r.id.as_str())),
    );
    let (actor, generic_client) = CollectionActor::new(buffer_size, next_report_id);
    (actor.seeded(reports), QualityClient::new(generic_client))
}
