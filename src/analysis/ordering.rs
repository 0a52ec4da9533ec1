//! Control-identifier ordering.
//!
//! Control ids look like `ac-2`, `ac-10`, `ac-2.1`: a group prefix, a `-`
//! separator, and a numeric suffix (possibly compound, hence the `f64`
//! parse). Plain lexicographic order would put `ac-10` before `ac-2`, so the
//! suffix compares numerically once the groups tie.

use crate::error::{InsightsError, Result};
use std::cmp::Ordering;

/// Three-way comparison of two control identifiers.
///
/// Ids without a separator fall back to plain lexicographic comparison. When
/// a separator is present, a non-numeric suffix is a fatal input-format
/// error: malformed ids indicate a malformed source document.
pub fn compare_control_ids(a: &str, b: &str) -> Result<Ordering> {
    match (a.split_once('-'), b.split_once('-')) {
        (Some((group_a, suffix_a)), Some((group_b, suffix_b))) => match group_a.cmp(group_b) {
            Ordering::Equal => {
                let num_a = parse_suffix(a, suffix_a)?;
                let num_b = parse_suffix(b, suffix_b)?;
                Ok(num_a.total_cmp(&num_b))
            }
            ordering => Ok(ordering),
        },
        _ => Ok(a.cmp(b)),
    }
}

fn parse_suffix(id: &str, suffix: &str) -> Result<f64> {
    suffix
        .parse::<f64>()
        .map_err(|_| InsightsError::malformed_control_id(id))
}

/// Sort control ids in place, propagating the first malformed id found.
pub fn sort_control_ids(ids: &mut [String]) -> Result<()> {
    let mut failure: Option<InsightsError> = None;
    ids.sort_by(|a, b| match compare_control_ids(a, b) {
        Ok(ordering) => ordering,
        Err(e) => {
            if failure.is_none() {
                failure = Some(e);
            }
            Ordering::Equal
        }
    });
    match failure {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
