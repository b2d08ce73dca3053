//! Ordering and period bucketing of raw observations.

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, Utc};
use data_spi::{Aggregation, DataError, Granularity, RawObservation, Result};
use tracing::warn;

/// Largest number of periods a bucketed series may span.
pub const MAX_PERIODS: i64 = 100_000;

/// Turn raw observations into ordered slots, one per document or per period.
///
/// With `ordered` set (or any bucketing granularity) observations are sorted
/// by timestamp and those without a usable timestamp are dropped. Bucketed
/// output has one slot for every period between the first and the last one,
/// so a period with no usable value shows up as `None`. A span wider than
/// [`MAX_PERIODS`] is rejected with `DataError::Config`.
pub fn assemble(
    observations: Vec<RawObservation>,
    granularity: Granularity,
    aggregation: Aggregation,
    ordered: bool,
) -> Result<Vec<Option<f64>>> {
    if granularity == Granularity::Document && !ordered {
        return Ok(observations.into_iter().map(|o| o.value).collect());
    }

    let total = observations.len();
    let mut timed: Vec<(DateTime<Utc>, Option<f64>)> = observations
        .into_iter()
        .filter_map(|o| o.timestamp.map(|ts| (ts, o.value)))
        .collect();
    if timed.len() < total {
        warn!(
            dropped = total - timed.len(),
            total, "dropping observations without a parseable timestamp"
        );
    }
    timed.sort_by_key(|(ts, _)| *ts);

    match granularity {
        Granularity::Document => Ok(timed.into_iter().map(|(_, v)| v).collect()),
        Granularity::Daily => bucket(timed, day_key, aggregation),
        Granularity::Monthly => bucket(timed, month_key, aggregation),
    }
}

fn day_key(ts: &DateTime<Utc>) -> i64 {
    i64::from(ts.date_naive().num_days_from_ce())
}

fn month_key(ts: &DateTime<Utc>) -> i64 {
    i64::from(ts.year()) * 12 + i64::from(ts.month0())
}

#[derive(Default)]
struct Accumulator {
    sum: f64,
    count: usize,
}

fn bucket(
    timed: Vec<(DateTime<Utc>, Option<f64>)>,
    key: fn(&DateTime<Utc>) -> i64,
    aggregation: Aggregation,
) -> Result<Vec<Option<f64>>> {
    let mut periods: BTreeMap<i64, Accumulator> = BTreeMap::new();
    for (ts, value) in &timed {
        let acc = periods.entry(key(ts)).or_default();
        if let Some(v) = value {
            acc.sum += v;
            acc.count += 1;
        }
    }

    let (first, last) = match (periods.keys().next(), periods.keys().next_back()) {
        (Some(&first), Some(&last)) => (first, last),
        _ => return Ok(Vec::new()),
    };
    let span = last - first + 1;
    if span > MAX_PERIODS {
        return Err(DataError::Config(format!(
            "observations span {} periods, more than the limit of {}",
            span, MAX_PERIODS
        )));
    }

    Ok((first..=last)
        .map(|k| {
            periods.get(&k).filter(|acc| acc.count > 0).map(|acc| match aggregation {
                Aggregation::Sum => acc.sum,
                Aggregation::Mean => acc.sum / acc.count as f64,
            })
        })
        .collect())
}
