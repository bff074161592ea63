//! Timezone rebasing for the chart's date column.
//!
//! Dates are always derived from the immutable exchange-time (UTC) snapshot
//! taken at dataset build, never from an already-shifted column, so repeated
//! zone switches cannot compound.

use {
    crate::error::{ChartError, Result},
    chrono::{DateTime, FixedOffset, Utc},
};

/// One selectable zone: the widget label, the IANA signature it stands for,
/// and its fixed UTC offset.
#[derive(Debug, Clone, Copy)]
pub struct ZoneEntry {
    pub label: &'static str,
    pub signature: &'static str,
    pub offset_secs: i32,
}

/// The unshifted origin every dataset is recorded in.
pub const EXCHANGE_LABEL: &str = "(Exchange) Exchange";

pub const ZONES: &[ZoneEntry] = &[
    ZoneEntry { label: EXCHANGE_LABEL, signature: "UTC", offset_secs: 0 },
    ZoneEntry { label: "(UTC+00:00) Reykjavik", signature: "Atlantic/Reykjavik", offset_secs: 0 },
    ZoneEntry { label: "(UTC-08:00) Los Angeles", signature: "America/Los_Angeles", offset_secs: -8 * 3600 },
    ZoneEntry { label: "(UTC-05:00) New York", signature: "America/New_York", offset_secs: -5 * 3600 },
    ZoneEntry { label: "(UTC+01:00) London", signature: "Europe/London", offset_secs: 3600 },
    ZoneEntry { label: "(UTC+02:00) Berlin", signature: "Europe/Berlin", offset_secs: 2 * 3600 },
    ZoneEntry { label: "(UTC+03:00) Moscow", signature: "Europe/Moscow", offset_secs: 3 * 3600 },
    ZoneEntry { label: "(UTC+05:30) Mumbai", signature: "Asia/Kolkata", offset_secs: 5 * 3600 + 1800 },
    ZoneEntry { label: "(UTC+08:00) Hong Kong", signature: "Asia/Hong_Kong", offset_secs: 8 * 3600 },
    ZoneEntry { label: "(UTC+09:00) Tokyo", signature: "Asia/Tokyo", offset_secs: 9 * 3600 },
    ZoneEntry { label: "(UTC+10:00) Sydney", signature: "Australia/Sydney", offset_secs: 10 * 3600 },
];

/// Resolve a widget label to its zone entry. Session state must only ever
/// hold labels present in this table.
pub fn lookup(label: &str) -> Result<&'static ZoneEntry> {
    ZONES
        .iter()
        .find(|zone| zone.label == label)
        .ok_or_else(|| ChartError::Config(format!("unknown timezone label: '{label}'")))
}

fn offset_of(entry: &ZoneEntry) -> Result<FixedOffset> {
    FixedOffset::east_opt(entry.offset_secs).ok_or_else(|| {
        ChartError::Config(format!(
            "offset out of range for zone '{}': {}s",
            entry.signature, entry.offset_secs
        ))
    })
}

/// Localize an exchange date as UTC, convert to the zone, then drop the zone
/// annotation: the result is naive wall-clock epoch-ms for display.
fn shift_ms(date_ms: i64, offset: FixedOffset) -> i64 {
    match DateTime::<Utc>::from_timestamp_millis(date_ms) {
        Some(utc) => utc.with_timezone(&offset).naive_local().and_utc().timestamp_millis(),
        None => date_ms,
    }
}

/// Rebase the whole exchange-time snapshot into `label`'s wall-clock time.
pub fn rebase(exchange_dates_ms: &[i64], label: &str) -> Result<Vec<i64>> {
    let offset = offset_of(lookup(label)?)?;
    Ok(exchange_dates_ms.iter().map(|&d| shift_ms(d, offset)).collect())
}

/// Millisecond delta induced by switching the displayed zone: the first
/// timestamp rebased under `current` minus the same timestamp rebased under
/// `previous`. Zero when the labels match or the snapshot is empty.
pub fn compute_delta_ms(
    exchange_dates_ms: &[i64],
    previous: &str,
    current: &str,
) -> Result<f64> {
    let prev_offset = offset_of(lookup(previous)?)?;
    let curr_offset = offset_of(lookup(current)?)?;

    if previous == current {
        return Ok(0.0);
    }
    let Some(&first) = exchange_dates_ms.first() else {
        return Ok(0.0);
    };
    Ok((shift_ms(first, curr_offset) - shift_ms(first, prev_offset)) as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOUR_MS: f64 = 3_600_000.0;

    #[test]
    fn unknown_label_is_a_config_error() {
        assert!(matches!(lookup("(UTC+99:00) Nowhere"), Err(ChartError::Config(_))));
        assert!(rebase(&[0], "Nowhere").is_err());
    }

    #[test]
    fn delta_is_zero_for_same_zone() {
        let dates = [1_600_000_000_000];
        let d = compute_delta_ms(&dates, "(UTC+01:00) London", "(UTC+01:00) London").unwrap();
        assert_eq!(d, 0.0);
    }

    #[test]
    fn exchange_to_london_is_plus_one_hour() {
        let dates = [1_600_000_000_000, 1_600_000_300_000];
        let d = compute_delta_ms(&dates, EXCHANGE_LABEL, "(UTC+01:00) London").unwrap();
        assert_eq!(d, HOUR_MS);

        // And back again.
        let d = compute_delta_ms(&dates, "(UTC+01:00) London", EXCHANGE_LABEL).unwrap();
        assert_eq!(d, -HOUR_MS);
    }

    #[test]
    fn half_hour_zones_shift_by_half_hours() {
        let dates = [0];
        let d = compute_delta_ms(&dates, EXCHANGE_LABEL, "(UTC+05:30) Mumbai").unwrap();
        assert_eq!(d, 5.5 * HOUR_MS);
    }

    #[test]
    fn rebase_from_snapshot_never_compounds() {
        let snapshot = [0, 300_000, 600_000];
        let once = rebase(&snapshot, "(UTC+09:00) Tokyo").unwrap();
        let twice = rebase(&snapshot, "(UTC+09:00) Tokyo").unwrap();
        assert_eq!(once, twice);
        assert_eq!(once[0], 9 * 3_600_000);
    }

    #[test]
    fn exchange_rebase_is_identity() {
        let snapshot = [1_600_000_000_000, 1_600_000_300_000];
        assert_eq!(rebase(&snapshot, EXCHANGE_LABEL).unwrap(), snapshot);
    }
}
