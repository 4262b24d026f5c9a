use std::io::Write;

use anyhow::bail;
use bmon_core::keys::{tracked_brands_set_key, validate_brand_segment};
use bmon_core::{StorageKey, TimeBucket};

/// Prints `purpose<TAB>key` for every key of `brand`, plus the time-bucket
/// key when a date and hour are given.
pub(crate) fn run(
    brand: &str,
    date: Option<&str>,
    hour: Option<&str>,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    if let Err(e) = validate_brand_segment(brand) {
        tracing::warn!(brand, error = %e, "brand produces ambiguous storage keys");
    }

    for key in StorageKey::all_for_brand(brand) {
        writeln!(out, "{}\t{key}", key.purpose())?;
    }

    if let (Some(date), Some(hour)) = (date, hour) {
        let Some(bucket) = TimeBucket::parse(date, hour) else {
            bail!("invalid time bucket '{date}' / '{hour}'; expected YYYY-MM-DD and 0-23");
        };
        let key = bucket.storage_key(brand);
        writeln!(out, "{}\t{key}", key.purpose())?;
    }

    writeln!(
        out,
        "{}\t{}",
        StorageKey::TrackedBrands.purpose(),
        tracked_brands_set_key()
    )?;
    Ok(())
}
