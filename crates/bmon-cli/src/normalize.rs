//! `bmon-cli normalize`: offline normalization of raw mention files.

use std::io::{Read, Write};
use std::path::Path;

use anyhow::Context;
use bmon_core::{
    normalize_mention_with_clock, Clock, FixedClock, NormalizedMention, RawMention, SystemClock,
    TimeBucket,
};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct NormalizedLine<'a> {
    /// Time-bucket key the mention is stored under; absent if unbucketable.
    key: Option<String>,
    mention: &'a NormalizedMention,
}

pub(crate) fn run(
    brand: &str,
    input: Option<&Path>,
    now_ms: Option<i64>,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let content = match input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            buf
        }
    };

    let raws = parse_raw_mentions(&content)?;
    let count = match now_ms {
        Some(ms) => write_normalized(&raws, brand, &FixedClock(ms), out)?,
        None => write_normalized(&raws, brand, &SystemClock, out)?,
    };
    tracing::info!(brand, count, "normalized mentions");
    Ok(())
}

/// Accepts one raw mention or an array of them. The shape is picked from the
/// first non-blank character so decode errors name the offending field.
pub(crate) fn parse_raw_mentions(content: &str) -> anyhow::Result<Vec<RawMention>> {
    if content.trim_start().starts_with('[') {
        serde_json::from_str(content).context("input is not an array of raw mentions")
    } else {
        let raw: RawMention =
            serde_json::from_str(content).context("input is not a raw mention")?;
        Ok(vec![raw])
    }
}

/// Writes one JSON line per mention. Returns the number written.
pub(crate) fn write_normalized<C: Clock>(
    raws: &[RawMention],
    brand: &str,
    clock: &C,
    out: &mut impl Write,
) -> anyhow::Result<usize> {
    for raw in raws {
        let mention = normalize_mention_with_clock(raw, brand, clock);
        let key = TimeBucket::from_epoch_millis(mention.timestamp).map(|b| b.data_key(brand));
        if key.is_none() {
            tracing::warn!(mention_id = %mention.id, "timestamp outside bucketable range");
        }
        serde_json::to_writer(
            &mut *out,
            &NormalizedLine {
                key,
                mention: &mention,
            },
        )?;
        writeln!(out)?;
    }
    Ok(raws.len())
}
