use std::io::Write;
use std::path::Path;

use bmon_core::keys::brand_meta_key;

pub(crate) fn run(path: &Path, out: &mut impl Write) -> anyhow::Result<()> {
    let file = bmon_core::load_brands(path)?;
    for brand in &file.brands {
        let slug = brand.slug();
        writeln!(
            out,
            "{slug}\t{}\t{}",
            brand_meta_key(&slug),
            brand.keywords.join(",")
        )?;
    }
    tracing::info!(path = %path.display(), count = file.brands.len(), "brands file valid");
    Ok(())
}
