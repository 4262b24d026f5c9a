use bmon_core::keys::{brand_meta_key, tracked_brands_set_key, validate_brand_segment};
use bmon_core::{BrandRecord, BrandsFile, KeyError};
use thiserror::Error;

use super::{decode, encode, MemoryStore, StoreError};

#[derive(Debug, Error)]
pub enum BrandWriteError {
    #[error("brand name must be non-empty")]
    EmptyName,

    #[error("brand name '{0}' does not produce a usable slug")]
    InvalidSlug(String, #[source] KeyError),

    #[error("brand '{0}' already exists")]
    Duplicate(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Registers a new tracked brand: adds its slug to `brands:set` and writes
/// the record to `brand:{slug}:meta`.
///
/// # Errors
///
/// Returns [`BrandWriteError`] for a blank name, a name whose slug is empty,
/// or a slug that is already tracked.
pub async fn create_brand(
    store: &MemoryStore,
    name: &str,
    keywords: Vec<String>,
) -> Result<BrandRecord, BrandWriteError> {
    if name.trim().is_empty() {
        return Err(BrandWriteError::EmptyName);
    }

    let record = BrandRecord::new(name, keywords);
    validate_brand_segment(&record.slug)
        .map_err(|e| BrandWriteError::InvalidSlug(name.to_string(), e))?;

    let meta_key = brand_meta_key(&record.slug);
    let payload = encode(&meta_key, &record)?;

    if !store
        .add_member_with_value(&tracked_brands_set_key(), &record.slug, &meta_key, payload)
        .await
    {
        return Err(BrandWriteError::Duplicate(record.slug));
    }

    tracing::info!(brand = %record.slug, id = %record.id, "brand registered");
    Ok(record)
}

/// Lists every tracked brand, ordered by slug.
///
/// Members of `brands:set` without a meta record are skipped with a warning.
///
/// # Errors
///
/// Returns [`StoreError::Codec`] if a stored record is not valid JSON.
pub async fn list_brands(store: &MemoryStore) -> Result<Vec<BrandRecord>, StoreError> {
    let slugs = store.members(&tracked_brands_set_key()).await;
    let mut brands = Vec::with_capacity(slugs.len());
    for slug in slugs {
        match get_brand(store, &slug).await? {
            Some(record) => brands.push(record),
            None => tracing::warn!(brand = %slug, "tracked brand has no meta record"),
        }
    }
    Ok(brands)
}

/// # Errors
///
/// Returns [`StoreError::Codec`] if the stored record is not valid JSON.
pub async fn get_brand(store: &MemoryStore, slug: &str) -> Result<Option<BrandRecord>, StoreError> {
    let key = brand_meta_key(slug);
    store
        .get(&key)
        .await
        .map(|raw| decode(&key, &raw))
        .transpose()
}

/// Stops tracking a brand. Mention data already stored under the brand's
/// keys is left in place. Returns `false` if the brand was not tracked.
pub async fn delete_brand(store: &MemoryStore, slug: &str) -> bool {
    let (removed, had_meta) = store
        .remove_member_with_value(&tracked_brands_set_key(), slug, &brand_meta_key(slug))
        .await;
    if removed {
        tracing::info!(brand = %slug, "brand removed");
    }
    removed || had_meta
}

/// Registers every brand in a seed file, skipping ones already tracked.
/// Returns how many were created.
///
/// # Errors
///
/// Returns [`BrandWriteError`] for any failure other than a duplicate.
pub async fn seed_brands(store: &MemoryStore, file: &BrandsFile) -> Result<usize, BrandWriteError> {
    let mut created = 0;
    for brand in &file.brands {
        match create_brand(store, &brand.name, brand.keywords.clone()).await {
            Ok(_) => created += 1,
            Err(BrandWriteError::Duplicate(slug)) => {
                tracing::debug!(brand = %slug, "seed brand already tracked");
            }
            Err(e) => return Err(e),
        }
    }
    Ok(created)
}
