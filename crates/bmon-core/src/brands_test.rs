use std::path::Path;

use super::*;

fn brand(name: &str) -> BrandConfig {
    BrandConfig {
        name: name.to_string(),
        keywords: vec![],
        notes: None,
    }
}

#[test]
fn slug_simple_name() {
    assert_eq!(brand("Acme Corp").slug(), "acme-corp");
}

#[test]
fn slug_special_characters() {
    assert_eq!(brand("Uncle Arnie's").slug(), "uncle-arnies");
}

#[test]
fn slug_drops_delimiter() {
    assert_eq!(brand("Acme: EU").slug(), "acme-eu");
}

#[test]
fn slug_accented_characters() {
    // Non-ASCII chars are stripped; no dash inserted between adjacent ASCII chars
    assert_eq!(brand("BRĒZ").slug(), "brz");
}

#[test]
fn slug_collapses_repeated_dashes() {
    assert_eq!(brand("  High--Rise  ").slug(), "high-rise");
}

#[test]
fn validate_rejects_empty_name() {
    let brands_file = BrandsFile {
        brands: vec![brand("  ")],
    };
    let err = validate_brands(&brands_file).unwrap_err();
    assert!(err.to_string().contains("non-empty"));
}

#[test]
fn validate_rejects_empty_slug() {
    let brands_file = BrandsFile {
        brands: vec![brand("ÉÈ")],
    };
    let err = validate_brands(&brands_file).unwrap_err();
    assert!(err.to_string().contains("empty slug"));
}

#[test]
fn validate_rejects_duplicate_name() {
    let brands_file = BrandsFile {
        brands: vec![brand("Acme"), brand("acme")],
    };
    let err = validate_brands(&brands_file).unwrap_err();
    assert!(err.to_string().contains("duplicate brand name"));
}

#[test]
fn validate_rejects_duplicate_slug() {
    let brands_file = BrandsFile {
        brands: vec![brand("High Rise"), brand("High--Rise")],
    };
    let err = validate_brands(&brands_file).unwrap_err();
    assert!(err.to_string().contains("duplicate brand slug"));
}

#[test]
fn parse_brands_reads_keywords() {
    let yaml = "brands:\n  - name: Acme\n    keywords: [acme, \"@acme\"]\n  - name: Globex\n";
    let parsed = parse_brands(yaml).expect("parse");
    assert_eq!(parsed.brands.len(), 2);
    assert_eq!(parsed.brands[0].keywords, vec!["acme", "@acme"]);
    assert!(parsed.brands[1].keywords.is_empty());
}

#[test]
fn parse_brands_rejects_malformed_yaml() {
    let err = parse_brands("brands: [unterminated").unwrap_err();
    assert!(matches!(err, ConfigError::BrandsFileParse(_)));
}

#[test]
fn load_brands_missing_file_is_io_error() {
    let err = load_brands(Path::new("/nonexistent/brands.yaml")).unwrap_err();
    assert!(matches!(err, ConfigError::BrandsFileIo { .. }));
}

#[test]
fn load_brands_from_real_file() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("config")
        .join("brands.yaml");
    assert!(
        path.exists(),
        "brands.yaml missing at {path:?}: required for this test"
    );
    let result = load_brands(&path);
    assert!(result.is_ok(), "failed to load brands.yaml: {result:?}");
    let brands_file = result.unwrap();
    assert!(!brands_file.brands.is_empty());
}

#[test]
fn brand_record_uses_slug_and_trimmed_name() {
    let record = BrandRecord::new(" Acme Corp ", vec!["acme".to_string()]);
    assert_eq!(record.name, "Acme Corp");
    assert_eq!(record.slug, "acme-corp");
    assert_eq!(record.keywords, vec!["acme"]);
}

#[test]
fn brand_record_round_trips_through_json() {
    let record = BrandRecord::from(&brand("Globex"));
    let json = serde_json::to_string(&record).expect("serialize");
    let back: BrandRecord = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(back, record);
}
