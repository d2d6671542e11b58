//! Tests for asset domain models.

use crate::assets::{normalize_asset_id, plan_rate_upsert, Asset, AssetCategory, RateUpsert};
use crate::errors::Error;
use chrono::NaiveDateTime;
use rust_decimal_macros::dec;

fn asset(id: &str, rate: rust_decimal::Decimal) -> Asset {
    Asset {
        id: id.to_string(),
        category: AssetCategory::Crypto,
        exchange_rate: rate,
        created_at: NaiveDateTime::default(),
        updated_at: NaiveDateTime::default(),
    }
}

#[test]
fn test_plan_rate_upsert_creates_unknown_asset() {
    assert_eq!(plan_rate_upsert(None, dec!(1)), RateUpsert::Create);
}

#[test]
fn test_plan_rate_upsert_skips_identical_rate() {
    let existing = asset("bitcoin", dec!(64250.12));
    assert_eq!(
        plan_rate_upsert(Some(&existing), dec!(64250.120)),
        RateUpsert::Unchanged
    );
}

#[test]
fn test_plan_rate_upsert_updates_changed_rate() {
    let existing = asset("bitcoin", dec!(64250.12));
    assert_eq!(
        plan_rate_upsert(Some(&existing), dec!(64251)),
        RateUpsert::Update
    );
}

#[test]
fn test_category_db_round_trip() {
    for category in [
        AssetCategory::Cash,
        AssetCategory::Equity,
        AssetCategory::Crypto,
        AssetCategory::Fund,
        AssetCategory::Other,
    ] {
        assert_eq!(AssetCategory::from_db_str(category.as_db_str()), category);
    }
    assert_eq!(AssetCategory::from_db_str("bond"), AssetCategory::Other);
}

#[test]
fn test_category_serialization() {
    assert_eq!(
        serde_json::to_string(&AssetCategory::Crypto).unwrap(),
        "\"crypto\""
    );
}

#[test]
fn test_normalize_asset_id() {
    assert_eq!(normalize_asset_id(" Bitcoin ").unwrap(), "bitcoin");
    assert!(matches!(normalize_asset_id("  "), Err(Error::Validation(_))));
    assert!(normalize_asset_id("a-very-long-asset-identifier-x").is_err());
}

#[test]
fn test_value_usd() {
    let eur = asset("eur", dec!(1.111111111111));
    assert_eq!(eur.value_usd(dec!(9)), dec!(9.999999999999));
}
