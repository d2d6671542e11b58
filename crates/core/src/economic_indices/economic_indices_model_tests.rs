//! Tests for economic index upsert planning.

#[cfg(test)]
mod tests {
    use crate::economic_indices::{plan_index_upsert, EconomicIndex, EconomicIndexUpdate, IndexDeltas};
    use crate::utils::UpsertOutcome;
    use chrono::NaiveDateTime;
    use rust_decimal_macros::dec;

    fn stored(value: rust_decimal::Decimal, deltas: IndexDeltas) -> EconomicIndex {
        EconomicIndex {
            id: "FEDFUNDS".to_string(),
            value,
            deltas,
            created_at: NaiveDateTime::default(),
            updated_at: NaiveDateTime::default(),
        }
    }

    #[test]
    fn test_first_fetch_creates() {
        let update = EconomicIndexUpdate {
            id: "FEDFUNDS".to_string(),
            value: dec!(5.33),
            deltas: IndexDeltas {
                monthly: Some(dec!(0)),
                ..Default::default()
            },
        };
        let (outcome, deltas) = plan_index_upsert(None, &update);
        assert_eq!(outcome, UpsertOutcome::Created);
        assert_eq!(deltas.monthly, Some(dec!(0)));
        assert_eq!(deltas.yearly, None);
    }

    #[test]
    fn test_identical_fetch_is_noop() {
        let deltas = IndexDeltas {
            monthly: Some(dec!(0.25)),
            yearly: Some(dec!(1.5)),
            ..Default::default()
        };
        let existing = stored(dec!(5.33), deltas);
        let update = EconomicIndexUpdate {
            id: "FEDFUNDS".to_string(),
            value: dec!(5.33),
            deltas,
        };
        let (outcome, _) = plan_index_upsert(Some(&existing), &update);
        assert_eq!(outcome, UpsertOutcome::Unchanged);
    }

    #[test]
    fn test_missing_horizon_keeps_stored_delta() {
        let existing = stored(
            dec!(5.33),
            IndexDeltas {
                monthly: Some(dec!(0.25)),
                yearly: Some(dec!(1.5)),
                ..Default::default()
            },
        );
        let update = EconomicIndexUpdate {
            id: "FEDFUNDS".to_string(),
            value: dec!(5.08),
            deltas: IndexDeltas {
                monthly: Some(dec!(-0.25)),
                ..Default::default()
            },
        };
        let (outcome, deltas) = plan_index_upsert(Some(&existing), &update);
        assert_eq!(outcome, UpsertOutcome::Updated);
        assert_eq!(deltas.monthly, Some(dec!(-0.25)));
        assert_eq!(deltas.yearly, Some(dec!(1.5)));
    }

    #[test]
    fn test_serialization_flattens_deltas() {
        let index = stored(
            dec!(3.2),
            IndexDeltas {
                yearly: Some(dec!(-0.4)),
                ..Default::default()
            },
        );
        let json = serde_json::to_value(&index).unwrap();
        assert_eq!(json["id"], "FEDFUNDS");
        assert!(json.get("yearly").is_some());
        assert!(json.get("deltas").is_none());
    }
}
