#[cfg(test)]
mod tests {
    use crate::access::{AccessRepositoryTrait, Role};
    use crate::assets::AssetCategory;
    use crate::errors::Error;
    use crate::test_support::{MemoryAssets, MemoryLedger};
    use crate::wallets::{NewWallet, WalletService, WalletServiceTrait, WalletUpdate};
    use rust_decimal_macros::dec;
    use std::sync::Arc;

    fn setup() -> (MemoryLedger, WalletService) {
        let ledger = MemoryLedger::new();
        let assets = MemoryAssets::new();
        assets.add("eur", AssetCategory::Cash, dec!(1.1));
        let service = WalletService::new(
            Arc::new(ledger.clone()),
            Arc::new(ledger.clone()),
            Arc::new(assets),
        );
        (ledger, service)
    }

    fn seeded() -> (MemoryLedger, WalletService) {
        let (ledger, service) = setup();
        ledger.add_wallet("w1", "eur", dec!(100), false);
        ledger.grant("w1", "viewer", Role::Viewer);
        ledger.grant("w1", "editor", Role::Editor);
        ledger.grant("w1", "manager", Role::Manager);
        ledger.grant("w1", "owner", Role::Owner);
        (ledger, service)
    }

    // ==================== Create ====================

    #[tokio::test]
    async fn test_create_wallet_makes_creator_owner() {
        let (ledger, service) = setup();

        let view = service
            .create_wallet(
                NewWallet {
                    name: Some("Savings".to_string()),
                    asset_id: "EUR".to_string(),
                    balance: Some(dec!(50)),
                    ..Default::default()
                },
                "alice",
            )
            .await
            .unwrap();

        assert_eq!(view.role, 4);
        assert_eq!(view.wallet.asset_id, "eur");
        assert_eq!(view.value_usd, Some(dec!(55)));
        assert_eq!(
            ledger.get_role(&view.wallet.id, "alice").unwrap(),
            Some(Role::Owner)
        );
    }

    #[tokio::test]
    async fn test_create_wallet_without_name_gets_generated_one() {
        let (_, service) = setup();

        let view = service
            .create_wallet(
                NewWallet {
                    asset_id: "usd".to_string(),
                    ..Default::default()
                },
                "alice",
            )
            .await
            .unwrap();

        assert!(!view.wallet.name.is_empty());
        assert_eq!(view.value_usd, None);
    }

    // ==================== Listing ====================

    #[tokio::test]
    async fn test_list_wallets_by_role_band() {
        let (ledger, service) = setup();
        for (id, role) in [
            ("v", Role::Viewer),
            ("e", Role::Editor),
            ("m", Role::Manager),
            ("o", Role::Owner),
        ] {
            ledger.add_wallet(id, "eur", dec!(1), false);
            ledger.grant(id, "alice", role);
        }

        let all = service.list_wallets_for("alice", None, None).unwrap();
        assert_eq!(all.len(), 4);

        let exact = service.list_wallets_for("alice", Some(2), None).unwrap();
        assert_eq!(exact.len(), 1);
        assert_eq!(exact[0].wallet.id, "e");

        let up = service.list_wallets_for("alice", Some(2), Some(2)).unwrap();
        assert_eq!(up.len(), 3);

        let down = service.list_wallets_for("alice", Some(3), Some(-2)).unwrap();
        assert_eq!(down.len(), 3);
        assert!(down.iter().all(|w| w.wallet.id != "o"));
    }

    #[tokio::test]
    async fn test_list_wallets_rejects_unknown_role() {
        let (_, service) = setup();

        let result = service.list_wallets_for("alice", Some(9), None);

        assert!(matches!(result, Err(Error::Validation(_))));
    }

    // ==================== Read ====================

    #[tokio::test]
    async fn test_private_wallet_needs_grant() {
        let (ledger, service) = seeded();
        ledger.add_wallet("public", "eur", dec!(5), true);

        assert_eq!(service.get_wallet("w1", "viewer").unwrap().role, 1);
        assert!(matches!(
            service.get_wallet("w1", "stranger"),
            Err(Error::PermissionDenied(_))
        ));
        assert_eq!(service.get_wallet("public", "stranger").unwrap().role, 0);
        assert!(matches!(
            service.get_wallet("missing", "owner"),
            Err(Error::NotFound(_))
        ));
    }

    // ==================== Update ====================

    #[tokio::test]
    async fn test_update_requires_manager() {
        let (_, service) = seeded();
        let update = WalletUpdate {
            name: Some("Renamed".to_string()),
            ..Default::default()
        };

        for caller in ["viewer", "editor"] {
            let result = service.update_wallet("w1", caller, update.clone()).await;
            assert!(matches!(result, Err(Error::PermissionDenied(_))));
        }
        for caller in ["manager", "owner"] {
            let view = service
                .update_wallet("w1", caller, update.clone())
                .await
                .unwrap();
            assert_eq!(view.wallet.name, "Renamed");
        }
    }

    #[tokio::test]
    async fn test_manual_balance_edit_is_recorded() {
        let (ledger, service) = seeded();

        service
            .update_wallet(
                "w1",
                "owner",
                WalletUpdate {
                    balance: Some(dec!(80)),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let history = service.get_balance_history("w1", "viewer").unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].old_balance, dec!(100));
        assert_eq!(history[0].new_balance, dec!(80));
        assert_eq!(history[0].transaction_id, None);
        assert_eq!(ledger.balance_of("w1"), Some(dec!(80)));
    }

    // ==================== Delete ====================

    #[tokio::test]
    async fn test_delete_requires_owner() {
        let (ledger, service) = seeded();

        for caller in ["viewer", "editor", "manager", "stranger"] {
            let result = service.delete_wallet("w1", caller).await;
            assert!(matches!(result, Err(Error::PermissionDenied(_))));
        }

        service.delete_wallet("w1", "owner").await.unwrap();
        assert_eq!(ledger.balance_of("w1"), None);
        assert!(matches!(
            service.get_wallet("w1", "owner"),
            Err(Error::NotFound(_))
        ));
    }
}
