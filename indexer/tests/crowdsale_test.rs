mod common;

use common::*;
use crowdsale_common::{
    address::Address,
    entity::AccountRole,
    event::{EventId, EventRecord, EventRecordKind},
    observed::Observed,
};
use crowdsale_indexer::core::{
    indexer::ProcessOutcome,
    reader::ContractState,
    resolver::EntityKind,
    storage::{
        AccountProvider, CrowdSaleProvider, Erc20Provider, EventRecordProvider,
        TransactionProvider,
    },
};

#[tokio::test]
async fn test_first_purchase_restores_initial_supply() {
    let mut indexer = indexer(reader());

    let outcome = indexer.process(&purchase(10, 0, 100, 10)).await.unwrap();
    let ProcessOutcome::Applied(report) = outcome else {
        panic!("first purchase must be applied");
    };
    assert_eq!(report.record, EventRecordKind::TokenPurchase);
    assert!(report.created.contains(EntityKind::CrowdSale, &SALE.to_hex()));
    assert!(report.created.contains(EntityKind::Erc20, &TOKEN.to_hex()));
    assert!(report.created.contains(EntityKind::Account, &SALE_WALLET.to_hex()));
    assert!(report.created.contains(EntityKind::Account, &ALICE.to_hex()));
    assert!(report.created.contains(EntityKind::Account, &BOB.to_hex()));

    let storage = indexer.storage();
    let sale = storage.get_crowdsale(&SALE).await.unwrap().unwrap();
    assert_eq!(sale.token, Observed::Available(TOKEN));
    assert_eq!(sale.wallet, Observed::Available(SALE_WALLET));
    assert_eq!(sale.initial_supply, Observed::Available(amount(500)));
    assert_eq!(sale.tokens_available, Observed::Available(amount(400)));
    assert_eq!(sale.funds_raised, amount(10));

    let account = storage.get_account(&SALE).await.unwrap().unwrap();
    assert_eq!(account.role, Some(AccountRole::CrowdSale));
    let token_account = storage.get_account(&TOKEN).await.unwrap().unwrap();
    assert_eq!(token_account.role, Some(AccountRole::Erc20));

    let token = storage.get_erc20(&TOKEN).await.unwrap().unwrap();
    assert_eq!(token.symbol, Observed::Available("CRWD".to_string()));
    assert_eq!(token.decimals, Observed::Available(18));

    let record = storage
        .get_event_record(EventRecordKind::TokenPurchase, &EventId::new(10, 0))
        .await
        .unwrap()
        .unwrap();
    let EventRecord::TokenPurchase(record) = record else {
        panic!("unexpected record kind");
    };
    assert_eq!(record.contract, SALE);
    assert_eq!(record.purchaser, ALICE);
    assert_eq!(record.beneficiary, BOB);
    assert_eq!(record.token_amount, amount(100));
    assert_eq!(record.wei_value, amount(10));
    assert_eq!(record.header.emitter, SALE);

    let transaction = storage
        .get_transaction(&record.header.transaction)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(transaction.block_number, 10);
}

#[tokio::test]
async fn test_second_purchase_moves_totals() {
    let mut indexer = indexer(reader());
    indexer.process(&purchase(10, 0, 100, 10)).await.unwrap();
    let calls = indexer.reader().call_count();

    let outcome = indexer.process(&purchase(11, 0, 50, 5)).await.unwrap();
    let ProcessOutcome::Applied(report) = outcome else {
        panic!("second purchase must be applied");
    };
    // only the transaction of block 11 is new
    assert_eq!(report.created.len(), 1);
    assert!(report.created.contains(EntityKind::Transaction, &meta(SALE, 11, 0).transaction_hash.to_hex()));
    // the known crowdsale is not read again
    assert_eq!(indexer.reader().call_count(), calls);

    let sale = indexer.storage().get_crowdsale(&SALE).await.unwrap().unwrap();
    assert_eq!(sale.initial_supply, Observed::Available(amount(500)));
    assert_eq!(sale.tokens_available, Observed::Available(amount(350)));
    assert_eq!(sale.funds_raised, amount(15));
    assert_eq!(
        indexer
            .storage()
            .count_event_records(EventRecordKind::TokenPurchase)
            .await
            .unwrap(),
        2
    );
}

#[tokio::test]
async fn test_reverted_supply_stays_unavailable() {
    let mut indexer = indexer(reader_with_sale(ContractState {
        token: Some(TOKEN),
        wallet: Some(SALE_WALLET),
        tokens_available: None,
        ..Default::default()
    }));

    indexer.process(&purchase(10, 0, 100, 10)).await.unwrap();
    indexer.process(&purchase(11, 0, 50, 5)).await.unwrap();

    let sale = indexer.storage().get_crowdsale(&SALE).await.unwrap().unwrap();
    assert!(sale.initial_supply.is_unavailable());
    assert!(sale.tokens_available.is_unavailable());
    assert_eq!(sale.funds_raised, amount(15));
    assert_eq!(
        indexer
            .storage()
            .count_event_records(EventRecordKind::TokenPurchase)
            .await
            .unwrap(),
        2
    );
}

#[tokio::test]
async fn test_unknown_contract_has_no_references() {
    let mut indexer = indexer(reader_with_sale(ContractState::default()));
    indexer.process(&purchase(10, 0, 100, 10)).await.unwrap();

    let sale = indexer.storage().get_crowdsale(&SALE).await.unwrap().unwrap();
    assert!(sale.token.is_unavailable());
    assert!(sale.wallet.is_unavailable());
    assert!(indexer.storage().get_erc20(&TOKEN).await.unwrap().is_none());
    assert!(!indexer.storage().has_account(&SALE_WALLET).await.unwrap());
}

#[tokio::test]
async fn test_purchase_above_ledger_supply_is_still_recorded() {
    let mut indexer = indexer(reader());
    indexer.process(&purchase(10, 0, 100, 10)).await.unwrap();

    // the sale was topped up by a plain transfer the ledger never saw
    let outcome = indexer.process(&purchase(11, 0, 450, 45)).await.unwrap();
    assert!(matches!(outcome, ProcessOutcome::Applied(_)));

    let sale = indexer.storage().get_crowdsale(&SALE).await.unwrap().unwrap();
    assert!(sale.tokens_available.is_unavailable());
    assert_eq!(sale.initial_supply, Observed::Available(amount(500)));
    assert_eq!(sale.funds_raised, amount(55));

    indexer.process(&purchase(12, 0, 10, 1)).await.unwrap();

    let storage = indexer.storage();
    let sale = storage.get_crowdsale(&SALE).await.unwrap().unwrap();
    assert!(sale.tokens_available.is_unavailable());
    assert_eq!(sale.funds_raised, amount(56));
    assert!(storage
        .get_event_record(EventRecordKind::TokenPurchase, &EventId::new(11, 0))
        .await
        .unwrap()
        .is_some());
    assert_eq!(
        storage
            .count_event_records(EventRecordKind::TokenPurchase)
            .await
            .unwrap(),
        3
    );
}

#[tokio::test]
async fn test_mixed_case_addresses_share_one_account() {
    let mut indexer = indexer(reader());
    indexer.process(&purchase(10, 0, 100, 10)).await.unwrap();

    let upper: Address = ALICE.to_hex().to_uppercase().replacen("0X", "0x", 1).parse().unwrap();
    assert_eq!(upper, ALICE);
    assert!(indexer.storage().has_account(&upper).await.unwrap());
    let account = indexer.storage().get_account(&upper).await.unwrap().unwrap();
    assert_eq!(account.id.to_hex(), format!("0x{}", "aa".repeat(20)));
    assert_eq!(account.role, None);
}
