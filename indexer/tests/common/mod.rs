// Shared fixtures for the ledger integration tests
#![allow(dead_code)]

use crowdsale_common::{
    address::{Address, TxHash},
    amount::Amount,
    event::{ContractEvent, EventKind, EventMeta},
};
use crowdsale_indexer::core::{
    indexer::Indexer,
    reader::{ContractState, StaticContractReader},
    storage::SledStorage,
};

pub const SALE: Address = Address::new([0xc5; 20]);
pub const TOKEN: Address = Address::new([0xee; 20]);
pub const SALE_WALLET: Address = Address::new([0x3a; 20]);
pub const VAULT: Address = Address::new([0x7a; 20]);
pub const VESTING_WALLET: Address = Address::new([0x4b; 20]);
pub const OWNER: Address = Address::new([0x0b; 20]);
pub const ALICE: Address = Address::new([0xaa; 20]);
pub const BOB: Address = Address::new([0xbb; 20]);

pub fn amount(value: u64) -> Amount {
    Amount::from(value)
}

pub fn meta(address: Address, block_number: u64, log_index: u64) -> EventMeta {
    let mut hash = [0u8; 32];
    hash[..8].copy_from_slice(&block_number.to_be_bytes());
    EventMeta {
        address,
        transaction_hash: TxHash::new(hash),
        block_number,
        log_index,
        timestamp: 1_700_000_000 + block_number * 12,
    }
}

pub fn purchase(block: u64, log: u64, token_amount: u64, value: u64) -> ContractEvent {
    ContractEvent::new(
        meta(SALE, block, log),
        EventKind::TokensPurchased {
            purchaser: ALICE,
            beneficiary: BOB,
            amount: amount(token_amount),
            value: amount(value),
        },
    )
}

pub fn lock_in(block: u64, log: u64, release_time: u64, token_amount: u64) -> ContractEvent {
    ContractEvent::new(
        meta(VAULT, block, log),
        EventKind::VestingLockedIn {
            beneficiary: BOB,
            release_time: amount(release_time),
            token_amount: amount(token_amount),
        },
    )
}

pub fn release(block: u64, log: u64, release_time: u64, token_amount: u64) -> ContractEvent {
    ContractEvent::new(
        meta(VAULT, block, log),
        EventKind::VestingReleased {
            beneficiary: BOB,
            release_time: amount(release_time),
            token_amount: amount(token_amount),
        },
    )
}

pub fn ether_released(block: u64, log: u64, value: u64) -> ContractEvent {
    ContractEvent::new(
        meta(VESTING_WALLET, block, log),
        EventKind::EtherReleased {
            amount: amount(value),
        },
    )
}

pub fn erc20_released(block: u64, log: u64, value: u64) -> ContractEvent {
    ContractEvent::new(
        meta(VESTING_WALLET, block, log),
        EventKind::Erc20Released {
            token: TOKEN,
            amount: amount(value),
        },
    )
}

pub fn token_state() -> ContractState {
    ContractState {
        name: Some("Crowd Token".to_string()),
        symbol: Some("CRWD".to_string()),
        decimals: Some(18),
        ..Default::default()
    }
}

// Every contract answers, the sale has 400 tokens left after the first purchase
pub fn reader() -> StaticContractReader {
    reader_with_sale(ContractState {
        token: Some(TOKEN),
        wallet: Some(SALE_WALLET),
        tokens_available: Some(amount(400)),
        ..Default::default()
    })
}

pub fn reader_with_sale(sale: ContractState) -> StaticContractReader {
    StaticContractReader::default()
        .with_contract(SALE, sale)
        .with_contract(TOKEN, token_state())
        .with_contract(
            VAULT,
            ContractState {
                token: Some(TOKEN),
                ..Default::default()
            },
        )
        .with_contract(
            VESTING_WALLET,
            ContractState {
                start: Some(amount(1_700_000_000)),
                duration: Some(amount(31_536_000)),
                owner: Some(OWNER),
                ..Default::default()
            },
        )
}

pub fn indexer(reader: StaticContractReader) -> Indexer<SledStorage, StaticContractReader> {
    Indexer::new(SledStorage::temporary().unwrap(), reader)
}
