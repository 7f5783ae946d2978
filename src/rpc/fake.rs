//! In-memory chain used by the aggregator and pipeline tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use base64::Engine;

use crate::rpc::types::{AccountData, AccountInfo, TokenAccountBalance, TokenAmount};
use crate::rpc::{ChainQuery, RpcError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailAt {
    LargestAccounts,
    Supply,
    TokenAccounts,
    OwnerAccounts,
}

#[derive(Default)]
pub struct FakeChain {
    pub largest: Vec<TokenAccountBalance>,
    pub supply: TokenAmount,
    pub accounts: HashMap<String, AccountInfo>,
    pub fail_at: Option<FailAt>,
    multiple_calls: AtomicUsize,
}

impl FakeChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_supply(mut self, ui_amount: f64, decimals: u8) -> Self {
        self.supply = TokenAmount {
            amount: None,
            decimals: Some(decimals),
            ui_amount: Some(ui_amount),
        };
        self
    }

    /// Token account `address` holding `ui_amount`, owned by `owner`.
    pub fn with_holding(mut self, address: &str, ui_amount: f64, owner: [u8; 32]) -> Self {
        self.largest.push(balance(address, ui_amount));
        self.accounts
            .insert(address.to_string(), token_account(owner));
        self
    }

    /// Largest-accounts entry with no account payload behind it.
    pub fn with_orphan_holding(mut self, address: &str, ui_amount: f64) -> Self {
        self.largest.push(balance(address, ui_amount));
        self
    }

    pub fn with_wallet(mut self, owner: [u8; 32], lamports: u64) -> Self {
        self.accounts.insert(
            bs58::encode(owner).into_string(),
            AccountInfo {
                lamports: Some(lamports),
                data: Some(AccountData::Encoded(vec![String::new(), "base64".into()])),
            },
        );
        self
    }

    pub fn failing_at(mut self, stage: FailAt) -> Self {
        self.fail_at = Some(stage);
        self
    }

    fn fail(&self, stage: FailAt, method: &str) -> Result<(), RpcError> {
        if self.fail_at == Some(stage) {
            return Err(RpcError::Remote {
                method: method.to_string(),
                message: "node is behind".to_string(),
            });
        }
        Ok(())
    }
}

pub fn balance(address: &str, ui_amount: f64) -> TokenAccountBalance {
    TokenAccountBalance {
        address: address.to_string(),
        amount: None,
        decimals: Some(6),
        ui_amount: Some(ui_amount),
    }
}

/// SPL token account layout: mint [0,32), owner [32,64), amount and the rest after.
pub fn token_account(owner: [u8; 32]) -> AccountInfo {
    let mut data = vec![0u8; 165];
    data[..32].copy_from_slice(&[9u8; 32]);
    data[32..64].copy_from_slice(&owner);
    AccountInfo {
        lamports: Some(2_039_280),
        data: Some(AccountData::Encoded(vec![
            base64::engine::general_purpose::STANDARD.encode(&data),
            "base64".into(),
        ])),
    }
}

pub fn owner_key(seed: u8) -> [u8; 32] {
    let mut key = [seed; 32];
    key[0] = 0xA0 ^ seed;
    key
}

pub fn owner_address(seed: u8) -> String {
    bs58::encode(owner_key(seed)).into_string()
}

#[async_trait]
impl ChainQuery for FakeChain {
    async fn token_largest_accounts(&self, _mint: &str) -> Result<Vec<TokenAccountBalance>, RpcError> {
        self.fail(FailAt::LargestAccounts, "getTokenLargestAccounts")?;
        Ok(self.largest.clone())
    }

    async fn token_supply(&self, _mint: &str) -> Result<TokenAmount, RpcError> {
        self.fail(FailAt::Supply, "getTokenSupply")?;
        Ok(self.supply.clone())
    }

    async fn multiple_accounts(&self, addresses: &[String]) -> Result<Vec<Option<AccountInfo>>, RpcError> {
        let stage = match self.multiple_calls.fetch_add(1, Ordering::SeqCst) {
            0 => FailAt::TokenAccounts,
            _ => FailAt::OwnerAccounts,
        };
        self.fail(stage, "getMultipleAccounts")?;
        Ok(addresses
            .iter()
            .map(|a| self.accounts.get(a).cloned())
            .collect())
    }
}
