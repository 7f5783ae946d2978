//! Largest token accounts → owner wallets → ranked top holders.
//!
//! Flow:
//! 1. `getTokenLargestAccounts` (finalized) and `getTokenSupply`
//! 2. Normalize balances to UI units, drop empty accounts
//! 3. `getMultipleAccounts` on the token accounts, read the owner at bytes [32,64)
//! 4. Sum by owner, rank, keep the top ten
//! 5. `getMultipleAccounts` on the owners for their SOL balance
//!
//! Any RPC failure degrades to an empty snapshot; undecodable accounts are
//! dropped one by one.

use std::collections::HashMap;
use std::sync::Arc;

use log::{error, info, warn};

use crate::holders::{HolderSnapshot, OwnerBalance, RankedHolder, SupplyInfo, TokenHolding};
use crate::rpc::types::{AccountInfo, TokenAccountBalance, TokenAmount};
use crate::rpc::{ChainQuery, RpcError};
use crate::utils::address::{decode_address, ADDRESS_LEN};

pub const MAX_HOLDERS: usize = 10;
pub const LAMPORTS_PER_SOL: f64 = 1_000_000_000.0;

/// Owner field of the SPL token account layout.
const OWNER_OFFSET: usize = 32;

pub struct HolderAggregator {
    chain: Arc<dyn ChainQuery>,
}

impl HolderAggregator {
    pub fn new(chain: Arc<dyn ChainQuery>) -> Self {
        Self { chain }
    }

    /// Top holders and supply for `mint`. Never fails: RPC errors are logged
    /// and reported as an empty snapshot with no supply.
    pub async fn aggregate(&self, mint: &str) -> HolderSnapshot {
        match self.try_aggregate(mint).await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                error!("❌ [HOLDERS] Failed to fetch holders/supply for {}: {}", mint, e);
                HolderSnapshot::empty()
            }
        }
    }

    async fn try_aggregate(&self, mint: &str) -> Result<HolderSnapshot, RpcError> {
        let largest = self.chain.token_largest_accounts(mint).await?;
        let supply_raw = self.chain.token_supply(mint).await?;

        let decimals = resolve_decimals(&supply_raw, &largest);
        let supply = SupplyInfo {
            total_supply: ui_amount(supply_raw.ui_amount, supply_raw.amount.as_deref(), decimals),
            decimals,
        };

        let holdings = normalize_holdings(&largest, decimals);
        if holdings.is_empty() {
            warn!("⚠️ [HOLDERS] No token account with a positive balance for {}", mint);
            return Ok(HolderSnapshot {
                holders: Vec::new(),
                supply: Some(supply),
            });
        }

        let addresses: Vec<String> = holdings
            .iter()
            .map(|h| h.account_address.clone())
            .collect();
        let accounts = self.chain.multiple_accounts(&addresses).await?;

        let owners = aggregate_by_owner(&holdings, &accounts);
        if owners.is_empty() {
            warn!("⚠️ [HOLDERS] Could not decode any owner for {}", mint);
            return Ok(HolderSnapshot {
                holders: Vec::new(),
                supply: Some(supply),
            });
        }

        let top = rank_owners(owners);
        let owner_addresses: Vec<String> = top.iter().map(|o| o.owner_address.clone()).collect();
        let wallets = self.chain.multiple_accounts(&owner_addresses).await?;

        let holders: Vec<RankedHolder> = top
            .into_iter()
            .enumerate()
            .map(|(idx, owner)| RankedHolder {
                rank: idx + 1,
                owner_address: owner.owner_address,
                token_balance: owner.total_balance,
                native_balance: wallets
                    .get(idx)
                    .and_then(Option::as_ref)
                    .and_then(|w| w.lamports)
                    .map(|lamports| lamports as f64 / LAMPORTS_PER_SOL),
            })
            .collect();

        info!(
            "🏦 [HOLDERS] {} owners ranked for {} ({} token accounts)",
            holders.len(),
            mint,
            holdings.len()
        );

        Ok(HolderSnapshot {
            holders,
            supply: Some(supply),
        })
    }
}

/// Supply decimals, else the first holder's, else 0.
pub fn resolve_decimals(supply: &TokenAmount, largest: &[TokenAccountBalance]) -> u8 {
    [supply.decimals, largest.first().and_then(|h| h.decimals)]
        .into_iter()
        .flatten()
        .next()
        .unwrap_or(0)
}

/// The node's UI amount when given, else the raw integer amount scaled by `decimals`.
pub fn ui_amount(ui: Option<f64>, raw: Option<&str>, decimals: u8) -> Option<f64> {
    ui.or_else(|| {
        raw.and_then(|r| r.parse::<f64>().ok())
            .map(|amount| amount / 10f64.powi(decimals as i32))
    })
}

/// Holdings in UI units; accounts with a non-positive or non-finite balance are dropped.
pub fn normalize_holdings(largest: &[TokenAccountBalance], decimals: u8) -> Vec<TokenHolding> {
    largest
        .iter()
        .filter_map(|h| {
            let account_decimals = h.decimals.unwrap_or(decimals);
            let balance = ui_amount(h.ui_amount, h.amount.as_deref(), account_decimals)?;
            (balance.is_finite() && balance > 0.0).then(|| TokenHolding {
                account_address: h.address.clone(),
                balance,
                decimals: account_decimals,
            })
        })
        .collect()
}

/// Owner wallet of a token account, `None` for missing or malformed payloads.
pub fn owner_of(account: Option<&AccountInfo>) -> Option<String> {
    let bytes = account?.bytes()?;
    let owner = bytes.get(OWNER_OFFSET..OWNER_OFFSET + ADDRESS_LEN)?;
    decode_address(owner).ok()
}

/// Sum holdings per decoded owner, keeping first-seen order. `accounts` is
/// index-aligned with `holdings`.
pub fn aggregate_by_owner(holdings: &[TokenHolding], accounts: &[Option<AccountInfo>]) -> Vec<OwnerBalance> {
    let mut owners: Vec<OwnerBalance> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    let resolved = holdings.iter().enumerate().filter_map(|(idx, holding)| {
        let owner = owner_of(accounts.get(idx).and_then(Option::as_ref))?;
        Some((owner, holding.balance))
    });

    for (owner, balance) in resolved {
        match index.get(&owner) {
            Some(&pos) => owners[pos].total_balance += balance,
            None => {
                index.insert(owner.clone(), owners.len());
                owners.push(OwnerBalance {
                    owner_address: owner,
                    total_balance: balance,
                });
            }
        }
    }

    owners
}

/// Descending by balance (stable on ties), truncated to [`MAX_HOLDERS`].
pub fn rank_owners(mut owners: Vec<OwnerBalance>) -> Vec<OwnerBalance> {
    owners.sort_by(|a, b| b.total_balance.total_cmp(&a.total_balance));
    owners.truncate(MAX_HOLDERS);
    owners
}
