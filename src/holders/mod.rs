//! Holder distribution: on-chain aggregation by owner and concentration scoring.

pub mod aggregator;
pub mod concentration;

pub use aggregator::HolderAggregator;
pub use concentration::{analyze, ConcentrationResult, RiskTier};

/// One token account from `getTokenLargestAccounts`, balance in UI units.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenHolding {
    pub account_address: String,
    pub balance: f64,
    pub decimals: u8,
}

/// Sum of every holding whose account decodes to `owner_address`.
#[derive(Debug, Clone, PartialEq)]
pub struct OwnerBalance {
    pub owner_address: String,
    pub total_balance: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RankedHolder {
    /// 1-based position in descending balance order.
    pub rank: usize,
    pub owner_address: String,
    pub token_balance: f64,
    /// Owner wallet SOL balance, absent when the lookup returned nothing.
    pub native_balance: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SupplyInfo {
    pub total_supply: Option<f64>,
    pub decimals: u8,
}

/// Result of [`HolderAggregator::aggregate`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HolderSnapshot {
    /// Top owners, at most ten.
    pub holders: Vec<RankedHolder>,
    /// `None` when a chain query failed.
    pub supply: Option<SupplyInfo>,
}

impl HolderSnapshot {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn total_supply(&self) -> Option<f64> {
        self.supply.and_then(|s| s.total_supply)
    }

    pub fn concentration(&self) -> ConcentrationResult {
        analyze(&self.holders, self.total_supply())
    }
}
