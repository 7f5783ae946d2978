//! Whale concentration of the ranked holder list.
//!
//! Rank 1 is taken to be the liquidity pool and is left out of both shares.
//! This is a heuristic: the account is never checked on-chain.

use strum_macros::Display;

use crate::holders::RankedHolder;

const HIGH_RISK_TOP1: f64 = 40.0;
const HIGH_RISK_TOP10: f64 = 90.0;
const CONCENTRATED_TOP1: f64 = 20.0;
const CONCENTRATED_TOP10: f64 = 75.0;

const LP_ONLY_LABEL: &str = "⚠️ Only LP account, no holder data";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum RiskTier {
    #[strum(serialize = "🟢 Balanced")]
    Balanced,
    #[strum(serialize = "⚠️ Concentrated")]
    Concentrated,
    #[strum(serialize = "☠️ High whale risk")]
    HighRisk,
    #[strum(serialize = "⚠️ No data")]
    NoData,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConcentrationResult {
    /// Percent of supply held by the largest non-LP owner.
    pub top1_share: Option<f64>,
    /// Percent of supply held by ranks 2..=10.
    pub top10_share: Option<f64>,
    pub risk_tier: RiskTier,
    /// Only the LP position was present.
    pub lp_only: bool,
}

impl ConcentrationResult {
    fn no_data(lp_only: bool) -> Self {
        Self {
            top1_share: None,
            top10_share: None,
            risk_tier: RiskTier::NoData,
            lp_only,
        }
    }

    /// Text for the "Distribution Quality" field.
    pub fn label(&self) -> String {
        if self.lp_only {
            LP_ONLY_LABEL.to_string()
        } else {
            self.risk_tier.to_string()
        }
    }
}

pub fn analyze(holders: &[RankedHolder], supply: Option<f64>) -> ConcentrationResult {
    let supply = match supply {
        Some(s) if s.is_finite() && s > 0.0 => s,
        _ => return ConcentrationResult::no_data(false),
    };
    if holders.is_empty() {
        return ConcentrationResult::no_data(false);
    }

    let non_lp = &holders[1..];
    let Some(top) = non_lp.first() else {
        return ConcentrationResult::no_data(true);
    };

    let top1 = top.token_balance;
    let top10: f64 = non_lp.iter().take(10).map(|h| h.token_balance).sum();

    let top1_share = top1 / supply * 100.0;
    let top10_share = top10 / supply * 100.0;

    ConcentrationResult {
        top1_share: Some(top1_share),
        top10_share: Some(top10_share),
        risk_tier: classify(top1_share, top10_share),
        lp_only: false,
    }
}

pub fn classify(top1_share: f64, top10_share: f64) -> RiskTier {
    if top1_share > HIGH_RISK_TOP1 || top10_share > HIGH_RISK_TOP10 {
        RiskTier::HighRisk
    } else if top1_share > CONCENTRATED_TOP1 || top10_share > CONCENTRATED_TOP10 {
        RiskTier::Concentrated
    } else {
        RiskTier::Balanced
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn holders(amounts: &[f64]) -> Vec<RankedHolder> {
        amounts
            .iter()
            .enumerate()
            .map(|(idx, &amount)| RankedHolder {
                rank: idx + 1,
                owner_address: format!("owner{idx}"),
                token_balance: amount,
                native_balance: None,
            })
            .collect()
    }

    fn approx(a: Option<f64>, b: f64) -> bool {
        a.map(|a| (a - b).abs() < 1e-9).unwrap_or(false)
    }

    #[test]
    fn test_no_data_cases() {
        let h = holders(&[500.0, 300.0]);

        assert_eq!(analyze(&[], Some(1_000.0)).risk_tier, RiskTier::NoData);
        assert_eq!(analyze(&h, Some(0.0)).risk_tier, RiskTier::NoData);
        assert_eq!(analyze(&h, Some(-1.0)).risk_tier, RiskTier::NoData);
        assert_eq!(analyze(&h, None).risk_tier, RiskTier::NoData);
        assert_eq!(analyze(&h, Some(f64::NAN)).risk_tier, RiskTier::NoData);

        let r = analyze(&h, None);
        assert_eq!(r.top1_share, None);
        assert_eq!(r.top10_share, None);
        assert_eq!(r.label(), "⚠️ No data");
    }

    #[test]
    fn test_lp_only() {
        let r = analyze(&holders(&[900.0]), Some(1_000.0));
        assert_eq!(r.risk_tier, RiskTier::NoData);
        assert!(r.lp_only);
        assert_eq!(r.top1_share, None);
        assert_eq!(r.label(), "⚠️ Only LP account, no holder data");
    }

    #[test]
    fn test_excludes_rank_one() {
        let r = analyze(&holders(&[500.0, 300.0, 100.0]), Some(1_000.0));
        assert!(approx(r.top1_share, 30.0));
        assert!(approx(r.top10_share, 40.0));
        assert_eq!(r.risk_tier, RiskTier::Concentrated);
        assert_eq!(r.label(), "⚠️ Concentrated");
    }

    #[test]
    fn test_top10_sums_all_non_lp() {
        let r = analyze(&holders(&[1_000.0; 10]), Some(100_000.0));
        assert!(approx(r.top1_share, 1.0));
        assert!(approx(r.top10_share, 9.0));
        assert_eq!(r.risk_tier, RiskTier::Balanced);
    }

    #[test]
    fn test_classification_priority() {
        assert_eq!(classify(41.0, 50.0), RiskTier::HighRisk);
        assert_eq!(classify(10.0, 91.0), RiskTier::HighRisk);
        assert_eq!(classify(40.0, 90.0), RiskTier::Concentrated);
        assert_eq!(classify(21.0, 30.0), RiskTier::Concentrated);
        assert_eq!(classify(5.0, 76.0), RiskTier::Concentrated);
        assert_eq!(classify(20.0, 75.0), RiskTier::Balanced);
        assert_eq!(classify(0.0, 0.0), RiskTier::Balanced);
    }

    #[test]
    fn test_labels() {
        assert_eq!(RiskTier::Balanced.to_string(), "🟢 Balanced");
        assert_eq!(RiskTier::HighRisk.to_string(), "☠️ High whale risk");
    }

    #[test]
    fn test_is_deterministic() {
        let h = holders(&[700.0, 250.0, 120.0, 80.0]);
        assert_eq!(analyze(&h, Some(2_000.0)), analyze(&h, Some(2_000.0)));
    }
}
