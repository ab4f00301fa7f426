//! Settlement calculator.
//!
//! ```text
//! company = ⌊pooled × company_pct / 100⌋
//! pool    = ⌊pooled × pool_pct / 100⌋
//! winner  = pooled − company − pool
//! ```
//!
//! Rounding remainders land in the winner's cut, so
//! `winner + company + pool == pooled` exactly.

use duelvault_types::{DuelVaultError, Payout, Result, constants, validate_percentage};

fn cut(pooled: u64, pct: u8) -> Result<u64> {
    let amount = u128::from(pooled) * u128::from(pct) / constants::PERCENTAGE_DENOMINATOR;
    u64::try_from(amount)
        .map_err(|_| DuelVaultError::ArithmeticOverflow(format!("{pct}% of {pooled}")))
}

/// Split `pooled` into winner / company / pool amounts.
///
/// # Errors
/// - `InvalidPercentage` if either percentage exceeds 100
/// - `FeesExceedPool` if the two fee cuts together exceed `pooled`
pub fn settle(pooled: u64, company_pct: u8, pool_pct: u8) -> Result<Payout> {
    validate_percentage(company_pct)?;
    validate_percentage(pool_pct)?;

    let company_amount = cut(pooled, company_pct)?;
    let pool_amount = cut(pooled, pool_pct)?;
    let winner_amount = pooled
        .checked_sub(company_amount)
        .and_then(|rest| rest.checked_sub(pool_amount))
        .ok_or(DuelVaultError::FeesExceedPool {
            company_pct,
            pool_pct,
        })?;

    Ok(Payout {
        winner_amount,
        company_amount,
        pool_amount,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn five_and_five_percent_of_two_million() {
        let payout = settle(2_000_000, 5, 5).unwrap();
        assert_eq!(payout.company_amount, 100_000);
        assert_eq!(payout.pool_amount, 100_000);
        assert_eq!(payout.winner_amount, 1_800_000);
    }

    #[test]
    fn remainder_goes_to_winner() {
        // 3% of 999 = 29.97, 7% of 999 = 69.93
        let payout = settle(999, 3, 7).unwrap();
        assert_eq!(payout.company_amount, 29);
        assert_eq!(payout.pool_amount, 69);
        assert_eq!(payout.winner_amount, 901);
        assert_eq!(payout.total(), Some(999));
    }

    #[test]
    fn conserves_across_many_inputs() {
        for pooled in [0, 1, 2, 99, 101, 1_000_003, u64::MAX / 3, u64::MAX] {
            for (c, p) in [(0, 0), (5, 5), (10, 5), (33, 33), (50, 50), (1, 99), (100, 0)] {
                let payout = settle(pooled, c, p).unwrap();
                assert_eq!(payout.total(), Some(pooled), "pooled={pooled} c={c} p={p}");
            }
        }
    }

    #[test]
    fn zero_fees_pay_everything_to_winner() {
        let payout = settle(2_000_000, 0, 0).unwrap();
        assert_eq!(payout.winner_amount, 2_000_000);
        assert_eq!(payout.company_amount, 0);
        assert_eq!(payout.pool_amount, 0);
    }

    #[test]
    fn full_fees_leave_winner_nothing() {
        let payout = settle(2_000_000, 60, 40).unwrap();
        assert_eq!(payout.winner_amount, 0);
        assert_eq!(payout.company_amount, 1_200_000);
        assert_eq!(payout.pool_amount, 800_000);
    }

    #[test]
    fn fees_over_one_hundred_percent_rejected() {
        let err = settle(2_000_000, 60, 50).unwrap_err();
        assert!(matches!(
            err,
            DuelVaultError::FeesExceedPool {
                company_pct: 60,
                pool_pct: 50
            }
        ));
    }

    #[test]
    fn invalid_percentage_rejected() {
        assert!(matches!(
            settle(100, 101, 0),
            Err(DuelVaultError::InvalidPercentage { value: 101 })
        ));
        assert!(matches!(
            settle(100, 0, 200),
            Err(DuelVaultError::InvalidPercentage { value: 200 })
        ));
    }

    #[test]
    fn large_pool_does_not_overflow() {
        let payout = settle(u64::MAX, 100, 0).unwrap();
        assert_eq!(payout.company_amount, u64::MAX);
        assert_eq!(payout.winner_amount, 0);
    }
}
