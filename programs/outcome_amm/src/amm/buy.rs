//! Forward pricing: collateral in, outcome shares out.
//!
//! ```text
//! net        = A − ⌊A × fee_bps / 10 000⌋
//! r'_j       = r_j + net                     (mint net complete sets)
//! settled_i  = ⌈k / Π_{j≠i} r'_j⌉             (restore the invariant)
//! shares_out = r'_i − settled_i
//! ```

use anchor_lang::prelude::*;
use num_bigint::BigUint;

use super::impact::trade_impact_bps;
use super::reserves::{product, to_u64};
use super::{AmmError, FeeModel, Quote, Ratio, ReserveState, TradeSide};

/// Quote buying `outcome` (1-based) with `amount_in` gross collateral.
///
/// The settled reserve is rounded up, so the trader never receives the
/// fractional share left over by the division.
pub fn quote_buy(
    state: &ReserveState,
    outcome: u8,
    amount_in: u64,
    fees: FeeModel,
) -> Result<Quote> {
    state.validate()?;
    let index = state.outcome_index(outcome)?;

    if amount_in == 0 {
        return Ok(Quote::empty(TradeSide::Buy, outcome, *state));
    }

    let (fee, net) = fees.split(amount_in);
    require!(net > 0, AmmError::InvalidInput);

    let k = state.invariant();

    // Step 1: mint `net` complete sets into the pool
    let minted: Vec<u128> = state
        .reserves()
        .iter()
        .map(|&r| r as u128 + net as u128)
        .collect();

    // Step 2: shrink outcome i until the product is back to k
    let others = product(
        minted
            .iter()
            .enumerate()
            .filter(|(j, _)| *j != index)
            .map(|(_, &r)| r),
    );
    let target = BigUint::from(minted[index]);
    let settled = (k + &others - 1u32) / &others;

    // Step 3: pay out the difference, never the whole reserve. Guard only:
    // for net >= 1 the settled reserve is always in (0, target)
    require!(
        settled > BigUint::from(0u32) && settled < target,
        AmmError::InsufficientLiquidity
    );
    let shares_out = to_u64(&target - &settled)?;

    let mut after = Vec::with_capacity(minted.len());
    for (j, &r) in minted.iter().enumerate() {
        if j == index {
            after.push(to_u64(settled.clone())?);
        } else {
            after.push(u64::try_from(r).map_err(|_| error!(AmmError::NumericOverflow))?);
        }
    }
    let reserves_after = ReserveState::new(&after)?;

    let price_impact_bps = trade_impact_bps(state, index, TradeSide::Buy, net, shares_out)?;

    Ok(Quote {
        side: TradeSide::Buy,
        outcome,
        amount_in,
        amount_out: shares_out,
        gross_out: shares_out,
        fee,
        average_price: Ratio::new(net, shares_out),
        price_impact_bps,
        reserves_after,
        minimum_out: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(reserves: &[u64]) -> ReserveState {
        ReserveState::new(reserves).unwrap()
    }

    #[test]
    fn test_symmetric_binary_buy() {
        // k = 10¹², net = 98 000, settled = ⌈10¹² / 1 098 000⌉ = 910 747
        let quote = quote_buy(&state(&[1_000_000, 1_000_000]), 1, 100_000, FeeModel::default())
            .unwrap();

        assert_eq!(quote.fee, 2_000);
        assert_eq!(quote.amount_out, 187_253);
        assert_eq!(quote.reserves_after.reserves(), &[910_747, 1_098_000]);
        assert_eq!(quote.average_price, Ratio::new(98_000, 187_253));
        assert_eq!(quote.price_impact_bps, 467);
    }

    #[test]
    fn test_zero_amount_short_circuits() {
        let before = state(&[1_000_000, 1_000_000]);
        let quote = quote_buy(&before, 2, 0, FeeModel::default()).unwrap();

        assert_eq!(quote.amount_out, 0);
        assert_eq!(quote.fee, 0);
        assert_eq!(quote.average_price, Ratio::ZERO);
        assert_eq!(quote.reserves_after, before);
    }

    #[test]
    fn test_three_outcome_buy() {
        let quote = quote_buy(&state(&[500_000, 300_000, 200_000]), 3, 50_000, FeeModel::default())
            .unwrap();

        assert_eq!(quote.fee, 1_000);
        assert_eq!(quote.amount_out, 92_424);
        assert_eq!(quote.reserves_after.reserves(), &[549_000, 349_000, 156_576]);
    }

    #[test]
    fn test_four_outcome_buy() {
        let quote = quote_buy(
            &state(&[400_000, 300_000, 200_000, 100_000]),
            4,
            25_000,
            FeeModel::default(),
        )
        .unwrap();

        assert_eq!(quote.amount_out, 46_892);
        assert_eq!(
            quote.reserves_after.reserves(),
            &[424_500, 324_500, 224_500, 77_608]
        );
    }

    #[test]
    fn test_invariant_preserved_within_rounding() {
        let before = state(&[730_000, 1_250_000, 410_000]);
        let k = before.invariant();
        let quote = quote_buy(&before, 2, 333_333, FeeModel::default()).unwrap();

        let after = quote.reserves_after;
        let k_after = after.invariant();
        // Rounding the settled reserve up adds less than one unit of it
        assert!(k_after >= k);
        assert!(k_after - &k < after.product_excluding(1));
    }

    #[test]
    fn test_rejects_bad_outcome() {
        let reserves = state(&[1_000_000, 1_000_000]);
        let err = quote_buy(&reserves, 3, 1_000, FeeModel::default()).unwrap_err();
        assert_eq!(err, error!(AmmError::InvalidInput));
        assert!(quote_buy(&reserves, 0, 1_000, FeeModel::default()).is_err());
    }

    #[test]
    fn test_rejects_invalid_reserves() {
        let err = quote_buy(&ReserveState::default(), 1, 1_000, FeeModel::default()).unwrap_err();
        assert_eq!(err, error!(AmmError::InvalidReserves));
    }

    #[test]
    fn test_overflowing_reserves() {
        let err = quote_buy(&state(&[u64::MAX, u64::MAX]), 1, 1_000_000, FeeModel::default())
            .unwrap_err();
        assert_eq!(err, error!(AmmError::NumericOverflow));
    }

    #[test]
    fn test_strictly_increasing_without_fee() {
        let reserves = state(&[600_000, 900_000, 1_500_000]);
        let fees = FeeModel::new(0).unwrap();
        let mut last = 0;
        for amount in (1..2_000u64).step_by(37) {
            let shares = quote_buy(&reserves, 1, amount, fees).unwrap().amount_out;
            assert!(shares > last);
            last = shares;
        }
    }
}
