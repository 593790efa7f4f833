use crate::core::errors::ExchangeError;
use crate::core::types::{AmountInput, TradeSide};
use crate::exchanges::btce::formatting::format_currency;
use crate::exchanges::btce::pairs;

/// Error for a pair missing from the registry, suggesting the swapped form
/// when that one exists (`usd_btc` -> `btc_usd`)
pub(crate) fn unrecognized_pair(pair: &str) -> ExchangeError {
    if let Some((base, quote)) = pair.split_once('_') {
        let swapped = format!("{}_{}", quote, base);
        if pairs::is_valid(&swapped) {
            return ExchangeError::InvalidTradePair(format!(
                "Unrecognized pair: '{}' (did you mean {}?)",
                pair, swapped
            ));
        }
    }
    ExchangeError::InvalidTradePair(format!("Unrecognized pair: '{}'", pair))
}

pub fn validate_pair(pair: &str) -> Result<(), ExchangeError> {
    if pairs::is_valid(pair) {
        Ok(())
    } else {
        Err(unrecognized_pair(pair))
    }
}

/// Check an order against the registry before it is sent.
///
/// Checks run in order: pair, side, then the amount against the pair's
/// minimum. The rate only has to be convertible to a decimal.
pub fn validate_order(
    pair: &str,
    side: &str,
    rate: impl Into<AmountInput>,
    amount: impl Into<AmountInput>,
) -> Result<TradeSide, ExchangeError> {
    validate_pair(pair)?;
    let side = side.parse::<TradeSide>()?;

    let rate: AmountInput = rate.into();
    rate.to_decimal()?;
    let amount: AmountInput = amount.into();
    let value = amount.to_decimal()?;

    let minimum = pairs::min_order_for(pair)?;
    if value < minimum {
        return Err(ExchangeError::InvalidTradeAmount(format!(
            "Trade amount {} is too small, it should be >= {}",
            amount,
            format_currency(minimum, pair)?
        )));
    }

    Ok(side)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_valid_pair() {
        assert!(validate_pair("btc_usd").is_ok());
        assert!(validate_pair("ppc_usd").is_ok());
    }

    #[test]
    fn test_swapped_pair_suggestion() {
        let err = validate_pair("usd_btc").unwrap_err();
        assert!(matches!(err, ExchangeError::InvalidTradePair(_)));

        let message = err.to_string();
        assert!(message.contains("'usd_btc'"));
        assert!(message.contains("did you mean btc_usd?"));
    }

    #[test]
    fn test_unknown_pair_without_suggestion() {
        let err = validate_pair("doge_usd").unwrap_err();
        assert!(!err.to_string().contains("did you mean"));

        let err = validate_pair("btcusd").unwrap_err();
        assert!(err.to_string().contains("Unrecognized pair: 'btcusd'"));
    }

    #[test]
    fn test_only_first_separator_splits() {
        // "usd_btc_x" swaps to "btc_x_usd", which is not a pair
        let err = validate_pair("usd_btc_x").unwrap_err();
        assert!(!err.to_string().contains("did you mean"));
    }

    #[test]
    fn test_validate_order_ok() {
        let side = validate_order("btc_usd", "buy", dec!(600), dec!(0.01)).unwrap();
        assert_eq!(side, TradeSide::Buy);

        let side = validate_order("ltc_btc", "sell", "0.025", "1.5").unwrap();
        assert_eq!(side, TradeSide::Sell);
    }

    #[test]
    fn test_validate_order_checks_pair_first() {
        let err = validate_order("usd_btc", "hold", dec!(1), dec!(0)).unwrap_err();
        assert!(matches!(err, ExchangeError::InvalidTradePair(_)));
    }

    #[test]
    fn test_validate_order_bad_side() {
        let err = validate_order("btc_usd", "hold", dec!(1), dec!(1)).unwrap_err();
        assert!(matches!(err, ExchangeError::InvalidTradeType(_)));
        assert!(err.to_string().contains("'hold'"));
    }

    #[test]
    fn test_validate_order_amount_too_small() {
        let err = validate_order("btc_usd", "buy", dec!(600), dec!(0.005)).unwrap_err();
        assert!(matches!(err, ExchangeError::InvalidTradeAmount(_)));

        let message = err.to_string();
        assert!(message.contains("0.005"));
        assert!(message.contains(">= 0.01"));

        let err = validate_order("ltc_usd", "sell", dec!(3), dec!(0.09)).unwrap_err();
        assert!(err.to_string().contains(">= 0.1"));
    }

    #[test]
    fn test_validate_order_rejects_amount_beyond_precision() {
        let err = validate_order("btc_usd", "buy", "600", "0.0099999999999999999999999999999")
            .unwrap_err();
        assert!(matches!(err, ExchangeError::InvalidAmount(_)));
    }

    #[test]
    fn test_validate_order_bad_amount_text() {
        let err = validate_order("btc_usd", "buy", "abc", dec!(1)).unwrap_err();
        assert!(matches!(err, ExchangeError::InvalidAmount(_)));
    }
}
