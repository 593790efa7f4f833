//! Registry of tradable pairs with their precision and minimum order size.

use crate::core::errors::ExchangeError;
use crate::exchanges::btce::validation::unrecognized_pair;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Static description of one trading pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PairSpec {
    /// `<base>_<quote>`, e.g. `btc_usd`
    pub name: &'static str,
    /// Maximum fractional digits accepted for rates and amounts
    pub max_digits: u32,
    /// Smallest amount an order may have
    pub min_order: Decimal,
}

impl PairSpec {
    const fn new(name: &'static str, max_digits: u32, min_order: Decimal) -> Self {
        Self {
            name,
            max_digits,
            min_order,
        }
    }

    pub fn base(&self) -> &'static str {
        self.name.split_once('_').map_or(self.name, |(base, _)| base)
    }

    pub fn quote(&self) -> &'static str {
        self.name.split_once('_').map_or("", |(_, quote)| quote)
    }
}

pub const CURRENCIES: [&str; 10] = [
    "btc", "usd", "rur", "ltc", "nmc", "eur", "nvc", "ppc", "cnh", "gbp",
];

static PAIRS: [PairSpec; 22] = [
    PairSpec::new("btc_usd", 3, dec!(0.01)),
    PairSpec::new("btc_rur", 5, dec!(0.01)),
    PairSpec::new("btc_eur", 5, dec!(0.01)),
    PairSpec::new("btc_cnh", 2, dec!(0.01)),
    PairSpec::new("btc_gbp", 5, dec!(0.01)),
    PairSpec::new("ltc_btc", 5, dec!(0.1)),
    PairSpec::new("ltc_usd", 6, dec!(0.1)),
    PairSpec::new("ltc_rur", 5, dec!(0.1)),
    PairSpec::new("ltc_eur", 3, dec!(0.1)),
    PairSpec::new("ltc_cnh", 2, dec!(0.1)),
    PairSpec::new("ltc_gbp", 3, dec!(0.1)),
    PairSpec::new("nmc_btc", 5, dec!(0.1)),
    PairSpec::new("nmc_usd", 3, dec!(0.1)),
    PairSpec::new("nvc_btc", 5, dec!(0.1)),
    PairSpec::new("nvc_usd", 3, dec!(0.1)),
    PairSpec::new("usd_rur", 5, dec!(0.1)),
    PairSpec::new("usd_cnh", 4, dec!(0.1)),
    PairSpec::new("eur_usd", 5, dec!(0.1)),
    PairSpec::new("eur_rur", 5, dec!(0.1)),
    PairSpec::new("gbp_usd", 4, dec!(0.1)),
    PairSpec::new("ppc_btc", 5, dec!(0.1)),
    PairSpec::new("ppc_usd", 3, dec!(0.1)),
];

/// All pairs in registry order
pub fn pairs() -> impl Iterator<Item = &'static PairSpec> {
    PAIRS.iter()
}

pub fn currencies() -> &'static [&'static str] {
    &CURRENCIES
}

/// Exact, case-sensitive lookup
pub fn spec_for(pair: &str) -> Option<&'static PairSpec> {
    PAIRS.iter().find(|spec| spec.name == pair)
}

pub fn is_valid(pair: &str) -> bool {
    spec_for(pair).is_some()
}

pub fn digits_for(pair: &str) -> Result<u32, ExchangeError> {
    spec_for(pair)
        .map(|spec| spec.max_digits)
        .ok_or_else(|| unrecognized_pair(pair))
}

pub fn min_order_for(pair: &str) -> Result<Decimal, ExchangeError> {
    spec_for(pair)
        .map(|spec| spec.min_order)
        .ok_or_else(|| unrecognized_pair(pair))
}
