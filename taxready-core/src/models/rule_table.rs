//! The versioned rule table for one tax year.
//!
//! A [`TaxYearConfig`] is plain data as written in a TOML document. It only
//! becomes usable once [`RuleTable::new`] has checked the band structure and
//! every rate, cap and threshold; engines accept nothing but a [`RuleTable`].

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::models::{DeductionKind, DeductionRule, DeductionRules, PaymentType, TaxBand};

const NIGERIA_2026_TOML: &str = include_str!("../../data/nigeria_2026.toml");

/// Errors raised while loading or validating a rule table.
///
/// These are start-up failures, not per-calculation conditions.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("rule table could not be parsed: {0}")]
    Parse(String),

    #[error("rule table has no tax bands")]
    NoBands,

    #[error("first tax band must start at 0, starts at {0}")]
    FirstBandNotAtZero(Decimal),

    #[error("tax band {index} has upper bound {upper} not above its lower bound {lower}")]
    InvertedBand {
        index: usize,
        lower: Decimal,
        upper: Decimal,
    },

    #[error("tax band {index} starts at {found} but the previous band ends at {expected}")]
    NonContiguousBands {
        index: usize,
        expected: Decimal,
        found: Decimal,
    },

    #[error("tax band {0} is unbounded but is not the last band")]
    UnboundedBandNotLast(usize),

    #[error("the top tax band must be unbounded, ends at {0}")]
    TopBandBounded(Decimal),

    #[error("{name} rate must be between 0 and 1, got {rate}")]
    InvalidRate { name: String, rate: Decimal },

    #[error("{name} cap must be non-negative, got {cap}")]
    NegativeCap { name: String, cap: Decimal },

    #[error("{name} threshold must be non-negative, got {value}")]
    NegativeThreshold { name: &'static str, value: Decimal },

    #[error("unknown withholding payment type '{0}'")]
    UnknownPaymentType(String),
}

/// Monetary thresholds that drive flags and the comparison recommendation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thresholds {
    /// Net-income differences within this amount are reported as comparable.
    pub comparison_neutral_zone: Decimal,
    /// Annual turnover above which VAT registration is required.
    pub vat_registration: Decimal,
    /// Annual turnover at or below which a business counts as a small company.
    pub small_company_turnover: Decimal,
}

/// Withholding-tax rates keyed by [`PaymentType::as_str`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithholdingRates {
    /// Rate used for payment types the table does not list.
    pub default_rate: Decimal,
    #[serde(default)]
    pub rates: BTreeMap<String, Decimal>,
}

impl WithholdingRates {
    pub fn rate_for(
        &self,
        payment_type: PaymentType,
    ) -> Decimal {
        self.rates
            .get(payment_type.as_str())
            .copied()
            .unwrap_or(self.default_rate)
    }
}

/// Raw, unvalidated contents of a rule table document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxYearConfig {
    pub tax_year: i32,
    pub name: String,
    pub bands: Vec<TaxBand>,
    pub deductions: DeductionRules,
    pub thresholds: Thresholds,
    pub withholding: WithholdingRates,
}

/// Validated, read-only tax rules for one year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RuleTable {
    config: TaxYearConfig,
}

impl RuleTable {
    /// Validates `config` and wraps it.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError`] if the bands are empty, do not start at
    /// zero, overlap, leave gaps, are not ascending, or do not end with an
    /// unbounded band; or if any rate lies outside `[0, 1]`, any cap is
    /// negative, or any threshold is negative.
    pub fn new(config: TaxYearConfig) -> Result<Self, ConfigurationError> {
        validate_bands(&config.bands)?;

        for (kind, rule) in config.deductions.iter() {
            validate_deduction_rule(kind, rule)?;
        }

        let thresholds = &config.thresholds;
        for (name, value) in [
            ("comparison neutral zone", thresholds.comparison_neutral_zone),
            ("VAT registration", thresholds.vat_registration),
            ("small company turnover", thresholds.small_company_turnover),
        ] {
            if value < Decimal::ZERO {
                return Err(ConfigurationError::NegativeThreshold { name, value });
            }
        }

        validate_rate("default withholding", config.withholding.default_rate)?;
        for (code, rate) in &config.withholding.rates {
            if PaymentType::parse(code).is_none() {
                return Err(ConfigurationError::UnknownPaymentType(code.clone()));
            }
            validate_rate(code, *rate)?;
        }

        debug!(
            tax_year = config.tax_year,
            bands = config.bands.len(),
            "rule table validated"
        );
        Ok(Self { config })
    }

    /// Parses and validates a TOML rule table document.
    ///
    /// # Example
    ///
    /// ```
    /// use taxready_core::{ConfigurationError, RuleTable};
    ///
    /// let err = RuleTable::from_toml_str("tax_year = 2027").unwrap_err();
    /// assert!(matches!(err, ConfigurationError::Parse(_)));
    /// ```
    pub fn from_toml_str(document: &str) -> Result<Self, ConfigurationError> {
        let config: TaxYearConfig =
            toml::from_str(document).map_err(|e| ConfigurationError::Parse(e.to_string()))?;
        Self::new(config)
    }

    /// The rules of the Nigeria Tax Act 2025, effective 1 January 2026.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use taxready_core::RuleTable;
    ///
    /// let rules = RuleTable::nigeria_2026().unwrap();
    /// assert_eq!(rules.tax_year(), 2026);
    /// assert_eq!(rules.bands().len(), 6);
    /// assert_eq!(rules.bands()[0].upper_bound, Some(dec!(800000)));
    /// ```
    pub fn nigeria_2026() -> Result<Self, ConfigurationError> {
        Self::from_toml_str(NIGERIA_2026_TOML)
    }

    pub fn tax_year(&self) -> i32 {
        self.config.tax_year
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    /// Bands in ascending order; the last one is unbounded.
    pub fn bands(&self) -> &[TaxBand] {
        &self.config.bands
    }

    pub fn deductions(&self) -> &DeductionRules {
        &self.config.deductions
    }

    /// Looks up a deduction rule by its snake_case name, e.g. `"rent_relief"`.
    pub fn deduction_by_name(
        &self,
        name: &str,
    ) -> Option<&DeductionRule> {
        DeductionKind::parse(name).and_then(|kind| self.config.deductions.get(kind))
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.config.thresholds
    }

    pub fn withholding(&self) -> &WithholdingRates {
        &self.config.withholding
    }
}

fn validate_rate(
    name: &str,
    rate: Decimal,
) -> Result<(), ConfigurationError> {
    if rate < Decimal::ZERO || rate > Decimal::ONE {
        return Err(ConfigurationError::InvalidRate {
            name: name.to_string(),
            rate,
        });
    }
    Ok(())
}

fn validate_deduction_rule(
    kind: DeductionKind,
    rule: &DeductionRule,
) -> Result<(), ConfigurationError> {
    validate_rate(kind.as_str(), rule.basis_rate)?;
    if let Some(cap) = rule.cap {
        if cap < Decimal::ZERO {
            return Err(ConfigurationError::NegativeCap {
                name: kind.as_str().to_string(),
                cap,
            });
        }
    }
    Ok(())
}

fn validate_bands(bands: &[TaxBand]) -> Result<(), ConfigurationError> {
    let first = bands.first().ok_or(ConfigurationError::NoBands)?;
    if first.lower_bound != Decimal::ZERO {
        return Err(ConfigurationError::FirstBandNotAtZero(first.lower_bound));
    }

    let last_index = bands.len() - 1;
    let mut previous_upper: Option<Decimal> = None;

    for (index, band) in bands.iter().enumerate() {
        validate_rate(&format!("tax band {index}"), band.rate)?;

        if let Some(expected) = previous_upper {
            if band.lower_bound != expected {
                return Err(ConfigurationError::NonContiguousBands {
                    index,
                    expected,
                    found: band.lower_bound,
                });
            }
        }

        match band.upper_bound {
            Some(upper) if upper <= band.lower_bound => {
                return Err(ConfigurationError::InvertedBand {
                    index,
                    lower: band.lower_bound,
                    upper,
                });
            }
            Some(upper) if index == last_index => {
                return Err(ConfigurationError::TopBandBounded(upper));
            }
            Some(upper) => previous_upper = Some(upper),
            None if index != last_index => {
                return Err(ConfigurationError::UnboundedBandNotLast(index));
            }
            None => {}
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::models::DeductionBasis;

    fn band(
        lower: Decimal,
        upper: Option<Decimal>,
        rate: Decimal,
    ) -> TaxBand {
        TaxBand {
            lower_bound: lower,
            upper_bound: upper,
            rate,
            label: String::new(),
        }
    }

    fn rule(
        basis: DeductionBasis,
        rate: Decimal,
        cap: Option<Decimal>,
    ) -> DeductionRule {
        DeductionRule {
            name: "test".to_string(),
            basis,
            basis_rate: rate,
            cap,
        }
    }

    fn test_config() -> TaxYearConfig {
        TaxYearConfig {
            tax_year: 2026,
            name: "test".to_string(),
            bands: vec![
                band(dec!(0), Some(dec!(800000)), dec!(0)),
                band(dec!(800000), Some(dec!(3000000)), dec!(0.15)),
                band(dec!(3000000), None, dec!(0.18)),
            ],
            deductions: DeductionRules {
                pension: rule(DeductionBasis::PensionableEarnings, dec!(0.08), None),
                nhf: rule(DeductionBasis::BasicSalary, dec!(0.025), Some(dec!(2400))),
                nhis: rule(DeductionBasis::BasicSalary, dec!(0.05), None),
                rent_relief: rule(DeductionBasis::GrossIncome, dec!(0.20), Some(dec!(500000))),
                life_assurance: rule(DeductionBasis::DeclaredAmount, dec!(1), Some(dec!(100000))),
                voluntary_pension: rule(DeductionBasis::GrossIncome, dec!(0.08), None),
            },
            thresholds: Thresholds {
                comparison_neutral_zone: dec!(1000),
                vat_registration: dec!(25000000),
                small_company_turnover: dec!(100000000),
            },
            withholding: WithholdingRates {
                default_rate: dec!(0.05),
                rates: BTreeMap::from([("consultancy".to_string(), dec!(0.10))]),
            },
        }
    }

    // =========================================================================
    // band validation tests
    // =========================================================================

    #[test]
    fn new_accepts_contiguous_bands() {
        assert!(RuleTable::new(test_config()).is_ok());
    }

    #[test]
    fn new_rejects_empty_bands() {
        let mut config = test_config();
        config.bands.clear();

        assert_eq!(RuleTable::new(config), Err(ConfigurationError::NoBands));
    }

    #[test]
    fn new_rejects_first_band_not_at_zero() {
        let mut config = test_config();
        config.bands[0].lower_bound = dec!(100);

        assert_eq!(
            RuleTable::new(config),
            Err(ConfigurationError::FirstBandNotAtZero(dec!(100)))
        );
    }

    #[test]
    fn new_rejects_gap_between_bands() {
        let mut config = test_config();
        config.bands[1].lower_bound = dec!(900000);

        assert_eq!(
            RuleTable::new(config),
            Err(ConfigurationError::NonContiguousBands {
                index: 1,
                expected: dec!(800000),
                found: dec!(900000),
            })
        );
    }

    #[test]
    fn new_rejects_unsorted_bands() {
        let mut config = test_config();
        config.bands.swap(1, 2);

        assert!(matches!(
            RuleTable::new(config),
            Err(ConfigurationError::NonContiguousBands { index: 1, .. })
        ));
    }

    #[test]
    fn new_rejects_inverted_band() {
        let mut config = test_config();
        config.bands[1].upper_bound = Some(dec!(700000));

        assert_eq!(
            RuleTable::new(config),
            Err(ConfigurationError::InvertedBand {
                index: 1,
                lower: dec!(800000),
                upper: dec!(700000),
            })
        );
    }

    #[test]
    fn new_rejects_unbounded_band_in_the_middle() {
        let mut config = test_config();
        config.bands[1].upper_bound = None;

        assert_eq!(
            RuleTable::new(config),
            Err(ConfigurationError::UnboundedBandNotLast(1))
        );
    }

    #[test]
    fn new_rejects_bounded_top_band() {
        let mut config = test_config();
        config.bands[2].upper_bound = Some(dec!(12000000));

        assert_eq!(
            RuleTable::new(config),
            Err(ConfigurationError::TopBandBounded(dec!(12000000)))
        );
    }

    #[test]
    fn new_rejects_band_rate_above_one() {
        let mut config = test_config();
        config.bands[2].rate = dec!(18);

        assert_eq!(
            RuleTable::new(config),
            Err(ConfigurationError::InvalidRate {
                name: "tax band 2".to_string(),
                rate: dec!(18),
            })
        );
    }

    // =========================================================================
    // deduction, threshold and withholding validation tests
    // =========================================================================

    #[test]
    fn new_rejects_negative_deduction_cap() {
        let mut config = test_config();
        config.deductions.nhf.cap = Some(dec!(-1));

        assert_eq!(
            RuleTable::new(config),
            Err(ConfigurationError::NegativeCap {
                name: "nhf".to_string(),
                cap: dec!(-1),
            })
        );
    }

    #[test]
    fn new_rejects_negative_threshold() {
        let mut config = test_config();
        config.thresholds.comparison_neutral_zone = dec!(-5);

        assert_eq!(
            RuleTable::new(config),
            Err(ConfigurationError::NegativeThreshold {
                name: "comparison neutral zone",
                value: dec!(-5),
            })
        );
    }

    #[test]
    fn new_rejects_withholding_rate_out_of_range() {
        let mut config = test_config();
        config.withholding.rates.insert("rent".to_string(), dec!(1.5));

        assert_eq!(
            RuleTable::new(config),
            Err(ConfigurationError::InvalidRate {
                name: "rent".to_string(),
                rate: dec!(1.5),
            })
        );
    }

    #[test]
    fn new_rejects_unknown_payment_type() {
        let mut config = test_config();
        config.withholding.rates.insert("bribes".to_string(), dec!(0.10));

        assert_eq!(
            RuleTable::new(config),
            Err(ConfigurationError::UnknownPaymentType("bribes".to_string()))
        );
    }

    #[test]
    fn rate_for_falls_back_to_default() {
        let rules = RuleTable::new(test_config()).unwrap();

        assert_eq!(rules.withholding().rate_for(PaymentType::Consultancy), dec!(0.10));
        assert_eq!(rules.withholding().rate_for(PaymentType::Supplies), dec!(0.05));
    }

    // =========================================================================
    // built-in 2026 table tests
    // =========================================================================

    #[test]
    fn nigeria_2026_loads_and_validates() {
        let rules = RuleTable::nigeria_2026().expect("built-in table must be valid");

        assert_eq!(rules.tax_year(), 2026);
        let bounds: Vec<_> = rules
            .bands()
            .iter()
            .map(|b| (b.lower_bound, b.upper_bound, b.rate))
            .collect();
        assert_eq!(
            bounds,
            vec![
                (dec!(0), Some(dec!(800000)), dec!(0.00)),
                (dec!(800000), Some(dec!(3000000)), dec!(0.15)),
                (dec!(3000000), Some(dec!(12000000)), dec!(0.18)),
                (dec!(12000000), Some(dec!(25000000)), dec!(0.21)),
                (dec!(25000000), Some(dec!(50000000)), dec!(0.23)),
                (dec!(50000000), None, dec!(0.25)),
            ]
        );
    }

    #[test]
    fn nigeria_2026_deduction_caps() {
        let rules = RuleTable::nigeria_2026().unwrap();
        let deductions = rules.deductions();

        assert_eq!(deductions.pension.basis_rate, dec!(0.08));
        assert_eq!(deductions.pension.cap, None);
        assert_eq!(deductions.nhf.cap, Some(dec!(2400)));
        assert_eq!(deductions.nhis.basis_rate, dec!(0.05));
        assert_eq!(deductions.rent_relief.cap, Some(dec!(500000)));
        assert_eq!(deductions.life_assurance.cap, Some(dec!(100000)));
        assert_eq!(rules.thresholds().comparison_neutral_zone, dec!(1000));
    }

    #[test]
    fn deduction_by_name_finds_rule_backed_kinds() {
        let rules = RuleTable::nigeria_2026().unwrap();

        assert_eq!(
            rules.deduction_by_name("rent_relief").map(|r| r.basis_rate),
            Some(dec!(0.20))
        );
        assert!(rules.deduction_by_name("mortgage_interest").is_none());
        assert!(rules.deduction_by_name("unknown").is_none());
    }

    #[test]
    fn from_toml_str_reports_validation_errors() {
        let document = NIGERIA_2026_TOML.replace("lower_bound = \"800000\"", "lower_bound = \"850000\"");

        assert!(matches!(
            RuleTable::from_toml_str(&document),
            Err(ConfigurationError::NonContiguousBands { index: 1, .. })
        ));
    }
}
