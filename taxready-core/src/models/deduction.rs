use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::round_half_up;

/// Every kind of amount that can reduce taxable income.
///
/// Kinds backed by a [`DeductionRule`] take their rate and cap from the
/// rule table; `MortgageInterest` and `BusinessExpenses` are user-declared
/// and have no rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeductionKind {
    Pension,
    Nhf,
    Nhis,
    RentRelief,
    LifeAssurance,
    MortgageInterest,
    VoluntaryPension,
    BusinessExpenses,
}

impl DeductionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pension => "pension",
            Self::Nhf => "nhf",
            Self::Nhis => "nhis",
            Self::RentRelief => "rent_relief",
            Self::LifeAssurance => "life_assurance",
            Self::MortgageInterest => "mortgage_interest",
            Self::VoluntaryPension => "voluntary_pension",
            Self::BusinessExpenses => "business_expenses",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pension" => Some(Self::Pension),
            "nhf" => Some(Self::Nhf),
            "nhis" => Some(Self::Nhis),
            "rent_relief" => Some(Self::RentRelief),
            "life_assurance" => Some(Self::LifeAssurance),
            "mortgage_interest" => Some(Self::MortgageInterest),
            "voluntary_pension" => Some(Self::VoluntaryPension),
            "business_expenses" => Some(Self::BusinessExpenses),
            _ => None,
        }
    }

    /// Statement label used when no rule supplies one.
    pub fn default_name(&self) -> &'static str {
        match self {
            Self::Pension => "Pension",
            Self::Nhf => "National Housing Fund",
            Self::Nhis => "NHIS",
            Self::RentRelief => "Rent Relief",
            Self::LifeAssurance => "Life Assurance",
            Self::MortgageInterest => "Mortgage Interest",
            Self::VoluntaryPension => "Voluntary Pension",
            Self::BusinessExpenses => "Business Expenses",
        }
    }
}

/// The income component a deduction rule's rate is applied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeductionBasis {
    /// Basic salary plus housing and transport allowances.
    PensionableEarnings,
    BasicSalary,
    GrossIncome,
    /// An amount the taxpayer declares directly, such as a premium paid.
    DeclaredAmount,
}

/// A statutory deduction or relief: `min(basis × basis_rate, cap)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionRule {
    pub name: String,
    pub basis: DeductionBasis,
    pub basis_rate: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cap: Option<Decimal>,
}

impl DeductionRule {
    /// Applies the rule to a basis amount.
    ///
    /// A basis of zero or less yields zero; the result is rounded to kobo
    /// and then truncated at the cap, if any.
    pub fn apply(
        &self,
        basis_amount: Decimal,
    ) -> Decimal {
        if basis_amount <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        let amount = round_half_up(basis_amount * self.basis_rate);
        match self.cap {
            Some(cap) => amount.min(cap),
            None => amount,
        }
    }
}

/// The named deduction rules of one tax year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionRules {
    pub pension: DeductionRule,
    pub nhf: DeductionRule,
    pub nhis: DeductionRule,
    pub rent_relief: DeductionRule,
    pub life_assurance: DeductionRule,
    pub voluntary_pension: DeductionRule,
}

impl DeductionRules {
    /// Returns the rule backing `kind`, or `None` for declared-only kinds.
    pub fn get(
        &self,
        kind: DeductionKind,
    ) -> Option<&DeductionRule> {
        match kind {
            DeductionKind::Pension => Some(&self.pension),
            DeductionKind::Nhf => Some(&self.nhf),
            DeductionKind::Nhis => Some(&self.nhis),
            DeductionKind::RentRelief => Some(&self.rent_relief),
            DeductionKind::LifeAssurance => Some(&self.life_assurance),
            DeductionKind::VoluntaryPension => Some(&self.voluntary_pension),
            DeductionKind::MortgageInterest | DeductionKind::BusinessExpenses => None,
        }
    }

    /// Iterates over `(kind, rule)` pairs in statement order.
    pub fn iter(&self) -> impl Iterator<Item = (DeductionKind, &DeductionRule)> {
        [
            (DeductionKind::Pension, &self.pension),
            (DeductionKind::Nhf, &self.nhf),
            (DeductionKind::Nhis, &self.nhis),
            (DeductionKind::RentRelief, &self.rent_relief),
            (DeductionKind::LifeAssurance, &self.life_assurance),
            (DeductionKind::VoluntaryPension, &self.voluntary_pension),
        ]
        .into_iter()
    }
}
