use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Largest amount accepted in any input field: one quadrillion naira.
///
/// Keeps every sum and product the engines form well inside `Decimal`'s range.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(2_764_472_320, 232_830, 0, false, 0);

/// Errors raised for contradictory or out-of-range calculation inputs.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field} must be non-negative, got {value}")]
    NegativeAmount { field: &'static str, value: Decimal },

    #[error("{field} must not exceed {limit}, got {value}")]
    AmountTooLarge {
        field: &'static str,
        value: Decimal,
        limit: Decimal,
    },

    #[error("basic salary {basic_salary} exceeds gross annual income {gross_income}")]
    BasicSalaryExceedsGross {
        basic_salary: Decimal,
        gross_income: Decimal,
    },

    #[error("pensionable earnings {pensionable} exceed gross annual income {gross_income}")]
    SalaryComponentsExceedGross {
        pensionable: Decimal,
        gross_income: Decimal,
    },

    #[error("allowable expenses {expenses} exceed gross income {gross_income}")]
    ExpensesExceedGross {
        expenses: Decimal,
        gross_income: Decimal,
    },

    #[error("basic salary ratio must be between 0 and 1, got {0}")]
    InvalidBasicSalaryRatio(Decimal),
}

/// The two worker categories the engine can assess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Regime {
    /// Salaried employee taxed through Pay-As-You-Earn.
    Paye,
    /// Independent contractor or self-employed professional.
    Contractor,
}

impl Regime {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Paye => "paye",
            Self::Contractor => "contractor",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "paye" | "employee" => Some(Self::Paye),
            "contractor" | "self_employed" => Some(Self::Contractor),
            _ => None,
        }
    }
}

/// Switches for the statutory employee contributions.
///
/// A disabled contribution is treated as zero and left off the statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contributions {
    pub pension: bool,
    pub nhf: bool,
    pub nhis: bool,
}

impl Default for Contributions {
    fn default() -> Self {
        Self {
            pension: true,
            nhf: true,
            nhis: true,
        }
    }
}

/// Annual monetary figures for one calculation request.
///
/// `gross_annual_income` is total salary for an employee and gross contract
/// income for a contractor. Fields that do not apply to a regime are ignored
/// by that regime's engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IncomeInput {
    pub gross_annual_income: Decimal,

    // PAYE
    pub basic_salary: Decimal,
    pub housing_allowance: Decimal,
    pub transport_allowance: Decimal,
    pub mortgage_interest: Decimal,
    pub contributions: Contributions,

    // Both regimes
    pub annual_rent_paid: Decimal,
    pub life_assurance_premium: Decimal,

    // Contractor
    pub other_allowable_expenses: Decimal,
    pub voluntary_pension: Decimal,
    pub wht_credits: Decimal,
}

impl Default for IncomeInput {
    fn default() -> Self {
        Self {
            gross_annual_income: Decimal::ZERO,
            basic_salary: Decimal::ZERO,
            housing_allowance: Decimal::ZERO,
            transport_allowance: Decimal::ZERO,
            mortgage_interest: Decimal::ZERO,
            contributions: Contributions::default(),
            annual_rent_paid: Decimal::ZERO,
            life_assurance_premium: Decimal::ZERO,
            other_allowable_expenses: Decimal::ZERO,
            voluntary_pension: Decimal::ZERO,
            wht_credits: Decimal::ZERO,
        }
    }
}

impl IncomeInput {
    /// An employee with the given gross and basic salary and nothing else.
    pub fn salaried(
        gross_annual_income: Decimal,
        basic_salary: Decimal,
    ) -> Self {
        Self {
            gross_annual_income,
            basic_salary,
            ..Self::default()
        }
    }

    /// A contractor with the given gross contract income and business expenses.
    pub fn contract(
        gross_contract_income: Decimal,
        other_allowable_expenses: Decimal,
    ) -> Self {
        Self {
            gross_annual_income: gross_contract_income,
            other_allowable_expenses,
            ..Self::default()
        }
    }

    pub fn with_rent_paid(
        mut self,
        annual_rent_paid: Decimal,
    ) -> Self {
        self.annual_rent_paid = annual_rent_paid;
        self
    }

    pub fn with_life_assurance(
        mut self,
        premium: Decimal,
    ) -> Self {
        self.life_assurance_premium = premium;
        self
    }

    /// Basic salary plus housing and transport allowances.
    pub fn pensionable_earnings(&self) -> Decimal {
        self.basic_salary + self.housing_allowance + self.transport_allowance
    }

    /// Rejects any negative monetary field, or one above [`MAX_AMOUNT`].
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (field, value) in [
            ("gross annual income", self.gross_annual_income),
            ("basic salary", self.basic_salary),
            ("housing allowance", self.housing_allowance),
            ("transport allowance", self.transport_allowance),
            ("mortgage interest", self.mortgage_interest),
            ("annual rent paid", self.annual_rent_paid),
            ("life assurance premium", self.life_assurance_premium),
            ("other allowable expenses", self.other_allowable_expenses),
            ("voluntary pension", self.voluntary_pension),
            ("WHT credits", self.wht_credits),
        ] {
            if value < Decimal::ZERO {
                return Err(ValidationError::NegativeAmount { field, value });
            }
            if value > MAX_AMOUNT {
                return Err(ValidationError::AmountTooLarge {
                    field,
                    value,
                    limit: MAX_AMOUNT,
                });
            }
        }
        Ok(())
    }

    /// Checks the salary components against gross income.
    pub fn validate_salaried(&self) -> Result<(), ValidationError> {
        self.validate()?;
        if self.basic_salary > self.gross_annual_income {
            return Err(ValidationError::BasicSalaryExceedsGross {
                basic_salary: self.basic_salary,
                gross_income: self.gross_annual_income,
            });
        }
        let pensionable = self.pensionable_earnings();
        if pensionable > self.gross_annual_income {
            return Err(ValidationError::SalaryComponentsExceedGross {
                pensionable,
                gross_income: self.gross_annual_income,
            });
        }
        Ok(())
    }

    /// Checks declared business expenses against gross contract income.
    pub fn validate_contract(&self) -> Result<(), ValidationError> {
        self.validate()?;
        if self.other_allowable_expenses > self.gross_annual_income {
            return Err(ValidationError::ExpensesExceedGross {
                expenses: self.other_allowable_expenses,
                gross_income: self.gross_annual_income,
            });
        }
        Ok(())
    }
}
