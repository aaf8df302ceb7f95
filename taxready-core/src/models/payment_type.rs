use serde::{Deserialize, Serialize};

/// Categories of payment subject to withholding tax.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentType {
    ProfessionalServices,
    Consultancy,
    TechnicalServices,
    Contracts,
    Supplies,
    Rent,
    Dividends,
    Interest,
    Royalties,
}

impl PaymentType {
    pub const ALL: [PaymentType; 9] = [
        Self::ProfessionalServices,
        Self::Consultancy,
        Self::TechnicalServices,
        Self::Contracts,
        Self::Supplies,
        Self::Rent,
        Self::Dividends,
        Self::Interest,
        Self::Royalties,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ProfessionalServices => "professional_services",
            Self::Consultancy => "consultancy",
            Self::TechnicalServices => "technical_services",
            Self::Contracts => "contracts",
            Self::Supplies => "supplies",
            Self::Rent => "rent",
            Self::Dividends => "dividends",
            Self::Interest => "interest",
            Self::Royalties => "royalties",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "professional_services" => Some(Self::ProfessionalServices),
            "consultancy" => Some(Self::Consultancy),
            "technical_services" => Some(Self::TechnicalServices),
            "contracts" => Some(Self::Contracts),
            "supplies" => Some(Self::Supplies),
            "rent" => Some(Self::Rent),
            "dividends" => Some(Self::Dividends),
            "interest" => Some(Self::Interest),
            "royalties" => Some(Self::Royalties),
            _ => None,
        }
    }
}
