use regex::Regex;
use serde::Deserialize;
use std::str::FromStr;
use std::sync::LazyLock;

use crate::error::VoltError;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email regex is valid"));

/// Electrical supply type offered on the simulation form.
/// Wire values are the Brazilian utility terms; the payload carries the
/// raw string so an out-of-set value surfaces through `validate` like
/// any other field error instead of failing deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupplyType {
    SinglePhase,
    TwoPhase,
    ThreePhase,
}

impl SupplyType {
    pub const WIRE_VALUES: [&'static str; 3] = ["Monofásico", "Bifásico", "Trifásico"];

    pub fn as_str(&self) -> &'static str {
        match self {
            SupplyType::SinglePhase => "Monofásico",
            SupplyType::TwoPhase => "Bifásico",
            SupplyType::ThreePhase => "Trifásico",
        }
    }
}

impl FromStr for SupplyType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Monofásico" => Ok(SupplyType::SinglePhase),
            "Bifásico" => Ok(SupplyType::TwoPhase),
            "Trifásico" => Ok(SupplyType::ThreePhase),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConsumptionInput {
    pub monthly_bill: f64,
    pub city: String,
    pub state: String,
    pub supply_type: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LeadSubmission {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub cpf: String,
    pub consumption: ConsumptionInput,
}

impl LeadSubmission {
    /// Runs every field check and reports all violations at once.
    pub fn validate(&self) -> Result<(), VoltError> {
        let mut problems = Vec::new();

        if self.name.trim().chars().count() < 3 {
            problems.push("name must have at least 3 characters".to_string());
        }
        if !is_valid_email(&self.email) {
            problems.push("email is not a valid address".to_string());
        }
        if digit_count(&self.phone) < 10 {
            problems.push("phone must have at least 10 digits".to_string());
        }
        if !is_valid_cpf(&self.cpf) {
            problems.push("cpf must be exactly 11 digits".to_string());
        }

        let c = &self.consumption;
        if !c.monthly_bill.is_finite() || c.monthly_bill < 0.0 {
            problems.push("monthly_bill must be a non-negative amount".to_string());
        }
        if c.city.trim().chars().count() < 2 {
            problems.push("city must have at least 2 characters".to_string());
        }
        if !is_valid_uf(&c.state) {
            problems.push("state must be a 2-letter UF code".to_string());
        }
        if SupplyType::from_str(&c.supply_type).is_err() {
            problems.push(format!(
                "supply_type must be one of {}",
                SupplyType::WIRE_VALUES.join(", ")
            ));
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(VoltError::Validation(problems.join("; ")))
        }
    }
}

pub fn is_valid_email(s: &str) -> bool {
    EMAIL_RE.is_match(s)
}

/// CPF is the 11-digit Brazilian taxpayer id. Only shape is checked,
/// not the verification digits.
pub fn is_valid_cpf(s: &str) -> bool {
    s.len() == 11 && s.chars().all(|c| c.is_ascii_digit())
}

pub fn is_valid_uf(s: &str) -> bool {
    s.len() == 2 && s.chars().all(|c| c.is_ascii_alphabetic())
}

fn digit_count(s: &str) -> usize {
    s.chars().filter(|c| c.is_ascii_digit()).count()
}
