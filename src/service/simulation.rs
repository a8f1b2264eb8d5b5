use serde::Serialize;

/// Flat discount applied to the monthly bill by the energy plan.
pub const DISCOUNT_RATE: f64 = 0.25;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SavingsProjection {
    pub monthly: f64,
    pub one_year: f64,
    pub three_years: f64,
    pub five_years: f64,
}

/// Projects the savings over 12, 36 and 60 months for a given monthly bill.
pub fn project(monthly_bill: f64) -> SavingsProjection {
    let monthly = monthly_bill * DISCOUNT_RATE;
    SavingsProjection {
        monthly,
        one_year: monthly * 12.0,
        three_years: monthly * 36.0,
        five_years: monthly * 60.0,
    }
}
