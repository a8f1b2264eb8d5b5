pub mod lead;

pub use lead::{ConsumptionInput, LeadSubmission, SupplyType};
