pub mod auth;
pub mod geo;
pub mod leads;
