pub mod session;
pub mod simulation;
