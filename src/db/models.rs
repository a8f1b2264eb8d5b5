use serde::Serialize;

/// Panel account row.
#[derive(Debug, Clone)]
pub struct DbUser {
    pub id: i64,
    pub email: String,
    pub password_hash: String,
}

/// Admin listing row: lead joined with its consumption data.
/// Consumption fields are optional since the JOIN is a LEFT JOIN.
#[derive(Debug, Clone, Serialize)]
pub struct LeadSummary {
    pub id: i64,
    pub name: String,
    pub city: Option<String>,
    pub state: Option<String>,
    pub bill_value: Option<f64>,
}
