use serde::{Deserialize, Serialize};

/// Data allowance, in gigabytes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DataPlan {
    /// Data used, as displayed by the portal
    pub used: f64,
    /// Size of the package
    pub total: f64,
}

/// Balance and data allowance read in one go. Never cached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountSnapshot {
    /// Balance in rubles
    pub balance: f64,
    pub data_plan: Option<DataPlan>,
}
