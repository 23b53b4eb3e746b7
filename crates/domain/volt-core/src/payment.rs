use serde::{Deserialize, Serialize};

fn default_payment_status() -> String {
    "pending".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    #[serde(default)]
    pub payment_id: Option<String>,
    #[serde(default)]
    pub ride_id: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default, deserialize_with = "crate::lenient::number")]
    pub amount: f64,
    /// Payment method (`upi`, `card`, `cash`, `wallet`).
    #[serde(default)]
    pub mode: Option<String>,
    #[serde(default = "default_payment_status")]
    pub status: String,
    #[serde(default)]
    pub station_id: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
}
