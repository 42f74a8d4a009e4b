use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryHistoryEntry {
    #[serde(rename = "id")]
    pub identifier: String,
    #[serde(rename = "date")]
    pub queried_at_date: String,
    #[serde(rename = "time")]
    pub queried_at_time: String,
}
