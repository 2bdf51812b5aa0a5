//! Tent Model

use serde::{Deserialize, Serialize};

/// Tent entity
///
/// `qr_code` holds the scan payload (the tent number); rendering an actual
/// image is the client's job.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Tent {
    pub id: i64,
    pub tent_number: String,
    pub qr_code: Option<String>,
    pub location_description: Option<String>,
    pub zone: Option<String>,
    pub capacity: i64,
    pub contact_name: Option<String>,
    pub contact_phone: Option<String>,
    pub notes: Option<String>,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create tent payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TentCreate {
    pub tent_number: String,
    pub location_description: Option<String>,
    pub zone: Option<String>,
    pub capacity: Option<i64>,
    pub contact_name: Option<String>,
    pub contact_phone: Option<String>,
    pub notes: Option<String>,
}

/// Partial update payload (COALESCE semantics)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TentUpdate {
    pub tent_number: Option<String>,
    pub location_description: Option<String>,
    pub zone: Option<String>,
    pub capacity: Option<i64>,
    pub contact_name: Option<String>,
    pub contact_phone: Option<String>,
    pub notes: Option<String>,
}
