//! Role Model
//!
//! Roles are a closed set. Every authorization decision goes through the
//! capability methods below — handlers never compare raw strings, which keeps
//! the access rules auditable in one place.

use serde::{Deserialize, Serialize};

/// User role (stored as lowercase text)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum Role {
    Admin,
    Operator,
    Courier,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Operator => "operator",
            Role::Courier => "courier",
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }

    /// Catalog and tent management: create/update/toggle products and tents,
    /// adjust stock.
    pub fn can_manage_catalog(&self) -> bool {
        matches!(self, Role::Admin | Role::Operator)
    }

    /// Hard deletes (products, tents) are admin-only.
    pub fn can_delete_resources(&self) -> bool {
        self.is_admin()
    }

    /// Review (list/approve/reject) inventory replenishment requests.
    pub fn can_review_inventory(&self) -> bool {
        matches!(self, Role::Admin | Role::Operator)
    }

    /// Submit inventory replenishment requests. 所有已登录角色都可以提交。
    pub fn can_request_inventory(&self) -> bool {
        matches!(self, Role::Admin | Role::Operator | Role::Courier)
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "operator" => Ok(Role::Operator),
            "courier" => Ok(Role::Courier),
            other => Err(format!("unknown role: {other}")),
        }
    }
}
