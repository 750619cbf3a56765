use crate::entities::staff_entity;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 员工角色；除 waiter / bartender 外的角色 (manager, admin ...) 不受限制
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StaffRole {
    Waiter,
    Bartender,
    Other(String),
}

impl StaffRole {
    pub fn from_db(role: &str) -> Self {
        match role.trim().to_ascii_lowercase().as_str() {
            "waiter" => StaffRole::Waiter,
            "bartender" => StaffRole::Bartender,
            _ => StaffRole::Other(role.to_string()),
        }
    }
}

impl std::fmt::Display for StaffRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StaffRole::Waiter => write!(f, "waiter"),
            StaffRole::Bartender => write!(f, "bartender"),
            StaffRole::Other(role) => write!(f, "{role}"),
        }
    }
}

/// 已认证且在员工表中存在的调用者
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub staff_id: String,
    pub role: StaffRole,
    pub name: String,
}

impl From<staff_entity::Model> for Actor {
    fn from(m: staff_entity::Model) -> Self {
        Self {
            role: StaffRole::from_db(&m.role),
            staff_id: m.user_id,
            name: m.staff_name,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StaffResponse {
    pub user_id: String,
    pub role: String,
    pub staff_name: String,
    pub created_at: DateTime<Utc>,
}

impl From<staff_entity::Model> for StaffResponse {
    fn from(m: staff_entity::Model) -> Self {
        Self {
            user_id: m.user_id,
            role: m.role,
            staff_name: m.staff_name,
            created_at: m.created_at,
        }
    }
}
