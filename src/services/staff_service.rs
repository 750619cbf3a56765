use crate::entities::staff_entity as staff;
use crate::error::{AppError, AppResult};
use crate::models::{Actor, StaffResponse};
use crate::utils::AuthenticatedSubject;
use sea_orm::{DatabaseConnection, EntityTrait};

#[derive(Clone)]
pub struct StaffService {
    pool: DatabaseConnection,
}

impl StaffService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    async fn lookup(&self, subject: &AuthenticatedSubject) -> AppResult<staff::Model> {
        staff::Entity::find_by_id(subject.0.clone())
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("staff record not found".to_string()))
    }

    /// 将已认证主体解析为员工 (角色 + 姓名)
    pub async fn resolve_actor(&self, subject: &AuthenticatedSubject) -> AppResult<Actor> {
        Ok(self.lookup(subject).await?.into())
    }

    pub async fn get_profile(&self, subject: &AuthenticatedSubject) -> AppResult<StaffResponse> {
        Ok(self.lookup(subject).await?.into())
    }
}
