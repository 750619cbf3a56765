use crate::entities::{drink_category_entity as categories, drink_entity as drinks};
use crate::error::{AppError, AppResult};
use crate::models::{CategoryResponse, DrinkResponse};
use sea_orm::{ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use std::collections::HashMap;

/// 饮品目录，只读
#[derive(Clone)]
pub struct CatalogService {
    pool: DatabaseConnection,
}

impl CatalogService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    pub async fn list_drinks(&self) -> AppResult<Vec<DrinkResponse>> {
        let list = drinks::Entity::find()
            .order_by_asc(drinks::Column::CategoryId)
            .order_by_asc(drinks::Column::Id)
            .all(&self.pool)
            .await?;
        Ok(list.into_iter().map(Into::into).collect())
    }

    pub async fn list_categories(&self) -> AppResult<Vec<CategoryResponse>> {
        let list = categories::Entity::find()
            .order_by_asc(categories::Column::Id)
            .all(&self.pool)
            .await?;
        Ok(list.into_iter().map(Into::into).collect())
    }

    pub async fn get_drink(&self, id: i64) -> AppResult<DrinkResponse> {
        drinks::Entity::find_by_id(id)
            .one(&self.pool)
            .await?
            .map(Into::into)
            .ok_or_else(|| AppError::NotFound(format!("Drink {id} not found")))
    }
}

/// 按 id 批量读取饮品；任一 id 不存在则返回 ValidationError
///
/// 可在事务内调用，保证建单/改单时饮品校验与写入处于同一事务
pub async fn drinks_by_ids<C: ConnectionTrait>(
    db: &C,
    ids: &[i64],
) -> AppResult<HashMap<i64, drinks::Model>> {
    let mut wanted: Vec<i64> = ids.to_vec();
    wanted.sort_unstable();
    wanted.dedup();

    let found: HashMap<i64, drinks::Model> = drinks::Entity::find()
        .filter(drinks::Column::Id.is_in(wanted.clone()))
        .all(db)
        .await?
        .into_iter()
        .map(|d| (d.id, d))
        .collect();

    if let Some(missing) = wanted.iter().find(|id| !found.contains_key(id)) {
        return Err(AppError::ValidationError(format!(
            "Drink {missing} does not exist"
        )));
    }

    Ok(found)
}
