//! 身份存储操作

use super::SeaOrmStorage;
use crate::entity::users::{ActiveModel, Column, Entity as Users};
use crate::errors::{CollectError, Result};
use crate::models::users::{entities::Identity, requests::CreateIdentityRequest};
use crate::utils::validate::{validate_email, validate_username};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};

impl SeaOrmStorage {
    /// 创建身份
    pub async fn create_identity_impl(&self, req: CreateIdentityRequest) -> Result<Identity> {
        validate_username(&req.username).map_err(CollectError::validation)?;
        validate_email(&req.email).map_err(CollectError::validation)?;

        let model = ActiveModel {
            username: Set(req.username),
            email: Set(req.email),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| CollectError::from_db("创建身份失败", e))?;

        Ok(result.into_identity())
    }

    /// 通过 ID 获取身份
    pub async fn get_identity_by_id_impl(&self, id: i64) -> Result<Option<Identity>> {
        let result = Users::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| CollectError::database_operation(format!("查询身份失败: {e}")))?;

        Ok(result.map(|m| m.into_identity()))
    }

    /// 通过用户名获取身份
    pub async fn get_identity_by_username_impl(&self, username: &str) -> Result<Option<Identity>> {
        let result = Users::find()
            .filter(Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(|e| CollectError::database_operation(format!("查询身份失败: {e}")))?;

        Ok(result.map(|m| m.into_identity()))
    }

    /// 删除身份
    pub async fn delete_identity_impl(&self, id: i64) -> Result<bool> {
        let result = Users::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| CollectError::database_operation(format!("删除身份失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
