//! 账户存储操作

use super::SeaOrmStorage;
use crate::entity::accounts::{ActiveModel, Column, Entity as Accounts, Model};
use crate::entity::users::{Entity as Users, Model as UserModel};
use crate::errors::{CollectError, Result};
use crate::models::accounts::{
    entities::Account,
    requests::{AccountListQuery, CreateAccountRequest, UpdateAccountRequest},
};
use crate::utils::validate::{
    ACCOUNT_ADDRESS_MAX, ACCOUNT_CONTACT_MAX, ACCOUNT_NAME_MAX, validate_required_text,
    validate_text,
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

/// 账户记录与其身份合并为业务模型
fn join_identity((account, user): (Model, Option<UserModel>)) -> Account {
    let username = user.map(|u| u.username).unwrap_or_default();
    account.into_account(username)
}

impl SeaOrmStorage {
    /// 创建账户
    pub async fn create_account_impl(&self, req: CreateAccountRequest) -> Result<Account> {
        validate_required_text("name", &req.name, ACCOUNT_NAME_MAX)
            .map_err(CollectError::validation)?;
        validate_text("contact", &req.contact, ACCOUNT_CONTACT_MAX)
            .map_err(CollectError::validation)?;
        validate_text("address", &req.address, ACCOUNT_ADDRESS_MAX)
            .map_err(CollectError::validation)?;

        let identity = self
            .get_identity_by_id_impl(req.user_id)
            .await?
            .ok_or_else(|| CollectError::not_found(format!("身份 {} 不存在", req.user_id)))?;

        // 每个身份只能对应一个账户
        if self.get_account_by_user_id_impl(req.user_id).await?.is_some() {
            return Err(CollectError::conflict(format!(
                "身份 {} 已经绑定账户",
                identity.username
            )));
        }

        let model = ActiveModel {
            user_id: Set(req.user_id),
            name: Set(req.name),
            contact: Set(req.contact),
            birth: Set(req.birth),
            gender: Set(req.gender.to_string()),
            address: Set(req.address),
            role: Set(req.role.to_string()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| CollectError::from_db("创建账户失败", e))?;

        Ok(result.into_account(identity.username))
    }

    /// 通过 ID 获取账户
    pub async fn get_account_by_id_impl(&self, id: i64) -> Result<Option<Account>> {
        let result = Accounts::find_by_id(id)
            .find_also_related(Users)
            .one(&self.db)
            .await
            .map_err(|e| CollectError::database_operation(format!("查询账户失败: {e}")))?;

        Ok(result.map(join_identity))
    }

    /// 通过身份 ID 获取账户
    pub async fn get_account_by_user_id_impl(&self, user_id: i64) -> Result<Option<Account>> {
        let result = Accounts::find()
            .filter(Column::UserId.eq(user_id))
            .find_also_related(Users)
            .one(&self.db)
            .await
            .map_err(|e| CollectError::database_operation(format!("查询账户失败: {e}")))?;

        Ok(result.map(join_identity))
    }

    /// 列出账户
    pub async fn list_accounts_impl(&self, query: AccountListQuery) -> Result<Vec<Account>> {
        let mut select = Accounts::find();

        // 角色筛选
        if let Some(role) = query.role {
            select = select.filter(Column::Role.eq(role.to_string()));
        }

        let results = select
            .order_by_asc(Column::Id)
            .find_also_related(Users)
            .all(&self.db)
            .await
            .map_err(|e| CollectError::database_operation(format!("查询账户列表失败: {e}")))?;

        Ok(results.into_iter().map(join_identity).collect())
    }

    /// 更新账户
    pub async fn update_account_impl(
        &self,
        id: i64,
        update: UpdateAccountRequest,
    ) -> Result<Option<Account>> {
        let Some((existing, user)) = Accounts::find_by_id(id)
            .find_also_related(Users)
            .one(&self.db)
            .await
            .map_err(|e| CollectError::database_operation(format!("查询账户失败: {e}")))?
        else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.into();

        if let Some(name) = update.name {
            validate_required_text("name", &name, ACCOUNT_NAME_MAX)
                .map_err(CollectError::validation)?;
            model.name = Set(name);
        }
        if let Some(contact) = update.contact {
            validate_text("contact", &contact, ACCOUNT_CONTACT_MAX)
                .map_err(CollectError::validation)?;
            model.contact = Set(contact);
        }
        if let Some(birth) = update.birth {
            model.birth = Set(Some(birth));
        }
        if let Some(gender) = update.gender {
            model.gender = Set(gender.to_string());
        }
        if let Some(address) = update.address {
            validate_text("address", &address, ACCOUNT_ADDRESS_MAX)
                .map_err(CollectError::validation)?;
            model.address = Set(address);
        }
        if let Some(role) = update.role {
            model.role = Set(role.to_string());
        }

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| CollectError::database_operation(format!("更新账户失败: {e}")))?;

        Ok(Some(join_identity((result, user))))
    }

    /// 删除账户
    pub async fn delete_account_impl(&self, id: i64) -> Result<bool> {
        let result = Accounts::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| CollectError::database_operation(format!("删除账户失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
