//! 参与记录存储操作

use super::SeaOrmStorage;
use crate::entity::accounts::Entity as Accounts;
use crate::entity::participations::{ActiveModel, Column, Entity as Participations};
use crate::entity::tasks::Entity as Tasks;
use crate::entity::users::Entity as Users;
use crate::errors::{CollectError, Result};
use crate::models::participations::{
    entities::{Participation, ParticipationLabel},
    requests::{CreateParticipationRequest, ParticipationListQuery, UpdateParticipationRequest},
};
use crate::utils::validate::validate_submit_count;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    /// 创建参与记录（每个账户在每个任务中至多一条）
    pub async fn create_participation_impl(
        &self,
        req: CreateParticipationRequest,
    ) -> Result<Participation> {
        if self
            .get_participation_impl(req.account_id, req.task_id)
            .await?
            .is_some()
        {
            return Err(CollectError::conflict(format!(
                "账户 {} 已参与任务 {}",
                req.account_id, req.task_id
            )));
        }

        let model = ActiveModel {
            account_id: Set(req.account_id),
            task_id: Set(req.task_id),
            admission: Set(req.admission),
            submit_count: Set(0),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| CollectError::from_db("创建参与记录失败", e))?;

        Ok(result.into_participation())
    }

    /// 通过 ID 获取参与记录
    pub async fn get_participation_by_id_impl(&self, id: i64) -> Result<Option<Participation>> {
        let result = Participations::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| CollectError::database_operation(format!("查询参与记录失败: {e}")))?;

        Ok(result.map(|m| m.into_participation()))
    }

    /// 按 (账户, 任务) 获取参与记录
    pub async fn get_participation_impl(
        &self,
        account_id: i64,
        task_id: i64,
    ) -> Result<Option<Participation>> {
        let result = Participations::find()
            .filter(
                Condition::all()
                    .add(Column::AccountId.eq(account_id))
                    .add(Column::TaskId.eq(task_id)),
            )
            .order_by_asc(Column::Id)
            .one(&self.db)
            .await
            .map_err(|e| CollectError::database_operation(format!("查询参与记录失败: {e}")))?;

        Ok(result.map(|m| m.into_participation()))
    }

    /// 列出参与记录
    pub async fn list_participations_impl(
        &self,
        query: ParticipationListQuery,
    ) -> Result<Vec<Participation>> {
        let mut select = Participations::find();

        if let Some(account_id) = query.account_id {
            select = select.filter(Column::AccountId.eq(account_id));
        }
        if let Some(task_id) = query.task_id {
            select = select.filter(Column::TaskId.eq(task_id));
        }
        if let Some(admission) = query.admission {
            select = select.filter(Column::Admission.eq(admission));
        }

        let results = select
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| {
                CollectError::database_operation(format!("查询参与记录列表失败: {e}"))
            })?;

        Ok(results.into_iter().map(|m| m.into_participation()).collect())
    }

    /// 更新参与记录
    pub async fn update_participation_impl(
        &self,
        id: i64,
        update: UpdateParticipationRequest,
    ) -> Result<Option<Participation>> {
        if let Some(count) = update.submit_count {
            validate_submit_count(count).map_err(CollectError::validation)?;
        }

        let Some(existing) = Participations::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| CollectError::database_operation(format!("查询参与记录失败: {e}")))?
        else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.into();
        if let Some(admission) = update.admission {
            model.admission = Set(admission);
        }
        if let Some(count) = update.submit_count {
            model.submit_count = Set(count);
        }

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| CollectError::database_operation(format!("更新参与记录失败: {e}")))?;

        Ok(Some(result.into_participation()))
    }

    /// 删除参与记录
    pub async fn delete_participation_impl(&self, id: i64) -> Result<bool> {
        let result = Participations::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| CollectError::database_operation(format!("删除参与记录失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 参与记录的展示标签
    pub async fn get_participation_label_impl(
        &self,
        id: i64,
    ) -> Result<Option<ParticipationLabel>> {
        let Some(participation) = Participations::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| CollectError::database_operation(format!("查询参与记录失败: {e}")))?
        else {
            return Ok(None);
        };

        let account = Accounts::find_by_id(participation.account_id)
            .find_also_related(Users)
            .one(&self.db)
            .await
            .map_err(|e| CollectError::database_operation(format!("查询账户失败: {e}")))?;
        let task = Tasks::find_by_id(participation.task_id)
            .one(&self.db)
            .await
            .map_err(|e| CollectError::database_operation(format!("查询任务失败: {e}")))?;

        let account = account
            .and_then(|(_, user)| user)
            .map(|user| user.username)
            .unwrap_or_default();
        let task = task.map(|t| t.name).unwrap_or_default();

        Ok(Some(ParticipationLabel { account, task }))
    }
}
