//! 任务存储操作

use super::SeaOrmStorage;
use crate::entity::tasks::{ActiveModel, Column, Entity as Tasks};
use crate::errors::{CollectError, Result};
use crate::models::tasks::{
    entities::Task,
    requests::{CreateTaskRequest, TaskListQuery, UpdateTaskRequest},
};
use crate::utils::escape_like_pattern;
use crate::utils::validate::{DESCRIPTION_MAX, LABEL_MAX, validate_required_text, validate_text};
use sea_orm::sea_query::{Expr, ExprTrait, LikeExpr};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

fn validate_task_texts(
    name: Option<&str>,
    frequency: Option<&str>,
    description: Option<&str>,
    original_data_description: Option<&str>,
) -> Result<()> {
    if let Some(name) = name {
        validate_required_text("name", name, LABEL_MAX).map_err(CollectError::validation)?;
    }
    if let Some(frequency) = frequency {
        validate_text("minimal_upload_frequency", frequency, LABEL_MAX)
            .map_err(CollectError::validation)?;
    }
    if let Some(description) = description {
        validate_text("description", description, DESCRIPTION_MAX)
            .map_err(CollectError::validation)?;
    }
    if let Some(original) = original_data_description {
        validate_text("original_data_description", original, DESCRIPTION_MAX)
            .map_err(CollectError::validation)?;
    }
    Ok(())
}

impl SeaOrmStorage {
    /// 创建任务（名称全局唯一）
    pub async fn create_task_impl(&self, req: CreateTaskRequest) -> Result<Task> {
        validate_task_texts(
            Some(&req.name),
            Some(&req.minimal_upload_frequency),
            Some(&req.description),
            Some(&req.original_data_description),
        )?;

        if self.get_task_by_name_impl(&req.name).await?.is_some() {
            return Err(CollectError::conflict(format!("任务名称已存在: {}", req.name)));
        }

        let model = ActiveModel {
            name: Set(req.name),
            minimal_upload_frequency: Set(req.minimal_upload_frequency),
            activation_state: Set(req.activation_state),
            description: Set(req.description),
            original_data_description: Set(req.original_data_description),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| CollectError::from_db("创建任务失败", e))?;

        Ok(result.into_task())
    }

    /// 通过 ID 获取任务
    pub async fn get_task_by_id_impl(&self, id: i64) -> Result<Option<Task>> {
        let result = Tasks::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| CollectError::database_operation(format!("查询任务失败: {e}")))?;

        Ok(result.map(|m| m.into_task()))
    }

    /// 通过名称获取任务
    pub async fn get_task_by_name_impl(&self, name: &str) -> Result<Option<Task>> {
        let result = Tasks::find()
            .filter(Column::Name.eq(name))
            .one(&self.db)
            .await
            .map_err(|e| CollectError::database_operation(format!("查询任务失败: {e}")))?;

        Ok(result.map(|m| m.into_task()))
    }

    /// 列出任务
    pub async fn list_tasks_impl(&self, query: TaskListQuery) -> Result<Vec<Task>> {
        let mut select = Tasks::find();

        // 激活状态筛选
        if let Some(active) = query.activation_state {
            select = select.filter(Column::ActivationState.eq(active));
        }

        // 名称搜索
        if let Some(search) = query.search.as_deref().map(str::trim)
            && !search.is_empty()
        {
            let pattern = format!("%{}%", escape_like_pattern(search));
            select = select.filter(Expr::col(Column::Name).like(LikeExpr::new(pattern).escape('\\')));
        }

        let results = select
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| CollectError::database_operation(format!("查询任务列表失败: {e}")))?;

        Ok(results.into_iter().map(|m| m.into_task()).collect())
    }

    /// 更新任务
    pub async fn update_task_impl(
        &self,
        id: i64,
        update: UpdateTaskRequest,
    ) -> Result<Option<Task>> {
        validate_task_texts(
            update.name.as_deref(),
            update.minimal_upload_frequency.as_deref(),
            update.description.as_deref(),
            update.original_data_description.as_deref(),
        )?;

        let Some(existing) = Tasks::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| CollectError::database_operation(format!("查询任务失败: {e}")))?
        else {
            return Ok(None);
        };

        // 改名时检查唯一性
        if let Some(ref name) = update.name
            && *name != existing.name
            && self.get_task_by_name_impl(name).await?.is_some()
        {
            return Err(CollectError::conflict(format!("任务名称已存在: {name}")));
        }

        let mut model: ActiveModel = existing.into();
        if let Some(name) = update.name {
            model.name = Set(name);
        }
        if let Some(frequency) = update.minimal_upload_frequency {
            model.minimal_upload_frequency = Set(frequency);
        }
        if let Some(active) = update.activation_state {
            model.activation_state = Set(active);
        }
        if let Some(description) = update.description {
            model.description = Set(description);
        }
        if let Some(original) = update.original_data_description {
            model.original_data_description = Set(original);
        }

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| CollectError::from_db("更新任务失败", e))?;

        Ok(Some(result.into_task()))
    }

    /// 删除任务（级联删除参与记录、schema 与提交记录）
    pub async fn delete_task_impl(&self, id: i64) -> Result<bool> {
        let result = Tasks::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| CollectError::database_operation(format!("删除任务失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
