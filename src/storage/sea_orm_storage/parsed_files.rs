//! 解析文件（提交记录）存储操作

use super::SeaOrmStorage;
use crate::entity::parsed_files::{ActiveModel, Column, Entity as ParsedFiles};
use crate::entity::participations::{
    Column as ParticipationColumn, Entity as Participations, Model as ParticipationModel,
};
use crate::errors::{CollectError, Result};
use crate::models::parsed_files::{
    entities::{ParsedFile, RowStatistics},
    requests::{CreateParsedFileRequest, ParsedFileListQuery, UpdateParsedFileRequest},
};
use crate::models::participations::entities::Participation;
use crate::utils::validate::validate_grading_score;
use sea_orm::sea_query::{Expr, ExprTrait};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use tracing::{debug, info};

/// 保存当天的日期（每次写入都会刷新 grade_date）
fn today() -> chrono::NaiveDate {
    chrono::Utc::now().date_naive()
}

fn validate_record(
    grading_score: Option<i32>,
    statistics: Option<&RowStatistics>,
    start_date: Option<chrono::NaiveDate>,
    end_date: Option<chrono::NaiveDate>,
) -> Result<()> {
    if let Some(score) = grading_score {
        validate_grading_score(score).map_err(|e| {
            CollectError::validation(format!("{e} (got {score})"))
        })?;
    }
    if let Some(statistics) = statistics {
        statistics.validate().map_err(CollectError::validation)?;
    }
    if let (Some(start), Some(end)) = (start_date, end_date)
        && start > end
    {
        return Err(CollectError::validation(format!(
            "Collection window start {start} is after end {end}"
        )));
    }
    Ok(())
}

/// 按 (提交者, 任务) 查找第一条参与记录
async fn first_participation<C: ConnectionTrait>(
    conn: &C,
    account_id: i64,
    task_id: i64,
) -> Result<Option<ParticipationModel>> {
    Participations::find()
        .filter(ParticipationColumn::AccountId.eq(account_id))
        .filter(ParticipationColumn::TaskId.eq(task_id))
        .order_by_asc(ParticipationColumn::Id)
        .one(conn)
        .await
        .map_err(|e| CollectError::database_operation(format!("查询参与记录失败: {e}")))
}

async fn reload_participation<C: ConnectionTrait>(conn: &C, id: i64) -> Result<Participation> {
    Participations::find_by_id(id)
        .one(conn)
        .await
        .map_err(|e| CollectError::database_operation(format!("查询参与记录失败: {e}")))?
        .map(|m| m.into_participation())
        .ok_or_else(|| CollectError::not_found(format!("参与记录 {id} 不存在")))
}

fn new_active_model(req: CreateParsedFileRequest) -> ActiveModel {
    ActiveModel {
        submitter_id: Set(req.submitter_id),
        grader_id: Set(req.grader_id),
        task_id: Set(req.task_id),
        submit_number: Set(req.submit_number),
        start_date: Set(req.start_date),
        end_date: Set(req.end_date),
        total_tuple: Set(req.statistics.total_tuple),
        duplicated_tuple: Set(req.statistics.duplicated_tuple),
        null_ratio: Set(req.statistics.null_ratio),
        grading_score: Set(req.grading_score),
        pass_state: Set(req.pass_state),
        grading_end_date: Set(req.grading_end_date),
        grade_date: Set(today()),
        derived_schema_id: Set(req.derived_schema_id),
        file_original: Set(req.file_original),
        file_parsed: Set(req.file_parsed),
        ..Default::default()
    }
}

impl SeaOrmStorage {
    /// 创建解析文件记录
    pub async fn create_parsed_file_impl(&self, req: CreateParsedFileRequest) -> Result<ParsedFile> {
        validate_record(
            req.grading_score,
            Some(&req.statistics),
            req.start_date,
            req.end_date,
        )?;

        let result = new_active_model(req)
            .insert(&self.db)
            .await
            .map_err(|e| CollectError::from_db("创建解析文件记录失败", e))?;

        Ok(result.into_parsed_file())
    }

    /// 通过 ID 获取解析文件记录
    pub async fn get_parsed_file_by_id_impl(&self, id: i64) -> Result<Option<ParsedFile>> {
        let result = ParsedFiles::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| CollectError::database_operation(format!("查询解析文件失败: {e}")))?;

        Ok(result.map(|m| m.into_parsed_file()))
    }

    /// 列出解析文件记录
    pub async fn list_parsed_files_impl(
        &self,
        query: ParsedFileListQuery,
    ) -> Result<Vec<ParsedFile>> {
        let mut select = ParsedFiles::find();

        if let Some(submitter_id) = query.submitter_id {
            select = select.filter(Column::SubmitterId.eq(submitter_id));
        }
        if let Some(grader_id) = query.grader_id {
            select = select.filter(Column::GraderId.eq(grader_id));
        }
        if let Some(task_id) = query.task_id {
            select = select.filter(Column::TaskId.eq(task_id));
        }
        // 已评分 = pass_state 非空
        match query.graded {
            Some(true) => select = select.filter(Column::PassState.is_not_null()),
            Some(false) => select = select.filter(Column::PassState.is_null()),
            None => {}
        }

        let results = select
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| CollectError::database_operation(format!("查询解析文件列表失败: {e}")))?;

        Ok(results.into_iter().map(|m| m.into_parsed_file()).collect())
    }

    /// 更新解析文件记录，grade_date 每次保存都刷新为当天
    pub async fn update_parsed_file_impl(
        &self,
        id: i64,
        update: UpdateParsedFileRequest,
    ) -> Result<Option<ParsedFile>> {
        let Some(existing) = ParsedFiles::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| CollectError::database_operation(format!("查询解析文件失败: {e}")))?
        else {
            return Ok(None);
        };

        validate_record(
            update.grading_score,
            update.statistics.as_ref(),
            update.start_date.or(existing.start_date),
            update.end_date.or(existing.end_date),
        )?;

        let mut model: ActiveModel = existing.into();
        if let Some(grader_id) = update.grader_id {
            model.grader_id = Set(Some(grader_id));
        }
        if let Some(start) = update.start_date {
            model.start_date = Set(Some(start));
        }
        if let Some(end) = update.end_date {
            model.end_date = Set(Some(end));
        }
        if let Some(statistics) = update.statistics {
            model.total_tuple = Set(statistics.total_tuple);
            model.duplicated_tuple = Set(statistics.duplicated_tuple);
            model.null_ratio = Set(statistics.null_ratio);
        }
        if let Some(score) = update.grading_score {
            model.grading_score = Set(Some(score));
        }
        if let Some(pass) = update.pass_state {
            model.pass_state = Set(pass.into());
        }
        if let Some(end) = update.grading_end_date {
            model.grading_end_date = Set(Some(end));
        }
        if let Some(parsed) = update.file_parsed {
            model.file_parsed = Set(Some(parsed));
        }
        model.grade_date = Set(today());

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| CollectError::from_db("更新解析文件失败", e))?;

        Ok(Some(result.into_parsed_file()))
    }

    /// 记录一次提交
    ///
    /// 同一事务内：提交次数原子 +1，新次数作为 submit_number 写入新记录。
    /// 参与记录不存在返回 `NotFound`，未获准入返回 `Authorization`。
    pub async fn record_submission_impl(
        &self,
        req: CreateParsedFileRequest,
    ) -> Result<(ParsedFile, Participation)> {
        validate_record(
            req.grading_score,
            Some(&req.statistics),
            req.start_date,
            req.end_date,
        )?;

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| CollectError::database_operation(format!("开启事务失败: {e}")))?;

        let participation = first_participation(&txn, req.submitter_id, req.task_id)
            .await?
            .ok_or_else(|| {
                CollectError::not_found(format!(
                    "账户 {} 没有参与任务 {}",
                    req.submitter_id, req.task_id
                ))
            })?;
        if !participation.admission {
            return Err(CollectError::authorization(format!(
                "账户 {} 尚未获准参与任务 {}",
                req.submitter_id, req.task_id
            )));
        }

        Participations::update_many()
            .col_expr(
                ParticipationColumn::SubmitCount,
                Expr::col(ParticipationColumn::SubmitCount).add(1),
            )
            .filter(ParticipationColumn::Id.eq(participation.id))
            .exec(&txn)
            .await
            .map_err(|e| CollectError::database_operation(format!("更新提交次数失败: {e}")))?;

        let participation = reload_participation(&txn, participation.id).await?;

        let mut model = new_active_model(req);
        model.submit_number = Set(Some(participation.submit_count));

        let result = model
            .insert(&txn)
            .await
            .map_err(|e| CollectError::from_db("创建解析文件记录失败", e))?;

        txn.commit()
            .await
            .map_err(|e| CollectError::database_operation(format!("提交事务失败: {e}")))?;

        info!(
            "Recorded submission #{} of account {} for task {}",
            participation.submit_count, participation.account_id, participation.task_id
        );

        Ok((result.into_parsed_file(), participation))
    }

    /// 删除解析文件记录
    ///
    /// 同一事务内：submit_number 非空且非 0 时，(提交者, 任务) 的第一条参与记录提交次数 -1
    /// （不会低于 0），随后删除记录。参与记录缺失时返回 `NotFound` 并回滚。
    /// 文件删除由调用方在事务提交后进行。
    pub async fn delete_parsed_file_impl(
        &self,
        id: i64,
    ) -> Result<Option<(ParsedFile, Option<Participation>)>> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| CollectError::database_operation(format!("开启事务失败: {e}")))?;

        let Some(existing) = ParsedFiles::find_by_id(id)
            .one(&txn)
            .await
            .map_err(|e| CollectError::database_operation(format!("查询解析文件失败: {e}")))?
        else {
            return Ok(None);
        };

        // 提交编号为 0 视为未编号，不扣减
        let participation = if matches!(existing.submit_number, Some(n) if n != 0) {
            let participation = first_participation(&txn, existing.submitter_id, existing.task_id)
                .await?
                .ok_or_else(|| {
                    CollectError::not_found(format!(
                        "解析文件 {id} 的提交者 {} 没有参与任务 {}",
                        existing.submitter_id, existing.task_id
                    ))
                })?;

            // 单条 UPDATE 完成读改写，并发删除不会丢失扣减
            let result = Participations::update_many()
                .col_expr(
                    ParticipationColumn::SubmitCount,
                    Expr::col(ParticipationColumn::SubmitCount).sub(1),
                )
                .filter(ParticipationColumn::Id.eq(participation.id))
                .filter(ParticipationColumn::SubmitCount.gt(0))
                .exec(&txn)
                .await
                .map_err(|e| {
                    CollectError::database_operation(format!("更新提交次数失败: {e}"))
                })?;
            if result.rows_affected == 0 {
                debug!(
                    "Submit count of participation {} already 0, not decremented",
                    participation.id
                );
            }

            Some(reload_participation(&txn, participation.id).await?)
        } else {
            None
        };

        ParsedFiles::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(|e| CollectError::database_operation(format!("删除解析文件记录失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| CollectError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(Some((existing.into_parsed_file(), participation)))
    }
}
