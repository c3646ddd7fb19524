use tracing::{info, warn};

use super::ParsedFileService;
use crate::errors::{CollectError, Result};
use crate::media::MediaKind;
use crate::models::parsed_files::{
    requests::{CreateParsedFileRequest, SubmitRequest},
    responses::SubmissionReceipt,
};

pub async fn submit(service: &ParsedFileService, req: SubmitRequest) -> Result<SubmissionReceipt> {
    let storage = service.storage();

    // 任务必须存在且已激活
    let task = storage
        .get_task_by_id(req.task_id)
        .await?
        .ok_or_else(|| CollectError::not_found(format!("任务 {} 不存在", req.task_id)))?;
    if !task.activation_state {
        return Err(CollectError::validation(format!(
            "任务 '{}' 未激活，不接受提交",
            task.name
        )));
    }

    // 派生 schema 必须属于该任务
    let mapping = storage
        .get_mapping_info_by_id(req.derived_schema_id)
        .await?
        .ok_or_else(|| {
            CollectError::not_found(format!("派生 schema {} 不存在", req.derived_schema_id))
        })?;
    if mapping.task_id != task.id {
        return Err(CollectError::validation(format!(
            "派生 schema '{}' 不属于任务 '{}'",
            mapping.derived_schema_name, task.name
        )));
    }

    let stored = service
        .media()
        .save(MediaKind::Original, &req.file_name, &req.content)
        .await?;

    let create = CreateParsedFileRequest {
        submitter_id: req.submitter_id,
        task_id: req.task_id,
        derived_schema_id: req.derived_schema_id,
        start_date: req.start_date,
        end_date: req.end_date,
        file_original: Some(stored.clone()),
        ..Default::default()
    };

    match storage.record_submission(create).await {
        Ok((parsed_file, participation)) => {
            info!(
                "Account {} submitted '{}' to task '{}' as #{}",
                req.submitter_id, stored, task.name, participation.submit_count
            );
            Ok(SubmissionReceipt {
                parsed_file,
                participation,
            })
        }
        Err(e) => {
            // 记录没有写入，撤销已保存的文件
            if let Err(remove_err) = service.media().remove(&stored).await {
                warn!("Failed to clean up {} after rejected submission: {}", stored, remove_err);
            }
            Err(e)
        }
    }
}
