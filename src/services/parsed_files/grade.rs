use tracing::info;

use super::ParsedFileService;
use crate::errors::{CollectError, Result};
use crate::models::parsed_files::{
    entities::ParsedFile,
    requests::{GradeRequest, UpdateParsedFileRequest},
};
use crate::utils::validate::validate_grading_score;

pub async fn grade(
    service: &ParsedFileService,
    parsed_file_id: i64,
    req: GradeRequest,
) -> Result<ParsedFile> {
    let storage = service.storage();

    // 先校验分数，不合法的评分不会写入
    validate_grading_score(req.grading_score)
        .map_err(|e| CollectError::validation(format!("{e} (got {})", req.grading_score)))?;

    let grader = storage
        .get_account_by_id(req.grader_id)
        .await?
        .ok_or_else(|| CollectError::not_found(format!("评分者 {} 不存在", req.grader_id)))?;
    if !grader.can_grade() {
        return Err(CollectError::authorization(format!(
            "账户 '{}' 的角色 {} 不能评分",
            grader, grader.role
        )));
    }

    let update = UpdateParsedFileRequest {
        grader_id: Some(grader.id),
        grading_score: Some(req.grading_score),
        pass_state: Some(req.pass_state),
        grading_end_date: req.grading_end_date,
        ..Default::default()
    };

    let graded = storage
        .update_parsed_file(parsed_file_id, update)
        .await?
        .ok_or_else(|| CollectError::not_found(format!("解析文件 {parsed_file_id} 不存在")))?;

    info!(
        "Parsed file {} graded by '{}': score {}, {:?}",
        graded.id,
        grader,
        req.grading_score,
        graded.pass()
    );

    Ok(graded)
}
