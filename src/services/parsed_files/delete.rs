use tracing::{error, info, warn};

use super::ParsedFileService;
use crate::errors::{CollectError, Result};
use crate::media::RemoveOutcome;
use crate::models::parsed_files::responses::ParsedFileDeletion;

/// 删除提交记录
///
/// 1. 事务内扣减参与记录的提交次数并删除记录（见 `Storage::delete_parsed_file`）；
/// 2. 事务提交后删除原始文件与解析结果文件。
///
/// 文件删除失败不会回滚记录，失败的文件列在 `orphaned_files` 中。
pub async fn delete_parsed_file(
    service: &ParsedFileService,
    parsed_file_id: i64,
) -> Result<ParsedFileDeletion> {
    let (parsed_file, participation) = service
        .storage()
        .delete_parsed_file(parsed_file_id)
        .await?
        .ok_or_else(|| CollectError::not_found(format!("解析文件 {parsed_file_id} 不存在")))?;

    let mut removed_files = Vec::new();
    let mut missing_files = Vec::new();
    let mut orphaned_files = Vec::new();

    for name in parsed_file.stored_files() {
        match service.media().remove(name).await {
            Ok(RemoveOutcome::Removed) => removed_files.push(name.to_string()),
            Ok(RemoveOutcome::Missing) => {
                warn!("Stored file {} of parsed file {} already missing", name, parsed_file.id);
                missing_files.push(name.to_string());
            }
            Err(e) => {
                error!("Failed to remove {} of parsed file {}: {}", name, parsed_file.id, e);
                orphaned_files.push(name.to_string());
            }
        }
    }

    info!(
        "Deleted parsed file {} ({} file(s) removed, submit count now {:?})",
        parsed_file.id,
        removed_files.len(),
        participation.as_ref().map(|p| p.submit_count)
    );

    Ok(ParsedFileDeletion {
        parsed_file,
        participation,
        removed_files,
        missing_files,
        orphaned_files,
    })
}
