use tracing::warn;

use super::ParsedFileService;
use crate::errors::{CollectError, Result};
use crate::media::MediaKind;
use crate::models::parsed_files::{
    entities::ParsedFile,
    requests::{ParsedOutputRequest, UpdateParsedFileRequest},
};

pub async fn attach_parsed_output(
    service: &ParsedFileService,
    parsed_file_id: i64,
    req: ParsedOutputRequest,
) -> Result<ParsedFile> {
    let storage = service.storage();

    let existing = storage
        .get_parsed_file_by_id(parsed_file_id)
        .await?
        .ok_or_else(|| CollectError::not_found(format!("解析文件 {parsed_file_id} 不存在")))?;

    req.statistics
        .validate()
        .map_err(CollectError::validation)?;

    let stored = service
        .media()
        .save(MediaKind::Parsed, &req.file_name, &req.content)
        .await?;

    let update = UpdateParsedFileRequest {
        statistics: Some(req.statistics),
        file_parsed: Some(stored.clone()),
        ..Default::default()
    };

    let updated = match storage.update_parsed_file(parsed_file_id, update).await {
        Ok(Some(updated)) => updated,
        Ok(None) => {
            let _ = service.media().remove(&stored).await;
            return Err(CollectError::not_found(format!(
                "解析文件 {parsed_file_id} 不存在"
            )));
        }
        Err(e) => {
            let _ = service.media().remove(&stored).await;
            return Err(e);
        }
    };

    // 替换掉旧的解析结果文件
    if let Some(previous) = existing.file_parsed.filter(|name| !name.is_empty())
        && let Err(e) = service.media().remove(&previous).await
    {
        warn!("Failed to remove replaced parsed file {}: {}", previous, e);
    }

    Ok(updated)
}
