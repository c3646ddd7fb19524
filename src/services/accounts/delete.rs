use serde::Serialize;
use tracing::{error, info};

use super::AccountService;
use crate::errors::{CollectError, Result};
use crate::media::RemoveOutcome;
use crate::models::parsed_files::requests::ParsedFileListQuery;

// 删除账户的结果
#[derive(Debug, Clone, Serialize)]
pub struct AccountDeletion {
    pub account_id: i64,
    // 随账户级联删除的提交记录数
    pub removed_submissions: usize,
    pub removed_files: Vec<String>,
    pub orphaned_files: Vec<String>,
}

/// 删除账户
///
/// 参与记录与提交记录由外键级联删除，该账户评过分的记录评分者置空。
/// 数据库删除成功后再删除提交记录的文件。
pub async fn delete_account(service: &AccountService, account_id: i64) -> Result<AccountDeletion> {
    let storage = service.storage();

    let account = storage
        .get_account_by_id(account_id)
        .await?
        .ok_or_else(|| CollectError::not_found(format!("账户 {account_id} 不存在")))?;

    let submissions = storage
        .list_parsed_files(ParsedFileListQuery {
            submitter_id: Some(account_id),
            ..Default::default()
        })
        .await?;

    if !storage.delete_account(account_id).await? {
        return Err(CollectError::not_found(format!("账户 {account_id} 不存在")));
    }

    let mut removed_files = Vec::new();
    let mut orphaned_files = Vec::new();
    for name in submissions.iter().flat_map(|file| file.stored_files()) {
        match service.media().remove(name).await {
            Ok(RemoveOutcome::Removed) => removed_files.push(name.to_string()),
            Ok(RemoveOutcome::Missing) => {}
            Err(e) => {
                error!("Failed to remove {} of deleted account '{}': {}", name, account, e);
                orphaned_files.push(name.to_string());
            }
        }
    }

    info!(
        "Deleted account '{}' with {} submission(s)",
        account,
        submissions.len()
    );

    Ok(AccountDeletion {
        account_id,
        removed_submissions: submissions.len(),
        removed_files,
        orphaned_files,
    })
}
