use serde::Serialize;

use super::entities::ParsedFile;
use crate::models::participations::entities::Participation;

// 提交结果
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionReceipt {
    pub parsed_file: ParsedFile,
    pub participation: Participation,
}

// 删除提交的结果
#[derive(Debug, Clone, Serialize)]
pub struct ParsedFileDeletion {
    pub parsed_file: ParsedFile,
    // 被扣减提交次数的参与记录（submit_number 为空时不涉及）
    pub participation: Option<Participation>,
    pub removed_files: Vec<String>,
    pub missing_files: Vec<String>,
    // 记录已删除但文件删除失败，需要人工清理
    pub orphaned_files: Vec<String>,
}
