pub mod attach;
pub mod delete;
pub mod grade;
pub mod submit;

use std::sync::Arc;

use crate::errors::Result;
use crate::media::MediaStore;
use crate::models::parsed_files::{
    entities::ParsedFile,
    requests::{GradeRequest, ParsedOutputRequest, SubmitRequest},
    responses::{ParsedFileDeletion, SubmissionReceipt},
};
use crate::storage::Storage;

/// 提交记录相关用例：提交、上传解析结果、评分、删除
pub struct ParsedFileService {
    storage: Arc<dyn Storage>,
    media: MediaStore,
}

impl ParsedFileService {
    pub fn new(storage: Arc<dyn Storage>, media: MediaStore) -> Self {
        Self { storage, media }
    }

    pub(crate) fn storage(&self) -> &Arc<dyn Storage> {
        &self.storage
    }

    pub(crate) fn media(&self) -> &MediaStore {
        &self.media
    }

    /// 提交原始文件
    pub async fn submit(&self, req: SubmitRequest) -> Result<SubmissionReceipt> {
        submit::submit(self, req).await
    }

    /// 上传解析结果文件与行统计
    pub async fn attach_parsed_output(
        &self,
        parsed_file_id: i64,
        req: ParsedOutputRequest,
    ) -> Result<ParsedFile> {
        attach::attach_parsed_output(self, parsed_file_id, req).await
    }

    /// 评分
    pub async fn grade(&self, parsed_file_id: i64, req: GradeRequest) -> Result<ParsedFile> {
        grade::grade(self, parsed_file_id, req).await
    }

    /// 删除提交记录及其文件
    pub async fn delete_parsed_file(&self, parsed_file_id: i64) -> Result<ParsedFileDeletion> {
        delete::delete_parsed_file(self, parsed_file_id).await
    }
}
