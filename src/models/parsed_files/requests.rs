use serde::Deserialize;

use super::entities::{PassState, RowStatistics};

// 解析文件记录创建请求（存储层直接写入）
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateParsedFileRequest {
    pub submitter_id: i64,
    pub task_id: i64,
    pub derived_schema_id: i64,
    pub grader_id: Option<i64>,
    pub submit_number: Option<i32>,
    pub start_date: Option<chrono::NaiveDate>,
    pub end_date: Option<chrono::NaiveDate>,
    #[serde(default)]
    pub statistics: RowStatistics,
    pub grading_score: Option<i32>,
    pub pass_state: Option<bool>,
    pub grading_end_date: Option<chrono::NaiveDate>,
    pub file_original: Option<String>,
    pub file_parsed: Option<String>,
}

// 解析文件记录更新请求，None 表示不修改
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateParsedFileRequest {
    pub grader_id: Option<i64>,
    pub start_date: Option<chrono::NaiveDate>,
    pub end_date: Option<chrono::NaiveDate>,
    pub statistics: Option<RowStatistics>,
    pub grading_score: Option<i32>,
    pub pass_state: Option<PassState>,
    pub grading_end_date: Option<chrono::NaiveDate>,
    pub file_parsed: Option<String>,
}

// 解析文件列表查询参数
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ParsedFileListQuery {
    pub submitter_id: Option<i64>,
    pub grader_id: Option<i64>,
    pub task_id: Option<i64>,
    pub graded: Option<bool>,
}

// 提交请求：保存原始文件并创建记录
#[derive(Debug, Clone)]
pub struct SubmitRequest {
    pub submitter_id: i64,
    pub task_id: i64,
    pub derived_schema_id: i64,
    pub file_name: String,
    pub content: Vec<u8>,
    pub start_date: Option<chrono::NaiveDate>,
    pub end_date: Option<chrono::NaiveDate>,
}

// 解析结果上传请求
#[derive(Debug, Clone)]
pub struct ParsedOutputRequest {
    pub file_name: String,
    pub content: Vec<u8>,
    pub statistics: RowStatistics,
}

// 评分请求
#[derive(Debug, Clone, Deserialize)]
pub struct GradeRequest {
    pub grader_id: i64,
    pub grading_score: i32,
    pub pass_state: PassState,
    pub grading_end_date: Option<chrono::NaiveDate>,
}
