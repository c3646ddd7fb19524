use serde::Deserialize;

// 参与记录创建请求
#[derive(Debug, Clone, Deserialize)]
pub struct CreateParticipationRequest {
    pub account_id: i64,
    pub task_id: i64,
    #[serde(default)]
    pub admission: bool,
}

// 参与记录更新请求
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateParticipationRequest {
    pub admission: Option<bool>,
    pub submit_count: Option<i32>,
}

// 参与记录列表查询参数
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ParticipationListQuery {
    pub account_id: Option<i64>,
    pub task_id: Option<i64>,
    pub admission: Option<bool>,
}
