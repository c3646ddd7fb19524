use serde::Deserialize;

// 任务创建请求
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTaskRequest {
    pub name: String,
    pub minimal_upload_frequency: String,
    #[serde(default)]
    pub activation_state: bool,
    pub description: String,
    pub original_data_description: String,
}

// 任务更新请求
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTaskRequest {
    pub name: Option<String>,
    pub minimal_upload_frequency: Option<String>,
    pub activation_state: Option<bool>,
    pub description: Option<String>,
    pub original_data_description: Option<String>,
}

// 任务列表查询参数
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskListQuery {
    pub activation_state: Option<bool>,
    pub search: Option<String>,
}
