use serde::{Deserialize, Serialize};

// 任务实体
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Task {
    pub id: i64,
    pub name: String,
    pub minimal_upload_frequency: String,
    pub activation_state: bool,
    pub description: String,
    pub original_data_description: String,
}

impl std::fmt::Display for Task {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}
