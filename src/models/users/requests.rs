use serde::Deserialize;

// 身份创建请求
#[derive(Debug, Clone, Deserialize)]
pub struct CreateIdentityRequest {
    pub username: String,
    pub email: String,
}
