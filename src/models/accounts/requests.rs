use super::entities::{AccountRole, Gender};
use serde::Deserialize;

// 账户创建请求
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAccountRequest {
    pub user_id: i64,
    pub name: String,
    pub contact: String,
    pub birth: Option<chrono::NaiveDate>,
    pub gender: Gender,
    pub address: String,
    pub role: AccountRole,
}

// 账户更新请求
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateAccountRequest {
    pub name: Option<String>,
    pub contact: Option<String>,
    pub birth: Option<chrono::NaiveDate>,
    pub gender: Option<Gender>,
    pub address: Option<String>,
    pub role: Option<AccountRole>,
}

// 账户列表查询参数
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AccountListQuery {
    pub role: Option<AccountRole>,
}
