use std::sync::Arc;

use crate::config::DatabaseConfig;
use crate::models::{
    accounts::{
        entities::Account,
        requests::{AccountListQuery, CreateAccountRequest, UpdateAccountRequest},
    },
    parsed_files::{
        entities::ParsedFile,
        requests::{CreateParsedFileRequest, ParsedFileListQuery, UpdateParsedFileRequest},
    },
    participations::{
        entities::{Participation, ParticipationLabel},
        requests::{
            CreateParticipationRequest, ParticipationListQuery, UpdateParticipationRequest,
        },
    },
    schemas::{
        entities::{MappingInfo, MappingPair, MappingPairLabel, SchemaAttribute},
        requests::{
            CreateMappingInfoRequest, CreateMappingPairRequest, CreateSchemaAttributeRequest,
        },
    },
    tasks::{
        entities::Task,
        requests::{CreateTaskRequest, TaskListQuery, UpdateTaskRequest},
    },
    users::{entities::Identity, requests::CreateIdentityRequest},
};

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 身份管理方法
    // 创建身份
    async fn create_identity(&self, req: CreateIdentityRequest) -> Result<Identity>;
    // 通过ID获取身份
    async fn get_identity_by_id(&self, id: i64) -> Result<Option<Identity>>;
    // 通过用户名获取身份
    async fn get_identity_by_username(&self, username: &str) -> Result<Option<Identity>>;
    // 删除身份（级联删除账户）
    async fn delete_identity(&self, id: i64) -> Result<bool>;

    /// 账户管理方法
    async fn create_account(&self, req: CreateAccountRequest) -> Result<Account>;
    async fn get_account_by_id(&self, id: i64) -> Result<Option<Account>>;
    async fn get_account_by_user_id(&self, user_id: i64) -> Result<Option<Account>>;
    async fn list_accounts(&self, query: AccountListQuery) -> Result<Vec<Account>>;
    async fn update_account(&self, id: i64, update: UpdateAccountRequest)
    -> Result<Option<Account>>;
    // 删除账户（级联删除参与记录与提交，评分记录的评分者置空）
    async fn delete_account(&self, id: i64) -> Result<bool>;

    /// 任务管理方法
    async fn create_task(&self, req: CreateTaskRequest) -> Result<Task>;
    async fn get_task_by_id(&self, id: i64) -> Result<Option<Task>>;
    async fn get_task_by_name(&self, name: &str) -> Result<Option<Task>>;
    async fn list_tasks(&self, query: TaskListQuery) -> Result<Vec<Task>>;
    async fn update_task(&self, id: i64, update: UpdateTaskRequest) -> Result<Option<Task>>;
    async fn delete_task(&self, id: i64) -> Result<bool>;

    /// 参与记录管理方法
    async fn create_participation(&self, req: CreateParticipationRequest)
    -> Result<Participation>;
    async fn get_participation_by_id(&self, id: i64) -> Result<Option<Participation>>;
    // 按 (账户, 任务) 获取第一条参与记录
    async fn get_participation(
        &self,
        account_id: i64,
        task_id: i64,
    ) -> Result<Option<Participation>>;
    async fn list_participations(
        &self,
        query: ParticipationListQuery,
    ) -> Result<Vec<Participation>>;
    async fn update_participation(
        &self,
        id: i64,
        update: UpdateParticipationRequest,
    ) -> Result<Option<Participation>>;
    async fn delete_participation(&self, id: i64) -> Result<bool>;
    async fn get_participation_label(&self, id: i64) -> Result<Option<ParticipationLabel>>;

    /// 主 schema 属性
    async fn create_schema_attribute(
        &self,
        req: CreateSchemaAttributeRequest,
    ) -> Result<SchemaAttribute>;
    async fn get_schema_attribute_by_id(&self, id: i64) -> Result<Option<SchemaAttribute>>;
    async fn list_schema_attributes(&self, task_id: i64) -> Result<Vec<SchemaAttribute>>;
    async fn rename_schema_attribute(&self, id: i64, attr: &str)
    -> Result<Option<SchemaAttribute>>;
    async fn delete_schema_attribute(&self, id: i64) -> Result<bool>;

    /// 派生 schema
    async fn create_mapping_info(&self, req: CreateMappingInfoRequest) -> Result<MappingInfo>;
    async fn get_mapping_info_by_id(&self, id: i64) -> Result<Option<MappingInfo>>;
    async fn list_mapping_infos(&self, task_id: i64) -> Result<Vec<MappingInfo>>;
    async fn rename_mapping_info(&self, id: i64, name: &str) -> Result<Option<MappingInfo>>;
    async fn delete_mapping_info(&self, id: i64) -> Result<bool>;

    /// 映射对
    async fn create_mapping_pair(&self, req: CreateMappingPairRequest) -> Result<MappingPair>;
    async fn list_mapping_pairs(&self, mapping_info_id: i64) -> Result<Vec<MappingPair>>;
    async fn delete_mapping_pair(&self, id: i64) -> Result<bool>;
    async fn get_mapping_pair_label(&self, id: i64) -> Result<Option<MappingPairLabel>>;

    /// 解析文件记录
    async fn create_parsed_file(&self, req: CreateParsedFileRequest) -> Result<ParsedFile>;
    async fn get_parsed_file_by_id(&self, id: i64) -> Result<Option<ParsedFile>>;
    async fn list_parsed_files(&self, query: ParsedFileListQuery) -> Result<Vec<ParsedFile>>;
    async fn update_parsed_file(
        &self,
        id: i64,
        update: UpdateParsedFileRequest,
    ) -> Result<Option<ParsedFile>>;
    // 事务内：提交次数 +1，并以新的次数作为 submit_number 创建记录
    async fn record_submission(
        &self,
        req: CreateParsedFileRequest,
    ) -> Result<(ParsedFile, Participation)>;
    // 事务内：submit_number 非空且非 0 时扣减参与记录的提交次数，然后删除记录
    async fn delete_parsed_file(
        &self,
        id: i64,
    ) -> Result<Option<(ParsedFile, Option<Participation>)>>;
}

pub async fn create_storage(config: &DatabaseConfig) -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::connect(config).await?;
    Ok(Arc::new(storage))
}
