//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。
//! 唯一约束与外键级联由迁移创建的表结构保证。

mod accounts;
mod parsed_files;
mod participations;
mod schemas;
mod tasks;
mod users;

use crate::config::DatabaseConfig;
use crate::errors::{CollectError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 连接数据库并运行迁移
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let db_url = Self::build_database_url(&config.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite:") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| CollectError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + 外键约束）
    async fn connect_sqlite(url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| CollectError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| CollectError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.pool_size)
            .min_connections(1)
            .connect_timeout(Duration::from_secs(config.timeout))
            .acquire_timeout(Duration::from_secs(config.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| CollectError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite:") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") {
            Ok(format!("sqlite://{}?mode=rwc", url))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(CollectError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

// Storage trait 实现
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
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 身份模块
    async fn create_identity(&self, req: CreateIdentityRequest) -> Result<Identity> {
        self.create_identity_impl(req).await
    }

    async fn get_identity_by_id(&self, id: i64) -> Result<Option<Identity>> {
        self.get_identity_by_id_impl(id).await
    }

    async fn get_identity_by_username(&self, username: &str) -> Result<Option<Identity>> {
        self.get_identity_by_username_impl(username).await
    }

    async fn delete_identity(&self, id: i64) -> Result<bool> {
        self.delete_identity_impl(id).await
    }

    // 账户模块
    async fn create_account(&self, req: CreateAccountRequest) -> Result<Account> {
        self.create_account_impl(req).await
    }

    async fn get_account_by_id(&self, id: i64) -> Result<Option<Account>> {
        self.get_account_by_id_impl(id).await
    }

    async fn get_account_by_user_id(&self, user_id: i64) -> Result<Option<Account>> {
        self.get_account_by_user_id_impl(user_id).await
    }

    async fn list_accounts(&self, query: AccountListQuery) -> Result<Vec<Account>> {
        self.list_accounts_impl(query).await
    }

    async fn update_account(
        &self,
        id: i64,
        update: UpdateAccountRequest,
    ) -> Result<Option<Account>> {
        self.update_account_impl(id, update).await
    }

    async fn delete_account(&self, id: i64) -> Result<bool> {
        self.delete_account_impl(id).await
    }

    // 任务模块
    async fn create_task(&self, req: CreateTaskRequest) -> Result<Task> {
        self.create_task_impl(req).await
    }

    async fn get_task_by_id(&self, id: i64) -> Result<Option<Task>> {
        self.get_task_by_id_impl(id).await
    }

    async fn get_task_by_name(&self, name: &str) -> Result<Option<Task>> {
        self.get_task_by_name_impl(name).await
    }

    async fn list_tasks(&self, query: TaskListQuery) -> Result<Vec<Task>> {
        self.list_tasks_impl(query).await
    }

    async fn update_task(&self, id: i64, update: UpdateTaskRequest) -> Result<Option<Task>> {
        self.update_task_impl(id, update).await
    }

    async fn delete_task(&self, id: i64) -> Result<bool> {
        self.delete_task_impl(id).await
    }

    // 参与记录模块
    async fn create_participation(
        &self,
        req: CreateParticipationRequest,
    ) -> Result<Participation> {
        self.create_participation_impl(req).await
    }

    async fn get_participation_by_id(&self, id: i64) -> Result<Option<Participation>> {
        self.get_participation_by_id_impl(id).await
    }

    async fn get_participation(
        &self,
        account_id: i64,
        task_id: i64,
    ) -> Result<Option<Participation>> {
        self.get_participation_impl(account_id, task_id).await
    }

    async fn list_participations(
        &self,
        query: ParticipationListQuery,
    ) -> Result<Vec<Participation>> {
        self.list_participations_impl(query).await
    }

    async fn update_participation(
        &self,
        id: i64,
        update: UpdateParticipationRequest,
    ) -> Result<Option<Participation>> {
        self.update_participation_impl(id, update).await
    }

    async fn delete_participation(&self, id: i64) -> Result<bool> {
        self.delete_participation_impl(id).await
    }

    async fn get_participation_label(&self, id: i64) -> Result<Option<ParticipationLabel>> {
        self.get_participation_label_impl(id).await
    }

    // schema 模块
    async fn create_schema_attribute(
        &self,
        req: CreateSchemaAttributeRequest,
    ) -> Result<SchemaAttribute> {
        self.create_schema_attribute_impl(req).await
    }

    async fn get_schema_attribute_by_id(&self, id: i64) -> Result<Option<SchemaAttribute>> {
        self.get_schema_attribute_by_id_impl(id).await
    }

    async fn list_schema_attributes(&self, task_id: i64) -> Result<Vec<SchemaAttribute>> {
        self.list_schema_attributes_impl(task_id).await
    }

    async fn rename_schema_attribute(
        &self,
        id: i64,
        attr: &str,
    ) -> Result<Option<SchemaAttribute>> {
        self.rename_schema_attribute_impl(id, attr).await
    }

    async fn delete_schema_attribute(&self, id: i64) -> Result<bool> {
        self.delete_schema_attribute_impl(id).await
    }

    async fn create_mapping_info(&self, req: CreateMappingInfoRequest) -> Result<MappingInfo> {
        self.create_mapping_info_impl(req).await
    }

    async fn get_mapping_info_by_id(&self, id: i64) -> Result<Option<MappingInfo>> {
        self.get_mapping_info_by_id_impl(id).await
    }

    async fn list_mapping_infos(&self, task_id: i64) -> Result<Vec<MappingInfo>> {
        self.list_mapping_infos_impl(task_id).await
    }

    async fn rename_mapping_info(&self, id: i64, name: &str) -> Result<Option<MappingInfo>> {
        self.rename_mapping_info_impl(id, name).await
    }

    async fn delete_mapping_info(&self, id: i64) -> Result<bool> {
        self.delete_mapping_info_impl(id).await
    }

    async fn create_mapping_pair(&self, req: CreateMappingPairRequest) -> Result<MappingPair> {
        self.create_mapping_pair_impl(req).await
    }

    async fn list_mapping_pairs(&self, mapping_info_id: i64) -> Result<Vec<MappingPair>> {
        self.list_mapping_pairs_impl(mapping_info_id).await
    }

    async fn delete_mapping_pair(&self, id: i64) -> Result<bool> {
        self.delete_mapping_pair_impl(id).await
    }

    async fn get_mapping_pair_label(&self, id: i64) -> Result<Option<MappingPairLabel>> {
        self.get_mapping_pair_label_impl(id).await
    }

    // 解析文件模块
    async fn create_parsed_file(&self, req: CreateParsedFileRequest) -> Result<ParsedFile> {
        self.create_parsed_file_impl(req).await
    }

    async fn get_parsed_file_by_id(&self, id: i64) -> Result<Option<ParsedFile>> {
        self.get_parsed_file_by_id_impl(id).await
    }

    async fn list_parsed_files(&self, query: ParsedFileListQuery) -> Result<Vec<ParsedFile>> {
        self.list_parsed_files_impl(query).await
    }

    async fn update_parsed_file(
        &self,
        id: i64,
        update: UpdateParsedFileRequest,
    ) -> Result<Option<ParsedFile>> {
        self.update_parsed_file_impl(id, update).await
    }

    async fn record_submission(
        &self,
        req: CreateParsedFileRequest,
    ) -> Result<(ParsedFile, Participation)> {
        self.record_submission_impl(req).await
    }

    async fn delete_parsed_file(
        &self,
        id: i64,
    ) -> Result<Option<(ParsedFile, Option<Participation>)>> {
        self.delete_parsed_file_impl(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_database_url() {
        assert_eq!(
            SeaOrmStorage::build_database_url("collect.db").unwrap(),
            "sqlite://collect.db?mode=rwc"
        );
        assert_eq!(
            SeaOrmStorage::build_database_url("postgres://u:p@localhost/collect").unwrap(),
            "postgres://u:p@localhost/collect"
        );
        assert!(SeaOrmStorage::build_database_url("redis://localhost").is_err());
    }
}
