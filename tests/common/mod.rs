#![allow(dead_code)]

use std::sync::Arc;

use cssite_collect::config::DatabaseConfig;
use cssite_collect::media::MediaStore;
use cssite_collect::models::accounts::entities::{Account, AccountRole, Gender};
use cssite_collect::models::accounts::requests::CreateAccountRequest;
use cssite_collect::models::participations::entities::Participation;
use cssite_collect::models::participations::requests::CreateParticipationRequest;
use cssite_collect::models::schemas::entities::MappingInfo;
use cssite_collect::models::schemas::requests::CreateMappingInfoRequest;
use cssite_collect::models::tasks::entities::Task;
use cssite_collect::models::tasks::requests::CreateTaskRequest;
use cssite_collect::models::users::requests::CreateIdentityRequest;
use cssite_collect::services::{AccountService, ParsedFileService};
use cssite_collect::storage::{Storage, create_storage};
use tempfile::TempDir;

pub struct TestEnv {
    _dir: TempDir,
    pub storage: Arc<dyn Storage>,
    pub media: MediaStore,
}

impl TestEnv {
    pub async fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("collect.db");
        let config = DatabaseConfig {
            url: format!("sqlite://{}?mode=rwc", db_path.display()),
            pool_size: 1,
            timeout: 5,
        };
        let storage = create_storage(&config).await.unwrap();
        let media = MediaStore::new(dir.path().join("media"));
        media.prepare().await.unwrap();

        Self {
            _dir: dir,
            storage,
            media,
        }
    }

    pub fn parsed_files(&self) -> ParsedFileService {
        ParsedFileService::new(self.storage.clone(), self.media.clone())
    }

    pub fn accounts(&self) -> AccountService {
        AccountService::new(self.storage.clone(), self.media.clone())
    }

    pub async fn account(&self, username: &str, role: AccountRole) -> Account {
        let identity = self
            .storage
            .create_identity(CreateIdentityRequest {
                username: username.to_string(),
                email: format!("{username}@example.com"),
            })
            .await
            .unwrap();

        self.storage
            .create_account(CreateAccountRequest {
                user_id: identity.id,
                name: username.to_string(),
                contact: "010-1234-5678".to_string(),
                birth: None,
                gender: Gender::Female,
                address: "Seoul".to_string(),
                role,
            })
            .await
            .unwrap()
    }

    pub async fn task(&self, name: &str, active: bool) -> Task {
        self.storage
            .create_task(CreateTaskRequest {
                name: name.to_string(),
                minimal_upload_frequency: "daily".to_string(),
                activation_state: active,
                description: "hourly weather observations".to_string(),
                original_data_description: "csv exported from stations".to_string(),
            })
            .await
            .unwrap()
    }

    pub async fn participate(&self, account: &Account, task: &Task, admission: bool) -> Participation {
        self.storage
            .create_participation(CreateParticipationRequest {
                account_id: account.id,
                task_id: task.id,
                admission,
            })
            .await
            .unwrap()
    }

    pub async fn mapping(&self, task: &Task, name: &str) -> MappingInfo {
        self.storage
            .create_mapping_info(CreateMappingInfoRequest {
                task_id: task.id,
                derived_schema_name: name.to_string(),
            })
            .await
            .unwrap()
    }

    /// 存储根目录下某个子目录中的文件数
    pub fn files_in(&self, dir: &str) -> usize {
        std::fs::read_dir(self.media.root().join(dir))
            .map(|entries| entries.count())
            .unwrap_or(0)
    }
}
