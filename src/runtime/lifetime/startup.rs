use crate::config::AppConfig;
use crate::errors::Result;
use crate::media::MediaStore;
use crate::services::{AccountService, ParsedFileService};
use crate::storage::Storage;
use std::sync::Arc;
use tracing::{debug, warn};

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
    pub media: MediaStore,
}

impl StartupContext {
    pub fn parsed_file_service(&self) -> ParsedFileService {
        ParsedFileService::new(self.storage.clone(), self.media.clone())
    }

    pub fn account_service(&self) -> AccountService {
        AccountService::new(self.storage.clone(), self.media.clone())
    }
}

/// 准备运行上下文
/// 连接数据库并完成迁移，创建文件存储目录
pub async fn prepare_startup(config: &AppConfig) -> Result<StartupContext> {
    let storage = crate::storage::create_storage(&config.database).await?;
    warn!("Storage backend initialized and migrations completed");

    let media = MediaStore::from_config(&config.media);
    media.prepare().await?;
    debug!("Media root prepared at {}", media.root().display());

    Ok(StartupContext { storage, media })
}
