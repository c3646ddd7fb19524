pub mod delete;

use std::sync::Arc;

use crate::errors::Result;
use crate::media::MediaStore;
use crate::storage::Storage;

pub use delete::AccountDeletion;

pub struct AccountService {
    storage: Arc<dyn Storage>,
    media: MediaStore,
}

impl AccountService {
    pub fn new(storage: Arc<dyn Storage>, media: MediaStore) -> Self {
        Self { storage, media }
    }

    pub(crate) fn storage(&self) -> &Arc<dyn Storage> {
        &self.storage
    }

    pub(crate) fn media(&self) -> &MediaStore {
        &self.media
    }

    /// 删除账户，并清理其提交记录留下的文件
    pub async fn delete_account(&self, account_id: i64) -> Result<AccountDeletion> {
        delete::delete_account(self, account_id).await
    }
}
