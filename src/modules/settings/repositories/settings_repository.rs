use std::sync::Arc;

use crate::core::Result;
use crate::modules::settings::models::Settings;
use crate::storage::{read_json, Storage, WriteBatch};

pub const SETTINGS_KEY: &str = "settings";

#[derive(Debug, Clone)]
pub struct SettingsRepository {
    storage: Arc<dyn Storage>,
}

impl SettingsRepository {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    pub async fn load(&self) -> Result<Option<Settings>> {
        read_json(self.storage.as_ref(), SETTINGS_KEY).await
    }

    pub async fn save(&self, settings: &Settings) -> Result<()> {
        let mut batch = WriteBatch::new();
        batch.put_json(SETTINGS_KEY, settings)?;
        self.storage.write(batch).await
    }
}
