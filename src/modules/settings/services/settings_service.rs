use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::info;

use crate::core::traits::Service;
use crate::core::Result;
use crate::modules::settings::models::{AppSettings, ReceiptSettings, Settings, StoreSettings};
use crate::modules::settings::repositories::SettingsRepository;

/// Store, receipt and app settings. Each section is replaced as a whole.
#[derive(Debug)]
pub struct SettingsService {
    repository: SettingsRepository,
    write_lock: Mutex<()>,
}

impl SettingsService {
    pub fn new(repository: SettingsRepository) -> Self {
        Self {
            repository,
            write_lock: Mutex::new(()),
        }
    }

    /// Current settings, falling back to defaults before the first save
    pub async fn get(&self) -> Result<Settings> {
        Ok(self.repository.load().await?.unwrap_or_default())
    }

    pub async fn update_store(&self, store: StoreSettings) -> Result<Settings> {
        store.validate()?;
        self.update(|settings| settings.store = store).await
    }

    pub async fn update_receipt(&self, receipt: ReceiptSettings) -> Result<Settings> {
        self.update(|settings| settings.receipt = receipt).await
    }

    pub async fn update_app(&self, app: AppSettings) -> Result<Settings> {
        app.validate()?;
        self.update(|settings| settings.app = app).await
    }

    async fn update(&self, apply: impl FnOnce(&mut Settings)) -> Result<Settings> {
        let _guard = self.write_lock.lock().await;

        let mut settings = self.get().await?;
        apply(&mut settings);
        self.repository.save(&settings).await?;

        info!(store = %settings.store.name, "Settings updated");
        Ok(settings)
    }
}

#[async_trait]
impl Service for SettingsService {
    async fn initialize(&self) -> Result<()> {
        let _guard = self.write_lock.lock().await;

        if self.repository.load().await?.is_none() {
            self.repository.save(&Settings::default()).await?;
            info!("Seeded default settings");
        }

        Ok(())
    }
}
