use std::sync::Arc;

use crate::config::AppConfig;
use crate::nutrition::{NutritionLookup, OpenFoodFacts};
use crate::store::JsonStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<JsonStore>,
    pub config: Arc<AppConfig>,
    pub nutrition: Arc<dyn NutritionLookup>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);
        let store = Arc::new(JsonStore::open(&config.data_dir).await?);
        tokio::fs::create_dir_all(&config.uploads_dir).await?;
        let nutrition =
            Arc::new(OpenFoodFacts::new(&config.nutrition)?) as Arc<dyn NutritionLookup>;
        Ok(Self {
            store,
            config,
            nutrition,
        })
    }

    pub fn from_parts(
        store: Arc<JsonStore>,
        config: Arc<AppConfig>,
        nutrition: Arc<dyn NutritionLookup>,
    ) -> Self {
        Self {
            store,
            config,
            nutrition,
        }
    }
}
