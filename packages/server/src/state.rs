use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::admission::AdmissionPipeline;
use crate::admission::cache::CachedMetadata;
use crate::admission::clock::SystemClock;
use crate::admission::metadata::DbMetadata;
use crate::admission::persist::DbSubmissionStore;
use crate::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub pipeline: Arc<AdmissionPipeline>,
}

impl AppState {
    /// Wire the admission pipeline to the database: cached metadata reads,
    /// transactional writes and the system clock.
    pub fn new(db: DatabaseConnection, config: AppConfig) -> Self {
        let metadata = CachedMetadata::new(DbMetadata::new(db.clone()), &config.cache);
        let pipeline = AdmissionPipeline::new(
            Arc::new(metadata),
            Arc::new(DbSubmissionStore::new(db.clone())),
            Arc::new(SystemClock),
            config.submission.clone(),
        );

        Self {
            config: Arc::new(config),
            pipeline: Arc::new(pipeline),
        }
    }
}
