pub mod config;
pub mod conversation;
pub mod database;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod store;
pub mod utils;

use std::sync::Arc;

use crate::config::Config;
use crate::error::Result;
use crate::services::{
    chat_service::ChatService, job_service::JobService, upload_service::UploadService,
};
use crate::store::{MemoryRecordStore, MemorySessionStore, RecordStore, SessionStore};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub records: Arc<dyn RecordStore>,
    pub sessions: Arc<dyn SessionStore>,
    pub uploads: UploadService,
    pub chat_service: ChatService,
    pub job_service: JobService,
}

impl AppState {
    pub fn new(
        config: Config,
        records: Arc<dyn RecordStore>,
        sessions: Arc<dyn SessionStore>,
    ) -> Result<Self> {
        let uploads = UploadService::new(config.uploads_dir.clone());
        let chat_service = ChatService::new(
            records.clone(),
            sessions.clone(),
            uploads.clone(),
            config.session_ttl(),
        );
        let job_service = JobService::new(
            records.clone(),
            &config.public_base_url,
            config.default_days_valid,
        )?;

        Ok(Self {
            config: Arc::new(config),
            records,
            sessions,
            uploads,
            chat_service,
            job_service,
        })
    }

    /// State backed entirely by process memory.
    pub fn in_memory(config: Config) -> Result<Self> {
        let sessions = Arc::new(MemorySessionStore::new(config.session_ttl()));
        Self::new(config, Arc::new(MemoryRecordStore::new()), sessions)
    }
}
