pub mod chat_service;
pub mod export_service;
pub mod job_service;
pub mod upload_service;
