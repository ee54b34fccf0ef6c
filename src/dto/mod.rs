pub mod apply_dto;
pub mod chat_dto;
pub mod job_dto;
