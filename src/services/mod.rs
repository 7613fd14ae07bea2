pub mod storage;
pub mod video_service;
