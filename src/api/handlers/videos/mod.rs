pub mod download;
pub mod list;
pub mod manage;
pub mod types;
pub mod upload;

// Re-export all types
pub use types::*;

// Re-export all handlers
pub use download::get_video;
pub use list::list_videos;
pub use manage::{delete_video, update_video};
pub use upload::upload_video;
