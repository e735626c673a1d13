pub mod engagement;
pub mod video_lifecycle;

pub use engagement::EngagementService;
pub use video_lifecycle::{UpdateVideoRequest, UploadVideoRequest, VideoLifecycleService};
