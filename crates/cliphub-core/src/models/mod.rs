pub mod video;

pub use video::{parse_tags, Comment, NewVideo, VideoRecord, VideoResponse};
