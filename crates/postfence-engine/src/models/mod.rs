pub mod post;

pub use post::{DraftError, PostDraft, excerpt, parse_hashtags};
