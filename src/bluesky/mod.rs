// Bluesky content adapter: resolves post URLs and materializes post
// content for the evaluation core. The core itself never touches the
// network; everything async lives here.

pub mod client;
pub mod posts;
pub mod source;
