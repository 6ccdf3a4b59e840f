// Signal detectors: pure functions from post content to boolean or
// set-valued signals. Stateless across posts; safe to run concurrently
// against shared read-only rule data.

pub mod citations;
pub mod images;
pub mod keywords;
