// Image similarity detector: per-image perceptual hash lookup against the
// reference index.

use tracing::{debug, warn};

use crate::phash::{compute_fingerprint, HashIndex};
use crate::post::ImageContent;

/// True if any embedded image matches a reference fingerprint within the
/// threshold.
///
/// The check is per-image and short-circuits on the first match. An
/// undecodable image degrades to "no match" for that image only; one bad
/// image must not abort evaluation of the rest of the post.
pub fn post_has_reference_image(
    images: &[ImageContent],
    index: &HashIndex,
    threshold: u32,
) -> bool {
    for (i, content) in images.iter().enumerate() {
        let fingerprint = match content {
            ImageContent::Fingerprint(fp) => *fp,
            ImageContent::Bytes(bytes) => match compute_fingerprint(bytes) {
                Ok(fp) => fp,
                Err(e) => {
                    warn!(image = i, error = %e, "Skipping undecodable embedded image");
                    continue;
                }
            },
        };

        if let Some((label, distance)) = index.best_match(fingerprint, threshold) {
            debug!(image = i, label, distance, "Reference image match");
            return true;
        }
    }
    false
}
