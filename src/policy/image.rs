// Reference image policy: perceptual-hash similarity against the known
// image set.

use std::sync::Arc;

use super::{LabelDecision, Policy};
use crate::post::Post;
use crate::rules::Rules;
use crate::signals::images;

pub const DOG_LABEL: &str = "dog";

pub struct ImagePolicy {
    rules: Arc<Rules>,
}

impl ImagePolicy {
    pub fn new(rules: Arc<Rules>) -> Self {
        Self { rules }
    }
}

impl Policy for ImagePolicy {
    fn name(&self) -> &'static str {
        "reference-image"
    }

    /// Fires if any embedded image is within the Hamming threshold of a
    /// reference fingerprint. Undecodable images degrade to "no match".
    fn evaluate(&self, post: &Post) -> LabelDecision {
        let mut decision = LabelDecision::new();
        if images::post_has_reference_image(
            &post.images,
            &self.rules.reference_images,
            self.rules.hamming_threshold,
        ) {
            decision.insert(DOG_LABEL.to_string());
        }
        decision
    }
}
