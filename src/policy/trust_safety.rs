// Trust & Safety policy: single keyword/domain substring detector.

use std::sync::Arc;

use super::{LabelDecision, Policy};
use crate::post::Post;
use crate::rules::Rules;
use crate::signals::keywords;

pub const T_AND_S_LABEL: &str = "t-and-s";

pub struct TrustSafetyPolicy {
    rules: Arc<Rules>,
}

impl TrustSafetyPolicy {
    pub fn new(rules: Arc<Rules>) -> Self {
        Self { rules }
    }
}

impl Policy for TrustSafetyPolicy {
    fn name(&self) -> &'static str {
        "trust-safety"
    }

    /// Fires if the post text contains any T&S word or T&S domain.
    fn evaluate(&self, post: &Post) -> LabelDecision {
        let mut decision = LabelDecision::new();
        if keywords::contains_any(
            &post.text,
            &[&self.rules.ts_words, &self.rules.ts_domains],
        ) {
            decision.insert(T_AND_S_LABEL.to_string());
        }
        decision
    }
}
