// Financial solicitation policy: OR of two independent detectors.
//
// A strong structured pattern (crypto address, payment handle) fires the
// label on its own; otherwise the conjunctive keyword co-occurrence signal
// (payment/crypto term + call to action) must fire. The combination is a
// commutative OR over pure detectors; evaluation order only affects which
// check short-circuits, never the decision.

use std::sync::Arc;

use tracing::debug;

use super::{LabelDecision, Policy};
use crate::post::Post;
use crate::rules::Rules;
use crate::signals::keywords;

pub const SOLICITATION_LABEL: &str = "potential-financial-solicitation";

pub struct SolicitationPolicy {
    rules: Arc<Rules>,
}

impl SolicitationPolicy {
    pub fn new(rules: Arc<Rules>) -> Self {
        Self { rules }
    }
}

impl Policy for SolicitationPolicy {
    fn name(&self) -> &'static str {
        "financial-solicitation"
    }

    fn evaluate(&self, post: &Post) -> LabelDecision {
        let strong = self.rules.patterns.find_strong_signal(&post.text);
        let fired = strong
            || keywords::co_occurrence(
                &post.text,
                &[&self.rules.payment_keywords, &self.rules.crypto_keywords],
                &self.rules.call_to_action,
            );

        let mut decision = LabelDecision::new();
        if fired {
            debug!(uri = %post.uri, strong, "Financial solicitation signal fired");
            decision.insert(SOLICITATION_LABEL.to_string());
        }
        decision
    }
}
