// Policy evaluation: combining detector signals into label decisions.
//
// Each policy declares which detectors it runs and how their outputs
// combine. Evaluation is a pure function of (post content, static rules):
// no side effects, no cross-post state.

pub mod citation;
pub mod image;
pub mod solicitation;
pub mod trust_safety;

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::post::Post;
use crate::rules::Rules;

/// The set of labels one policy produced for one post. Order-irrelevant and
/// duplicate-free; empty means "no label applies".
pub type LabelDecision = BTreeSet<String>;

pub trait Policy: Send + Sync {
    fn name(&self) -> &'static str;
    fn evaluate(&self, post: &Post) -> LabelDecision;
}

/// The full set of moderation policies, evaluated together.
pub struct PolicySet {
    policies: Vec<Box<dyn Policy>>,
}

impl PolicySet {
    pub fn new(policies: Vec<Box<dyn Policy>>) -> Self {
        Self { policies }
    }

    /// The standard lineup: Trust & Safety, news citation, reference image,
    /// and financial solicitation.
    pub fn standard(rules: Arc<Rules>) -> Self {
        Self::new(vec![
            Box::new(trust_safety::TrustSafetyPolicy::new(rules.clone())),
            Box::new(citation::CitationPolicy::new(rules.clone())),
            Box::new(image::ImagePolicy::new(rules.clone())),
            Box::new(solicitation::SolicitationPolicy::new(rules)),
        ])
    }

    /// Evaluate every policy and union the decisions.
    pub fn evaluate(&self, post: &Post) -> LabelDecision {
        self.policies
            .iter()
            .flat_map(|policy| policy.evaluate(post))
            .collect()
    }

    /// Per-policy decisions, for reporting.
    pub fn evaluate_each(&self, post: &Post) -> Vec<(&'static str, LabelDecision)> {
        self.policies
            .iter()
            .map(|policy| (policy.name(), policy.evaluate(post)))
            .collect()
    }
}
