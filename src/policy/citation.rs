// News citation policy. Multi-label rather than boolean: the decision IS the set
// of outlet labels the post cites.

use std::sync::Arc;

use super::{LabelDecision, Policy};
use crate::post::Post;
use crate::rules::Rules;
use crate::signals::citations;

pub struct CitationPolicy {
    rules: Arc<Rules>,
}

impl CitationPolicy {
    pub fn new(rules: Arc<Rules>) -> Self {
        Self { rules }
    }
}

impl Policy for CitationPolicy {
    fn name(&self) -> &'static str {
        "news-citation"
    }

    fn evaluate(&self, post: &Post) -> LabelDecision {
        citations::cited_outlets(&post.urls, &self.rules.news_domains)
    }
}
