// Composition tests: full policy evaluation over in-memory rules.
//
// These exercise the data flow Post -> detectors -> policies -> labels
// without any network calls or filesystem access. The rule set is built
// directly from in-memory lexicons and synthetic fingerprints.

use std::collections::BTreeSet;
use std::sync::Arc;

use brindle::lexicon::{DomainMap, Lexicon};
use brindle::patterns::PatternBank;
use brindle::phash::{Fingerprint, HashIndex};
use brindle::policy::citation::CitationPolicy;
use brindle::policy::image::ImagePolicy;
use brindle::policy::solicitation::{SolicitationPolicy, SOLICITATION_LABEL};
use brindle::policy::trust_safety::{TrustSafetyPolicy, T_AND_S_LABEL};
use brindle::policy::{Policy, PolicySet};
use brindle::post::{ImageContent, Post};
use brindle::rules::Rules;

fn lex(name: &str, entries: &[&str]) -> Lexicon {
    Lexicon::new(name, entries.iter().map(|s| s.to_string()))
}

fn test_rules(hamming_threshold: u32) -> Arc<Rules> {
    let mut reference_images = HashIndex::new();
    reference_images.insert(Fingerprint(0), "dog");

    Arc::new(Rules {
        ts_words: lex("t-and-s-words", &["heinous"]),
        ts_domains: lex("t-and-s-domains", &["badsite.example"]),
        news_domains: DomainMap::new(vec![
            ("cnn.com".to_string(), "cnn".to_string()),
            ("reuters.com".to_string(), "reuters".to_string()),
        ]),
        payment_keywords: lex("payment-app-keywords", &["venmo", "cashapp"]),
        crypto_keywords: lex("crypto-keywords", &["bitcoin", "crypto"]),
        call_to_action: lex("call-to-action-keywords", &["please help", "donate"]),
        patterns: PatternBank::standard().unwrap(),
        reference_images,
        hamming_threshold,
    })
}

fn text_post(text: &str) -> Post {
    Post::new(
        "at://did:plc:test/app.bsky.feed.post/1".to_string(),
        "did:plc:test".to_string(),
        text.to_string(),
        Vec::new(),
        None,
        Vec::new(),
    )
}

fn labels(entries: &[&str]) -> BTreeSet<String> {
    entries.iter().map(|s| s.to_string()).collect()
}

// ============================================================
// Scenario 1: news citation via embedded link
// ============================================================

#[test]
fn reuters_link_yields_reuters_label() {
    let policy = CitationPolicy::new(test_rules(17));
    let post = Post::new(
        "at://did:plc:test/app.bsky.feed.post/1".to_string(),
        "did:plc:test".to_string(),
        "Reuters reports: markets rallied today".to_string(),
        Vec::new(),
        Some("https://reuters.com/article/markets".to_string()),
        Vec::new(),
    );
    assert_eq!(policy.evaluate(&post), labels(&["reuters"]));
}

#[test]
fn citation_policy_is_multi_label() {
    let policy = CitationPolicy::new(test_rules(17));
    let post = Post::new(
        "at://did:plc:test/app.bsky.feed.post/2".to_string(),
        "did:plc:test".to_string(),
        "compare https://cnn.com/a with https://www.reuters.com/b".to_string(),
        Vec::new(),
        None,
        Vec::new(),
    );
    assert_eq!(policy.evaluate(&post), labels(&["cnn", "reuters"]));
}

// ============================================================
// Scenario 2: image similarity thresholds
// ============================================================

#[test]
fn image_within_threshold_earns_dog_label() {
    // Candidate fingerprint 10 bits away from the reference.
    let candidate = Fingerprint((1 << 10) - 1);
    let post = Post::new(
        "at://did:plc:test/app.bsky.feed.post/3".to_string(),
        "did:plc:test".to_string(),
        "look at this".to_string(),
        Vec::new(),
        None,
        vec![ImageContent::Fingerprint(candidate)],
    );

    let permissive = ImagePolicy::new(test_rules(17));
    assert_eq!(permissive.evaluate(&post), labels(&["dog"]));

    let strict = ImagePolicy::new(test_rules(5));
    assert!(strict.evaluate(&post).is_empty());
}

#[test]
fn undecodable_image_degrades_to_no_label() {
    let policy = ImagePolicy::new(test_rules(17));
    let post = Post::new(
        "at://did:plc:test/app.bsky.feed.post/4".to_string(),
        "did:plc:test".to_string(),
        "broken upload".to_string(),
        Vec::new(),
        None,
        vec![ImageContent::Bytes(b"not an image".to_vec())],
    );
    assert!(policy.evaluate(&post).is_empty());
}

// ============================================================
// Scenario 3: financial solicitation
// ============================================================

#[test]
fn bitcoin_address_fires_without_call_to_action() {
    let policy = SolicitationPolicy::new(test_rules(17));
    let post = text_post("neat address 1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa");
    assert_eq!(policy.evaluate(&post), labels(&[SOLICITATION_LABEL]));
}

#[test]
fn co_occurrence_fires_without_any_pattern() {
    let policy = SolicitationPolicy::new(test_rules(17));
    let post = text_post("please help me out, send what you can on cashapp");
    assert_eq!(policy.evaluate(&post), labels(&[SOLICITATION_LABEL]));
}

#[test]
fn either_signal_alone_produces_the_same_decision() {
    // The policy is a commutative OR; a post that trips both detectors
    // gets exactly the same decision as one that trips either.
    let policy = SolicitationPolicy::new(test_rules(17));
    let both = text_post("please help! bitcoin to 1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa");
    let pattern_only = text_post("1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa");
    assert_eq!(policy.evaluate(&both), policy.evaluate(&pattern_only));
}

#[test]
fn payment_mention_without_solicitation_is_clean() {
    let policy = SolicitationPolicy::new(test_rules(17));
    let post = text_post("venmo finally fixed their app update");
    assert!(policy.evaluate(&post).is_empty());
}

// ============================================================
// Trust & Safety and decision-set properties
// ============================================================

#[test]
fn ts_word_and_domain_produce_one_label() {
    let policy = TrustSafetyPolicy::new(test_rules(17));
    let post = text_post("heinous content from badsite.example and more heinous talk");
    assert_eq!(policy.evaluate(&post), labels(&[T_AND_S_LABEL]));
}

#[test]
fn repeated_matches_stay_duplicate_free() {
    let policies = PolicySet::standard(test_rules(17));
    let post = text_post("heinous heinous heinous");
    let decision = policies.evaluate(&post);
    assert_eq!(decision, labels(&[T_AND_S_LABEL]));
}

#[test]
fn policy_set_unions_across_policies() {
    let policies = PolicySet::standard(test_rules(17));
    let post = Post::new(
        "at://did:plc:test/app.bsky.feed.post/5".to_string(),
        "did:plc:test".to_string(),
        "heinous take on https://cnn.com/story".to_string(),
        Vec::new(),
        None,
        Vec::new(),
    );
    assert_eq!(policies.evaluate(&post), labels(&[T_AND_S_LABEL, "cnn"]));
}

#[test]
fn clean_post_receives_no_labels() {
    let policies = PolicySet::standard(test_rules(17));
    let post = text_post("lovely weather for a walk in the park today");
    assert!(policies.evaluate(&post).is_empty());
}

#[test]
fn per_policy_breakdown_matches_union() {
    let policies = PolicySet::standard(test_rules(17));
    let post = text_post("heinous and please help via venmo");
    let union = policies.evaluate(&post);
    let rebuilt: BTreeSet<String> = policies
        .evaluate_each(&post)
        .into_iter()
        .flat_map(|(_, d)| d)
        .collect();
    assert_eq!(union, rebuilt);
}
