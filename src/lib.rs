// Brindle: automated moderation labeler for Bluesky
//
// This is the library root. The heart of the crate is a set of pure signal
// detectors (lexicon, patterns, phash, signals) and the policies that combine
// their outputs into label decisions; the bluesky module is the network
// adapter that feeds them post content.

pub mod batch;
pub mod bluesky;
pub mod config;
pub mod lexicon;
pub mod output;
pub mod patterns;
pub mod phash;
pub mod policy;
pub mod post;
pub mod rules;
pub mod signals;
