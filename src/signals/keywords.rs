// Keyword detectors: lexicon substring matching and conjunctive
// co-occurrence.

use crate::lexicon::Lexicon;

/// True if the text contains an entry from any of the given lexicons.
pub fn contains_any(text: &str, lexicons: &[&Lexicon]) -> bool {
    lexicons.iter().any(|lexicon| lexicon.matches(text))
}

/// Conjunctive co-occurrence signal: fires only when the text contains at
/// least one keyword from any subject lexicon (payment apps, cryptocurrency
/// terms) AND at least one from the call-to-action lexicon, in any order.
///
/// Neither side alone is sufficient; a post that merely names a payment app
/// without soliciting must not fire.
pub fn co_occurrence(text: &str, subjects: &[&Lexicon], call_to_action: &Lexicon) -> bool {
    contains_any(text, subjects) && call_to_action.matches(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(name: &str, entries: &[&str]) -> Lexicon {
        Lexicon::new(name, entries.iter().map(|s| s.to_string()))
    }

    #[test]
    fn subject_alone_does_not_fire() {
        let subject = lex("payment", &["venmo"]);
        let cta = lex("cta", &["please help"]);
        assert!(!co_occurrence("I use venmo sometimes", &[&subject], &cta));
    }

    #[test]
    fn call_to_action_alone_does_not_fire() {
        let subject = lex("payment", &["venmo"]);
        let cta = lex("cta", &["please help"]);
        assert!(!co_occurrence("please help me find my cat", &[&subject], &cta));
    }

    #[test]
    fn both_together_fire_in_any_order() {
        let subject = lex("payment", &["venmo"]);
        let cta = lex("cta", &["please help"]);
        assert!(co_occurrence(
            "please help, my venmo is @x",
            &[&subject],
            &cta
        ));
        assert!(co_occurrence(
            "my Venmo is @x, please help",
            &[&subject],
            &cta
        ));
    }

    #[test]
    fn any_subject_lexicon_satisfies_the_conjunction() {
        let payment = lex("payment", &["venmo"]);
        let crypto = lex("crypto", &["bitcoin"]);
        let cta = lex("cta", &["donate"]);
        assert!(co_occurrence(
            "donate some bitcoin to the cause",
            &[&payment, &crypto],
            &cta
        ));
    }
}
