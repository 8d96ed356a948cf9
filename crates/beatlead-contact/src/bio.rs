//! Ordered pattern tables for pulling contact details out of free-form bio text.
//!
//! Every table is tried top to bottom and the first rule that matches anywhere in
//! the text decides the value. The order is part of the behaviour: moving a rule
//! changes which value a bio produces.

use regex::{Regex, RegexBuilder};
use std::sync::LazyLock;

/// Which part of a rule's match becomes the extracted value.
#[derive(Debug, Clone, Copy)]
enum Capture {
    Whole,
    Group,
}

struct Rule {
    pattern: &'static str,
    capture: Capture,
}

const fn rule(pattern: &'static str, capture: Capture) -> Rule {
    Rule { pattern, capture }
}

const EMAIL_RULES: &[Rule] = &[rule(r"[\w.-]+@[\w.-]+\.\w+", Capture::Whole)];

const INSTAGRAM_RULES: &[Rule] = &[
    rule(r"instagram\.com/([\w.-]+)", Capture::Group),
    rule(
        r"@([\w.-]+)\s*(?:on\s*)?(?:ig|insta|instagram)",
        Capture::Group,
    ),
    rule(r"(?:ig|insta|instagram):\s*@?([\w.-]+)", Capture::Group),
    rule(r"(?:ig|insta|instagram)\s*@?([\w.-]+)", Capture::Group),
];

const TWITTER_RULES: &[Rule] = &[
    rule(r"twitter\.com/([\w.-]+)", Capture::Group),
    rule(r"@([\w.-]+)\s*(?:on\s*)?(?:tw|twitter)", Capture::Group),
    rule(r"(?:tw|twitter):\s*@?([\w.-]+)", Capture::Group),
    rule(r"(?:tw|twitter)\s*@?([\w.-]+)", Capture::Group),
];

// The bare-URL rule runs first, so the labeled rules below it only matter if it
// is ever moved. Kept in this order on purpose.
const WEBSITE_RULES: &[Rule] = &[
    rule(r"https?://[^\s]+", Capture::Whole),
    rule(r"(?:website|site|web):\s*(https?://[^\s]+)", Capture::Group),
    rule(r"(?:website|site|web)\s*(https?://[^\s]+)", Capture::Group),
];

/// A compiled rule table.
struct RuleSet {
    rules: Vec<(Regex, Capture)>,
}

impl RuleSet {
    fn compile(rules: &[Rule], case_insensitive: bool) -> Self {
        let rules = rules
            .iter()
            .map(|r| {
                let regex = RegexBuilder::new(r.pattern)
                    .case_insensitive(case_insensitive)
                    .build()
                    .unwrap_or_else(|e| panic!("invalid bio pattern {:?}: {}", r.pattern, e));
                (regex, r.capture)
            })
            .collect();
        Self { rules }
    }

    fn first_match<'t>(&self, text: &'t str) -> Option<&'t str> {
        self.rules.iter().find_map(|(regex, capture)| {
            let caps = regex.captures(text)?;
            let m = match capture {
                Capture::Whole => caps.get(0),
                Capture::Group => caps.get(1),
            }?;
            Some(m.as_str())
        })
    }
}

static EMAIL: LazyLock<RuleSet> = LazyLock::new(|| RuleSet::compile(EMAIL_RULES, false));
static INSTAGRAM: LazyLock<RuleSet> = LazyLock::new(|| RuleSet::compile(INSTAGRAM_RULES, true));
static TWITTER: LazyLock<RuleSet> = LazyLock::new(|| RuleSet::compile(TWITTER_RULES, true));
static WEBSITE: LazyLock<RuleSet> = LazyLock::new(|| RuleSet::compile(WEBSITE_RULES, true));

/// First email-shaped token in the text.
pub(crate) fn email(text: &str) -> Option<&str> {
    EMAIL.first_match(text)
}

/// Instagram handle mentioned in the text, taken literally (trailing dots included).
pub(crate) fn instagram_handle(text: &str) -> Option<&str> {
    INSTAGRAM.first_match(text)
}

pub(crate) fn twitter_handle(text: &str) -> Option<&str> {
    TWITTER.first_match(text)
}

pub(crate) fn website(text: &str) -> Option<&str> {
    WEBSITE.first_match(text)
}

pub(crate) fn instagram_url(handle: &str) -> String {
    format!("https://instagram.com/{}", handle)
}

pub(crate) fn twitter_url(handle: &str) -> String {
    format!("https://twitter.com/{}", handle)
}
