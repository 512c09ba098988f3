//! Remediation guidance for the most frequent issue categories.
//!
//! Categories are matched against an ordered rule table by lower-case
//! whole-word keywords; the first matching rule wins and anything unmatched gets the
//! generic playbook text for that category.

use serde::Serialize;

use crate::aggregate::CategoryCount;
use crate::core::SchemaVariant;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    Connectivity,
    Collaboration,
    Wireless,
    Identity,
    ConferenceRoom,
    SecurityWorkflow,
    Fallback,
}

#[derive(Debug)]
pub struct RemediationRule {
    pub kind: RuleKind,
    pub keywords: &'static [&'static str],
    pub guidance: &'static str,
    /// Only applied when the extended schema is in use
    pub extended_only: bool,
}

impl RemediationRule {
    fn matches(&self, category_lower: &str) -> bool {
        self.keywords
            .iter()
            .any(|kw| contains_word(category_lower, kw))
    }
}

/// `keyword` occurs in `text` with no letter or digit directly on either side.
fn contains_word(text: &str, keyword: &str) -> bool {
    text.match_indices(keyword).any(|(start, _)| {
        let before = text[..start].chars().next_back();
        let after = text[start + keyword.len()..].chars().next();
        !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
    })
}

pub const RULES: &[RemediationRule] = &[
    RemediationRule {
        kind: RuleKind::Connectivity,
        keywords: &["vpn", "remote access"],
        guidance: "VPN: validate MFA/token health, certificate lifecycle, and client version standardization.",
        extended_only: false,
    },
    RemediationRule {
        kind: RuleKind::Collaboration,
        keywords: &["teams", "zoom", "webex"],
        guidance: "Teams: standardize audio/video device profiles and confirm driver/firmware baselines.",
        extended_only: false,
    },
    RemediationRule {
        kind: RuleKind::Wireless,
        keywords: &["wi-fi", "wifi", "wireless", "wlan"],
        guidance: "Wi-Fi: enforce known-good driver versions and check access point roaming/coverage hotspots.",
        extended_only: false,
    },
    RemediationRule {
        kind: RuleKind::Identity,
        keywords: &["o365", "office 365", "m365", "entra"],
        guidance: "O365: review conditional access/MFA failure modes and sign-in logs for recurring patterns.",
        extended_only: false,
    },
    RemediationRule {
        kind: RuleKind::ConferenceRoom,
        keywords: &["conference", "av", "a/v", "audiovisual"],
        guidance: "Conference Room AV: create a pre-meeting health checklist and standardize room profiles.",
        extended_only: false,
    },
    RemediationRule {
        kind: RuleKind::SecurityWorkflow,
        keywords: &["edr", "phishing", "mfa"],
        guidance: "Security workflow: publish a triage and escalation playbook (EDR alerts, phishing reports, MFA resets) with severity criteria and hand-off owners.",
        extended_only: true,
    },
];

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    pub category: String,
    pub rule: RuleKind,
    pub text: String,
}

/// Rule-based classifier; the rule set depends on the schema variant.
#[derive(Debug, Clone, Copy)]
pub struct RecommendationEngine {
    variant: SchemaVariant,
}

impl RecommendationEngine {
    pub fn new(variant: SchemaVariant) -> Self {
        Self { variant }
    }

    fn active_rules(&self) -> impl Iterator<Item = &'static RemediationRule> + '_ {
        RULES
            .iter()
            .filter(move |rule| !rule.extended_only || self.variant.is_extended())
    }

    pub fn classify(&self, category: &str) -> Recommendation {
        let lower = category.to_lowercase();
        match self.active_rules().find(|rule| rule.matches(&lower)) {
            Some(rule) => Recommendation {
                category: category.to_string(),
                rule: rule.kind,
                text: rule.guidance.to_string(),
            },
            None => Recommendation {
                category: category.to_string(),
                rule: RuleKind::Fallback,
                text: format!(
                    "{}: review recurring causes and define a standard fix playbook.",
                    category
                ),
            },
        }
    }

    /// One recommendation per top-`k` category, in frequency-table order.
    ///
    /// Repeated guidance is kept; fewer than `k` categories yields fewer entries.
    pub fn recommend(&self, frequency: &[CategoryCount], k: usize) -> Vec<Recommendation> {
        frequency
            .iter()
            .take(k)
            .map(|row| self.classify(&row.category))
            .collect()
    }
}
