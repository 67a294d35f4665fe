//! Control matchers.
//!
//! A matcher inspects normalized requirement text and returns control hits
//! with confidences. Matchers are registered in an explicit ordered list
//! ([`MatcherSet`]); for each control, the first matcher in priority order
//! that clears the confidence threshold wins, while a candidate may still
//! match any number of distinct controls.

use aho_corasick::{AhoCorasick, AhoCorasickBuilder, MatchKind};
use regex::Regex;
use rustc_hash::{FxHashMap, FxHashSet};
use suture_core::model::ControlMapping;
use suture_core::registry::ControlKey;

/// A control matched by a matcher, with its confidence in `[0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlHit {
    pub control: ControlKey,
    pub confidence: f32,
}

/// Matching capability with a fixed contract: normalized text in, control
/// hits out. Pure — same text, same hits.
pub trait Matcher: Send + Sync {
    fn id(&self) -> &str;
    fn apply(&self, text: &str) -> Vec<ControlHit>;
}

/// Keyword list for one control.
#[derive(Debug, Clone)]
pub struct KeywordRule {
    pub control: ControlKey,
    /// Lowercase phrases; confidence is the fraction of distinct phrases
    /// found in the text.
    pub keywords: Vec<String>,
}

impl KeywordRule {
    pub fn new(control: ControlKey, keywords: &[&str]) -> Self {
        Self {
            control,
            keywords: keywords.iter().map(|k| k.to_lowercase()).collect(),
        }
    }
}

/// Aho-Corasick keyword matcher over all rules' phrases in one automaton.
pub struct KeywordMatcher {
    id: String,
    automaton: AhoCorasick,
    /// Pattern index → (rule index, keyword index within the rule).
    pattern_owner: Vec<(usize, usize)>,
    rules: Vec<KeywordRule>,
}

impl KeywordMatcher {
    pub fn new(id: impl Into<String>, rules: Vec<KeywordRule>) -> Self {
        let mut patterns = Vec::new();
        let mut pattern_owner = Vec::new();
        for (rule_idx, rule) in rules.iter().enumerate() {
            for (kw_idx, keyword) in rule.keywords.iter().enumerate() {
                patterns.push(keyword.clone());
                pattern_owner.push((rule_idx, kw_idx));
            }
        }

        let automaton = AhoCorasickBuilder::new()
            .ascii_case_insensitive(true)
            .match_kind(MatchKind::Standard)
            .build(&patterns)
            .expect("keyword patterns are plain literals");

        Self {
            id: id.into(),
            automaton,
            pattern_owner,
            rules,
        }
    }
}

impl Matcher for KeywordMatcher {
    fn id(&self) -> &str {
        &self.id
    }

    fn apply(&self, text: &str) -> Vec<ControlHit> {
        // Distinct matched keywords per rule
        let mut matched: FxHashMap<usize, FxHashSet<usize>> = FxHashMap::default();
        for found in self.automaton.find_overlapping_iter(text) {
            let (rule_idx, kw_idx) = self.pattern_owner[found.pattern().as_usize()];
            matched.entry(rule_idx).or_default().insert(kw_idx);
        }

        let mut hits: Vec<ControlHit> = matched
            .into_iter()
            .map(|(rule_idx, keywords)| {
                let rule = &self.rules[rule_idx];
                ControlHit {
                    control: rule.control.clone(),
                    confidence: keywords.len() as f32 / rule.keywords.len() as f32,
                }
            })
            .collect();
        hits.sort_by(|a, b| a.control.cmp(&b.control));
        hits
    }
}

/// A compiled regex rule for one control, with a fixed confidence.
pub struct PatternRule {
    pub control: ControlKey,
    pub pattern: Regex,
    pub confidence: f32,
}

impl PatternRule {
    pub fn new(
        control: ControlKey,
        pattern: &str,
        confidence: f32,
    ) -> Result<Self, regex::Error> {
        Ok(Self {
            control,
            pattern: Regex::new(pattern)?,
            confidence,
        })
    }
}

/// Regex matcher: each rule contributes its fixed confidence when its
/// pattern matches.
pub struct PatternMatcher {
    id: String,
    rules: Vec<PatternRule>,
}

impl PatternMatcher {
    pub fn new(id: impl Into<String>, rules: Vec<PatternRule>) -> Self {
        Self {
            id: id.into(),
            rules,
        }
    }
}

impl Matcher for PatternMatcher {
    fn id(&self) -> &str {
        &self.id
    }

    fn apply(&self, text: &str) -> Vec<ControlHit> {
        let mut hits: Vec<ControlHit> = self
            .rules
            .iter()
            .filter(|rule| rule.pattern.is_match(text))
            .map(|rule| ControlHit {
                control: rule.control.clone(),
                confidence: rule.confidence,
            })
            .collect();
        hits.sort_by(|a, b| a.control.cmp(&b.control));
        hits
    }
}

/// Explicit ordered list of matchers.
#[derive(Default)]
pub struct MatcherSet {
    matchers: Vec<Box<dyn Matcher>>,
}

impl MatcherSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a matcher; earlier matchers take priority per control.
    pub fn push(mut self, matcher: Box<dyn Matcher>) -> Self {
        self.matchers.push(matcher);
        self
    }

    pub fn len(&self) -> usize {
        self.matchers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matchers.is_empty()
    }

    /// Run every matcher in priority order and keep, per control, the
    /// first hit at or above `threshold`.
    ///
    /// Distinct controls accumulate independently, so one text span can
    /// legitimately satisfy several controls — including equal-confidence
    /// controls of the same framework; ties are not an error.
    pub fn best_matches(&self, text: &str, threshold: f32) -> Vec<ControlMapping> {
        let mut by_control: FxHashMap<ControlKey, ControlMapping> = FxHashMap::default();
        for matcher in &self.matchers {
            for hit in matcher.apply(text) {
                if hit.confidence < threshold {
                    continue;
                }
                by_control
                    .entry(hit.control.clone())
                    .or_insert_with(|| ControlMapping {
                        control: hit.control,
                        confidence: hit.confidence,
                        matcher: matcher.id().to_string(),
                    });
            }
        }

        let mut mappings: Vec<ControlMapping> = by_control.into_values().collect();
        mappings.sort_by(|a, b| a.control.cmp(&b.control));
        mappings
    }
}
