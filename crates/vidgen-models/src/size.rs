//! Generation models and supported output size resolution.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

/// Available generation models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GenerationModel {
    /// Standard model
    Sora2,
    /// Pro model with additional output resolutions
    Sora2Pro,
}

impl GenerationModel {
    /// All available models.
    pub const ALL: &'static [GenerationModel] = &[GenerationModel::Sora2, GenerationModel::Sora2Pro];

    /// Model used when a requested model is unknown.
    pub const DEFAULT: GenerationModel = GenerationModel::Sora2;

    /// Returns the model identifier as sent to the API.
    pub fn as_str(&self) -> &'static str {
        match self {
            GenerationModel::Sora2 => "sora-2",
            GenerationModel::Sora2Pro => "sora-2-pro",
        }
    }

    /// Supported output sizes for this model.
    pub fn rules(&self) -> SizeRuleSet {
        match self {
            GenerationModel::Sora2 => SizeRuleSet::SORA_2,
            GenerationModel::Sora2Pro => SizeRuleSet::SORA_2_PRO,
        }
    }
}

impl fmt::Display for GenerationModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for GenerationModel {
    type Err = ModelParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sora-2" => Ok(GenerationModel::Sora2),
            "sora-2-pro" => Ok(GenerationModel::Sora2Pro),
            _ => Err(ModelParseError(s.to_string())),
        }
    }
}

#[derive(Debug, Error)]
#[error("Unknown model: {0}")]
pub struct ModelParseError(String);

/// One supported output resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SizeRule {
    /// Canonical `WIDTHxHEIGHT` label as sent to the API
    pub label: &'static str,
    pub width: u32,
    pub height: u32,
}

impl SizeRule {
    pub const fn new(label: &'static str, width: u32, height: u32) -> Self {
        Self {
            label,
            width,
            height,
        }
    }

    /// Width-to-height ratio as a decimal.
    pub fn aspect(&self) -> f64 {
        self.width as f64 / self.height as f64
    }

    /// Whether this rule is landscape-or-square oriented.
    pub fn is_landscape(&self) -> bool {
        self.width >= self.height
    }
}

impl fmt::Display for SizeRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label)
    }
}

/// Ordered set of supported sizes for one model; the first entry is the
/// model's default.
#[derive(Debug, Clone, Copy)]
pub struct SizeRuleSet {
    rules: &'static [SizeRule],
}

impl SizeRuleSet {
    /// Sizes supported by `sora-2`.
    pub const SORA_2: SizeRuleSet = SizeRuleSet {
        rules: &[
            SizeRule::new("1280x720", 1280, 720),
            SizeRule::new("720x1280", 720, 1280),
        ],
    };

    /// Sizes supported by `sora-2-pro`.
    pub const SORA_2_PRO: SizeRuleSet = SizeRuleSet {
        rules: &[
            SizeRule::new("1280x720", 1280, 720),
            SizeRule::new("720x1280", 720, 1280),
            SizeRule::new("1792x1024", 1792, 1024),
            SizeRule::new("1024x1792", 1024, 1792),
        ],
    };

    /// Rule set for a model identifier, falling back to the default
    /// model's set when the identifier is unknown.
    pub fn for_model(model: &str) -> SizeRuleSet {
        model
            .parse::<GenerationModel>()
            .unwrap_or(GenerationModel::DEFAULT)
            .rules()
    }

    pub fn rules(&self) -> &'static [SizeRule] {
        self.rules
    }

    /// The model's default size (first entry).
    pub fn default_rule(&self) -> &'static SizeRule {
        &self.rules[0]
    }

    /// Whether `label` names a size in this set.
    pub fn contains_label(&self, label: &str) -> bool {
        self.rules.iter().any(|r| r.label == label)
    }

    /// Picks the supported size closest to the given pixel dimensions.
    ///
    /// Rules matching the input's orientation (landscape when
    /// width >= height) are considered first; when none share it, the
    /// full set is used. Within the candidate pool the rule with the
    /// smallest absolute aspect-ratio difference wins, ties resolving to
    /// the earliest entry in table order.
    pub fn closest(&self, width: u32, height: u32) -> &'static SizeRule {
        let landscape = width >= height;
        let oriented: Vec<&'static SizeRule> = self
            .rules
            .iter()
            .filter(|r| r.is_landscape() == landscape)
            .collect();
        let pool = if oriented.is_empty() {
            self.rules.iter().collect()
        } else {
            oriented
        };

        let target = width as f64 / height as f64;
        pool.into_iter()
            .min_by(|a, b| {
                let da = (a.aspect() - target).abs();
                let db = (b.aspect() - target).abs();
                da.partial_cmp(&db).unwrap_or(Ordering::Equal)
            })
            .expect("rule set is never empty")
    }

    /// Maps a free-form size string onto a supported size.
    ///
    /// Exact label matches (after normalization) win; otherwise the input
    /// is parsed as `WIDTHxHEIGHT` and resolved via [`Self::closest`].
    /// Unparseable input yields the default rule. Never fails.
    pub fn coerce(&self, input: &str) -> &'static SizeRule {
        let normalized = normalize_size(input);

        if let Some(rule) = self.rules.iter().find(|r| r.label == normalized) {
            return rule;
        }

        if let Some((w, h)) = normalized.split_once('x') {
            if let (Ok(w), Ok(h)) = (w.parse::<u32>(), h.parse::<u32>()) {
                if w > 0 && h > 0 {
                    return self.closest(w, h);
                }
            }
        }

        self.default_rule()
    }
}

/// Normalizes a size string: lowercase, keep only `[0-9x]`, collapse
/// runs of `x` to a single separator.
fn normalize_size(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.to_ascii_lowercase().chars() {
        if c == 'x' {
            if !out.ends_with('x') {
                out.push('x');
            }
        } else if c.is_ascii_digit() {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_parse() {
        assert_eq!("sora-2".parse::<GenerationModel>().unwrap(), GenerationModel::Sora2);
        assert_eq!(
            " Sora-2-Pro ".parse::<GenerationModel>().unwrap(),
            GenerationModel::Sora2Pro
        );
        assert!("sora-3".parse::<GenerationModel>().is_err());
    }

    #[test]
    fn unknown_model_falls_back_to_default_rules() {
        let rules = SizeRuleSet::for_model("imagegen-9000");
        assert_eq!(rules.default_rule().label, "1280x720");
        assert_eq!(rules.rules().len(), 2);
    }

    #[test]
    fn closest_exact_match() {
        assert_eq!(SizeRuleSet::SORA_2.closest(1280, 720).label, "1280x720");
        assert_eq!(SizeRuleSet::SORA_2.closest(720, 1280).label, "720x1280");
    }

    #[test]
    fn closest_returns_rule_from_set() {
        let rules = SizeRuleSet::SORA_2_PRO;
        for &(w, h) in &[(1u32, 1u32), (4000, 30), (30, 4000), (640, 480), (1080, 1920)] {
            let rule = rules.closest(w, h);
            assert!(rules.contains_label(rule.label));
        }
    }

    #[test]
    fn square_input_counts_as_landscape() {
        // width == height admits only the landscape rules, so a square
        // image resolves to the landscape entry.
        assert_eq!(SizeRuleSet::SORA_2.closest(1000, 1000).label, "1280x720");
    }

    #[test]
    fn orientation_filter_prefers_matching_rules() {
        // 2000x1000 is landscape; for sora-2-pro the landscape pool is
        // {1280x720, 1792x1024} and 1792x1024 (1.75) is nearer 2.0.
        assert_eq!(SizeRuleSet::SORA_2_PRO.closest(2000, 1000).label, "1792x1024");
    }

    #[test]
    fn closest_prefers_first_rule_on_aspect_tie() {
        // Both rules are exactly 16:9, so every input scores a tie and
        // table order decides.
        const TIED: SizeRuleSet = SizeRuleSet {
            rules: &[
                SizeRule::new("1280x720", 1280, 720),
                SizeRule::new("1920x1080", 1920, 1080),
            ],
        };
        assert_eq!(TIED.closest(640, 360).label, "1280x720");
        assert_eq!(TIED.closest(1920, 1080).label, "1280x720");
    }

    #[test]
    fn coerce_normalizes_exact_label() {
        assert_eq!(SizeRuleSet::SORA_2.coerce("1280 X 720").label, "1280x720");
        assert_eq!(SizeRuleSet::SORA_2.coerce(" 720x1280 ").label, "720x1280");
        assert_eq!(SizeRuleSet::SORA_2.coerce("1280xx720").label, "1280x720");
    }

    #[test]
    fn coerce_resolves_unsupported_dimensions() {
        assert_eq!(SizeRuleSet::SORA_2.coerce("1920x1080").label, "1280x720");
        assert_eq!(SizeRuleSet::SORA_2_PRO.coerce("2000x1000").label, "1792x1024");
    }

    #[test]
    fn coerce_garbage_returns_default() {
        assert_eq!(SizeRuleSet::SORA_2.coerce("garbage").label, "1280x720");
        assert_eq!(SizeRuleSet::SORA_2.coerce("").label, "1280x720");
        assert_eq!(SizeRuleSet::SORA_2.coerce("0x720").label, "1280x720");
        assert_eq!(SizeRuleSet::SORA_2.coerce("12x34x56").label, "1280x720");
    }

    #[test]
    fn normalize_size_strips_and_collapses() {
        assert_eq!(normalize_size("1280 X  x 720"), "1280x720");
        assert_eq!(normalize_size("1,280x720px"), "1280x720x");
        assert_eq!(normalize_size("wide"), "");
    }
}
