//! Lexicon-based sentiment classification over summary text.
//!
//! The polarity lexicon itself comes from the `vader_sentiment` crate; this
//! module only applies the fixed labeling thresholds.

use serde::Serialize;
use vader_sentiment::SentimentIntensityAnalyzer;

/// Minimum positive score for a Positive label.
pub const POSITIVE_THRESHOLD: f64 = 0.15;
/// Minimum negative score for a Negative label.
pub const NEGATIVE_THRESHOLD: f64 = 0.15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl SentimentLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "Positive",
            SentimentLabel::Negative => "Negative",
            SentimentLabel::Neutral => "Neutral",
        }
    }
}

/// Raw VADER polarity scores for a text.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PolarityScores {
    pub pos: f64,
    pub neg: f64,
    pub neu: f64,
    pub compound: f64,
}

/// Shared analyzer. Building one parses the lexicon, so construct it once at
/// startup and hand it out through `AppState`.
pub struct SentimentClassifier {
    analyzer: SentimentIntensityAnalyzer<'static>,
}

impl SentimentClassifier {
    pub fn new() -> Self {
        Self {
            analyzer: SentimentIntensityAnalyzer::new(),
        }
    }

    pub fn scores(&self, text: &str) -> PolarityScores {
        let scores = self.analyzer.polarity_scores(text);
        let get = |key: &str| scores.get(key).copied().unwrap_or(0.0);
        PolarityScores {
            pos: get("pos"),
            neg: get("neg"),
            neu: get("neu"),
            compound: get("compound"),
        }
    }

    pub fn classify(&self, text: &str) -> SentimentLabel {
        label_for(self.scores(text))
    }
}

impl Default for SentimentClassifier {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixed-threshold labeling. Anything that is neither clearly positive nor
/// clearly negative (including high-neutral text) is Neutral.
pub fn label_for(scores: PolarityScores) -> SentimentLabel {
    if scores.pos > POSITIVE_THRESHOLD && scores.pos > scores.neg {
        SentimentLabel::Positive
    } else if scores.neg > NEGATIVE_THRESHOLD && scores.neg > scores.pos {
        SentimentLabel::Negative
    } else {
        SentimentLabel::Neutral
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_positive() {
        let classifier = SentimentClassifier::new();
        let label = classifier.classify("I love this wonderful, amazing product. It is great!");
        assert_eq!(label, SentimentLabel::Positive);
    }

    #[test]
    fn test_classify_negative() {
        let classifier = SentimentClassifier::new();
        let label = classifier.classify("This is a horrible, terrible disaster. I hate it.");
        assert_eq!(label, SentimentLabel::Negative);
    }

    #[test]
    fn test_classify_neutral() {
        let classifier = SentimentClassifier::new();
        let label = classifier.classify("The meeting is scheduled for Tuesday at noon.");
        assert_eq!(label, SentimentLabel::Neutral);
    }

    #[test]
    fn test_scores_are_proportions() {
        let classifier = SentimentClassifier::new();
        let scores = classifier.scores("Good news and bad news arrived today.");
        let total = scores.pos + scores.neg + scores.neu;
        assert!((total - 1.0).abs() < 0.05, "pos+neg+neu should be ~1, got {total}");
    }

    #[test]
    fn test_label_thresholds() {
        let neutral = PolarityScores {
            pos: 0.15,
            neg: 0.0,
            neu: 0.85,
            compound: 0.1,
        };
        // exactly at the threshold is not enough
        assert_eq!(label_for(neutral), SentimentLabel::Neutral);

        let positive = PolarityScores {
            pos: 0.16,
            neg: 0.05,
            neu: 0.79,
            compound: 0.4,
        };
        assert_eq!(label_for(positive), SentimentLabel::Positive);

        let negative = PolarityScores {
            pos: 0.16,
            neg: 0.3,
            neu: 0.54,
            compound: -0.4,
        };
        assert_eq!(label_for(negative), SentimentLabel::Negative);
    }

    #[test]
    fn test_label_as_str() {
        assert_eq!(SentimentLabel::Positive.as_str(), "Positive");
        assert_eq!(SentimentLabel::Neutral.as_str(), "Neutral");
    }
}
