use serde::{Deserialize, Serialize};

/// Which classification task is requested.
///
/// Each kind owns its label vocabulary, the label returned when the model answers
/// outside of it, and the instruction prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassificationKind {
    #[serde(alias = "analyzeSentiment")]
    Sentiment,
    #[serde(alias = "analyzeLeaning")]
    Leaning,
}

impl ClassificationKind {
    pub const ALL: [ClassificationKind; 2] =
        [ClassificationKind::Sentiment, ClassificationKind::Leaning];

    pub fn labels(&self) -> &'static [Label; 3] {
        match self {
            ClassificationKind::Sentiment => &[Label::Positive, Label::Negative, Label::Neutral],
            ClassificationKind::Leaning => {
                &[Label::RightLeaning, Label::LeftLeaning, Label::Unbiased]
            }
        }
    }

    pub fn default_label(&self) -> Label {
        match self {
            ClassificationKind::Sentiment => Label::Neutral,
            ClassificationKind::Leaning => Label::Unbiased,
        }
    }

    /// Identifier used by front ends to request this kind.
    pub fn action(&self) -> &'static str {
        match self {
            ClassificationKind::Sentiment => "sentiment",
            ClassificationKind::Leaning => "leaning",
        }
    }

    /// Human readable task name used in logs and error messages.
    pub fn display_name(&self) -> &'static str {
        match self {
            ClassificationKind::Sentiment => "sentiment",
            ClassificationKind::Leaning => "news leaning",
        }
    }

    /// Single-turn instruction asking for exactly one word of this kind's vocabulary.
    pub fn prompt(&self, text: &str) -> String {
        match self {
            ClassificationKind::Sentiment => indoc::formatdoc! {r#"
                Analyze the sentiment of the following text and classify it as either "Positive", "Negative", or "Neutral". Provide only one of these words as your response.

                Text: "{text}""#,
                text = text
            },
            ClassificationKind::Leaning => indoc::formatdoc! {r#"
                Analyze the political leaning of the following news article text and classify it as either "Right-leaning", "Left-leaning", or "Unbiased". Provide only one of these words as your response.

                News Article Text: "{text}""#,
                text = text
            },
        }
    }

    /// Exact match of the trimmed model output against this kind's labels.
    pub fn parse_label(&self, content: &str) -> Option<Label> {
        let content = content.trim();
        self.labels()
            .iter()
            .copied()
            .find(|label| label.as_str() == content)
    }

    /// Like [`Self::parse_label`], falling back to [`Self::default_label`].
    pub fn label_or_default(&self, content: Option<&str>) -> Label {
        content
            .and_then(|content| self.parse_label(content))
            .unwrap_or_else(|| self.default_label())
    }
}

impl std::fmt::Display for ClassificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.action())
    }
}

impl std::str::FromStr for ClassificationKind {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "sentiment" | "analyzeSentiment" => Ok(ClassificationKind::Sentiment),
            "leaning" | "analyzeLeaning" => Ok(ClassificationKind::Leaning),
            other => crate::bail!("unknown classification kind: {other}"),
        }
    }
}

/// A classification result. Always a member of its kind's label set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Label {
    Positive,
    Negative,
    Neutral,
    #[serde(rename = "Right-leaning")]
    RightLeaning,
    #[serde(rename = "Left-leaning")]
    LeftLeaning,
    Unbiased,
}

impl Label {
    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Positive => "Positive",
            Label::Negative => "Negative",
            Label::Neutral => "Neutral",
            Label::RightLeaning => "Right-leaning",
            Label::LeftLeaning => "Left-leaning",
            Label::Unbiased => "Unbiased",
        }
    }

    pub fn kind(&self) -> ClassificationKind {
        match self {
            Label::Positive | Label::Negative | Label::Neutral => ClassificationKind::Sentiment,
            Label::RightLeaning | Label::LeftLeaning | Label::Unbiased => {
                ClassificationKind::Leaning
            }
        }
    }
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
