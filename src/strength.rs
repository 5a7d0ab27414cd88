use crate::generator::GenerationRequest;
use std::fmt;

const REFERENCE_LENGTH: f64 = 50.0;
const EXTRA_CLASS_BONUS: f64 = 0.10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum StrengthLabel {
    Weak,
    Good,
    Strong,
    VeryStrong,
}

impl StrengthLabel {
    pub fn from_score(score: u8) -> Self {
        match score {
            0..=1 => Self::Weak,
            2 => Self::Good,
            3 => Self::Strong,
            _ => Self::VeryStrong,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Weak => "Weak",
            Self::Good => "Good",
            Self::Strong => "Strong",
            Self::VeryStrong => "Very Strong",
        }
    }
}

impl fmt::Display for StrengthLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrengthAssessment {
    pub label: StrengthLabel,
    pub score: u8,
    /// Share of the strength bar to fill, in `[0, 1]`.
    pub fill_fraction: f64,
}

/// Rates a request by its settings alone; the generated password is never
/// inspected.
pub fn classify(request: &GenerationRequest) -> StrengthAssessment {
    let mut score = 0u8;

    if request.length >= 8 {
        score += 1;
    }
    if request.length >= 12 {
        score += 1;
    }
    if request.include_digits {
        score += 1;
    }
    if request.include_symbols {
        score += 1;
    }

    let bonus = if request.include_digits || request.include_symbols {
        EXTRA_CLASS_BONUS
    } else {
        0.0
    };
    let fill_fraction = (request.length as f64 / REFERENCE_LENGTH + bonus).min(1.0);

    StrengthAssessment {
        label: StrengthLabel::from_score(score),
        score,
        fill_fraction,
    }
}
