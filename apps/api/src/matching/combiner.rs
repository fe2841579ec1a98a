//! Score Combiner: blends the three sub-scores into a weighted final score and an
//! unweighted overall average.
//!
//! `final` ranks, `overall` gates (see `ranker`). Both are kept on every result.

pub const EDUCATION_WEIGHT: f64 = 0.4;
pub const EXPERIENCE_WEIGHT: f64 = 0.3;
pub const SKILLS_WEIGHT: f64 = 0.3;

/// The three fit dimensions for one (resume, job description) pair.
/// Education and skills come from the judge and may be absent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubScores {
    pub education: Option<f64>,
    pub skills: Option<f64>,
    pub experience: Option<f64>,
}

/// A pair with every sub-score present. The only input `combine` accepts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompleteScores {
    pub education: f64,
    pub skills: f64,
    pub experience: f64,
}

impl SubScores {
    /// `Some` only when no dimension is missing.
    pub fn complete(&self) -> Option<CompleteScores> {
        Some(CompleteScores {
            education: self.education?,
            skills: self.skills?,
            experience: self.experience?,
        })
    }

    /// Names of the dimensions that could not be scored, for logs and error messages.
    pub fn missing(&self) -> Vec<&'static str> {
        [
            ("education", self.education),
            ("skills", self.skills),
            ("experience", self.experience),
        ]
        .into_iter()
        .filter(|(_, score)| score.is_none())
        .map(|(name, _)| name)
        .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CombinedScore {
    /// 0.4·education + 0.3·experience + 0.3·skills
    pub final_score: f64,
    /// (education + skills + experience) / 3
    pub overall_score: f64,
}

/// No clipping: the result stays in [0, 1] exactly when the inputs do.
pub fn combine(education: f64, skills: f64, experience: f64) -> CombinedScore {
    CombinedScore {
        final_score: EDUCATION_WEIGHT * education
            + EXPERIENCE_WEIGHT * experience
            + SKILLS_WEIGHT * skills,
        overall_score: (education + skills + experience) / 3.0,
    }
}

impl CompleteScores {
    pub fn combine(&self) -> CombinedScore {
        combine(self.education, self.skills, self.experience)
    }
}

/// Unit score → percentage rounded to two decimals.
pub fn to_percent(score: f64) -> f64 {
    (score * 100.0 * 100.0).round() / 100.0
}
