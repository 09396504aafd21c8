//! Shapes of the performance-review record a scoring provider yields.
//!
//! The values themselves come from a collaborator behind the
//! `ScoringProvider` trait in the main crate; nothing here carries logic.

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PhaseQuality {
    Excellent,
    Good,
    NeedsImprovement,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightKind {
    Strength,
    Improvement,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct SkillScore {
    pub skill: String,
    pub score: u8,
    pub target: u8,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct FlowPhase {
    /// Offset into the session, formatted m:ss.
    pub time: String,
    pub phase: String,
    pub quality: PhaseQuality,
    pub notes: String,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Insight {
    pub kind: InsightKind,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct PerformanceReport {
    pub overall_score: u8,
    pub scientific_score: u8,
    pub behavioral_score: u8,
    pub skills: Vec<SkillScore>,
    pub conversation_flow: Vec<FlowPhase>,
    pub key_insights: Vec<Insight>,
}
