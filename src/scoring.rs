use avatar_session_types::review::{
    FlowPhase, Insight, InsightKind, PerformanceReport, PhaseQuality, SkillScore,
};
use avatar_session_types::SessionMetrics;

/// Yields the performance review shown after a session. Keeping this
/// behind a trait means the session logic never depends on where the
/// numbers come from; the demo provider below returns a fixed record.
pub trait ScoringProvider {
    fn review(&self, metrics: &SessionMetrics) -> PerformanceReport;
}

/// The canned demo review.
#[derive(Debug, Clone, Default)]
pub struct DemoScores;

impl ScoringProvider for DemoScores {
    fn review(&self, metrics: &SessionMetrics) -> PerformanceReport {
        tracing::debug!(
            duration_secs = metrics.duration_secs,
            messages = metrics.messages_exchanged,
            "building demo performance review"
        );

        PerformanceReport {
            overall_score: 87,
            scientific_score: 92,
            behavioral_score: 82,
            skills: vec![
                skill("Clinical Data Presentation", 94, 85),
                skill("Evidence Communication", 89, 80),
                skill("Question Handling", 78, 85),
                skill("Relationship Building", 85, 80),
                skill("Objection Management", 73, 80),
            ],
            conversation_flow: vec![
                phase(
                    "0:30",
                    "Opening",
                    PhaseQuality::Excellent,
                    "Strong opening, established rapport quickly",
                ),
                phase(
                    "2:15",
                    "Data Presentation",
                    PhaseQuality::Good,
                    "Clear presentation of efficacy data",
                ),
                phase(
                    "4:45",
                    "Q&A Handling",
                    PhaseQuality::NeedsImprovement,
                    "Hesitated on safety questions",
                ),
                phase(
                    "6:30",
                    "Closing",
                    PhaseQuality::Good,
                    "Effective summary and next steps",
                ),
            ],
            key_insights: vec![
                insight(
                    InsightKind::Strength,
                    "Strong Clinical Knowledge",
                    "Demonstrated excellent understanding of tafamidis mechanism and ATTR-ACT trial design.",
                ),
                insight(
                    InsightKind::Improvement,
                    "Dose Comparison Clarity",
                    "Practice articulating 80mg vs 20mg differences more confidently with specific timeframes.",
                ),
                insight(
                    InsightKind::Strength,
                    "Professional Demeanor",
                    "Maintained professional tone and showed respect for HCP expertise throughout.",
                ),
                insight(
                    InsightKind::Improvement,
                    "Biomarker Discussion",
                    "Use more specific numbers when discussing NT-proBNP and troponin improvements.",
                ),
            ],
        }
    }
}

fn skill(skill: &str, score: u8, target: u8) -> SkillScore {
    SkillScore {
        skill: skill.to_string(),
        score,
        target,
    }
}

fn phase(time: &str, phase: &str, quality: PhaseQuality, notes: &str) -> FlowPhase {
    FlowPhase {
        time: time.to_string(),
        phase: phase.to_string(),
        quality,
        notes: notes.to_string(),
    }
}

fn insight(kind: InsightKind, title: &str, description: &str) -> Insight {
    Insight {
        kind,
        title: title.to_string(),
        description: description.to_string(),
    }
}
