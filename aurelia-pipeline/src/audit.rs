//! Copilot audit of a problem specification.
//!
//! No model is called. The audit produces the prompt an auditor model
//! would receive plus a handful of keyword heuristics standing in for its
//! answer. The copilot documents and audits; it never takes operational
//! decisions.

use serde::Serialize;

use crate::representation::ProblemSpec;

/// Metrics recommended for every last-mile model.
pub const RECOMMENDED_METRICS: [&str; 6] = [
    "On-time delivery rate",
    "Cost per delivery",
    "Capacity utilization",
    "Incidents",
    "Complaints",
    "Estimated CO2",
];

/// What a heuristic flagged.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum FindingKind {
    NoHardConstraints,
    MissingTimeWindows,
    MissingCompliance,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AuditFinding {
    pub kind: FindingKind,
    pub message: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AuditReport {
    pub prompt: String,
    pub findings: Vec<AuditFinding>,
    pub recommended_metrics: Vec<String>,
}

impl AuditReport {
    pub fn is_clean(&self) -> bool {
        self.findings.is_empty()
    }
}

/// Prompt template shown to the user for an external auditor model.
pub fn audit_prompt(spec: &ProblemSpec) -> String {
    format!(
        "You are an auditor of decision models. Review this specification and suggest improvements:\n\
         - S: {}\n\
         - A: {}\n\
         - T: {}\n\
         - G: {}\n\
         - C: {}\n\
         - Hard: {:?}\n\
         - Soft: {:?}\n\
         - R: {}\n\
         \n\
         Return:\n\
         1) Detected ambiguities\n\
         2) Likely missing constraints\n\
         3) Legal/operational risks\n\
         4) Recommended metrics",
        spec.state,
        spec.actions,
        spec.transitions,
        spec.goals,
        spec.constraints,
        spec.hard_constraints,
        spec.soft_constraints,
        spec.rewards,
    )
}

fn mentions_any(text: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| text.contains(n))
}

/// Run the heuristic audit over a problem spec.
pub fn audit(spec: &ProblemSpec) -> AuditReport {
    let constraints = spec.constraints.to_lowercase();
    let rewards = spec.rewards.to_lowercase();
    let mut findings = Vec::new();

    if spec.hard_constraints.is_empty() {
        findings.push(AuditFinding {
            kind: FindingKind::NoHardConstraints,
            message: "No hard constraints selected; the optimizer may be unrealistic.".into(),
        });
    }
    if !mentions_any(&constraints, &["window", "ventana"]) {
        findings.push(AuditFinding {
            kind: FindingKind::MissingTimeWindows,
            message: "Time windows / SLA are not explicit; state them if they apply to last mile."
                .into(),
        });
    }
    if !mentions_any(&constraints, &["regulat", "norma"]) && !rewards.contains("legal") {
        findings.push(AuditFinding {
            kind: FindingKind::MissingCompliance,
            message: "Risk: regulatory compliance is never mentioned (traffic, zones, privacy)."
                .into(),
        });
    }

    log::info!("audit produced {} findings", findings.len());

    AuditReport {
        prompt: audit_prompt(spec),
        findings,
        recommended_metrics: RECOMMENDED_METRICS.iter().map(|m| m.to_string()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(report: &AuditReport) -> Vec<FindingKind> {
        report.findings.iter().map(|f| f.kind.clone()).collect()
    }

    #[test]
    fn empty_spec_raises_every_finding() {
        let report = audit(&ProblemSpec::default());
        assert_eq!(
            kinds(&report),
            vec![
                FindingKind::NoHardConstraints,
                FindingKind::MissingTimeWindows,
                FindingKind::MissingCompliance,
            ]
        );
        assert!(!report.is_clean());
    }

    #[test]
    fn complete_spec_is_clean() {
        let spec = ProblemSpec {
            constraints: "Truck capacity, delivery Window, local Regulations".into(),
            hard_constraints: vec!["Truck capacity".into()],
            ..ProblemSpec::default()
        };
        assert!(audit(&spec).is_clean());
    }

    #[test]
    fn spanish_keywords_are_recognized() {
        let spec = ProblemSpec {
            constraints: "capacidad, ventana horaria, normativa".into(),
            hard_constraints: vec!["Capacidad".into()],
            ..ProblemSpec::default()
        };
        assert!(audit(&spec).is_clean());
    }

    #[test]
    fn legal_risk_covers_compliance() {
        let spec = ProblemSpec {
            constraints: "time window".into(),
            rewards: "Legal exposure on late deliveries".into(),
            hard_constraints: vec!["Time window".into()],
            ..ProblemSpec::default()
        };
        assert!(audit(&spec).is_clean());
    }

    #[test]
    fn prompt_embeds_the_spec() {
        let spec = ProblemSpec {
            state: "fleet of 3 vans".into(),
            hard_constraints: vec!["Truck capacity".into()],
            ..ProblemSpec::default()
        };
        let report = audit(&spec);
        assert!(report.prompt.contains("- S: fleet of 3 vans"));
        assert!(report.prompt.contains("- Hard: [\"Truck capacity\"]"));
        assert_eq!(report.recommended_metrics.len(), 6);
    }
}
