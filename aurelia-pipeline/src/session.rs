//! Explicit session context.
//!
//! Results of earlier steps are kept in a plain struct owned by the
//! caller. Steps that depend on earlier results (the hybrid plan needs a
//! prediction, the audit needs a problem spec) fail with
//! `MissingPrerequisite` until those results are recorded.

use serde::Serialize;

use crate::audit::{self, AuditReport};
use crate::config::CockpitConfig;
use crate::error::{CockpitError, CockpitResult};
use crate::knapsack::greedy_select;
use crate::planner::compare_plans;
use crate::representation::ProblemSpec;
use crate::types::{
    Criterion, DemandInputs, DemandPrediction, Package, PlanComparison, RiskLevel,
    SelectionResult,
};

/// A selection together with the capacity it was computed for.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RecordedSelection {
    pub capacity: f64,
    pub criterion: Criterion,
    pub result: SelectionResult,
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct CockpitSession {
    #[serde(skip)]
    config: CockpitConfig,
    pub problem_spec: Option<ProblemSpec>,
    pub ml_inputs: Option<DemandInputs>,
    pub ml_prediction: Option<DemandPrediction>,
    pub or_solution: Option<RecordedSelection>,
    pub hybrid_plan: Option<PlanComparison>,
}

impl CockpitSession {
    pub fn new(config: CockpitConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &CockpitConfig {
        &self.config
    }

    pub fn record_problem_spec(&mut self, spec: ProblemSpec) -> &ProblemSpec {
        log::info!("session: problem spec recorded");
        self.problem_spec.insert(spec)
    }

    /// Predict demand and keep both the inputs and the prediction.
    pub fn predict(&mut self, inputs: DemandInputs) -> CockpitResult<&DemandPrediction> {
        let prediction = self.config.predictor().predict(&inputs)?;
        log::info!("session: prediction recorded ({:.1} parcels)", prediction.demand);
        self.ml_inputs = Some(inputs);
        Ok(&*self.ml_prediction.insert(prediction))
    }

    /// Run the greedy load selection and keep the result.
    pub fn optimize_load(
        &mut self,
        capacity: f64,
        packages: &[Package],
        criterion: Criterion,
    ) -> CockpitResult<&RecordedSelection> {
        let result = greedy_select(capacity, packages, criterion)?;
        log::info!(
            "session: selection recorded ({} packages, {:.0}% utilization)",
            result.selected.len(),
            result.utilization * 100.0
        );
        Ok(&*self.or_solution.insert(RecordedSelection {
            capacity,
            criterion,
            result,
        }))
    }

    /// Compare static and rain-adjusted plans using the recorded prediction inputs.
    pub fn plan_from_prediction(&mut self, risk: RiskLevel) -> CockpitResult<&PlanComparison> {
        let inputs = match (&self.ml_inputs, &self.ml_prediction) {
            (Some(inputs), Some(_)) => *inputs,
            _ => {
                return Err(CockpitError::MissingPrerequisite(
                    "generate a demand prediction before planning the hybrid route".into(),
                ))
            }
        };
        let comparison = compare_plans(inputs.rain, risk, self.config.base_stop_minutes);
        Ok(&*self.hybrid_plan.insert(comparison))
    }

    /// Audit the recorded problem spec.
    pub fn audit(&self) -> CockpitResult<AuditReport> {
        let spec = self.problem_spec.as_ref().ok_or_else(|| {
            CockpitError::MissingPrerequisite(
                "define the problem spec before auditing it".into(),
            )
        })?;
        Ok(audit::audit(spec))
    }

    /// Forget every recorded result, keeping the configuration.
    pub fn reset(&mut self) {
        *self = Self::new(self.config.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::package_loader::default_packages;

    fn inputs(rain: f64) -> DemandInputs {
        DemandInputs {
            day_of_week: 0,
            rain,
            promo: false,
        }
    }

    #[test]
    fn plan_requires_prediction() {
        let mut session = CockpitSession::default();
        let err = session.plan_from_prediction(RiskLevel::Neutral).unwrap_err();
        assert!(matches!(err, CockpitError::MissingPrerequisite(_)));
        assert!(session.hybrid_plan.is_none());
    }

    #[test]
    fn plan_uses_recorded_rain() {
        let mut session = CockpitSession::default();
        session.predict(inputs(1.0)).unwrap();
        let plan = session.plan_from_prediction(RiskLevel::Neutral).unwrap();
        assert_eq!(plan.ml_traffic_minutes, 15.0);
        assert_eq!(plan.ml_plan.max_stops, 16);
        assert!(session.hybrid_plan.is_some());
    }

    #[test]
    fn failed_prediction_leaves_session_untouched() {
        let mut session = CockpitSession::default();
        assert!(session.predict(inputs(2.0)).is_err());
        assert!(session.ml_inputs.is_none());
        assert!(session.ml_prediction.is_none());
    }

    #[test]
    fn audit_requires_problem_spec() {
        let mut session = CockpitSession::default();
        assert!(matches!(session.audit(), Err(CockpitError::MissingPrerequisite(_))));
        session.record_problem_spec(ProblemSpec::default());
        assert_eq!(session.audit().unwrap().findings.len(), 3);
    }

    #[test]
    fn selection_is_recorded_with_capacity() {
        let mut session = CockpitSession::default();
        session
            .optimize_load(50.0, &default_packages(), Criterion::Ratio)
            .unwrap();
        let recorded = session.or_solution.as_ref().unwrap();
        assert_eq!(recorded.capacity, 50.0);
        assert_eq!(recorded.result.selected_ids(), vec!["A", "B", "C", "D"]);
    }

    #[test]
    fn configured_base_stop_minutes_reach_the_planner() {
        let config = CockpitConfig {
            base_stop_minutes: 20.0,
            ..CockpitConfig::default()
        };
        let mut session = CockpitSession::new(config);
        session.predict(inputs(0.0)).unwrap();
        let plan = session.plan_from_prediction(RiskLevel::Neutral).unwrap();
        assert_eq!(plan.ml_plan.minutes_per_stop, 25.0);
    }

    #[test]
    fn reset_keeps_config() {
        let config = CockpitConfig {
            seed: 9,
            ..CockpitConfig::default()
        };
        let mut session = CockpitSession::new(config.clone());
        session.predict(inputs(0.5)).unwrap();
        session.reset();
        assert!(session.ml_prediction.is_none());
        assert_eq!(session.config(), &config);
    }
}
