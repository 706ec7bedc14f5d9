//! Aurelia decision cockpit.
//!
//! Small, closed-form models that illustrate how prediction and
//! optimization feed a last-mile delivery decision:
//! - `representation` / `catalog`: describe the problem (S/A/T/G/C/R)
//! - `predictor`: simulated demand forecast with seeded noise
//! - `knapsack`: greedy capacity-constrained load selection
//! - `planner`: rain-adjusted stop budget for an 8-hour shift
//! - `audit`: keyword audit of a problem spec
//!
//! `session::CockpitSession` carries results from one step to the next.

pub mod audit;
pub mod catalog;
pub mod components;
pub mod config;
pub mod constants;
pub mod error;
pub mod knapsack;
pub mod package_loader;
pub mod planner;
pub mod predictor;
pub mod representation;
pub mod selector;
pub mod session;
pub mod types;
pub mod util;

pub use catalog::{CaseTemplate, Catalog};
pub use config::CockpitConfig;
pub use error::{CockpitError, CockpitResult};
pub use knapsack::greedy_select;
pub use representation::ProblemSpec;
pub use session::CockpitSession;
pub use types::{
    Criterion, DemandInputs, DemandPrediction, HybridPlan, Package, PlanComparison, RiskLevel,
    SelectionResult,
};
