//! S/A/T/G/C/R problem representation and its markdown state card.

use serde::{Deserialize, Serialize};

use crate::catalog::CaseTemplate;
use crate::error::{CockpitError, CockpitResult};

/// Hard constraint options offered when a template brings none.
pub const DEFAULT_HARD_CONSTRAINTS: [&str; 3] = ["Truck capacity", "Time window", "Regulations"];

/// Soft constraint options offered when a template brings none.
pub const DEFAULT_SOFT_CONSTRAINTS: [&str; 3] =
    ["Customer preferences", "Fairness", "Minimize CO2"];

/// A decision problem described as state, actions, transitions, goals,
/// constraints and rewards.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ProblemSpec {
    #[serde(rename = "S")]
    pub state: String,
    #[serde(rename = "A")]
    pub actions: String,
    #[serde(rename = "T")]
    pub transitions: String,
    #[serde(rename = "G")]
    pub goals: String,
    /// Free-text constraints.
    #[serde(rename = "C")]
    pub constraints: String,
    /// Risks, rewards and results.
    #[serde(rename = "R")]
    pub rewards: String,
    pub hard_constraints: Vec<String>,
    pub soft_constraints: Vec<String>,
}

impl ProblemSpec {
    /// Build a spec from a catalog template, keeping only the chosen
    /// constraint options.
    pub fn from_template(
        template: &CaseTemplate,
        hard_constraints: Vec<String>,
        soft_constraints: Vec<String>,
    ) -> Self {
        Self {
            state: template.state.clone(),
            actions: template.actions.clone(),
            transitions: template.transitions.clone(),
            goals: template.goals.clone(),
            constraints: template.constraints.clone(),
            rewards: template.rewards.clone(),
            hard_constraints,
            soft_constraints,
        }
    }

    /// Build a spec from a template with every hard constraint checked and
    /// every soft constraint unchecked, which is how the form opens.
    pub fn with_template_defaults(template: &CaseTemplate) -> Self {
        Self::from_template(template, template.hard_options(), Vec::new())
    }

    /// Build a spec from a template with the given constraint choices.
    ///
    /// `hard` of `None` keeps every hard option checked. Each choice must
    /// name one of the template's options (case-insensitive) and is stored
    /// with the option's own spelling.
    pub fn from_choices(
        template: &CaseTemplate,
        hard: Option<&[String]>,
        soft: &[String],
    ) -> CockpitResult<Self> {
        let hard_options = template.hard_options();
        let hard = match hard {
            Some(chosen) => pick_options("hard constraint", chosen, &hard_options)?,
            None => hard_options,
        };
        let soft = pick_options("soft constraint", soft, &template.soft_options())?;
        Ok(Self::from_template(template, hard, soft))
    }

    pub fn to_markdown(&self) -> String {
        let hard = bullet_list(&self.hard_constraints);
        let soft = bullet_list(&self.soft_constraints);
        format!(
            "## Problem Card (State Card)\n\
             \n\
             **S (State):**  \n{}\n\
             \n\
             **A (Actions):**  \n{}\n\
             \n\
             **T (Transitions):**  \n{}\n\
             \n\
             **G (Goals):**  \n{}\n\
             \n\
             **C (Constraints - free text):**  \n{}\n\
             \n\
             **Hard constraints:**  \n{}\n\
             \n\
             **Soft constraints:**  \n{}\n\
             \n\
             **R (Risks/Rewards/Results):**  \n{}",
            self.state,
            self.actions,
            self.transitions,
            self.goals,
            self.constraints,
            hard,
            soft,
            self.rewards,
        )
        .trim()
        .to_string()
    }
}

fn pick_options(kind: &str, chosen: &[String], options: &[String]) -> CockpitResult<Vec<String>> {
    let mut picked: Vec<String> = Vec::with_capacity(chosen.len());
    for choice in chosen {
        let choice = choice.trim();
        let option = options
            .iter()
            .find(|o| o.eq_ignore_ascii_case(choice))
            .ok_or_else(|| {
                CockpitError::invalid_parameter(
                    "from_choices",
                    format!("unknown {} '{}'; options: {:?}", kind, choice, options),
                )
            })?;
        if !picked.contains(option) {
            picked.push(option.clone());
        }
    }
    Ok(picked)
}

fn bullet_list(items: &[String]) -> String {
    if items.is_empty() {
        return "- (none)".to_string();
    }
    items
        .iter()
        .map(|x| format!("- {}", x))
        .collect::<Vec<_>>()
        .join("\n")
}
