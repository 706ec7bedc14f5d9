//! Greedy capacity-constrained load selection.
//!
//! Packages are ranked once by the chosen criterion and accepted in that
//! order while they still fit. Rejected packages are never revisited, so
//! the result can be far from the optimal knapsack packing.

use crate::components::ratio_selector::RatioSelector;
use crate::components::value_selector::ValueSelector;
use crate::error::{CockpitError, CockpitResult};
use crate::selector::Selector;
use crate::types::{Criterion, Package, SelectionResult};

/// Selector implementing the ranking for a criterion.
pub fn selector_for(criterion: Criterion) -> Box<dyn Selector<Package>> {
    match criterion {
        Criterion::Value => Box::new(ValueSelector),
        Criterion::Ratio => Box::new(RatioSelector),
    }
}

/// Reject inputs the greedy pass cannot give a meaningful answer for.
fn validate(capacity: f64, packages: &[Package]) -> CockpitResult<()> {
    if capacity.is_nan() {
        return Err(CockpitError::invalid_parameter(
            "greedy_select",
            "capacity must be a number",
        ));
    }
    for p in packages {
        if !p.weight.is_finite() || p.weight < 0.0 {
            return Err(CockpitError::InvalidItem {
                id: p.pkg_id.clone(),
                reason: format!("weight must be finite and non-negative, got {}", p.weight),
            });
        }
        if !p.value.is_finite() || p.value < 0.0 {
            return Err(CockpitError::InvalidItem {
                id: p.pkg_id.clone(),
                reason: format!("value must be finite and non-negative, got {}", p.value),
            });
        }
    }
    Ok(())
}

/// Greedily fill `capacity` with packages ranked by `criterion`.
///
/// A non-positive capacity yields the empty selection. A package is
/// accepted when it fits exactly into the remaining space.
pub fn greedy_select(
    capacity: f64,
    packages: &[Package],
    criterion: Criterion,
) -> CockpitResult<SelectionResult> {
    validate(capacity, packages)?;

    if capacity <= 0.0 {
        log::debug!("greedy_select: capacity {} leaves nothing to fill", capacity);
        return Ok(SelectionResult::empty());
    }

    let selector = selector_for(criterion);
    let ranked = selector.sort(packages.to_vec());

    let mut selected = Vec::new();
    let mut total_weight = 0.0;
    let mut total_value = 0.0;

    for p in ranked {
        if total_weight + p.weight <= capacity {
            total_weight += p.weight;
            total_value += p.value;
            selected.push(p);
        }
    }

    log::debug!(
        "greedy_select: {} accepted {}/{} packages, weight {:.2}/{:.2}",
        selector.name(),
        selected.len(),
        packages.len(),
        total_weight,
        capacity
    );

    Ok(SelectionResult {
        selected,
        total_weight,
        total_value,
        utilization: (total_weight / capacity).min(1.0),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::package_loader::default_packages;

    fn ids(result: &SelectionResult) -> Vec<&str> {
        result.selected_ids()
    }

    #[test]
    fn value_criterion_takes_biggest_first() {
        let result = greedy_select(50.0, &default_packages(), Criterion::Value).unwrap();
        assert_eq!(ids(&result), vec!["F", "D"]);
        assert!((result.total_weight - 50.0).abs() < 1e-9);
        assert!((result.total_value - 100.0).abs() < 1e-9);
        assert!((result.utilization - 1.0).abs() < 1e-9);
    }

    #[test]
    fn ratio_ties_keep_input_order() {
        let result = greedy_select(50.0, &default_packages(), Criterion::Ratio).unwrap();
        assert_eq!(ids(&result), vec!["A", "B", "C", "D"]);
        assert!((result.total_weight - 50.0).abs() < 1e-9);
        assert!((result.total_value - 100.0).abs() < 1e-9);
        assert!((result.utilization - 1.0).abs() < 1e-9);
    }

    #[test]
    fn zero_capacity_is_empty() {
        let result = greedy_select(0.0, &default_packages(), Criterion::Value).unwrap();
        assert_eq!(result, SelectionResult::empty());
    }

    #[test]
    fn negative_capacity_is_empty() {
        for capacity in [-1.0, -100.0, f64::NEG_INFINITY] {
            let result = greedy_select(capacity, &default_packages(), Criterion::Ratio).unwrap();
            assert!(result.selected.is_empty());
            assert_eq!(result.utilization, 0.0);
        }
    }

    #[test]
    fn weightless_item_is_always_affordable() {
        let packages = vec![Package::new("Z", 0.0, 10.0)];
        let result = greedy_select(5.0, &packages, Criterion::Ratio).unwrap();
        assert_eq!(ids(&result), vec!["Z"]);
        assert_eq!(result.total_weight, 0.0);
        assert_eq!(result.total_value, 10.0);
        assert_eq!(result.utilization, 0.0);
    }

    #[test]
    fn weightless_item_ranks_behind_positive_ratios() {
        let packages = vec![
            Package::new("Z", 0.0, 100.0),
            Package::new("A", 2.0, 1.0),
            Package::new("B", 3.0, 9.0),
        ];
        let result = greedy_select(10.0, &packages, Criterion::Ratio).unwrap();
        assert_eq!(ids(&result), vec!["B", "A", "Z"]);
    }

    #[test]
    fn exact_fit_is_accepted() {
        let packages = vec![Package::new("A", 7.5, 1.0), Package::new("B", 2.5, 1.0)];
        let result = greedy_select(10.0, &packages, Criterion::Value).unwrap();
        assert_eq!(ids(&result), vec!["A", "B"]);
        assert_eq!(result.utilization, 1.0);
    }

    #[test]
    fn rejected_item_does_not_stop_the_walk() {
        let packages = vec![
            Package::new("big", 8.0, 100.0),
            Package::new("too_big", 5.0, 90.0),
            Package::new("small", 2.0, 10.0),
        ];
        let result = greedy_select(10.0, &packages, Criterion::Value).unwrap();
        assert_eq!(ids(&result), vec!["big", "small"]);
    }

    #[test]
    fn greedy_can_miss_the_optimum() {
        // Optimal packing is B + C (value 120); value-greedy grabs A first.
        let packages = vec![
            Package::new("A", 6.0, 70.0),
            Package::new("B", 5.0, 60.0),
            Package::new("C", 5.0, 60.0),
        ];
        let result = greedy_select(10.0, &packages, Criterion::Value).unwrap();
        assert_eq!(ids(&result), vec!["A"]);
        assert_eq!(result.total_value, 70.0);
    }

    #[test]
    fn partial_fill_reports_fractional_utilization() {
        let packages = vec![Package::new("A", 30.0, 1.0), Package::new("B", 30.0, 1.0)];
        let result = greedy_select(40.0, &packages, Criterion::Value).unwrap();
        assert!((result.utilization - 0.75).abs() < 1e-9);
    }

    #[test]
    fn rejects_negative_weight() {
        let packages = vec![Package::new("bad", -1.0, 5.0)];
        let err = greedy_select(10.0, &packages, Criterion::Value).unwrap_err();
        assert!(matches!(err, CockpitError::InvalidItem { ref id, .. } if id == "bad"));
    }

    #[test]
    fn rejects_nan_value_even_with_zero_capacity() {
        let packages = vec![Package::new("nan", 1.0, f64::NAN)];
        assert!(greedy_select(0.0, &packages, Criterion::Ratio).is_err());
    }

    #[test]
    fn rejects_nan_capacity() {
        let err = greedy_select(f64::NAN, &default_packages(), Criterion::Value).unwrap_err();
        assert!(matches!(err, CockpitError::InvalidParameter { .. }));
    }

    #[test]
    fn repeated_calls_are_identical() {
        let packages = default_packages();
        let first = greedy_select(37.0, &packages, Criterion::Ratio).unwrap();
        for _ in 0..5 {
            assert_eq!(greedy_select(37.0, &packages, Criterion::Ratio).unwrap(), first);
        }
    }

    #[test]
    fn duplicate_input_entries_are_each_considered_once() {
        let dup = Package::new("X", 1.0, 1.0);
        let packages = vec![dup.clone(), dup];
        let result = greedy_select(10.0, &packages, Criterion::Value).unwrap();
        assert_eq!(result.selected.len(), 2);
    }
}
