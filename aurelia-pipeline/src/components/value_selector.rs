use crate::selector::Selector;
use crate::types::Package;

/// Ranks packages by absolute value, highest first.
pub struct ValueSelector;

impl Selector<Package> for ValueSelector {
    fn score(&self, candidate: &Package) -> f64 {
        candidate.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranks_by_value_ignoring_weight() {
        let ranked = ValueSelector.sort(vec![
            Package::new("light", 1.0, 5.0),
            Package::new("heavy", 40.0, 50.0),
            Package::new("mid", 10.0, 20.0),
        ]);
        let ids: Vec<_> = ranked.iter().map(|p| p.pkg_id.as_str()).collect();
        assert_eq!(ids, vec!["heavy", "mid", "light"]);
    }
}
