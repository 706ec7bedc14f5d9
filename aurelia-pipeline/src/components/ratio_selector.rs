use crate::selector::Selector;
use crate::types::Package;

/// Ranks packages by value density (value per unit weight).
///
/// Weightless packages score 0.0 rather than infinity, so they land
/// behind every package with a positive ratio.
pub struct RatioSelector;

impl Selector<Package> for RatioSelector {
    fn score(&self, candidate: &Package) -> f64 {
        candidate.value_ratio()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranks_by_density() {
        let ranked = RatioSelector.sort(vec![
            Package::new("bulky", 50.0, 60.0),
            Package::new("dense", 2.0, 10.0),
            Package::new("plain", 10.0, 20.0),
        ]);
        let ids: Vec<_> = ranked.iter().map(|p| p.pkg_id.as_str()).collect();
        assert_eq!(ids, vec!["dense", "plain", "bulky"]);
    }

    #[test]
    fn weightless_package_does_not_dominate() {
        let ranked = RatioSelector.sort(vec![
            Package::new("free", 0.0, 1000.0),
            Package::new("cheap", 1.0, 0.5),
        ]);
        assert_eq!(ranked[0].pkg_id, "cheap");
        assert_eq!(ranked[1].pkg_id, "free");
    }
}
