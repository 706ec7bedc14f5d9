use std::cmp::Ordering;

use crate::util;

/// Selectors rank candidates by a score before the greedy pass.
pub trait Selector<C>: Send + Sync
where
    C: Clone + Send + Sync + 'static,
{
    /// Extract the score from a candidate to use for sorting.
    fn score(&self, candidate: &C) -> f64;

    /// Sort candidates by their scores in descending order.
    ///
    /// The sort is stable: candidates with equal scores keep their input
    /// order. NaN scores are pushed to the end of the list so they never
    /// appear as top candidates.
    fn sort(&self, candidates: Vec<C>) -> Vec<C> {
        let mut sorted = candidates;
        sorted.sort_by(|a, b| {
            let sa = self.score(a);
            let sb = self.score(b);
            match (sa.is_nan(), sb.is_nan()) {
                (true, true) => Ordering::Equal,
                (true, false) => Ordering::Greater,
                (false, true) => Ordering::Less,
                (false, false) => sb.partial_cmp(&sa).unwrap_or(Ordering::Equal),
            }
        });
        sorted
    }

    /// Returns a stable name for logging.
    fn name(&self) -> &str {
        util::short_type_name(std::any::type_name::<Self>())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Identity;

    impl Selector<(char, f64)> for Identity {
        fn score(&self, candidate: &(char, f64)) -> f64 {
            candidate.1
        }
    }

    #[test]
    fn sort_is_descending_and_stable() {
        let sorted = Identity.sort(vec![('a', 1.0), ('b', 3.0), ('c', 1.0), ('d', 3.0)]);
        let order: String = sorted.iter().map(|(c, _)| *c).collect();
        assert_eq!(order, "bdac");
    }

    #[test]
    fn nan_scores_sink_to_the_end() {
        let sorted = Identity.sort(vec![('n', f64::NAN), ('a', -1.0), ('b', 2.0)]);
        let order: String = sorted.iter().map(|(c, _)| *c).collect();
        assert_eq!(order, "ban");
    }

    #[test]
    fn name_is_short_type_name() {
        assert_eq!(Identity.name(), "Identity");
    }
}
