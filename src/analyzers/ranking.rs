use crate::analyzers::types::{FeatureImportance, SummarySeries};

/// Returns the `k` most important features, descending.
///
/// The sort is stable, so equal importances keep their input order. The
/// caller's slice is left untouched.
pub fn top_k(entries: &[FeatureImportance], k: usize) -> Vec<FeatureImportance> {
    let mut ranked = entries.to_vec();
    ranked.sort_by(|a, b| b.importance.total_cmp(&a.importance));
    ranked.truncate(k);
    ranked
}

/// Converts ranked features into a chartable series.
pub fn importance_series(ranked: &[FeatureImportance]) -> SummarySeries {
    let mut series = SummarySeries::new("Feature Importance");
    for entry in ranked {
        series.push(entry.feature.as_str(), entry.importance);
    }
    series
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fi(feature: &str, importance: f64) -> FeatureImportance {
        FeatureImportance {
            feature: feature.to_string(),
            importance,
        }
    }

    #[test]
    fn test_top_k_takes_largest() {
        let entries = vec![fi("a", 0.1), fi("b", 0.9), fi("c", 0.5)];
        let ranked = top_k(&entries, 2);

        assert_eq!(ranked, vec![fi("b", 0.9), fi("c", 0.5)]);
        // input untouched
        assert_eq!(entries[0], fi("a", 0.1));
    }

    #[test]
    fn test_top_k_larger_than_input() {
        let entries = vec![fi("a", 0.1), fi("b", 0.9)];
        assert_eq!(top_k(&entries, 10), vec![fi("b", 0.9), fi("a", 0.1)]);
        assert!(top_k(&[], 3).is_empty());
    }

    #[test]
    fn test_top_k_stable_on_ties() {
        let entries = vec![fi("x", 0.2), fi("y", 0.5), fi("z", 0.2), fi("w", 0.2)];
        let ranked = top_k(&entries, 3);

        assert_eq!(ranked, vec![fi("y", 0.5), fi("x", 0.2), fi("z", 0.2)]);
    }

    #[test]
    fn test_importance_series() {
        let series = importance_series(&[fi("mileage", 0.4), fi("brake_wear", 0.3)]);
        assert_eq!(series.labels(), vec!["mileage", "brake_wear"]);
        assert_eq!(series.values(), vec![0.4, 0.3]);
    }
}
