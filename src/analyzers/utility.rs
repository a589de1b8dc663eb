/// Computes the arithmetic mean of a slice of values. Returns 0.0 for empty input.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Computes the population standard deviation given a pre-computed mean.
/// Returns 0.0 for empty input.
pub fn stddev(values: &[f64], mean: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;

    variance.sqrt()
}

/// Formats a bin edge, dropping the fractional part when it is zero.
pub fn format_edge(edge: f64) -> String {
    if edge.fract() == 0.0 {
        format!("{edge:.0}")
    } else {
        format!("{edge}")
    }
}

/// Upper-cases the first character of `s`.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_and_stddev() {
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let m = mean(&values);
        assert_eq!(m, 5.0);
        assert_eq!(stddev(&values, m), 2.0);
        assert_eq!(mean(&[]), 0.0);
    }

    #[test]
    fn test_format_edge() {
        assert_eq!(format_edge(200.0), "200");
        assert_eq!(format_edge(-10.0), "-10");
        assert_eq!(format_edge(2.5), "2.5");
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("highway"), "Highway");
        assert_eq!(capitalize(""), "");
    }
}
