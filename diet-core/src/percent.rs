/// `total / target` as a percentage clamped to [0, 100].
///
/// A zero target has nothing to track and reads as 0%.
pub fn display_percent(total: f64, target: f64) -> f64 {
    if target <= 0.0 {
        return 0.0;
    }
    (total * 100.0 / target).clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_clamps_both_ends() {
        assert_relative_eq!(display_percent(50.0, 200.0), 25.0);
        assert_relative_eq!(display_percent(-410.0, 2482.0), 0.0);
        assert_relative_eq!(display_percent(3000.0, 2000.0), 100.0);
        assert_relative_eq!(display_percent(10.0, 0.0), 0.0);
    }
}
