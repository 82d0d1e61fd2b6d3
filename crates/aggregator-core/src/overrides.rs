//! Provider-over-global layering shared by the TLS and rate policies.

/// Provider value when present, else the global value, else `default`.
pub fn layered<T: Copy>(provider: Option<T>, global: Option<T>, default: T) -> T {
    provider.or(global).unwrap_or(default)
}

/// Layered lookup where only a provider `Some(true)` counts as an override.
///
/// A provider `Some(false)` falls through to the global flag, so it cannot
/// switch off a relaxation enabled globally.
pub fn layered_flag(provider: Option<bool>, global: Option<bool>) -> bool {
    layered(provider.filter(|enabled| *enabled), global, false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_value_wins() {
        assert_eq!(layered(Some(5.0), Some(1.0), 0.0), 5.0);
    }

    #[test]
    fn global_value_fills_missing_provider_value() {
        assert_eq!(layered(None, Some(2.0), 0.0), 2.0);
    }

    #[test]
    fn default_applies_when_nothing_is_set() {
        assert_eq!(layered::<u32>(None, None, 7), 7);
    }

    #[test]
    fn flag_table() {
        assert!(layered_flag(Some(true), Some(false)));
        assert!(layered_flag(Some(true), None));
        assert!(layered_flag(None, Some(true)));
        assert!(layered_flag(Some(false), Some(true)));
        assert!(!layered_flag(Some(false), Some(false)));
        assert!(!layered_flag(Some(false), None));
        assert!(!layered_flag(None, None));
    }
}
