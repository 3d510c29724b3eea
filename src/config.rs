/// Limits applied to employee records, both by the submit validator and by
/// [`crate::utils::validate_employee`].
#[derive(Debug, Clone, PartialEq)]
pub struct EmployeeRules {
    pub name_min_chars: usize,
    pub age_min: f64,
    pub age_max: f64,
    pub salary_min: f64,
}

impl Default for EmployeeRules {
    fn default() -> Self {
        Self {
            name_min_chars: 2,
            age_min: 18.0,
            age_max: 65.0,
            salary_min: 1000.0,
        }
    }
}

/// Timings and rules for the page enhancements.
///
/// All delays are in milliseconds of page time.
#[derive(Debug, Clone, PartialEq)]
pub struct EnhancerConfig {
    /// Delay before server-rendered alerts are closed.
    pub alert_dismiss_ms: i64,
    /// Fade transition applied by the toolkit before a `.fade` alert is detached.
    pub alert_fade_ms: i64,
    /// Delay before a submit button leaves its loading state.
    pub submit_revert_ms: i64,
    pub search_debounce_ms: i64,
    /// Shortest non-empty query that triggers a search.
    pub search_min_chars: usize,
    pub notification_ms: i64,
    pub rules: EmployeeRules,
}

impl Default for EnhancerConfig {
    fn default() -> Self {
        Self {
            alert_dismiss_ms: 5000,
            alert_fade_ms: 150,
            submit_revert_ms: 2000,
            search_debounce_ms: 500,
            search_min_chars: 2,
            notification_ms: 3000,
            rules: EmployeeRules::default(),
        }
    }
}
