//! Helpers other page scripts can call directly: currency formatting, employee
//! validation and toast notifications.

use super::*;
use num_traits::ToPrimitive;

/// Formats `amount` as whole US dollars, e.g. `1234.56` becomes `"$1,235"`.
///
/// Halves round away from zero. Values that cannot be represented as `f64`
/// are treated as NaN.
pub fn format_currency<T: ToPrimitive>(amount: T) -> String {
    let value = amount.to_f64().unwrap_or(f64::NAN);
    if value.is_nan() {
        return "$NaN".to_string();
    }

    let sign = if value.is_sign_negative() { "-" } else { "" };
    if value.is_infinite() {
        return format!("{sign}$∞");
    }

    let digits = format!("{:.0}", value.abs().round());
    format!("{sign}${}", group_integer_digits(&digits))
}

/// A single reason an employee record was rejected.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationIssue {
    NameRequired,
    NameTooShort { min_chars: usize },
    AgeOutOfRange { min: f64, max: f64 },
    SalaryTooLow { min: f64 },
}

impl ValidationIssue {
    pub fn field(&self) -> EmployeeField {
        match self {
            Self::NameRequired | Self::NameTooShort { .. } => EmployeeField::Name,
            Self::AgeOutOfRange { .. } => EmployeeField::Age,
            Self::SalaryTooLow { .. } => EmployeeField::Salary,
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NameRequired => write!(f, "Name is required"),
            Self::NameTooShort { min_chars } => {
                write!(f, "Name must be at least {min_chars} characters")
            }
            Self::AgeOutOfRange { min, max } => write!(f, "Age must be between {min} and {max}"),
            Self::SalaryTooLow { min } => write!(f, "Salary must be at least {min}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EmployeeField {
    Name,
    Age,
    Salary,
}

impl EmployeeField {
    pub(crate) const ALL: [Self; 3] = [Self::Name, Self::Age, Self::Salary];

    pub fn input_name(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Age => "age",
            Self::Salary => "salary",
        }
    }

    pub(crate) fn input_selector(self) -> &'static str {
        match self {
            Self::Name => r#"input[name="name"]"#,
            Self::Age => r#"input[name="age"]"#,
            Self::Salary => r#"input[name="salary"]"#,
        }
    }
}

/// Checks an employee record against the default rules and returns the
/// messages in field order (name, age, salary). An empty list means valid.
///
/// A zero, NaN or unconvertible `age` or `salary` counts as missing.
pub fn validate_employee<A, S>(name: &str, age: A, salary: S) -> Vec<String>
where
    A: ToPrimitive,
    S: ToPrimitive,
{
    employee_issues(name, age, salary, &EmployeeRules::default())
        .iter()
        .map(ToString::to_string)
        .collect()
}

pub fn employee_issues<A, S>(name: &str, age: A, salary: S, rules: &EmployeeRules) -> Vec<ValidationIssue>
where
    A: ToPrimitive,
    S: ToPrimitive,
{
    let mut issues = Vec::new();

    if utf16_len(name.trim()) < rules.name_min_chars {
        issues.push(ValidationIssue::NameTooShort {
            min_chars: rules.name_min_chars,
        });
    }

    match present_number(age.to_f64()) {
        Some(age) if age >= rules.age_min && age <= rules.age_max => {}
        _ => issues.push(ValidationIssue::AgeOutOfRange {
            min: rules.age_min,
            max: rules.age_max,
        }),
    }

    match present_number(salary.to_f64()) {
        Some(salary) if salary >= rules.salary_min => {}
        _ => issues.push(ValidationIssue::SalaryTooLow {
            min: rules.salary_min,
        }),
    }

    issues
}

/// Checks one raw form value. Only the name has a separate "required"
/// message; a blank age or salary reads as zero and fails its range.
pub(crate) fn check_form_field(
    field: EmployeeField,
    raw: &str,
    rules: &EmployeeRules,
) -> Option<ValidationIssue> {
    match field {
        EmployeeField::Name => {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                Some(ValidationIssue::NameRequired)
            } else if utf16_len(trimmed) < rules.name_min_chars {
                Some(ValidationIssue::NameTooShort {
                    min_chars: rules.name_min_chars,
                })
            } else {
                None
            }
        }
        EmployeeField::Age => match parse_form_number(raw) {
            Some(age) if age >= rules.age_min && age <= rules.age_max => None,
            _ => Some(ValidationIssue::AgeOutOfRange {
                min: rules.age_min,
                max: rules.age_max,
            }),
        },
        EmployeeField::Salary => match parse_form_number(raw) {
            Some(salary) if salary >= rules.salary_min => None,
            _ => Some(ValidationIssue::SalaryTooLow {
                min: rules.salary_min,
            }),
        },
    }
}

fn present_number(value: Option<f64>) -> Option<f64> {
    value.filter(|value| !value.is_nan() && *value != 0.0)
}

/// Bootstrap contextual color of a toast.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NotificationKind {
    #[default]
    Success,
    Danger,
    Warning,
    Info,
    Primary,
    Secondary,
    Light,
    Dark,
}

impl NotificationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Danger => "danger",
            Self::Warning => "warning",
            Self::Info => "info",
            Self::Primary => "primary",
            Self::Secondary => "secondary",
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    fn icon(self) -> &'static str {
        match self {
            Self::Success => "check-circle",
            _ => "exclamation-triangle",
        }
    }
}

const NOTIFICATION_STYLE: &str = "top: 20px; right: 20px; z-index: 9999; min-width: 300px;";

impl Page {
    pub fn show_notification(&mut self, message: &str) -> Result<()> {
        self.show_notification_with_kind(message, NotificationKind::default())
    }

    /// Appends a dismissible toast to `body` and schedules its removal.
    ///
    /// The message is inserted as text, never parsed as markup.
    pub fn show_notification_with_kind(&mut self, message: &str, kind: NotificationKind) -> Result<()> {
        let body = self
            .dom
            .first_element_by_tag("body")
            .unwrap_or(self.dom.root);

        let toast = self.dom.create_detached_element("div");
        self.dom.set_attr(
            toast,
            "class",
            &format!(
                "alert alert-{} alert-dismissible fade show position-fixed",
                kind.as_str()
            ),
        )?;
        self.dom.set_style_text(toast, NOTIFICATION_STYLE)?;

        let icon = self.dom.create_detached_element("i");
        self.dom
            .set_attr(icon, "class", &format!("bi bi-{}-fill me-2", kind.icon()))?;
        self.dom.append_child(toast, icon)?;

        let text = self.dom.create_detached_text(message);
        self.dom.append_child(toast, text)?;

        let close = self.dom.create_detached_element("button");
        self.dom.set_attr(close, "type", "button")?;
        self.dom.set_attr(close, "class", "btn-close")?;
        self.dom.set_attr(close, "data-bs-dismiss", "alert")?;
        self.dom.append_child(toast, close)?;

        self.dom.append_child(body, toast)?;
        self.schedule_timeout(
            TimerCallback::RemoveNotification(toast),
            self.config.notification_ms,
        );
        log::debug!(
            "event=notification_shown module=utils kind={}",
            kind.as_str()
        );
        Ok(())
    }

    pub(crate) fn remove_notification(&mut self, toast: NodeId) -> Result<()> {
        if self.active_element.is_some_and(|active| {
            active == toast || self.dom.parent(active) == Some(toast)
        }) {
            self.active_element = None;
        }
        self.dom.remove_node(toast)
    }
}
