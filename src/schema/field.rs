//! Field descriptors and the closed set of field kinds

use chrono::NaiveDate;

/// Visible rows of a textarea control
pub const TEXTAREA_ROWS: u16 = 3;

/// Longest value a date control accepts (`YYYY-MM-DD`)
const DATE_LEN: usize = 10;

/// The input control a field is rendered with
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
    Tel,
    Number,
    Date,
    Textarea,
    /// Closed choice among the listed options
    Select(Vec<String>),
}

impl FieldKind {
    /// Options offered by a select control, empty for every other kind
    pub fn options(&self) -> &[String] {
        match self {
            Self::Select(options) => options,
            _ => &[],
        }
    }

    pub fn is_multiline(&self) -> bool {
        matches!(self, Self::Textarea)
    }

    pub fn is_select(&self) -> bool {
        matches!(self, Self::Select(_))
    }

    /// Hint shown in an empty control when the schema gives no placeholder
    pub fn default_hint(&self) -> &'static str {
        match self {
            Self::Email => "email@example.com",
            Self::Tel => "+254 7XX XXX XXX",
            Self::Date => "YYYY-MM-DD",
            Self::Text | Self::Number | Self::Textarea | Self::Select(_) => "",
        }
    }

    /// Whether typing `c` after `current` is something the native control allows.
    pub fn accepts_char(&self, current: &str, c: char) -> bool {
        match self {
            Self::Text | Self::Email | Self::Textarea => !c.is_control() || c == '\n',
            Self::Tel => c.is_ascii_digit() || matches!(c, ' ' | '+' | '-' | '(' | ')'),
            Self::Number => {
                c.is_ascii_digit()
                    || (c == '.' && !current.contains('.'))
                    || (c == '-' && current.is_empty())
            }
            Self::Date => (c.is_ascii_digit() || c == '-') && current.len() < DATE_LEN,
            // Select values come from the option list only
            Self::Select(_) => false,
        }
    }

    /// Describe why a non-empty value would be refused by the native control.
    ///
    /// Empty values are never reported here; presence is checked separately.
    pub fn format_problem(&self, value: &str) -> Option<&'static str> {
        if value.is_empty() {
            return None;
        }
        match self {
            Self::Email => {
                let valid = value
                    .split_once('@')
                    .is_some_and(|(local, domain)| {
                        !local.is_empty() && !domain.is_empty() && !domain.contains('@')
                    });
                (!valid).then_some("must be an email address")
            }
            Self::Number => (!value.parse::<f64>().is_ok_and(f64::is_finite))
                .then_some("must be a number"),
            Self::Date => NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .is_err()
                .then_some("must be a date (YYYY-MM-DD)"),
            Self::Select(options) => (!options.iter().any(|o| o == value))
                .then_some("must be one of the offered options"),
            Self::Text | Self::Tel | Self::Textarea => None,
        }
    }
}

/// Describes one form field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: String,
    pub label: String,
    pub kind: FieldKind,
    pub required: bool,
    pub placeholder: Option<String>,
    /// Value seeded into the record when the form opens
    pub initial: Option<String>,
}

impl FieldDescriptor {
    fn new(name: &str, label: &str, kind: FieldKind) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            kind,
            required: false,
            placeholder: None,
            initial: None,
        }
    }

    pub fn text(name: &str, label: &str) -> Self {
        Self::new(name, label, FieldKind::Text)
    }

    pub fn email(name: &str, label: &str) -> Self {
        Self::new(name, label, FieldKind::Email)
    }

    pub fn tel(name: &str, label: &str) -> Self {
        Self::new(name, label, FieldKind::Tel)
    }

    pub fn number(name: &str, label: &str) -> Self {
        Self::new(name, label, FieldKind::Number)
    }

    pub fn date(name: &str, label: &str) -> Self {
        Self::new(name, label, FieldKind::Date)
    }

    pub fn textarea(name: &str, label: &str) -> Self {
        Self::new(name, label, FieldKind::Textarea)
    }

    pub fn select(name: &str, label: &str, options: &[&str]) -> Self {
        let options = options.iter().map(|o| o.to_string()).collect();
        Self::new(name, label, FieldKind::Select(options))
    }

    /// Mark the field as required
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn placeholder(mut self, placeholder: &str) -> Self {
        self.placeholder = Some(placeholder.to_string());
        self
    }

    pub fn initial(mut self, value: &str) -> Self {
        self.initial = Some(value.to_string());
        self
    }

    /// Hint displayed while the field is empty
    pub fn hint(&self) -> String {
        if let Some(placeholder) = &self.placeholder {
            return placeholder.clone();
        }
        match &self.kind {
            FieldKind::Select(_) => format!("Select {}", self.label.to_lowercase()),
            kind => kind.default_hint().to_string(),
        }
    }

    /// Label with the required marker appended
    pub fn display_label(&self) -> String {
        if self.required {
            format!("{} *", self.label)
        } else {
            self.label.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod field_kind {
        use super::*;

        #[test]
        fn test_number_accepts_single_decimal_point() {
            let kind = FieldKind::Number;
            assert!(kind.accepts_char("", '-'));
            assert!(kind.accepts_char("12", '.'));
            assert!(!kind.accepts_char("12.5", '.'));
            assert!(!kind.accepts_char("1", '-'));
            assert!(!kind.accepts_char("1", 'a'));
        }

        #[test]
        fn test_date_is_capped_at_iso_length() {
            let kind = FieldKind::Date;
            assert!(kind.accepts_char("2026-02-1", '9'));
            assert!(!kind.accepts_char("2026-02-19", '1'));
            assert!(!kind.accepts_char("2026", '/'));
        }

        #[test]
        fn test_tel_accepts_phone_punctuation() {
            let kind = FieldKind::Tel;
            for c in ['+', '2', ' ', '(', ')', '-'] {
                assert!(kind.accepts_char("", c), "tel should accept {c:?}");
            }
            assert!(!kind.accepts_char("", 'x'));
        }

        #[test]
        fn test_select_rejects_typed_characters() {
            let kind = FieldKind::Select(vec!["Yes".to_string()]);
            assert!(!kind.accepts_char("", 'Y'));
        }

        #[test]
        fn test_format_problem_ignores_empty_values() {
            assert!(FieldKind::Email.format_problem("").is_none());
            assert!(FieldKind::Date.format_problem("").is_none());
        }

        #[test]
        fn test_format_problem_email() {
            assert!(FieldKind::Email.format_problem("a@b.co").is_none());
            assert!(FieldKind::Email.format_problem("ab.co").is_some());
            assert!(FieldKind::Email.format_problem("@b.co").is_some());
            assert!(FieldKind::Email.format_problem("a@").is_some());
        }

        #[test]
        fn test_format_problem_number_and_date() {
            assert!(FieldKind::Number.format_problem("-3.5").is_none());
            assert!(FieldKind::Number.format_problem("-").is_some());
            assert!(FieldKind::Date.format_problem("1990-07-14").is_none());
            assert!(FieldKind::Date.format_problem("1990-13-01").is_some());
            assert!(FieldKind::Date.format_problem("1990-07").is_some());
        }

        #[test]
        fn test_format_problem_number_rejects_non_finite() {
            for value in ["inf", "-inf", "NaN", "infinity"] {
                assert!(
                    FieldKind::Number.format_problem(value).is_some(),
                    "{value} should be refused"
                );
            }
            assert!(FieldKind::Number.format_problem("1e5").is_none());
        }

        #[test]
        fn test_only_select_has_options() {
            assert!(FieldKind::Text.options().is_empty());
            let kind = FieldKind::Select(vec!["S".to_string(), "M".to_string()]);
            assert_eq!(kind.options().len(), 2);
        }
    }

    mod descriptor {
        use super::*;

        #[test]
        fn test_builders_default_to_optional() {
            let field = FieldDescriptor::text("full_name", "Full Name");
            assert!(!field.required);
            assert!(field.placeholder.is_none());
            assert!(field.initial.is_none());
        }

        #[test]
        fn test_display_label_marks_required() {
            let field = FieldDescriptor::text("full_name", "Full Name").required();
            assert_eq!(field.display_label(), "Full Name *");
            let field = FieldDescriptor::text("notes", "Notes");
            assert_eq!(field.display_label(), "Notes");
        }

        #[test]
        fn test_hint_prefers_placeholder() {
            let field = FieldDescriptor::email("email", "Email").placeholder("you@club.ke");
            assert_eq!(field.hint(), "you@club.ke");
            let field = FieldDescriptor::email("email", "Email");
            assert_eq!(field.hint(), "email@example.com");
        }

        #[test]
        fn test_select_hint_uses_lowercased_label() {
            let field = FieldDescriptor::select("shirt_size", "Polo Shirt Size", &["S", "M"]);
            assert_eq!(field.hint(), "Select polo shirt size");
        }
    }
}
