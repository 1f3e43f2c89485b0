use crate::errors::CoreError;

/// Characters accepted as digit-grouping separators ("1,00,000", "1 000", "1'000").
const GROUPING_SEPARATORS: [char; 6] = [',', '_', ' ', '\u{00A0}', '\u{202F}', '\''];

/// A constraint applied to a parsed number.
#[derive(Debug, Clone, PartialEq)]
pub enum Rule {
    /// Strictly greater than zero.
    Positive,
    /// Zero or greater.
    NonNegative,
    /// Strictly greater than the value of another field.
    Exceeds { other: String, value: f64 },
    /// Strictly less than the value of another field.
    Below { other: String, value: f64 },
    /// Inclusive range.
    Range { min: f64, max: f64 },
    /// No fractional part (share counts, lot counts).
    WholeNumber,
}

impl Rule {
    fn check(&self, field: &str, value: f64) -> Result<(), CoreError> {
        let ok = match self {
            Rule::Positive => value > 0.0,
            Rule::NonNegative => value >= 0.0,
            Rule::Exceeds { value: bound, .. } => value > *bound,
            Rule::Below { value: bound, .. } => value < *bound,
            Rule::Range { min, max } => value >= *min && value <= *max,
            Rule::WholeNumber => value.fract() == 0.0,
        };
        if ok {
            return Ok(());
        }

        let message = match self {
            Rule::Positive => "must be greater than zero".to_string(),
            Rule::NonNegative => "must not be negative".to_string(),
            Rule::Exceeds { other, value: bound } => {
                format!("must be greater than {other} ({bound})")
            }
            Rule::Below { other, value: bound } => {
                format!("must be less than {other} ({bound})")
            }
            Rule::Range { min, max } => format!("must be between {min} and {max}"),
            Rule::WholeNumber => "must be a whole number".to_string(),
        };
        Err(CoreError::invalid_input(field, message))
    }
}

/// Parse free-text numeric input into a finite `f64` and apply `rules` in order.
///
/// Grouping separators are stripped first. The remainder must be a plain
/// decimal: optional sign, digits, at most one `.`. Exponent notation and
/// `inf`/`nan` are rejected.
pub fn normalize(field: &str, text: &str, rules: &[Rule]) -> Result<f64, CoreError> {
    let cleaned: String = text
        .trim()
        .chars()
        .filter(|c| !GROUPING_SEPARATORS.contains(c))
        .collect();

    if cleaned.is_empty() {
        return Err(CoreError::invalid_input(field, "a value is required"));
    }

    let digits = cleaned
        .strip_prefix('-')
        .or_else(|| cleaned.strip_prefix('+'))
        .unwrap_or(&cleaned);
    let dots = digits.chars().filter(|c| *c == '.').count();
    let has_digit = digits.chars().any(|c| c.is_ascii_digit());
    let well_formed = digits.chars().all(|c| c.is_ascii_digit() || c == '.');

    if !well_formed || !has_digit || dots > 1 {
        return Err(CoreError::invalid_input(
            field,
            format!("'{}' is not a number", text.trim()),
        ));
    }

    let value: f64 = cleaned
        .parse()
        .map_err(|_| CoreError::invalid_input(field, format!("'{}' is not a number", text.trim())))?;

    validate(field, value, rules)?;
    Ok(value)
}

/// Check an already-parsed value against `rules`. Non-finite values always fail.
pub fn validate(field: &str, value: f64, rules: &[Rule]) -> Result<(), CoreError> {
    if !value.is_finite() {
        return Err(CoreError::invalid_input(field, "must be a finite number"));
    }
    for rule in rules {
        rule.check(field, value)?;
    }
    Ok(())
}

/// Like [`normalize`], but blank input yields `Ok(None)` (optional form fields).
pub fn normalize_optional(field: &str, text: &str, rules: &[Rule]) -> Result<Option<f64>, CoreError> {
    if text.trim().is_empty() {
        return Ok(None);
    }
    normalize(field, text, rules).map(Some)
}

/// Builder for a named numeric form field.
///
/// ```
/// use stock_calculator_core::input::NumberField;
///
/// let qty = NumberField::new("quantity").positive().whole().parse("1,200").unwrap();
/// assert_eq!(qty, 1200.0);
/// ```
#[derive(Debug, Clone)]
pub struct NumberField {
    name: String,
    rules: Vec<Rule>,
}

impl NumberField {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rules: Vec::new(),
        }
    }

    pub fn positive(mut self) -> Self {
        self.rules.push(Rule::Positive);
        self
    }

    pub fn non_negative(mut self) -> Self {
        self.rules.push(Rule::NonNegative);
        self
    }

    pub fn whole(mut self) -> Self {
        self.rules.push(Rule::WholeNumber);
        self
    }

    pub fn range(mut self, min: f64, max: f64) -> Self {
        self.rules.push(Rule::Range { min, max });
        self
    }

    /// Require this field to be strictly greater than another field's value.
    pub fn exceeds(mut self, other: impl Into<String>, value: f64) -> Self {
        self.rules.push(Rule::Exceeds {
            other: other.into(),
            value,
        });
        self
    }

    /// Require this field to be strictly less than another field's value.
    pub fn below(mut self, other: impl Into<String>, value: f64) -> Self {
        self.rules.push(Rule::Below {
            other: other.into(),
            value,
        });
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parse(&self, text: &str) -> Result<f64, CoreError> {
        normalize(&self.name, text, &self.rules)
    }

    pub fn parse_optional(&self, text: &str) -> Result<Option<f64>, CoreError> {
        normalize_optional(&self.name, text, &self.rules)
    }
}
