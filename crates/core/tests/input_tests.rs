// ═══════════════════════════════════════════════════════════════════
// Input Tests — free-text numeric normalization and field rules
// ═══════════════════════════════════════════════════════════════════

use stock_calculator_core::errors::CoreError;
use stock_calculator_core::input::{normalize, normalize_optional, validate, NumberField, Rule};

fn field_of(err: CoreError) -> String {
    match err {
        CoreError::InvalidInput { field, .. } => field,
        other => panic!("expected InvalidInput, got {other:?}"),
    }
}

// ── Parsing ─────────────────────────────────────────────────────────

mod parsing {
    use super::*;

    #[test]
    fn plain_number() {
        assert_eq!(normalize("price", "123.45", &[]).unwrap(), 123.45);
    }

    #[test]
    fn grouping_separators_stripped() {
        assert_eq!(normalize("amount", "1,00,000", &[]).unwrap(), 100_000.0);
        assert_eq!(normalize("amount", "1_000", &[]).unwrap(), 1000.0);
        assert_eq!(normalize("amount", "1 000 000", &[]).unwrap(), 1_000_000.0);
        assert_eq!(normalize("amount", "1\u{00A0}500", &[]).unwrap(), 1500.0);
        assert_eq!(normalize("amount", "1\u{202F}500", &[]).unwrap(), 1500.0);
        assert_eq!(normalize("amount", "1'500.5", &[]).unwrap(), 1500.5);
    }

    #[test]
    fn surrounding_whitespace_trimmed() {
        assert_eq!(normalize("q", "  42  ", &[]).unwrap(), 42.0);
    }

    #[test]
    fn signs() {
        assert_eq!(normalize("x", "-12.5", &[]).unwrap(), -12.5);
        assert_eq!(normalize("x", "+3", &[]).unwrap(), 3.0);
    }

    #[test]
    fn leading_or_trailing_dot() {
        assert_eq!(normalize("x", ".5", &[]).unwrap(), 0.5);
        assert_eq!(normalize("x", "5.", &[]).unwrap(), 5.0);
    }

    #[test]
    fn empty_is_rejected() {
        let err = normalize("price", "   ", &[]).unwrap_err();
        assert_eq!(err.to_string(), "Invalid input for 'price': a value is required");
    }

    #[test]
    fn only_separators_is_rejected() {
        assert!(normalize("price", ",,,", &[]).is_err());
    }

    #[test]
    fn garbage_is_rejected() {
        let err = normalize("price", "12abc", &[]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid input for 'price': '12abc' is not a number"
        );
    }

    #[test]
    fn exponent_inf_nan_rejected() {
        for text in ["1e5", "inf", "NaN", "infinity", "-inf"] {
            assert!(normalize("x", text, &[]).is_err(), "accepted {text}");
        }
    }

    #[test]
    fn two_dots_rejected() {
        assert!(normalize("x", "1.2.3", &[]).is_err());
    }

    #[test]
    fn lone_sign_or_dot_rejected() {
        assert!(normalize("x", "-", &[]).is_err());
        assert!(normalize("x", ".", &[]).is_err());
        assert!(normalize("x", "+.", &[]).is_err());
    }

    #[test]
    fn sign_in_the_middle_rejected() {
        assert!(normalize("x", "1-2", &[]).is_err());
        assert!(normalize("x", "--1", &[]).is_err());
    }
}

// ── Rules ───────────────────────────────────────────────────────────

mod rules {
    use super::*;

    #[test]
    fn positive() {
        assert!(normalize("q", "0", &[Rule::Positive]).is_err());
        assert!(normalize("q", "-1", &[Rule::Positive]).is_err());
        assert_eq!(normalize("q", "0.01", &[Rule::Positive]).unwrap(), 0.01);
    }

    #[test]
    fn non_negative() {
        assert_eq!(normalize("y", "0", &[Rule::NonNegative]).unwrap(), 0.0);
        assert!(normalize("y", "-0.5", &[Rule::NonNegative]).is_err());
    }

    #[test]
    fn exceeds_other_field() {
        let rule = Rule::Exceeds {
            other: "initial value".into(),
            value: 10_000.0,
        };
        assert!(normalize("final", "15,000", &[rule.clone()]).is_ok());
        let err = normalize("final", "10000", &[rule]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid input for 'final': must be greater than initial value (10000)"
        );
    }

    #[test]
    fn below_other_field() {
        let rule = Rule::Below {
            other: "current loss".into(),
            value: 20.0,
        };
        assert!(normalize("recovery", "10", &[rule.clone()]).is_ok());
        assert!(normalize("recovery", "20", &[rule]).is_err());
    }

    #[test]
    fn range_is_inclusive() {
        let rule = Rule::Range { min: 0.0, max: 100.0 };
        assert!(normalize("pct", "0", &[rule.clone()]).is_ok());
        assert!(normalize("pct", "100", &[rule.clone()]).is_ok());
        assert!(normalize("pct", "100.01", &[rule]).is_err());
    }

    #[test]
    fn whole_number() {
        assert!(normalize("lots", "3", &[Rule::WholeNumber]).is_ok());
        assert!(normalize("lots", "3.5", &[Rule::WholeNumber]).is_err());
    }

    #[test]
    fn first_failing_rule_is_reported() {
        let err = normalize("q", "-2.5", &[Rule::Positive, Rule::WholeNumber]).unwrap_err();
        assert!(err.to_string().contains("greater than zero"));
    }

    #[test]
    fn validate_rejects_non_finite() {
        let err = validate("x", f64::NAN, &[]).unwrap_err();
        assert_eq!(field_of(err), "x");
        assert!(validate("x", f64::INFINITY, &[]).is_err());
        assert!(validate("x", 1.0, &[Rule::Positive]).is_ok());
    }
}

// ── Optional fields ─────────────────────────────────────────────────

mod optional {
    use super::*;

    #[test]
    fn empty_is_none() {
        assert_eq!(normalize_optional("current", "", &[Rule::Positive]).unwrap(), None);
        assert_eq!(normalize_optional("current", "  ", &[]).unwrap(), None);
    }

    #[test]
    fn present_is_validated() {
        assert_eq!(
            normalize_optional("current", "130", &[Rule::Positive]).unwrap(),
            Some(130.0)
        );
        assert!(normalize_optional("current", "0", &[Rule::Positive]).is_err());
    }
}

// ── NumberField builder ─────────────────────────────────────────────

mod number_field {
    use super::*;

    #[test]
    fn carries_name_into_errors() {
        let field = NumberField::new("sharePrice").positive();
        assert_eq!(field.name(), "sharePrice");
        assert_eq!(field_of(field.parse("0").unwrap_err()), "sharePrice");
    }

    #[test]
    fn chained_rules() {
        let lots = NumberField::new("lots").positive().whole();
        assert_eq!(lots.parse("2").unwrap(), 2.0);
        assert!(lots.parse("1.5").is_err());
        assert!(lots.parse("0").is_err());
    }

    #[test]
    fn cross_field_rules() {
        let recovery = NumberField::new("recoveryPct").positive().below("current loss", 20.0);
        assert!(recovery.parse("10").is_ok());
        assert!(recovery.parse("25").is_err());

        let final_value = NumberField::new("finalValue").exceeds("initial value", 100.0);
        assert!(final_value.parse("100").is_err());
        assert!(final_value.parse("100.5").is_ok());
    }

    #[test]
    fn range_and_non_negative() {
        let pct = NumberField::new("yield").non_negative().range(0.0, 50.0);
        assert_eq!(pct.parse("0").unwrap(), 0.0);
        assert!(pct.parse("51").is_err());
    }

    #[test]
    fn optional_parse() {
        let current = NumberField::new("currentPrice").positive();
        assert_eq!(current.parse_optional("").unwrap(), None);
        assert_eq!(current.parse_optional("1,250").unwrap(), Some(1250.0));
    }
}
