//! Property tests for scalar classification.

use proptest::prelude::*;

use gosm::transcoder::{Classifier, ScalarValue};

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 96,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: classification is total; arbitrary tokens never panic.
    #[test]
    fn property_classify_never_panics(token in "(?s).{0,64}") {
        let mut classifier = Classifier::new();
        let _ = classifier.classify(&token);
    }

    /// PROPERTY: memoized answers match fresh ones.
    #[test]
    fn property_classify_is_stable(token in "[ -~]{0,24}") {
        let mut warm = Classifier::new();
        let first = warm.classify_with_rule(&token);
        let second = warm.classify_with_rule(&token);
        let fresh = Classifier::new().classify_with_rule(&token);

        prop_assert_eq!(first.rule, second.rule);
        prop_assert_eq!(first.rule, fresh.rule);
        prop_assert_eq!(first.value.to_string(), fresh.value.to_string());
    }

    /// PROPERTY: decimal integers resolve to themselves.
    #[test]
    fn property_decimal_integers(n in any::<i64>()) {
        let mut classifier = Classifier::new();
        prop_assert_eq!(classifier.classify(&n.to_string()), ScalarValue::Int(n));
    }

    /// PROPERTY: `h:mm` is base-60.
    #[test]
    fn property_sexagesimal_int(hours in 1i64..100_000, minutes in 0i64..60) {
        let mut classifier = Classifier::new();
        let token = format!("{}:{:02}", hours, minutes);
        prop_assert_eq!(classifier.classify(&token), ScalarValue::Int(hours * 60 + minutes));
    }

    /// PROPERTY: prose longer than five characters is always a string.
    #[test]
    fn property_long_words_stay_strings(word in "[A-Za-z][A-Za-z ]{5,30}") {
        let mut classifier = Classifier::new();
        prop_assert_eq!(classifier.classify(&word), ScalarValue::Str(word.clone()));
        prop_assert!(classifier.is_plain_string(&word));
    }

    /// PROPERTY: the canonical text of an integer or float classifies back to
    /// an equal value.
    #[test]
    fn property_numeric_display_round_trips(x in any::<f64>().prop_filter("finite", |x| x.is_finite())) {
        let mut classifier = Classifier::new();
        let value = ScalarValue::Float(x);
        prop_assert_eq!(classifier.classify(&value.to_string()), value);
    }
}
