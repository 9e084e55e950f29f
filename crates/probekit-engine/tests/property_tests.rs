//! Property-based tests using proptest

use proptest::prelude::*;
use probekit_engine::probekit_types::{Class, ClassInfo, ConstructorInfo, FieldInfo, Modifiers};
use probekit_engine::ClassFinder;

fn modifiers_strategy() -> impl Strategy<Value = Modifiers> {
    prop::sample::subsequence(
        vec![
            Modifiers::PUBLIC,
            Modifiers::FINAL,
            Modifiers::ABSTRACT,
            Modifiers::INTERFACE,
            Modifiers::SYNTHETIC,
        ],
        0..=5,
    )
    .prop_map(|flags| flags.into_iter().fold(Modifiers::default(), |acc, m| acc | m))
}

fn class_strategy() -> impl Strategy<Value = ClassInfo> {
    (modifiers_strategy(), 0usize..4, 0usize..4)
        .prop_map(|(modifiers, constructors, int_fields)| {
            let mut info = ClassInfo::new("gen.Placeholder").with_modifiers(modifiers);
            for i in 0..constructors {
                info = info.with_constructor(ConstructorInfo::new(vec!["int"; i]));
            }
            for i in 0..int_fields {
                info = info.with_field(FieldInfo::new(format!("f{}", i), "int"));
            }
            info
        })
}

fn classes_strategy() -> impl Strategy<Value = Vec<Class>> {
    prop::collection::vec(class_strategy(), 0..12).prop_map(|infos| {
        infos
            .into_iter()
            .enumerate()
            .map(|(i, mut info)| {
                info.name = format!("gen.C{}", i);
                Class::detached(info)
            })
            .collect()
    })
}

fn names(classes: Vec<Class>) -> Vec<String> {
    classes.into_iter().map(|c| c.name().to_string()).collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn test_flag_filters_commute(classes in classes_strategy()) {
        let a = ClassFinder::from_array(&classes)
            .filter_is_public()
            .filter_is_not_abstract()
            .to_list()
            .unwrap();
        let b = ClassFinder::from_array(&classes)
            .filter_is_not_abstract()
            .filter_is_public()
            .to_list()
            .unwrap();
        prop_assert_eq!(names(a), names(b));
    }

    #[test]
    fn test_filters_preserve_source_order(classes in classes_strategy()) {
        let kept = names(ClassFinder::of(classes.clone()).filter_is_not_final().to_list().unwrap());
        let expected: Vec<String> = classes
            .iter()
            .filter(|c| !c.is_final())
            .map(|c| c.name().to_string())
            .collect();
        prop_assert_eq!(kept, expected);
    }

    #[test]
    fn test_at_least_one_constructor_matches_open_range(classes in classes_strategy()) {
        let shorthand = ClassFinder::from_array(&classes)
            .filter_has_constructors()
            .count()
            .unwrap();
        let explicit = ClassFinder::from_array(&classes)
            .filter_has_constructor_count_in(1, usize::MAX)
            .count()
            .unwrap();
        let range = ClassFinder::from_array(&classes)
            .filter_has_constructor_count_in_range(1..)
            .count()
            .unwrap();
        prop_assert_eq!(shorthand, explicit);
        prop_assert_eq!(shorthand, range);
    }

    #[test]
    fn test_degenerate_range_matches_exact_count(classes in classes_strategy(), n in 0usize..4) {
        let exact = names(
            ClassFinder::from_array(&classes)
                .filter_has_field_type_and_count("int", n)
                .to_list()
                .unwrap(),
        );
        let range = names(
            ClassFinder::from_array(&classes)
                .filter_has_field_type_and_count_in("int", n, n)
                .to_list()
                .unwrap(),
        );
        prop_assert_eq!(exact, range);
    }

    #[test]
    fn test_degenerate_constructor_range_matches_exact_count(
        classes in classes_strategy(),
        n in 0usize..5,
    ) {
        let exact = names(
            ClassFinder::from_array(&classes)
                .filter_has_constructor_count(n)
                .to_list()
                .unwrap(),
        );
        let pair = names(
            ClassFinder::from_array(&classes)
                .filter_has_constructor_count_in(n, n)
                .to_list()
                .unwrap(),
        );
        let range = names(
            ClassFinder::from_array(&classes)
                .filter_has_constructor_count_in_range(n..=n)
                .to_list()
                .unwrap(),
        );
        let expected: Vec<String> = classes
            .iter()
            .filter(|c| c.constructors().len() == n)
            .map(|c| c.name().to_string())
            .collect();
        prop_assert_eq!(&exact, &expected);
        prop_assert_eq!(&pair, &expected);
        prop_assert_eq!(&range, &expected);
    }

    #[test]
    fn test_count_agrees_with_to_list(classes in classes_strategy()) {
        let count = ClassFinder::from_array(&classes).filter_is_interface().count().unwrap();
        let list = ClassFinder::from_array(&classes).filter_is_interface().to_list().unwrap();
        prop_assert_eq!(count, list.len());

        let first = ClassFinder::from_array(&classes)
            .filter_is_interface()
            .first_or_none()
            .unwrap();
        prop_assert_eq!(
            first.map(|c| c.name().to_string()),
            list.first().map(|c| c.name().to_string())
        );
    }

    #[test]
    fn test_trail_length_tracks_filters(filters in 0usize..8) {
        let mut finder = ClassFinder::of(Vec::new());
        for _ in 0..filters {
            finder = finder.filter_is_public();
        }
        prop_assert_eq!(finder.finder().trail().len(), filters + 1);
        prop_assert!(finder.first().is_err());
    }
}
