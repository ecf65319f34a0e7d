mod common;

use common::seeded_session;
use proptest::prelude::*;
use rosterdb::{filter::MemberFilter, prelude::*};

fn arb_filter() -> impl Strategy<Value = MemberFilter> {
    (
        prop_oneof![
            Just(None),
            Just(Some(String::new())),
            "[a-z][a-z0-9]{0,7}".prop_map(Some),
        ],
        prop_oneof![Just(None), (0i64..120).prop_map(Some)],
    )
        .prop_map(|(username, age)| MemberFilter { username, age })
}

proptest! {
    /// Whatever criteria arrive, lowering them must never error and the
    /// query built from them must execute; absent criteria only ever widen
    /// the result, never narrow it.
    #[test]
    fn any_criteria_combination_yields_an_executable_query(filter in arb_filter()) {
        let session = seeded_session();

        let matched = session
            .fetch(&Query::new().filter(filter.predicate(AbsentPolicy::NullOrDefault)))
            .expect("criteria queries must always plan and execute");

        let narrowed = MemberFilter {
            username: filter.username.clone(),
            age: filter.age,
        };
        let fully_absent = MemberFilter::default();
        let everyone = session
            .fetch(&Query::new().filter(fully_absent.predicate(AbsentPolicy::NullOrDefault)))
            .expect("blank criteria must execute");

        prop_assert!(matched.len() <= everyone.len());
        prop_assert_eq!(everyone.len(), 4);

        // Re-lowering identical criteria is deterministic.
        prop_assert_eq!(
            narrowed.predicate(AbsentPolicy::NullOrDefault),
            filter.predicate(AbsentPolicy::NullOrDefault)
        );
    }

    /// Under the null-only policy, zero and empty-string criteria are real
    /// filters; under null-or-default they vanish.
    #[test]
    fn policies_disagree_only_on_default_values(age in 0i64..50) {
        let filter = MemberFilter { username: None, age: Some(age) };

        let strict = filter.predicate(AbsentPolicy::NullOnly);
        let lenient = filter.predicate(AbsentPolicy::NullOrDefault);

        if age == 0 {
            prop_assert_eq!(strict, Predicate::eq("age", 0i64));
            prop_assert_eq!(lenient, Predicate::True);
        } else {
            prop_assert_eq!(strict, lenient);
        }
    }
}
