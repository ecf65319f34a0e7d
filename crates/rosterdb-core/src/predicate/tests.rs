use crate::{
    predicate::{CompareOp, ComparePredicate, Predicate, eval, normalize},
    traits::FieldValues,
    value::Value,
};
use proptest::prelude::*;
use std::collections::BTreeMap;

#[derive(Clone, Debug)]
struct TestRecord {
    fields: BTreeMap<String, Value>,
}

impl FieldValues for TestRecord {
    fn field_value(&self, field: &str) -> Value {
        self.fields.get(field).cloned().unwrap_or(Value::Null)
    }
}

const FIELDS: [&str; 3] = ["username", "age", "team_name"];

fn arb_field() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(FIELDS[0].to_string()),
        Just(FIELDS[1].to_string()),
        Just(FIELDS[2].to_string()),
    ]
}

fn arb_scalar_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<i64>().prop_map(Value::Int),
        any::<u64>().prop_map(Value::Uint),
        any::<bool>().prop_map(Value::Bool),
        any::<f64>().prop_map(Value::from),
        "[a-z0-9_]{0,8}".prop_map(Value::Text),
        Just(Value::Null),
    ]
}

fn arb_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        arb_scalar_value(),
        prop::collection::vec(arb_scalar_value(), 0..4).prop_map(Value::List),
    ]
}

fn arb_compare_op() -> impl Strategy<Value = CompareOp> {
    prop_oneof![
        Just(CompareOp::Eq),
        Just(CompareOp::Ne),
        Just(CompareOp::Lt),
        Just(CompareOp::Lte),
        Just(CompareOp::Gt),
        Just(CompareOp::Gte),
        Just(CompareOp::In),
        Just(CompareOp::NotIn),
        Just(CompareOp::Contains),
        Just(CompareOp::StartsWith),
    ]
}

fn arb_predicate() -> impl Strategy<Value = Predicate> {
    let leaf = prop_oneof![
        Just(Predicate::True),
        Just(Predicate::False),
        arb_field().prop_map(|field| Predicate::IsNull { field }),
        arb_field().prop_map(|field| Predicate::IsNotNull { field }),
        (arb_field(), arb_compare_op(), arb_value())
            .prop_map(|(field, op, value)| Predicate::Compare(ComparePredicate {
                field,
                op,
                value
            })),
    ];

    leaf.prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Predicate::And),
            prop::collection::vec(inner.clone(), 0..4).prop_map(Predicate::Or),
            inner.prop_map(|p| Predicate::Not(Box::new(p))),
        ]
    })
}

fn arb_record() -> impl Strategy<Value = TestRecord> {
    prop::collection::vec(arb_scalar_value(), FIELDS.len()).prop_map(|values| {
        let mut fields = BTreeMap::new();
        for (name, value) in FIELDS.iter().zip(values) {
            fields.insert((*name).to_string(), value);
        }
        TestRecord { fields }
    })
}

fn matching_rows(records: &[TestRecord], predicate: &Predicate) -> Vec<usize> {
    records
        .iter()
        .enumerate()
        .filter(|(_, record)| eval(predicate, *record))
        .map(|(index, _)| index)
        .collect()
}

proptest! {
    #[test]
    fn normalization_equivalence(predicate in arb_predicate(), record in arb_record()) {
        let normalized = normalize(&predicate);
        prop_assert_eq!(eval(&predicate, &record), eval(&normalized, &record));
    }

    #[test]
    fn conjunction_is_associative_over_row_sets(
        a in arb_predicate(),
        b in arb_predicate(),
        c in arb_predicate(),
        records in prop::collection::vec(arb_record(), 0..8),
    ) {
        let left = (a.clone() & b.clone()) & c.clone();
        let right = a & (b & c);
        prop_assert_eq!(matching_rows(&records, &left), matching_rows(&records, &right));
    }

    #[test]
    fn conjunction_is_commutative_over_row_sets(
        a in arb_predicate(),
        b in arb_predicate(),
        records in prop::collection::vec(arb_record(), 0..8),
    ) {
        let forward = a.clone() & b.clone();
        let backward = b & a;
        prop_assert_eq!(matching_rows(&records, &forward), matching_rows(&records, &backward));
    }

    #[test]
    fn all_with_every_entry_absent_matches_all_rows(
        records in prop::collection::vec(arb_record(), 0..8),
    ) {
        let combined = Predicate::all([None, None, None]);
        let matched = matching_rows(&records, &combined);
        prop_assert_eq!(matched.len(), records.len());
    }
}

#[test]
fn membership_against_a_non_list_literal_is_false() {
    let mut fields = BTreeMap::new();
    fields.insert("age".to_string(), Value::Int(5));
    let record = TestRecord { fields };

    let not_list = Predicate::Compare(ComparePredicate {
        field: "age".to_string(),
        op: CompareOp::NotIn,
        value: Value::text("nope"),
    });
    assert!(!eval(&not_list, &record));
}
