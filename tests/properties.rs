use proptest::prelude::*;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use tally::render_core::MemoryBackend;
use tally::{LayoutConfig, LayoutEngine, Record, Value};

fn hash_of(record: &Record) -> u64 {
    let mut hasher = DefaultHasher::new();
    record.hash(&mut hasher);
    hasher.finish()
}

fn named_record(values: &[i64]) -> Record {
    let names: Vec<String> = (0..values.len()).map(|i| format!("c{}", i)).collect();
    Record::with_attributes(values.iter().copied(), names).expect("unique names")
}

proptest! {
    #[test]
    fn clone_is_equal_and_independent(values in prop::collection::vec(any::<i64>(), 1..8)) {
        let record = named_record(&values);
        let mut copy = record.clone();
        prop_assert_eq!(&copy, &record);
        prop_assert_eq!(hash_of(&copy), hash_of(&record));

        copy.set(0usize, "changed").unwrap();
        prop_assert_eq!(record.get(0usize).unwrap(), Some(&Value::from(values[0])));
        prop_assert_ne!(&copy, &record);
    }

    #[test]
    fn full_reorder_is_a_permutation(
        perm in (1usize..8).prop_flat_map(|n| Just((0..n).collect::<Vec<usize>>()).prop_shuffle())
    ) {
        let values: Vec<i64> = (0..perm.len() as i64).collect();
        let mut record = named_record(&values);
        record.reorder(perm.iter().copied()).unwrap();

        let mut data: Vec<Value> = record.to_vec();
        let expected: Vec<Value> = perm.iter().map(|&i| Value::from(i as i64)).collect();
        prop_assert_eq!(&data, &expected);
        data.sort_by_key(|v| v.as_i64());
        let sorted: Vec<Value> = values.iter().copied().map(Value::from).collect();
        prop_assert_eq!(data, sorted);
        for (value, name) in record.data().iter().zip(record.attributes()) {
            prop_assert_eq!(format!("c{}", value), name.clone());
        }
    }

    #[test]
    fn rejected_reorder_leaves_record_unchanged(
        values in prop::collection::vec(any::<i64>(), 1..6),
        duplicate in any::<prop::sample::Index>(),
        past_end in 0usize..4,
    ) {
        let mut record = named_record(&values);
        let before = record.clone();

        let i = duplicate.index(values.len());
        prop_assert!(record.reorder([i, i]).is_err());
        prop_assert_eq!(&record, &before);

        prop_assert!(record.reorder([0, values.len() + past_end]).is_err());
        prop_assert_eq!(&record, &before);
    }

    #[test]
    fn pad_always_moves_down_twice_the_padding(
        padding in 0.0f32..50.0,
        start in 200.0f32..700.0,
        inner in -100.0f32..100.0,
    ) {
        let mut engine = LayoutEngine::new(MemoryBackend::default(), LayoutConfig::default());
        engine.move_cursor_to(start);
        engine.pad(padding, |engine| engine.move_cursor(inner));
        prop_assert!((engine.cursor() - (start - 2.0 * padding)).abs() < 1e-3);
    }
}
