//! End-to-end scenarios for the unique collections.
//!
//! The first half replays known-good traffic (scalar, then
//! array-keyed with tolerance) operation by operation; the second half
//! drives randomized traffic against a linear-scan reference model.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use uniquelist::{
    ArrayKey, ArrayUniqueList, PositionError, Shortlex, StrictOrder, Tolerant, UniqueList,
};

fn order_of(list: &UniqueList<f64>) -> Vec<f64> {
    list.iter().copied().collect()
}

fn sorted_of(list: &UniqueList<f64>) -> Vec<f64> {
    list.iter_sorted().copied().collect()
}

fn array_order_of(list: &ArrayUniqueList) -> Vec<Vec<f64>> {
    list.iter().map(|k| k.as_slice().to_vec()).collect()
}

// ============================================================================
// Scalar scenario
// ============================================================================

#[test]
fn scalar_scenario() {
    let mut list: UniqueList<f64> = UniqueList::new();

    assert_eq!(list.push_back(3.9), (0, true)); // [3.9]
    assert_eq!(list.push_back(-1.0), (1, true)); // [3.9, -1.0]
    assert_eq!(list.push_back(0.0), (2, true)); // [3.9, -1.0, 0.0]
    assert_eq!(list.push_back(-1.0), (1, false)); // unchanged

    // 0.0 already exists: position ignored, existing index reported
    assert_eq!(list.insert_before(1, 0.0), Ok((2, false)));
    // New key placed exactly before position 2
    assert_eq!(list.insert_before(2, 1.0), Ok((2, true))); // [3.9, -1.0, 1.0, 0.0]

    assert!(list.contains(&-1.0));
    assert!(list.contains(&0.0));
    assert!(!list.contains(&9.1));
    assert_eq!(list.len(), 4);

    assert_eq!(order_of(&list), vec![3.9, -1.0, 1.0, 0.0]);
    assert_eq!(sorted_of(&list), vec![-1.0, 0.0, 1.0, 3.9]);

    list.remove_flagged(&[false, true, false, false]).unwrap();
    assert_eq!(list.len(), 3); // [3.9, 1.0, 0.0]

    assert_eq!(list.insert_before(2, 1.0), Ok((1, false)));
    assert_eq!(list.insert_before(2, -5.0), Ok((2, true))); // [3.9, 1.0, -5.0, 0.0]

    assert_eq!(order_of(&list), vec![3.9, 1.0, -5.0, 0.0]);
    assert_eq!(sorted_of(&list), vec![-5.0, 0.0, 1.0, 3.9]);
}

#[test]
fn scalar_int_scenario() {
    let mut list: UniqueList<i64> = UniqueList::new();

    assert_eq!(list.push_back(2), (0, true));
    assert_eq!(list.push_back(1), (1, true));
    assert_eq!(list.push_back(2), (0, false));
    assert_eq!(list.push_back(3), (2, true));
    assert_eq!(list.push_back(5), (3, true));
    assert_eq!(list.len(), 4);

    assert_eq!(list.position(&2), Some(0));
    assert_eq!(list.position(&3), Some(2));
    assert_eq!(list.position(&4), None);

    list.remove_flagged(&[false, true, false, true]).unwrap();
    assert_eq!(list.len(), 2);
    let remaining: Vec<i64> = list.iter().copied().collect();
    assert_eq!(remaining, vec![2, 3]);
}

// ============================================================================
// Array scenario: tolerance + shortlex + deferred deep copies
// ============================================================================

#[test]
fn array_scenario_with_hooks() {
    let mut list = ArrayUniqueList::new();

    assert_eq!(
        list.push_back(ArrayKey::from_slice(&[2.9, -1.0, 4.9])),
        (0, true)
    );
    assert_eq!(
        list.push_back_with(&[3.4, 1.0, 4.9], ArrayKey::from_slice),
        (1, true)
    );
    assert_eq!(
        list.push_back(ArrayKey::from_slice(&[5.5, 5.0, 0.0])),
        (2, true)
    );
    // Within default tolerance of entry 1: rejected, no copy
    assert_eq!(
        list.push_back_with(&[3.4, 1.0, 4.8999999999], ArrayKey::from_slice),
        (1, false)
    );

    // Duplicate through insert_before: position ignored
    assert_eq!(
        list.insert_before(1, ArrayKey::from_slice(&[5.5, 5.0, 0.0])),
        Ok((2, false))
    );
    // New key placed before position 1
    assert_eq!(
        list.insert_before(1, ArrayKey::from_slice(&[1.5, 1.0, 0.1])),
        Ok((1, true))
    );

    assert!(list.contains(&[5.5, 5.0, 0.0]));
    assert!(list.contains(&[1.5, 1.0, 0.1]));
    assert!(!list.contains(&[1.5, 1.4, 4.0]));
    assert_eq!(list.len(), 4);

    assert_eq!(
        array_order_of(&list),
        vec![
            vec![2.9, -1.0, 4.9],
            vec![1.5, 1.0, 0.1],
            vec![3.4, 1.0, 4.9],
            vec![5.5, 5.0, 0.0],
        ]
    );

    // The flag sequence must cover the whole collection
    assert_eq!(
        list.remove_flagged(&[false, true]),
        Err(PositionError::LengthMismatch {
            expected: 4,
            got: 2
        })
    );
    list.remove_flagged(&[false, true, false, false]).unwrap();
    assert_eq!(list.len(), 3);
    assert!(!list.contains(&[1.5, 1.0, 0.1]));
}

#[test]
fn array_scenario_shortlex_and_bulk_erase() {
    let mut list = ArrayUniqueList::new();

    assert_eq!(
        list.push_back_with(&[0.0, 1.5, 2.0], ArrayKey::from_slice),
        (0, true)
    );
    assert_eq!(
        list.push_back_with(&[2.0, 1.0, 2.1, 4.3], ArrayKey::from_slice),
        (1, true)
    );
    assert_eq!(list.push_back_with(&[0.0], ArrayKey::from_slice), (2, true));
    assert_eq!(
        list.push_back_with(&[2.0, 1.0, 2.1, 4.3], ArrayKey::from_slice),
        (1, false)
    );
    assert_eq!(list.push_back_with(&[-1.0], ArrayKey::from_slice), (3, true));
    assert_eq!(list.len(), 4);

    // Shortlex: the one-element keys sort before every longer key
    let sorted: Vec<usize> = list.iter_sorted().map(|k| k.len()).collect();
    assert_eq!(sorted, vec![1, 1, 3, 4]);

    list.remove_indices(&[0, 3]).unwrap();
    assert_eq!(list.len(), 2);

    assert_eq!(
        list.push_back_with(&[2.0, 1.0, 2.1, 4.3], ArrayKey::from_slice),
        (0, false)
    );
    assert_eq!(list.push_back_with(&[-1.0], ArrayKey::from_slice), (2, true));
    assert_eq!(list.len(), 3);
}

#[test]
fn hook_is_never_called_for_duplicates() {
    let mut list = ArrayUniqueList::new();
    let mut copies = 0;

    let mut counted = |probe: &[f64]| {
        copies += 1;
        ArrayKey::from_slice(probe)
    };

    assert_eq!(list.push_back_with(&[1.0, 2.0], &mut counted), (0, true));
    assert_eq!(list.push_back_with(&[1.0, 2.0], &mut counted), (0, false));
    assert_eq!(list.push_back_with(&[1.0, 2.0000000001], &mut counted), (0, false));
    assert_eq!(copies, 1);
}

#[test]
fn stored_keys_are_independent_of_the_probe_buffer() {
    let mut list = ArrayUniqueList::new();
    let mut buffer = vec![2.9, -1.0, 4.9];

    list.push_back_with(&buffer, ArrayKey::from_slice);

    // Scribbling over the caller's buffer must not affect the entry
    buffer[0] = 1000.0;

    assert!(list.contains(&[2.9, -1.0, 4.9]));
    assert!(!list.contains(&buffer));
    assert_eq!(list.get(0).unwrap().as_slice(), &[2.9, -1.0, 4.9]);
}

// ============================================================================
// Tolerance band at the collection level
// ============================================================================

#[test]
fn tolerant_scalar_collection() {
    let mut list: UniqueList<f64, Tolerant> = UniqueList::new();

    assert_eq!(list.push_back(4.9), (0, true));
    assert_eq!(list.push_back(4.8999999999), (0, false));
    assert_eq!(list.push_back(4.0), (1, true));
    assert_eq!(list.len(), 2);
}

#[test]
fn custom_tolerances_widen_the_band() {
    let cmp = Shortlex(Tolerant::new(0.0, 0.5));
    let mut list: UniqueList<ArrayKey, _> = UniqueList::with_order(cmp);

    list.push_back_with(&[1.0, 2.0], ArrayKey::from_slice);
    // Each element within 0.5 of the stored entry
    assert_eq!(
        list.push_back_with(&[1.4, 1.6], ArrayKey::from_slice),
        (0, false)
    );
    assert_eq!(
        list.push_back_with(&[1.6, 2.0], ArrayKey::from_slice),
        (1, true)
    );
}

// ============================================================================
// Randomized traffic against a reference model
// ============================================================================

/// Linear-scan reference with the same exact-equality semantics.
#[derive(Default)]
struct Model {
    keys: Vec<f64>,
}

impl Model {
    fn push_back(&mut self, key: f64) -> (usize, bool) {
        match self.keys.iter().position(|&k| k == key) {
            Some(pos) => (pos, false),
            None => {
                self.keys.push(key);
                (self.keys.len() - 1, true)
            }
        }
    }

    fn remove_at(&mut self, index: usize) -> f64 {
        self.keys.remove(index)
    }

    fn remove_flagged(&mut self, flags: &[bool]) {
        let mut it = flags.iter();
        self.keys.retain(|_| !*it.next().unwrap());
    }

    fn sorted(&self) -> Vec<f64> {
        let mut keys = self.keys.clone();
        keys.sort_by(|a, b| a.partial_cmp(b).unwrap());
        keys
    }
}

#[test]
fn random_traffic_matches_reference_model() {
    let mut rng = SmallRng::seed_from_u64(0xD1FF);
    let mut list: UniqueList<f64> = UniqueList::new();
    let mut model = Model::default();

    for _ in 0..2_000 {
        match rng.gen_range(0..10) {
            // Mostly inserts from a small grid so duplicates are common
            0..=5 => {
                let key = rng.gen_range(0..60) as f64 * 0.5;
                assert_eq!(list.push_back(key), model.push_back(key));
            }
            6..=7 => {
                if !model.keys.is_empty() {
                    let index = rng.gen_range(0..model.keys.len());
                    assert_eq!(list.remove_at(index), Ok(model.remove_at(index)));
                }
            }
            8 => {
                let flags: Vec<bool> = (0..model.keys.len()).map(|_| rng.gen_bool(0.2)).collect();
                list.remove_flagged(&flags).unwrap();
                model.remove_flagged(&flags);
            }
            _ => {
                let key = rng.gen_range(0..60) as f64 * 0.5;
                assert_eq!(list.contains(&key), model.keys.contains(&key));
            }
        }
        assert_eq!(list.len(), model.keys.len());
    }

    let order: Vec<f64> = list.iter().copied().collect();
    assert_eq!(order, model.keys);

    let sorted: Vec<f64> = list.iter_sorted().copied().collect();
    assert_eq!(sorted, model.sorted());
}

#[test]
fn sorted_view_is_always_nondecreasing() {
    let cmp = Tolerant::default();
    let mut rng = SmallRng::seed_from_u64(99);
    let mut list: UniqueList<f64, Tolerant> = UniqueList::with_order(cmp);

    for _ in 0..500 {
        list.push_back(rng.gen_range(-1_000.0..1_000.0));
    }

    let sorted: Vec<f64> = list.iter_sorted().copied().collect();
    for pair in sorted.windows(2) {
        assert!(
            !cmp.strictly_less(&pair[1], &pair[0]),
            "sorted view out of order: {} before {}",
            pair[0],
            pair[1]
        );
    }
}
