use growvec::GrowVec;
use growvec_testkit::data_gen::{Op, random_ops, random_strings, random_values};

fn check_against_model(seed: u64, count: usize) {
    let mut v = GrowVec::<i64>::new();
    let mut model = Vec::<i64>::new();

    for (step, op) in random_ops(seed, count).into_iter().enumerate() {
        match op {
            Op::Push(x) => {
                v.push_back(x).unwrap();
                model.push(x);
            }
            Op::PopBack => {
                v.pop_back();
                model.pop();
            }
            Op::TakeBack => {
                assert_eq!(v.take_back(), model.pop(), "step {step}");
            }
            Op::Set(index, x) => match model.get_mut(index) {
                Some(slot) => {
                    *slot = x;
                    *v.at_mut(index).unwrap() = x;
                }
                None => {
                    let err = v.at_mut(index).unwrap_err();
                    assert!(err.is_out_of_range(), "step {step}");
                }
            },
            Op::Reserve(n) => {
                let before = v.capacity();
                v.reserve(n).unwrap();
                assert_eq!(v.capacity(), before.max(n), "step {step}");
            }
            Op::ShrinkToFit => {
                v.shrink_to_fit().unwrap();
                assert_eq!(v.capacity(), v.len(), "step {step}");
            }
            Op::Clear => {
                v.clear();
                model.clear();
                assert!(!v.has_storage());
            }
        }

        assert!(v.len() <= v.capacity(), "step {step}");
        assert_eq!(v.has_storage(), v.capacity() > 0, "step {step}");
        assert_eq!(v.as_slice(), model.as_slice(), "step {step}");
    }
}

#[test]
fn test_random_ops_match_vec() {
    for seed in [1, 17, 297135646, 6412384656] {
        check_against_model(seed, 2000);
    }
}

#[test]
fn test_random_ops_long_run() {
    check_against_model(90210, 20000);
}

#[test]
fn test_copies_match_source() {
    let values = random_values(5, 300);
    let v = GrowVec::from_slice(&values).unwrap();
    assert_eq!(v.capacity(), 600);

    let copy = v.clone();
    assert_eq!(copy.as_slice(), values.as_slice());

    let mut assigned = GrowVec::from_elem(3, 0i64).unwrap();
    assigned.assign_from(&v).unwrap();
    assert_eq!(assigned, v);
}

#[test]
fn test_owned_strings() {
    let strings = random_strings(11, 500, 12);
    let mut v = GrowVec::new();
    for s in &strings {
        v.push_back(s.clone()).unwrap();
    }
    assert_eq!(v, strings[..]);

    let mut rng = fastrand::Rng::with_seed(11);
    let mut model = strings.clone();
    for _ in 0..200 {
        if rng.bool() {
            v.pop_back();
            model.pop();
        } else {
            assert_eq!(v.take_back(), model.pop());
        }
    }
    assert_eq!(v, model[..]);

    let copy = v.try_clone().unwrap();
    v.clear();
    assert_eq!(copy, model[..]);
}
