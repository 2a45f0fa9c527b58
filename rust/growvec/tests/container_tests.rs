use growvec::{ErrorKind, GrowVec, growvec};

#[test]
fn test_literal_push_pop_scenario() {
    let mut v = growvec![1, 2, 3, 4].unwrap();
    assert_eq!(v.len(), 4);
    assert_eq!(v[1], 2);

    v.push_back(5).unwrap();
    assert_eq!(v.len(), 5);
    assert_eq!(v[4], 5);

    v.pop_back();
    assert_eq!(v.len(), 4);
    match v.at(4).unwrap_err().into_kind() {
        ErrorKind::OutOfRange { index, len } => {
            assert_eq!(index, 4);
            assert_eq!(len, 4);
        }
        kind => panic!("unexpected error: {kind}"),
    }
}

#[test]
fn test_sized_capacity_is_pinned() {
    let v = GrowVec::<i32>::with_len(10).unwrap();
    assert_eq!(v.capacity(), 20);

    for n in [1, 2, 7, 64, 1000] {
        let v = GrowVec::<u8>::with_len(n).unwrap();
        assert_eq!(v.capacity(), 2 * n);
    }
}

#[test]
fn test_sized_construction_defaults() {
    for n in [0, 1, 5, 33] {
        let v = GrowVec::<i64>::with_len(n).unwrap();
        assert_eq!(v.len(), n);
        assert!(v.as_slice().iter().all(|&x| x == 0));

        let s = GrowVec::<String>::with_len(n).unwrap();
        assert_eq!(s.len(), n);
        assert!(s.as_slice().iter().all(String::is_empty));
    }
}

#[test]
fn test_sized_construction_with_value() {
    for n in [0, 1, 10, 100] {
        let v = GrowVec::from_elem(n, 6).unwrap();
        assert_eq!(v.len(), n);
        assert!((0..n).all(|i| v[i] == 6));
    }
}

#[test]
fn test_copy_is_equal_and_independent() {
    let original = GrowVec::from_slice(&growvec_testkit::data_gen::random_strings(3, 40, 6)).unwrap();
    let mut copy = original.try_clone().unwrap();
    assert_eq!(copy, original);

    copy[0].push('!');
    copy.push_back(String::from("extra")).unwrap();
    assert_ne!(copy, original);
    assert_eq!(original.len(), 40);
    assert!(!original[0].ends_with('!'));
}

#[test]
fn test_move_leaves_source_empty() {
    let mut v = GrowVec::from_slice(&growvec_testkit::data_gen::random_values(5, 100)).unwrap();
    let expected = v.as_slice().to_vec();
    let cap = v.capacity();

    let v2 = v.take();
    assert!(v.is_empty());
    assert_eq!(v.capacity(), 0);
    assert!(!v.has_storage());
    assert_eq!(v2.as_slice(), expected.as_slice());
    assert_eq!(v2.capacity(), cap);
}

#[test]
fn test_push_then_pop_restores_len() {
    let mut v = GrowVec::new();
    for i in 0..50 {
        let before = v.len();
        v.push_back(i).unwrap();
        v.pop_back();
        assert_eq!(v.len(), before);
        v.push_back(i).unwrap();
    }
    assert_eq!(v.len(), 50);
}

#[test]
fn test_at_and_index_agree_everywhere() {
    let v = GrowVec::from_slice(&growvec_testkit::data_gen::random_values(11, 37)).unwrap();
    for i in 0..v.len() {
        assert_eq!(v.at(i).unwrap(), &v[i]);
    }
    for i in v.len()..v.len() + 10 {
        assert!(v.at(i).unwrap_err().is_out_of_range());
        let caught = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| v[i]));
        assert!(caught.is_err());
    }
}

#[test]
fn test_reserve_and_shrink_properties() {
    let mut v = GrowVec::from_array([1u32, 2, 3]).unwrap();
    for n in [0, 2, 6, 5, 40, 39, 100] {
        let before = v.capacity();
        v.reserve(n).unwrap();
        assert!(v.capacity() >= before);
        assert!(v.capacity() >= n);
    }
    assert_eq!(v.capacity(), 100);

    v.shrink_to_fit().unwrap();
    assert_eq!(v.capacity(), v.len());
    assert_eq!(v, [1, 2, 3]);
}

#[test]
fn test_empty_iff_zero_len() {
    let mut v = GrowVec::new();
    assert_eq!(v.is_empty(), v.len() == 0);
    v.push_back('a').unwrap();
    assert_eq!(v.is_empty(), v.len() == 0);
    v.pop_back();
    assert!(v.is_empty());
    assert_eq!(v.capacity(), 8);
}

#[test]
fn test_clone_from_and_move_from() {
    let src = growvec![String::from("a"), String::from("b")].unwrap();
    let mut dst = GrowVec::from_elem(5, String::from("z")).unwrap();
    dst.clone_from(&src);
    assert_eq!(dst, src);
    assert_eq!(dst.capacity(), 10);

    let mut moved = src.try_clone().unwrap();
    let mut target = GrowVec::new();
    target.move_from(&mut moved);
    assert_eq!(target, ["a", "b"]);
    assert!(!moved.has_storage());
}
