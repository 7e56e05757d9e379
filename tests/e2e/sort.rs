use wgpu_splat_core::{DepthSorter, SplatStore, VisibilityPermutation, glam::*, sort};

use crate::common::{assert, given};

#[test]
fn test_sort_should_order_back_to_front() {
    let store = given::scattered_store(500);

    for eye in [
        Vec3::new(0.0, 0.0, 5.0),
        Vec3::new(-12.0, 3.0, 0.5),
        Vec3::new(1.0, -20.0, -7.0),
        Vec3::ZERO,
    ] {
        assert::back_to_front(&store, &sort(&store, eye), eye);
    }
}

#[test]
fn test_sort_should_be_a_permutation() {
    let store = given::scattered_store(200);

    let mut indices = sort(&store, Vec3::new(3.0, 1.0, 4.0)).0;
    indices.sort_unstable();

    assert_eq!(indices, VisibilityPermutation::identity(200).0);
}

#[test]
fn test_sort_when_eye_is_unchanged_should_be_idempotent() {
    let store = given::scattered_store(300);
    let eye = Vec3::new(2.0, 2.0, 9.0);
    let mut sorter = DepthSorter::new();

    let first = sorter.sort(&store, eye);
    let second = sorter.sort(&store, eye);

    let depths = |permutation: &VisibilityPermutation| {
        permutation
            .iter()
            .map(|i| store.positions()[i as usize].distance_squared(eye))
            .collect::<Vec<_>>()
    };
    assert_eq!(depths(&first), depths(&second));
}

#[test]
fn test_sort_when_two_points_should_draw_farther_first() {
    let store = given::two_point_store();

    let permutation = sort(&store, Vec3::new(0.0, 0.0, 5.0));

    assert_eq!(permutation.as_slice(), &[1, 0]);
}

#[test]
fn test_sort_when_store_is_empty_should_return_empty_permutation() {
    let permutation = sort(&SplatStore::default(), Vec3::ONE);

    assert!(permutation.is_empty());
    assert!(permutation.to_indices().is_empty());
}

#[test]
fn test_depth_sorter_when_reused_with_smaller_store_should_match_fresh_sort() {
    let mut sorter = DepthSorter::new();
    let eye = Vec3::new(0.0, 4.0, 0.0);

    sorter.sort(&given::scattered_store(400), eye);
    let store = given::scattered_store(50);
    let permutation = sorter.sort(&store, eye);

    assert::back_to_front(&store, &permutation, eye);
}

#[test]
fn test_visibility_permutation_to_indices_should_emit_quads_in_draw_order() {
    let permutation = VisibilityPermutation(vec![2, 0]);

    assert_eq!(
        permutation.to_indices(),
        vec![8, 9, 10, 8, 10, 11, 0, 1, 2, 0, 2, 3]
    );
}
