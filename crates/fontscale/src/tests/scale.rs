use crate::manifest::ScreenConfig;
use crate::scale::calculate_size;

#[test]
fn identity_for_equal_configurations() {
    let reference = ScreenConfig::new(280, 280, "round");
    for size in [1, 10, 60, 280, 1000] {
        assert_eq!(calculate_size(size, &reference, &reference), size);
    }
}

#[test]
fn scales_by_min_axis_ratio() {
    let square = ScreenConfig::new(200, 200, "round");
    assert_eq!(
        calculate_size(20, &square, &ScreenConfig::new(280, 280, "round")),
        28
    );

    // Limiting ratio is 30/200 = 0.15, not 50/100 = 0.5.
    let tall = ScreenConfig::new(100, 200, "rectangle");
    assert_eq!(
        calculate_size(20, &tall, &ScreenConfig::new(50, 30, "rectangle")),
        3
    );
}

#[test]
fn matches_round_watch_diameters() {
    let reference = ScreenConfig::new(280, 280, "round");
    assert_eq!(
        calculate_size(50, &reference, &ScreenConfig::new(454, 454, "round")),
        81
    );
    assert_eq!(
        calculate_size(10, &reference, &ScreenConfig::new(218, 218, "round")),
        8
    );
}

#[test]
fn rounds_half_away_from_zero() {
    let reference = ScreenConfig::new(200, 200, "round");
    let target = ScreenConfig::new(100, 100, "round");
    // 25 * 0.5 = 12.5 rounds up, not to even.
    assert_eq!(calculate_size(25, &reference, &target), 13);
    assert_eq!(calculate_size(27, &reference, &target), 14);
}

#[test]
fn extreme_downscale_may_round_to_zero() {
    let reference = ScreenConfig::new(1000, 1000, "rectangle");
    let target = ScreenConfig::new(10, 10, "rectangle");
    assert_eq!(calculate_size(20, &reference, &target), 0);
}

#[test]
fn monotonic_in_the_limiting_dimension() {
    let reference = ScreenConfig::new(200, 200, "round");
    let mut previous = 0;
    for height in 40..=100 {
        // Width stays the larger ratio, so height is always limiting.
        let target = ScreenConfig::new(100, height, "rectangle");
        let size = calculate_size(20, &reference, &target);
        assert!(size >= previous, "size decreased at height {height}");
        previous = size;
    }
}
