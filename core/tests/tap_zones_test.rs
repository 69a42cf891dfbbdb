use comic_engine::nav::{TapZones, resolve};
use comic_engine::{Intent, Point, Size};

#[test]
fn default_partition_covers_width_without_gaps() {
    let zones = TapZones::default();
    let viewport = Size::new(300.0, 100.0);

    let mut x = 0.0;
    while x < 300.0 {
        let intent = resolve(Point::new(x, 50.0), viewport, &zones);
        let expected = if x < 90.0 {
            Intent::Previous
        } else if x < 210.0 {
            Intent::ToggleOverlay
        } else {
            Intent::Next
        };
        assert_eq!(intent, expected, "x = {x}");
        x += 0.25;
    }
}

#[test]
fn every_integer_column_maps_to_exactly_one_band() {
    let zones = TapZones::default();
    let viewport = Size::new(300.0, 100.0);
    let counts = (0..300).fold([0usize; 3], |mut counts, x| {
        match resolve(Point::new(f64::from(x), 0.0), viewport, &zones) {
            Intent::Previous => counts[0] += 1,
            Intent::ToggleOverlay => counts[1] += 1,
            Intent::Next => counts[2] += 1,
            Intent::None => panic!("column {x} unmapped"),
        }
        counts
    });
    assert_eq!(counts, [90, 120, 90]);
}

#[test]
fn unmeasured_viewport_resolves_to_none() {
    let zones = TapZones::default();
    assert_eq!(resolve(Point::new(5.0, 5.0), Size::new(0.0, 100.0), &zones), Intent::None);
    for x in [0.0, 1.0, 50.0, 299.0] {
        assert_eq!(resolve(Point::new(x, 5.0), Size::new(0.0, 100.0), &zones), Intent::None);
    }
}

#[test]
fn custom_split_moves_the_boundaries() {
    let zones = TapZones { previous: 0.25, next: 0.25 };
    zones.validate().expect("valid split");
    let viewport = Size::new(400.0, 100.0);
    assert_eq!(resolve(Point::new(99.0, 1.0), viewport, &zones), Intent::Previous);
    assert_eq!(resolve(Point::new(100.0, 1.0), viewport, &zones), Intent::ToggleOverlay);
    assert_eq!(resolve(Point::new(300.0, 1.0), viewport, &zones), Intent::Next);
}
