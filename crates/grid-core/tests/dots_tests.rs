// Host-side tests for the seeded background dot field.

use grid_core::*;

#[test]
fn same_seed_gives_same_field() {
    let params = DotFieldParams::default();
    let a = DotField::generate(&params, DOT_SEED);
    let b = DotField::generate(&params, DOT_SEED);
    assert_eq!(a.dots(), b.dots());

    let c = DotField::generate(&params, DOT_SEED + 1);
    assert_ne!(a.dots(), c.dots());
}

#[test]
fn dots_respect_shell_and_floor() {
    let params = DotFieldParams::default();
    let field = DotField::generate(&params, 42);
    assert_eq!(field.len(), params.count);
    for d in field.dots() {
        let r = d.position.length();
        assert!(
            r >= params.inner_radius - 1e-3 && r <= params.outer_radius + 1e-3,
            "radius {} outside shell",
            r
        );
        assert!(d.position.y >= params.min_y);
        assert!(d.size >= params.size[0] - 1e-6 && d.size <= params.size[1] + 1e-6);
        assert!(d.brightness > 0.0 && d.brightness <= 1.0 + 1e-6);
    }
}

#[test]
fn zero_count_gives_empty_field() {
    let params = DotFieldParams {
        count: 0,
        ..DotFieldParams::default()
    };
    let field = DotField::generate(&params, 1);
    assert!(field.is_empty());
    let (t, c) = field.instances();
    assert!(t.is_empty() && c.is_empty());
}

#[test]
fn instances_match_dots() {
    let field = DotField::generate(&DotFieldParams::default(), DOT_SEED);
    let (transforms, colors) = field.instances();
    assert_eq!(transforms.len(), field.len());
    assert_eq!(colors.len(), field.len());
    for ((t, c), d) in transforms.iter().zip(colors.iter()).zip(field.dots()) {
        assert!((t.model[0][0] - d.size).abs() < 1e-6);
        assert!((t.model[3][0] - d.position.x).abs() < 1e-4);
        assert!((t.model[3][1] - d.position.y).abs() < 1e-4);
        assert!(c.rgb.iter().all(|v| (0.0..=1.0).contains(v)));
    }
}

#[test]
fn default_field_is_empty() {
    let field = DotField::default();
    assert!(field.is_empty());
    assert_eq!(field.len(), 0);
}
