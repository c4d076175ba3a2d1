// Host-side property checks for point generation, motion and linking.
// Random inputs come from seeded SmallRng loops so failures reproduce.

use field_core::linker::{link_threshold, pairwise_links};
use field_core::planar::{spawn_particles, step_particle};
use field_core::sphere::{fibonacci_sphere, rotation_matrix, sphere_radius};
use field_core::*;
use glam::DVec3;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

fn random_viewport(rng: &mut SmallRng) -> Viewport {
    Viewport::new(rng.gen_range(1.0..4000.0), rng.gen_range(1.0..3000.0))
}

#[test]
fn sphere_regeneration_places_900_points_on_the_radius() {
    let mut rng = SmallRng::seed_from_u64(1);
    for _ in 0..50 {
        let vp = random_viewport(&mut rng);
        let session =
            RenderSession::with_seed(FieldConfig::with_mode(Mode::Sphere), vp, 0).unwrap();
        let Field::Sphere(field) = session.field() else {
            panic!("expected sphere field");
        };
        let radius = sphere_radius(vp, SPHERE_RADIUS_FACTOR);
        assert_eq!(field.store().len(), 900);
        for dot in field.store().points() {
            assert!(
                (dot.position.length() - radius).abs() < 1e-6,
                "dot off the sphere at viewport {vp:?}"
            );
        }
    }
}

#[test]
fn planar_particles_never_escape_the_viewport() {
    let cfg = FieldConfig::default();
    let mut rng = SmallRng::seed_from_u64(2);
    // one velocity step is the largest tolerated overshoot
    let eps = cfg.particle_speed_max + 1e-9;
    for _ in 0..10 {
        let vp = Viewport::new(rng.gen_range(50.0..1600.0), rng.gen_range(50.0..1000.0));
        let mut particles = spawn_particles(vp, &cfg, &mut rng);
        let mut pointer = Pointer::new(cfg.pointer_radius_initial);
        for step in 0..2000 {
            if step % 7 == 0 {
                pointer.move_to(rng.gen_range(0.0..vp.width), rng.gen_range(0.0..vp.height));
            }
            if step % 31 == 0 {
                pointer.leave();
            }
            for p in particles.iter_mut() {
                step_particle(p, vp, &pointer, &cfg);
                assert!(p.position.x >= -eps && p.position.x <= vp.width + eps);
                assert!(p.position.y >= -eps && p.position.y <= vp.height + eps);
            }
        }
    }
}

#[test]
fn regeneration_count_is_stable_for_a_viewport() {
    let vp = Viewport::new(1200.0, 800.0);
    let mut a = RenderSession::with_seed(FieldConfig::default(), vp, 10).unwrap();
    let count = a.point_count();
    a.resize(1200.0, 800.0);
    assert_eq!(a.point_count(), count);

    let mut s = RenderSession::with_seed(FieldConfig::with_mode(Mode::Sphere), vp, 10).unwrap();
    let before: Vec<SphereDot> = match s.field() {
        Field::Sphere(f) => f.store().points().to_vec(),
        Field::Planar(_) => unreachable!(),
    };
    s.resize(1200.0, 800.0);
    let after: Vec<SphereDot> = match s.field() {
        Field::Sphere(f) => f.store().points().to_vec(),
        Field::Planar(_) => unreachable!(),
    };
    assert_eq!(before, after);
}

#[test]
fn rotation_preserves_distance_from_origin() {
    let mut rng = SmallRng::seed_from_u64(4);
    for _ in 0..1000 {
        let p = DVec3::new(
            rng.gen_range(-900.0..900.0),
            rng.gen_range(-900.0..900.0),
            rng.gen_range(-900.0..900.0),
        );
        let m = rotation_matrix(rng.gen_range(-10.0..10.0), rng.gen_range(-10.0..10.0));
        assert!(((m * p).length() - p.length()).abs() < 1e-6);
    }
}

#[test]
fn cumulative_rotation_drift_stays_small() {
    let vp = Viewport::new(1200.0, 800.0);
    let mut s = RenderSession::with_seed(FieldConfig::with_mode(Mode::Sphere), vp, 0).unwrap();
    s.pointer_move(1100.0, 50.0);
    let mut surface = RecordingSurface::new();
    for _ in 0..5000 {
        s.tick(&mut surface);
        surface.reset();
    }
    let Field::Sphere(field) = s.field() else {
        panic!("expected sphere field");
    };
    for dot in field.store().points() {
        assert!((dot.position.length() - 600.0).abs() < 1e-6);
    }
    let a = fibonacci_sphere(900, 600.0);
    // it did actually turn
    assert_ne!(a[1].position, field.store().points()[1].position);
}

#[test]
fn painted_links_match_the_strict_threshold() {
    let vp = Viewport::new(1200.0, 800.0);
    let mut s = RenderSession::with_seed(FieldConfig::default(), vp, 21).unwrap();
    let mut surface = RecordingSurface::new();
    for _ in 0..30 {
        surface.reset();
        let stats = s.tick(&mut surface);
        let Field::Planar(field) = s.field() else {
            panic!("expected planar field");
        };
        let mut expected = Vec::new();
        pairwise_links(
            field.store().points(),
            link_threshold(vp, LINK_DIVISOR),
            &mut expected,
        );
        assert_eq!(stats.links, expected.len());
        assert_eq!(surface.lines().count(), expected.len());
        for (_, _, color) in surface.lines() {
            assert!(color.a >= 0.0 && color.a <= LINK_ALPHA);
        }
    }
}

#[test]
fn grid_linker_kicks_in_for_large_fields() {
    let mut cfg = FieldConfig::default();
    cfg.grid_linker_min_points = 50;
    let vp = Viewport::new(1200.0, 800.0);
    let mut grid = RenderSession::with_seed(cfg, vp, 8).unwrap();
    let mut brute = RenderSession::with_seed(FieldConfig::default(), vp, 8).unwrap();
    let mut sg = RecordingSurface::new();
    let mut sb = RecordingSurface::new();
    for _ in 0..10 {
        sg.reset();
        sb.reset();
        let a = grid.tick(&mut sg);
        let b = brute.tick(&mut sb);
        assert_eq!(a, b);
        assert_eq!(sg.commands, sb.commands);
    }
}
