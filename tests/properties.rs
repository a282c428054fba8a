use projective_cube::cube::surface_slots;
use projective_cube::tiling::{antipodal_vertex, encode_vertex, is_solved, EdgeKind};
use projective_cube::{
    apply_move, build_tiling_graph, compute_commutator_norm, compute_integrity,
    cubies_to_tiling_state, make_cube_state, parity, regime, rotate_slice, Axis, EngineConfig,
    MoveKey, Puzzle, Regime, SliceTurn, Turn, K_STAR,
};
use rand::rngs::SmallRng;
use rand::SeedableRng;

#[test]
fn fresh_cubes_have_full_integrity() {
    for size in 2..=5 {
        let cube = make_cube_state(size).unwrap();
        let report = compute_integrity(&cube, size).unwrap();
        assert_eq!(report.integrity, 1.0);
        assert_eq!(report.preserved, 3 * size * size);
        assert_eq!(report.total, 3 * size * size);
        assert_eq!(report.pairs.len(), report.total);
    }
}

#[test]
fn rotations_invert() {
    for size in 2..=5 {
        let solved = make_cube_state(size).unwrap();
        for axis in Axis::ALL {
            for slice in 0..size {
                for turn in Turn::ALL {
                    let mut state = solved.clone();
                    for _ in 0..4 {
                        state = rotate_slice(&state, size, axis, slice, turn).unwrap();
                    }
                    assert_eq!(state, solved);

                    let there = rotate_slice(&solved, size, axis, slice, turn).unwrap();
                    let back = rotate_slice(&there, size, axis, slice, -turn).unwrap();
                    assert_eq!(back, solved);
                }
            }
        }
    }
}

#[test]
fn tiling_graph_shape() {
    let size = 3;
    let g = build_tiling_graph(size).unwrap();
    assert_eq!(g.vertex_count(), 54);
    for v in 0..g.vertex_count() {
        assert!(!g.adjacency()[v].contains(&v), "loop at {v}");
        for u in g.neighbors(v) {
            assert!(g.adjacency()[u].contains(&v), "{v} -> {u} is one way");
        }
        let antipodal = g
            .neighbors(v)
            .filter(|&u| g.edge_kind(v, u) == Some(EdgeKind::Antipodal))
            .count();
        assert_eq!(antipodal, 1);
        let partner = antipodal_vertex(v, size).unwrap();
        assert!(g.adjacency()[v].contains(&partner));
        assert_eq!(antipodal_vertex(partner, size), Ok(v));
    }
}

#[test]
fn vertex_order_matches_slot_order() {
    for size in 2..=4 {
        for (v, slot) in surface_slots(size).enumerate() {
            assert_eq!(encode_vertex(slot, size), v);
        }
    }
}

#[test]
fn solved_cube_is_identity() {
    for size in 2..=5 {
        let cube = make_cube_state(size).unwrap();
        let state = cubies_to_tiling_state(&cube, size).unwrap();
        assert_eq!(state, (0..6 * size * size).collect::<Vec<_>>());
        assert!(is_solved(&state));
        assert!(projective_cube::is_tiling_state_solved(&state));
    }
}

#[test]
fn graph_moves_agree_with_rotations() {
    for size in 2..=5 {
        let g = build_tiling_graph(size).unwrap();
        let solved = make_cube_state(size).unwrap();
        for (key, cycles) in g.move_cycles() {
            let turn = key.slice_turn(size).unwrap();
            let cube = turn.apply(&solved).unwrap();
            let from_graph = apply_move(&g.identity(), cycles).unwrap();
            assert_eq!(from_graph, cubies_to_tiling_state(&cube, size).unwrap(), "{key} on {size}");
        }
        for turn in SliceTurn::all(size) {
            let cube = turn.apply(&solved).unwrap();
            let from_graph = g.apply_turn(&g.identity(), turn).unwrap();
            let from_cube = cubies_to_tiling_state(&cube, size).unwrap();
            assert_eq!(from_graph, from_cube, "{turn} on {size}");
        }
    }
}

#[test]
fn twelve_face_moves_on_a_3x3() {
    let g = build_tiling_graph(3).unwrap();
    let faces = g.move_cycles().keys().filter(|k| k.layer.face().is_some()).count();
    assert_eq!(faces, 12);
}

#[test]
fn parity_returns_after_four_turns() {
    let g = build_tiling_graph(3).unwrap();
    let id = g.identity();
    assert_eq!(parity(&id), Ok(0));
    for key in g.move_cycles().keys() {
        let mut state = id.clone();
        let mut parities = vec![];
        for _ in 0..4 {
            state = g.apply_move(&state, *key).unwrap();
            parities.push(parity(&state).unwrap());
        }
        assert_eq!(parities[1], 0, "{key}");
        assert_eq!(parities[3], 0, "{key}");
        assert!(is_solved(&state));
    }
}

#[test]
fn quarter_turn_breaks_integrity() {
    let cube = make_cube_state(3).unwrap();
    let r: MoveKey = "R".parse().unwrap();
    let cube = r.slice_turn(3).unwrap().apply(&cube).unwrap();
    let report = compute_integrity(&cube, 3).unwrap();
    assert!(report.integrity < 1.0);
    assert!(report.broken > 0);
    assert!(compute_commutator_norm(&cube, 3).unwrap() > 0);
}

#[test]
fn scrambles_drive_integrity_down() {
    for seed in 0..5 {
        let mut puzzle = Puzzle::new(3, EngineConfig::default()).unwrap();
        let mut rng = SmallRng::seed_from_u64(seed);
        for _ in 0..50 {
            puzzle.scramble(&mut rng, 1).unwrap();
            let report = puzzle.report().unwrap();
            assert!((0.0..=1.0).contains(&report.integrity));
        }
        let report = puzzle.report().unwrap();
        assert!(report.integrity < 0.5, "seed {seed}: {}", report.integrity);
        assert_eq!(report.regime, Regime::Entropy);
        puzzle.check_consistency().unwrap();
    }
}

#[test]
fn regime_labels() {
    assert_eq!(regime(K_STAR), Regime::Critical);
    assert_eq!(regime(1.0), Regime::Structure);
    assert_eq!(regime(0.0), Regime::Entropy);
}

#[test]
fn turn_and_back_is_solved_in_both_models() {
    let size = 3;
    let g = build_tiling_graph(size).unwrap();
    let solved = make_cube_state(size).unwrap();

    let there = rotate_slice(&solved, size, Axis::X, 0, Turn::Pos).unwrap();
    let back = rotate_slice(&there, size, Axis::X, 0, Turn::Neg).unwrap();
    assert_eq!(back, solved);

    let t = g.apply_turn(&g.identity(), SliceTurn::new(Axis::X, 0, Turn::Pos)).unwrap();
    let t = g.apply_turn(&t, SliceTurn::new(Axis::X, 0, Turn::Neg)).unwrap();
    assert_eq!(t, g.identity());
    assert_eq!(cubies_to_tiling_state(&back, size).unwrap(), t);
}
