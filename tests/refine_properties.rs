use mesh_kinetic::DebugInvariants;
use mesh_kinetic::measure::{area, surface_area};
use mesh_kinetic::mesh::{FaceId, HalfedgeMesh, VertexId};
use mesh_kinetic::refine::{RefineOptions, RefineStatus, refine};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Jittered `n x n` grid; interior points move by at most a fifth of a cell.
fn jittered_grid(n: usize, seed: u64) -> HalfedgeMesh {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut points = Vec::new();
    for j in 0..=n {
        for i in 0..=n {
            let interior = i > 0 && i < n && j > 0 && j < n;
            let (dx, dy) = if interior {
                (rng.gen_range(-0.2..0.2), rng.gen_range(-0.2..0.2))
            } else {
                (0.0, 0.0)
            };
            points.push([i as f64 + dx, j as f64 + dy, 0.0]);
        }
    }
    let id = |i: usize, j: usize| j * (n + 1) + i;
    let mut polygons = Vec::new();
    for j in 0..n {
        for i in 0..n {
            polygons.push(vec![id(i, j), id(i + 1, j), id(i + 1, j + 1)]);
            polygons.push(vec![id(i, j), id(i + 1, j + 1), id(i, j + 1)]);
        }
    }
    HalfedgeMesh::from_polygons(&points, &polygons).unwrap()
}

/// Edges with exactly one incident patch face, as (source, target, points),
/// ordered by endpoints.
fn patch_boundary(
    mesh: &HalfedgeMesh,
    patch: &[FaceId],
) -> Vec<(VertexId, VertexId, [f64; 3], [f64; 3])> {
    let mut boundary: Vec<_> = mesh
        .halfedges()
        .filter(|&h| {
            let inside = |f: Option<FaceId>| f.is_some_and(|f| patch.contains(&f));
            inside(mesh.face(h)) && !inside(mesh.face(h.opposite()))
        })
        .map(|h| {
            let (s, t) = (mesh.source(h), mesh.target(h));
            (s, t, mesh.point(s), mesh.point(t))
        })
        .collect();
    boundary.sort_by_key(|&(s, t, _, _)| (s, t));
    boundary
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_refinement_is_bounded_and_valid(
        seed in any::<u64>(),
        alpha in 0.5f64..6.0,
        cap in 0usize..5,
    ) {
        let mut mesh = jittered_grid(3, seed);
        let area_before = surface_area(&mesh).unwrap();
        let faces_before = mesh.face_count();
        let vertices_before = mesh.vertex_count();
        let patch: Vec<FaceId> = mesh.faces().collect();

        let options = RefineOptions {
            density_control_factor: alpha,
            max_iterations: cap,
            ..Default::default()
        };
        let outcome = refine(&mut mesh, patch, &options).unwrap();

        prop_assert!(outcome.iterations <= cap);
        prop_assert!(mesh.validate_invariants().is_ok());
        prop_assert_eq!(mesh.vertex_count(), vertices_before + outcome.new_vertices.len());
        prop_assert_eq!(mesh.face_count(), faces_before + outcome.new_faces.len());
        prop_assert_eq!(outcome.new_faces.len(), 2 * outcome.new_vertices.len());
        prop_assert!((surface_area(&mesh).unwrap() - area_before).abs() < 1e-9);
        if outcome.status == RefineStatus::Converged && cap > 0 {
            prop_assert!(outcome.iterations >= 1);
        }
    }

    #[test]
    fn prop_sub_patch_boundary_is_preserved(
        seed in any::<u64>(),
        mask in prop::collection::vec(any::<bool>(), 18),
        alpha in 1.0f64..6.0,
        cap in 1usize..4,
    ) {
        let mut mesh = jittered_grid(3, seed);
        let patch: Vec<FaceId> = mesh
            .faces()
            .zip(&mask)
            .filter(|(_, keep)| **keep)
            .map(|(f, _)| f)
            .collect();
        let outside: Vec<(FaceId, Vec<VertexId>)> = mesh
            .faces()
            .filter(|f| !patch.contains(f))
            .map(|f| (f, mesh.face_vertices(f).collect()))
            .collect();
        let boundary = patch_boundary(&mesh, &patch);
        let area_before = area(&mesh, patch.iter().copied()).unwrap();

        let options = RefineOptions {
            density_control_factor: alpha,
            max_iterations: cap,
            ..Default::default()
        };
        let outcome = refine(&mut mesh, patch.iter().copied(), &options).unwrap();

        let mut refined = patch.clone();
        refined.extend(&outcome.new_faces);
        prop_assert!(mesh.validate_invariants().is_ok());
        prop_assert_eq!(patch_boundary(&mesh, &refined), boundary);
        for (f, corners) in &outside {
            prop_assert_eq!(&mesh.face_vertices(*f).collect::<Vec<_>>(), corners);
        }
        prop_assert!((area(&mesh, refined.iter().copied()).unwrap() - area_before).abs() < 1e-9);
    }
}
