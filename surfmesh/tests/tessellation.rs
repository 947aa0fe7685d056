//! End-to-end checks of the public tessellation API

use std::f32::consts::FRAC_PI_2;

use glam::{Vec2, Vec3};
use surfmesh::{
    AttributeKind, Domain, FnSurface, ParametricSurface, Quad, Shape, Sphere,
    TessellationRequest, Torus, pack_mesh, tessellate,
};

const RED: Vec3 = Vec3::new(1.0, 0.0, 0.0);
const GREEN: Vec3 = Vec3::new(0.0, 1.0, 0.0);

fn surfaces() -> Vec<(&'static str, Box<dyn ParametricSurface>)> {
    let saddle = FnSurface::new()
        .with_domain(Domain::new(-1.0, 1.0, -1.0, 1.0))
        .with_position(|u, v| Vec3::new(u, v, u * u - v * v));

    vec![
        ("torus", Box::new(Torus::new(2.0, 0.5)) as Box<dyn ParametricSurface>),
        ("sphere", Box::new(Sphere::new(1.5)) as Box<dyn ParametricSurface>),
        ("quad", Box::new(Quad::new(3.0)) as Box<dyn ParametricSurface>),
        ("saddle", Box::new(saddle) as Box<dyn ParametricSurface>),
    ]
}

#[test]
fn every_stream_is_empty_or_full() {
    for (name, surface) in surfaces() {
        for (m, n) in [(1, 1), (3, 2), (12, 7)] {
            let request = TessellationRequest::for_surface(surface.as_ref(), m, n)
                .with_checker(RED, GREEN);
            let mesh = tessellate(surface.as_ref(), &request).unwrap();
            let vertex_count = (m * n * 6) as usize;
            assert_eq!(mesh.vertex_count(), vertex_count, "{name}");

            for kind in AttributeKind::ALL {
                let len = mesh.stream(kind).len();
                assert!(
                    len == 0 || len == vertex_count * kind.components() as usize,
                    "{name}: {kind} stream has {len} values"
                );
            }
            assert_eq!(mesh.colors().len(), vertex_count * 3, "{name}");
        }
    }
}

#[test]
fn torus_reference_points() {
    let torus = Torus::new(2.0, 0.5);
    let mesh = tessellate(&torus, &TessellationRequest::for_surface(&torus, 4, 1)).unwrap();

    // Vertex 1 of each cell is its (u0, v0) corner; cell (2, 1) starts at t = pi/2
    let cell_origin = |cell: usize| mesh.position(cell * 6 + 1).unwrap();
    assert!((cell_origin(0) - Vec3::new(2.5, 0.0, 0.0)).length() < 1e-5);
    assert!((cell_origin(1) - Vec3::new(0.0, 2.5, 0.0)).length() < 1e-5);
    assert!((torus.position(FRAC_PI_2, 0.0) - Vec3::new(0.0, 2.5, 0.0)).length() < 1e-5);
}

#[test]
fn closed_surfaces_wrap_around() {
    let torus = Torus::new(2.0, 0.5);
    let mesh = tessellate(&torus, &TessellationRequest::for_surface(&torus, 16, 8)).unwrap();

    // The last cell's far corner lands back on the starting point
    let last_cell_far_corner = mesh.position(mesh.vertex_count() - 3).unwrap();
    let start = torus.position(0.0, 0.0);
    assert!((last_cell_far_corner - start).length() < 1e-4);
}

#[test]
fn sphere_triangles_face_outward() {
    let sphere = Sphere::new(1.0);
    let mesh = tessellate(&sphere, &TessellationRequest::for_surface(&sphere, 24, 12)).unwrap();

    for tri in 0..mesh.triangle_count() {
        let a = mesh.position(tri * 3).unwrap();
        let b = mesh.position(tri * 3 + 1).unwrap();
        let c = mesh.position(tri * 3 + 2).unwrap();
        let face = (b - a).cross(c - a);
        if face.length() < 1e-6 {
            continue; // collapsed at a pole
        }
        let centroid = (a + b + c) / 3.0;
        assert!(face.dot(centroid) > 0.0, "triangle {tri} faces inward");
    }
}

#[test]
fn sphere_normals_match_positions() {
    let sphere = Sphere::new(4.0);
    let mesh = tessellate(&sphere, &TessellationRequest::for_surface(&sphere, 8, 8)).unwrap();
    for i in 0..mesh.vertex_count() {
        let p = mesh.position(i).unwrap();
        let n = mesh.normal(i).unwrap();
        assert!((p / 4.0 - n).length() < 1e-5);
    }
}

#[test]
fn tex_coords_stay_in_unit_square() {
    for surface in [
        Box::new(Torus::new(1.0, 0.2)) as Box<dyn ParametricSurface>,
        Box::new(Sphere::new(1.0)) as Box<dyn ParametricSurface>,
    ] {
        let request = TessellationRequest::for_surface(surface.as_ref(), 10, 10);
        let mesh = tessellate(surface.as_ref(), &request).unwrap();
        for i in 0..mesh.vertex_count() {
            let uv = mesh.tex_coord(i).unwrap();
            assert!(uv.cmpge(Vec2::splat(-1e-6)).all() && uv.cmple(Vec2::splat(1.0 + 1e-6)).all());
        }
    }
}

#[test]
fn zero_resolution_is_valid() {
    let torus = Torus::new(2.0, 0.5);
    let mesh = tessellate(&torus, &TessellationRequest::for_surface(&torus, 0, 8)).unwrap();
    assert_eq!(mesh.vertex_count(), 0);

    let shape = Shape::from_mesh(&mesh);
    assert_eq!(shape.vertex_count(), 0);
    assert!(shape.attributes().is_empty());
    assert!(pack_mesh(&mesh).unwrap().vertices.is_empty());
}

#[test]
fn repeated_tessellation_is_identical() {
    let sphere = Sphere::new(2.0);
    let request = TessellationRequest::for_surface(&sphere, 20, 10).with_checker(RED, GREEN);
    let first = pack_mesh(&tessellate(&sphere, &request).unwrap()).unwrap();
    let second = pack_mesh(&tessellate(&sphere, &request).unwrap()).unwrap();
    assert_eq!(first.vertices, second.vertices);
}
