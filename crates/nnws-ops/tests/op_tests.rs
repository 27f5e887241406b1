use std::f64::consts::{PI, TAU};

use approx::assert_abs_diff_eq;
use nnws_geometry::ThreadSpec;
use nnws_kernel::{
    ChamferKind, Countersink, HoleSpec, KernelId, KernelIntrospect, KernelSolidHandle,
    MockKernel, MockOp,
};
use nnws_ops::*;
use nnws_types::{Point2, Profile, Role, SketchPlane, TopoKind, TopoSignature};

/// Helper: a 2 × 3 rectangle face on the XY plane.
fn make_face(kernel: &mut MockKernel) -> KernelId {
    let profile = Profile::rect(Point2::new(0.0, 0.0), Point2::new(2.0, 3.0));
    profile_face(kernel, &profile, &SketchPlane::xy()).unwrap()
}

fn make_box(kernel: &mut MockKernel) -> KernelSolidHandle {
    let face = make_face(kernel);
    execute_extrude(kernel, face, [0.0, 0.0, 1.0], 5.0)
        .unwrap()
        .main()
        .unwrap()
}

fn make_cylinder(kernel: &mut MockKernel, radius: f64, height: f64) -> KernelSolidHandle {
    execute_extrude_profile(
        kernel,
        &Profile::circle(Point2::ORIGIN, radius),
        &SketchPlane::xy(),
        height,
    )
    .unwrap()
    .main()
    .unwrap()
}

fn roles_of(result: &OpResult) -> Vec<Role> {
    result
        .provenance
        .role_assignments
        .iter()
        .map(|(_, r)| r.clone())
        .collect()
}

fn wall_thread() -> ThreadSpec {
    ThreadSpec {
        start_offset: 0.4,
        radius: 1.9,
        height: 0.8,
        pitch: 0.25,
        profile_radius: 0.06875,
    }
}

// ── Topology Diff Tests ────────────────────────────────────────────────────

#[test]
fn diff_empty_before_all_created() {
    let mut kernel = MockKernel::new();
    let handle = make_box(&mut kernel);

    let after = diff::snapshot(&kernel, &handle);
    let result = diff::diff(&TopoSnapshot::empty(), &after);

    assert!(result.deleted.is_empty(), "Should have no deleted entities");
    let face_count = result
        .created
        .iter()
        .filter(|e| e.kind == TopoKind::Face)
        .count();
    assert_eq!(face_count, 6, "Should create 6 faces for a box");
}

#[test]
fn diff_identical_snapshots_no_changes() {
    let mut kernel = MockKernel::new();
    let handle = make_box(&mut kernel);

    let snap = diff::snapshot(&kernel, &handle);
    let result = diff::diff(&snap, &snap);

    assert!(result.created.is_empty(), "No created entities");
    assert!(result.deleted.is_empty(), "No deleted entities");
    assert_eq!(result.survived.len(), 6 + 12 + 8);
}

#[test]
fn signature_similarity_identical_is_1() {
    let sig = TopoSignature {
        surface_type: Some("planar".to_string()),
        area: Some(4.0),
        centroid: Some([1.0, 1.5, 0.0]),
        normal: Some([0.0, 0.0, 1.0]),
        length: None,
    };
    assert_abs_diff_eq!(signature_similarity(&sig, &sig), 1.0, epsilon = 1e-12);
}

#[test]
fn signature_similarity_different_type_is_low() {
    let a = TopoSignature {
        surface_type: Some("planar".to_string()),
        area: Some(4.0),
        centroid: Some([0.0, 0.0, 0.0]),
        normal: Some([0.0, 0.0, 1.0]),
        length: None,
    };
    let b = TopoSignature {
        surface_type: Some("cylindrical".to_string()),
        area: Some(40.0),
        centroid: Some([8.0, 0.0, 0.0]),
        normal: Some([0.0, 0.0, -1.0]),
        length: None,
    };
    assert!(signature_similarity(&a, &b) < 0.3);
}

#[test]
fn signature_similarity_empty_is_0() {
    let empty = TopoSignature::empty();
    assert_eq!(signature_similarity(&empty, &empty), 0.0);
}

// ── Extrude Tests ──────────────────────────────────────────────────────────

#[test]
fn extrude_assigns_end_cap_roles() {
    let mut kernel = MockKernel::new();
    let face = make_face(&mut kernel);
    let result = execute_extrude(&mut kernel, face, [0.0, 0.0, 1.0], 5.0).unwrap();
    let roles = roles_of(&result);

    assert!(roles.contains(&Role::EndCapPositive));
    assert!(roles.contains(&Role::EndCapNegative));
    let sides = roles
        .iter()
        .filter(|r| matches!(r, Role::SideFace { .. }))
        .count();
    assert_eq!(sides, 4);
    assert_eq!(result.with_role(|r| r.is_end_cap_edge(true)).len(), 4);
    assert_eq!(result.with_role(|r| r.is_end_cap_edge(false)).len(), 4);
}

#[test]
fn extrude_negative_depth_flips_caps() {
    let mut kernel = MockKernel::new();
    let face = make_face(&mut kernel);
    let result = execute_extrude(&mut kernel, face, [0.0, 0.0, 1.0], -2.0).unwrap();
    let top = result.with_role(|r| *r == Role::EndCapPositive)[0];
    let sig = kernel.compute_signature(top, TopoKind::Face);
    assert_abs_diff_eq!(sig.centroid.unwrap()[2], -2.0, epsilon = 1e-12);
}

#[test]
fn extrude_profile_empty_list_is_no_profiles() {
    let mut kernel = MockKernel::new();
    let err = profile_faces(&mut kernel, &[], &SketchPlane::xy()).unwrap_err();
    assert!(matches!(err, OpError::NoProfiles));
}

#[test]
fn extrude_invalid_face_returns_error() {
    let mut kernel = MockKernel::new();
    let result = execute_extrude(&mut kernel, KernelId(9999), [0.0, 0.0, 1.0], 5.0);
    assert!(matches!(result, Err(OpError::Kernel(_))));
}

// ── Revolve / Sweep / Loft Tests ───────────────────────────────────────────

#[test]
fn revolve_full_assigns_revolved_faces() {
    let mut kernel = MockKernel::new();
    let ring = Profile::rect(Point2::new(1.55, -0.15), Point2::new(1.9, 0.0));
    let result = execute_revolve_profile(
        &mut kernel,
        &ring,
        &SketchPlane::xz(),
        [0.0; 3],
        [0.0, 0.0, 1.0],
    )
    .unwrap();
    let roles = roles_of(&result);
    assert_eq!(roles.len(), 4);
    assert!(roles.iter().all(|r| matches!(r, Role::RevolvedFace { .. })));

    let bbox = kernel.bounding_box(&result.main().unwrap()).unwrap();
    assert_abs_diff_eq!(bbox.max[2], 0.15, epsilon = 1e-12);
    assert_abs_diff_eq!(bbox.max[0], 1.9, epsilon = 1e-9);
}

#[test]
fn revolve_partial_assigns_caps() {
    let mut kernel = MockKernel::new();
    let face = profile_face(
        &mut kernel,
        &Profile::rect(Point2::new(1.0, 0.0), Point2::new(2.0, 1.0)),
        &SketchPlane::xz(),
    )
    .unwrap();
    let result = execute_revolve(&mut kernel, face, [0.0; 3], [0.0, 0.0, 1.0], PI).unwrap();
    let roles = roles_of(&result);
    assert!(roles.contains(&Role::EndCapNegative));
    assert!(roles.contains(&Role::EndCapPositive));
}

#[test]
fn revolve_rejects_zero_angle() {
    let mut kernel = MockKernel::new();
    let face = make_face(&mut kernel);
    let err = execute_revolve(&mut kernel, face, [0.0; 3], [0.0, 1.0, 0.0], 0.0).unwrap_err();
    assert!(matches!(err, OpError::InvalidParameter { .. }));
}

#[test]
fn sweep_tags_seams_and_laterals() {
    let mut kernel = MockKernel::new();
    let path = [[1.0, 0.0, 0.0], [0.0, 1.0, 0.1], [-1.0, 0.0, 0.2]];
    let plane = SketchPlane::from_normal(
        nnws_types::Point3::new(1.0, 0.0, 0.0),
        nnws_types::Vec3::new(-1.0, 1.0, 0.1),
    )
    .unwrap();
    let face = profile_face(&mut kernel, &Profile::circle(Point2::ORIGIN, 0.05), &plane).unwrap();
    let result = execute_sweep(&mut kernel, face, &path).unwrap();
    let roles = roles_of(&result);

    assert!(roles.contains(&Role::SweepStartCap));
    assert!(roles.contains(&Role::SweepEndCap));
    assert!(roles.contains(&Role::SweepSeamStart { index: 0 }));
    assert!(roles.contains(&Role::SweepSeamEnd { index: 0 }));
    assert_eq!(result.with_role(Role::is_sweep_lateral).len(), 1);

    let end_seam = result.with_role(|r| matches!(r, Role::SweepSeamEnd { .. }))[0];
    let centroid = kernel
        .compute_signature(end_seam, TopoKind::Edge)
        .centroid
        .unwrap();
    assert_abs_diff_eq!(centroid[0], -1.0, epsilon = 1e-9);
}

#[test]
fn sweep_short_path_rejected() {
    let mut kernel = MockKernel::new();
    let face = make_face(&mut kernel);
    let err = execute_sweep(&mut kernel, face, &[[0.0; 3]]).unwrap_err();
    assert!(matches!(err, OpError::InvalidParameter { .. }));
}

#[test]
fn loft_caps_follow_section_order() {
    let mut kernel = MockKernel::new();
    let bottom = Profile::rect(Point2::new(-1.0, -1.0), Point2::new(1.0, 1.0));
    let top = Profile::rect(Point2::new(-0.5, -0.5), Point2::new(0.5, 0.5));
    let result = execute_loft(
        &mut kernel,
        &[
            (bottom, SketchPlane::xy()),
            (top, SketchPlane::xy().offset(0.2)),
        ],
    )
    .unwrap();
    let top_cap = result.with_role(|r| *r == Role::EndCapPositive)[0];
    let sig = kernel.compute_signature(top_cap, TopoKind::Face);
    assert_abs_diff_eq!(sig.centroid.unwrap()[2], 0.2, epsilon = 1e-12);
}

// ── Boolean Tests ──────────────────────────────────────────────────────────

#[test]
fn boolean_union_consumes_inputs() {
    let mut kernel = MockKernel::new();
    let a = make_box(&mut kernel);
    let b = make_cylinder(&mut kernel, 1.0, 6.0);
    let result = execute_boolean(&mut kernel, &a, &b, BooleanKind::Union, &[]).unwrap();

    assert_eq!(kernel.solid_count(), 1);
    assert!(kernel.bounding_box(&a).is_none());
    assert_eq!(kernel.list_faces(&result.main().unwrap()).len(), 9);
}

#[test]
fn boolean_assigns_body_a_b_roles() {
    let mut kernel = MockKernel::new();
    let a = make_box(&mut kernel);
    let b = make_cylinder(&mut kernel, 1.0, 6.0);
    let result = execute_boolean(&mut kernel, &a, &b, BooleanKind::Union, &[]).unwrap();
    let roles = roles_of(&result);
    let a_faces = roles
        .iter()
        .filter(|r| matches!(r, Role::BooleanBodyAFace { .. }))
        .count();
    let b_faces = roles
        .iter()
        .filter(|r| matches!(r, Role::BooleanBodyBFace { .. }))
        .count();
    assert_eq!((a_faces, b_faces), (6, 3));
}

#[test]
fn boolean_carries_roles_onto_result() {
    let mut kernel = MockKernel::new();
    let a = make_box(&mut kernel);
    let tool = execute_extrude_profile(
        &mut kernel,
        &Profile::circle(Point2::new(1.0, 1.0), 0.5),
        &SketchPlane::xy().offset(4.0),
        2.0,
    )
    .unwrap();
    let tagged = tool.with_role(|r| r.is_end_cap_edge(true));
    let carried: Vec<(KernelId, Role)> = tagged
        .iter()
        .map(|id| (*id, Role::SweepLateral { index: 0 }))
        .collect();

    let result = execute_boolean(
        &mut kernel,
        &a,
        &tool.main().unwrap(),
        BooleanKind::Union,
        &carried,
    )
    .unwrap();
    let moved = result.with_role(Role::is_sweep_lateral);
    assert_eq!(moved.len(), 1);
    assert_ne!(moved[0], tagged[0], "result entities have fresh ids");
    let sig = kernel.compute_signature(moved[0], TopoKind::Edge);
    assert_abs_diff_eq!(sig.centroid.unwrap()[2], 6.0, epsilon = 1e-12);
}

#[test]
fn boolean_subtract_failure_keeps_inputs() {
    let mut kernel = MockKernel::new();
    let small = make_cylinder(&mut kernel, 0.5, 0.5);
    let big = make_cylinder(&mut kernel, 5.0, 5.0);
    let err =
        execute_boolean(&mut kernel, &small, &big, BooleanKind::Subtract, &[]).unwrap_err();
    assert!(matches!(err, OpError::Kernel(_)));
    assert_eq!(kernel.solid_count(), 2);
}

// ── Fillet / Chamfer Tests ─────────────────────────────────────────────────

#[test]
fn fillet_assigns_fillet_face_and_rewrites() {
    let mut kernel = MockKernel::new();
    let extruded = {
        let face = make_face(&mut kernel);
        execute_extrude(&mut kernel, face, [0.0, 0.0, 1.0], 5.0).unwrap()
    };
    let handle = extruded.main().unwrap();
    let top_edges = extruded.with_role(|r| r.is_end_cap_edge(true));
    let bottom_edges = extruded.with_role(|r| r.is_end_cap_edge(false));

    let result = execute_fillet(&mut kernel, &handle, &top_edges, 0.1).unwrap();
    let fillets = result.with_role(|r| matches!(r, Role::FilletFace { .. }));
    assert_eq!(fillets.len(), 4);

    let followed: Vec<KernelId> = bottom_edges
        .iter()
        .filter_map(|e| result.follow(*e))
        .collect();
    assert_eq!(followed.len(), 4);
    let new_edges = kernel.list_edges(&result.main().unwrap());
    assert!(followed.iter().all(|e| new_edges.contains(e)));
}

#[test]
fn fillet_rejects_empty_selection() {
    let mut kernel = MockKernel::new();
    let handle = make_box(&mut kernel);
    let err = execute_fillet(&mut kernel, &handle, &[], 0.1).unwrap_err();
    assert!(matches!(err, OpError::InvalidParameter { .. }));
}

#[test]
fn chamfer_distance_angle_creates_conical_face() {
    let mut kernel = MockKernel::new();
    let extruded = execute_extrude_profile(
        &mut kernel,
        &Profile::circle(Point2::ORIGIN, 1.2),
        &SketchPlane::xy(),
        0.4,
    )
    .unwrap();
    let top = extruded.with_role(|r| r.is_end_cap_edge(true));
    let kind = ChamferKind::DistanceAngle {
        distance: 0.08,
        angle_deg: 75.0,
        flipped: false,
    };
    let result = execute_chamfer(&mut kernel, &extruded.main().unwrap(), &top, kind).unwrap();
    let face = result.with_role(|r| matches!(r, Role::ChamferFace { .. }))[0];
    let sig = kernel.compute_signature(face, TopoKind::Face);
    assert_eq!(sig.surface_type.as_deref(), Some("conical"));
}

#[test]
fn chamfer_rejects_right_angle() {
    let mut kernel = MockKernel::new();
    let handle = make_box(&mut kernel);
    let edge = kernel.list_edges(&handle)[0];
    let kind = ChamferKind::DistanceAngle {
        distance: 0.1,
        angle_deg: 90.0,
        flipped: true,
    };
    assert!(execute_chamfer(&mut kernel, &handle, &[edge], kind).is_err());
}

// ── Pattern / Copy / Split Tests ───────────────────────────────────────────

#[test]
fn pattern_rectangular_outputs_seed_and_copies() {
    let mut kernel = MockKernel::new();
    let handle = make_box(&mut kernel);
    let result =
        execute_pattern_rectangular(&mut kernel, &handle, [1.0, 0.0, 0.0], 3, 4.2).unwrap();
    assert_eq!(result.outputs.len(), 3);
    assert_eq!(result.outputs[0], handle);
    let last = kernel.bounding_box(&result.outputs[2]).unwrap();
    assert_abs_diff_eq!(last.min[0], 8.4, epsilon = 1e-12);
    let third = result.with_role(|r| *r == Role::PatternInstance { index: 2 });
    assert_eq!(third.len(), 6);
}

#[test]
fn pattern_single_instance_is_seed_only() {
    let mut kernel = MockKernel::new();
    let handle = make_box(&mut kernel);
    let result =
        execute_pattern_rectangular(&mut kernel, &handle, [1.0, 0.0, 0.0], 1, 4.2).unwrap();
    assert_eq!(result.outputs, vec![handle]);
    assert_eq!(kernel.call_count(MockOp::PatternRectangular), 0);
}

#[test]
fn pattern_circular_full_turn() {
    let mut kernel = MockKernel::new();
    let notch = execute_extrude_profile(
        &mut kernel,
        &Profile::circle(Point2::new(0.0, -0.4375), 0.075),
        &SketchPlane::xz(),
        1.55,
    )
    .unwrap()
    .main()
    .unwrap();
    let result =
        execute_pattern_circular(&mut kernel, &notch, [0.0; 3], [0.0, 0.0, 1.0], 8, TAU).unwrap();
    assert_eq!(result.outputs.len(), 8);
    // the fifth instance sits half a turn around, on −Y
    let opposite = kernel.bounding_box(&result.outputs[4]).unwrap();
    assert_abs_diff_eq!(opposite.min[1], -1.55, epsilon = 1e-9);
}

#[test]
fn copy_translated_reports_moved_entities() {
    let mut kernel = MockKernel::new();
    let handle = make_box(&mut kernel);
    let result = execute_copy_translated(&mut kernel, &handle, [0.0, -3.6, 0.0]).unwrap();
    assert_eq!(kernel.solid_count(), 2);
    assert_eq!(result.provenance.modified.len(), 6 + 12 + 8);
    assert!(result
        .provenance
        .modified
        .iter()
        .all(|rw| rw.reason == RewriteReason::Moved));
}

#[test]
fn split_keeps_one_side() {
    let mut kernel = MockKernel::new();
    let handle = make_cylinder(&mut kernel, 1.0, 1.2);
    let result = execute_split(
        &mut kernel,
        &handle,
        [0.0, 0.0, 0.8],
        [0.0, 0.0, 1.0],
        SplitSide::Below,
    )
    .unwrap();
    assert_eq!(kernel.solid_count(), 1);
    let bbox = kernel.bounding_box(&result.main().unwrap()).unwrap();
    assert_abs_diff_eq!(bbox.max[2], 0.8, epsilon = 1e-12);
    assert_eq!(result.with_role(|r| *r == Role::SplitFace).len(), 1);
}

#[test]
fn split_missing_side_is_no_output() {
    let mut kernel = MockKernel::new();
    let handle = make_cylinder(&mut kernel, 1.0, 0.5);
    let err = execute_split(
        &mut kernel,
        &handle,
        [0.0, 0.0, 0.8],
        [0.0, 0.0, 1.0],
        SplitSide::Above,
    )
    .unwrap_err();
    assert!(matches!(err, OpError::NoOutput));
}

// ── Hole / Emboss Tests ────────────────────────────────────────────────────

#[test]
fn countersunk_hole_roles() {
    let mut kernel = MockKernel::new();
    let handle = make_cylinder(&mut kernel, 1.5, 0.4);
    let hole = HoleSpec {
        position: [0.0, 0.0, 0.4],
        direction: [0.0, 0.0, -1.0],
        diameter: 0.52,
        depth: 0.4,
        countersink: Some(Countersink {
            diameter: 1.0,
            angle_deg: 90.0,
        }),
    };
    let result = execute_hole(&mut kernel, &handle, &hole).unwrap();
    let roles = roles_of(&result);
    assert!(roles.contains(&Role::HoleWall));
    assert!(roles.contains(&Role::CountersinkFace));
}

#[test]
fn hole_countersink_narrower_than_hole_rejected() {
    let mut kernel = MockKernel::new();
    let handle = make_cylinder(&mut kernel, 1.5, 0.4);
    let hole = HoleSpec {
        position: [0.0, 0.0, 0.4],
        direction: [0.0, 0.0, -1.0],
        diameter: 0.52,
        depth: 0.4,
        countersink: Some(Countersink {
            diameter: 0.5,
            angle_deg: 90.0,
        }),
    };
    let err = execute_hole(&mut kernel, &handle, &hole).unwrap_err();
    assert!(matches!(err, OpError::InvalidParameter { .. }));
    assert_eq!(kernel.call_count(MockOp::Hole), 0);
}

#[test]
fn emboss_adds_glyph_faces() {
    let mut kernel = MockKernel::new();
    let handle = make_box(&mut kernel);
    let result = execute_emboss(
        &mut kernel,
        &handle,
        "L 084.00 mm",
        &SketchPlane::xy().offset(5.0),
        [0.2, 0.2],
        0.3,
        0.02,
    )
    .unwrap();
    let glyph_faces = result
        .provenance
        .created
        .iter()
        .filter(|e| e.kind == TopoKind::Face)
        .count();
    assert_eq!(glyph_faces, 9);
}

// ── Pipeline / Thread Tests ────────────────────────────────────────────────

#[test]
fn cosmetic_failure_returns_original_body() {
    let mut kernel = MockKernel::new();
    kernel.fail_on(MockOp::Fillet);
    let handle = make_box(&mut kernel);
    let edges = kernel.list_edges(&handle);
    let mut pipeline = Pipeline::new("Test");
    pipeline.enter(Stage::Finishing);
    let out = pipeline.cosmetic_fillet(
        &mut kernel,
        "edge fillet",
        "all edges",
        handle.clone(),
        &edges[..1],
        0.1,
    );
    assert_eq!(out.handle, handle);
    assert!(out.applied.is_none());
    assert_eq!(pipeline.warnings().len(), 1);
    assert!(pipeline.warnings()[0].contains("edge fillet"));
}

#[test]
fn cosmetic_fillet_empty_selection_is_noop() {
    let mut kernel = MockKernel::new();
    let handle = make_box(&mut kernel);
    let mut pipeline = Pipeline::new("Test");
    let out = pipeline.cosmetic_fillet(&mut kernel, "top fillet", "top face", handle.clone(), &[], 0.1);
    assert_eq!(out.handle, handle);
    assert_eq!(kernel.call_count(MockOp::Fillet), 0);
    assert_eq!(pipeline.warnings().len(), 1);
}

#[test]
fn external_thread_joins_and_fillets() {
    let mut kernel = MockKernel::new();
    let body = make_cylinder(&mut kernel, 1.7, 1.0);
    let thread = ThreadSpec {
        start_offset: 0.2,
        radius: 1.76,
        height: 0.6,
        pitch: 0.25,
        profile_radius: 0.06875,
    };
    let mut pipeline = Pipeline::new("MainScrew");
    let result = build_thread(
        &mut kernel,
        &mut pipeline,
        &body,
        &thread,
        ThreadKind::External,
        24,
    )
    .unwrap();

    assert_eq!(kernel.solid_count(), 1);
    assert!(kernel.bounding_box(&result).is_some());
    assert_eq!(kernel.call_count(MockOp::Fillet), 1);
    assert!(pipeline.warnings().is_empty(), "{:?}", pipeline.warnings());
}

#[test]
fn internal_thread_fillets_seams_then_laterals() {
    let mut kernel = MockKernel::new();
    let wall = make_cylinder(&mut kernel, 2.4, 0.8);
    let mut pipeline = Pipeline::new("WallSection");
    build_thread(
        &mut kernel,
        &mut pipeline,
        &wall,
        &wall_thread(),
        ThreadKind::Internal,
        24,
    )
    .unwrap();
    assert_eq!(kernel.call_count(MockOp::Fillet), 2);
    assert!(pipeline.warnings().is_empty(), "{:?}", pipeline.warnings());
    assert_eq!(kernel.solid_count(), 1);
}

#[test]
fn thread_fillet_failures_are_warnings() {
    let mut kernel = MockKernel::new();
    kernel.fail_on(MockOp::Fillet);
    let wall = make_cylinder(&mut kernel, 2.4, 0.8);
    let mut pipeline = Pipeline::new("WallSection");
    let body = build_thread(
        &mut kernel,
        &mut pipeline,
        &wall,
        &wall_thread(),
        ThreadKind::Internal,
        24,
    )
    .unwrap();
    assert!(kernel.bounding_box(&body).is_some());
    assert_eq!(pipeline.warnings().len(), 2);
}

#[test]
fn thread_sweep_failure_is_fatal() {
    let mut kernel = MockKernel::new();
    kernel.fail_on(MockOp::Sweep);
    let wall = make_cylinder(&mut kernel, 2.4, 0.8);
    let mut pipeline = Pipeline::new("WallSection");
    let err = build_thread(
        &mut kernel,
        &mut pipeline,
        &wall,
        &wall_thread(),
        ThreadKind::Internal,
        24,
    )
    .unwrap_err();
    assert_eq!(err.feature, "thread sweep");
    assert_eq!(err.component, "WallSection");
}

#[test]
fn thread_path_sample_count() {
    let mut kernel = MockKernel::new();
    let wall = make_cylinder(&mut kernel, 2.4, 0.8);
    let mut pipeline = Pipeline::new("WallSection");
    build_thread(
        &mut kernel,
        &mut pipeline,
        &wall,
        &wall_thread(),
        ThreadKind::External,
        24,
    )
    .unwrap();
    // 3.2 turns at 24 samples per turn; the path also carries the start point
    assert_eq!(kernel.call_count(MockOp::Spline), 1);
    assert_eq!(wall_thread().sample_count(24), 76);
}
