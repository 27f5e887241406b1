//! Property-based tests for helix sampling and thread sweeps.

use proptest::prelude::*;

use nnws_geometry::{helix_path, ThreadSpec};
use nnws_kernel::{KernelIntrospect, MockKernel, MockOp};
use nnws_ops::*;
use nnws_types::{Point2, Profile, SketchPlane};

// ---------------------------------------------------------------------------
// Strategy helpers
// ---------------------------------------------------------------------------

/// An external thread over a 1.7 cm body, with random height, pitch and start.
fn arb_thread() -> impl Strategy<Value = ThreadSpec> {
    (0.05f64..0.5, 0.3f64..1.5, 0.15f64..0.4).prop_map(|(start_offset, height, pitch)| {
        ThreadSpec {
            start_offset,
            radius: 1.76,
            height,
            pitch,
            profile_radius: 0.06875,
        }
    })
}

fn arb_samples_per_turn() -> impl Strategy<Value = usize> {
    8usize..=48
}

// ---------------------------------------------------------------------------
// Helix sampling
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn path_has_one_point_per_sample_plus_start(
        thread in arb_thread(),
        spt in arb_samples_per_turn(),
    ) {
        let path = helix_path(&thread, spt);
        prop_assert_eq!(path.len(), thread.sample_count(spt) + 1);
        let turns = spt as f64 * thread.height / thread.pitch;
        prop_assert!((thread.sample_count(spt) as f64) <= turns + 1e-6);
        prop_assert!((thread.sample_count(spt) as f64) > turns - 1.0);
    }

    #[test]
    fn path_climbs_within_the_thread_height(
        thread in arb_thread(),
        spt in arb_samples_per_turn(),
    ) {
        let path = helix_path(&thread, spt);
        for pair in path.windows(2) {
            prop_assert!(pair[1].z > pair[0].z);
        }
        let top = path[path.len() - 1].z;
        prop_assert!(top <= thread.start_offset + thread.height + 1e-9);
        prop_assert!(top > thread.start_offset + thread.height - thread.pitch / spt as f64 - 1e-9);
    }
}

// ---------------------------------------------------------------------------
// Thread sweeps
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn swept_thread_reaches_the_last_helix_sample(
        thread in arb_thread(),
        spt in arb_samples_per_turn(),
    ) {
        let mut kernel = MockKernel::new();
        let body = execute_extrude_profile(
            &mut kernel,
            &Profile::circle(Point2::ORIGIN, 1.7),
            &SketchPlane::xy(),
            thread.start_offset,
        )
        .unwrap()
        .main()
        .unwrap();
        let mut pipeline = Pipeline::new("MainScrew");
        let result = build_thread(
            &mut kernel,
            &mut pipeline,
            &body,
            &thread,
            ThreadKind::External,
            spt,
        )
        .unwrap();

        prop_assert_eq!(kernel.call_count(MockOp::Spline), 1);
        prop_assert_eq!(kernel.call_count(MockOp::Sweep), 1);
        prop_assert_eq!(kernel.solid_count(), 1);

        let last = helix_path(&thread, spt).last().copied().unwrap();
        let bbox = kernel.bounding_box(&result).unwrap();
        prop_assert!(bbox.max[2] >= last.z - 1e-9);
        prop_assert!(bbox.max[2] <= last.z + thread.profile_radius + 1e-6);
    }
}
