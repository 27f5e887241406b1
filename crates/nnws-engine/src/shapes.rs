//! Primitive solids and boolean shorthands used by every generator.

use nnws_kernel::KernelSolidHandle;
use nnws_ops::{
    execute_boolean, execute_extrude_profile, execute_revolve_profile, BooleanKind, KernelBundle,
    OpError, OpResult,
};
use nnws_types::{Point2, Point3, Profile, SketchPlane, Vec3};

/// Upright cylinder whose bottom face is centered on `base`.
pub fn cylinder_z(
    kb: &mut dyn KernelBundle,
    base: Point3,
    radius: f64,
    height: f64,
) -> Result<OpResult, OpError> {
    execute_extrude_profile(
        kb,
        &Profile::circle(Point2::new(base.x, base.y), radius),
        &SketchPlane::xy().offset(base.z),
        height,
    )
}

/// Cylinder running along +Y from `base`.
pub fn cylinder_y(
    kb: &mut dyn KernelBundle,
    base: Point3,
    radius: f64,
    length: f64,
) -> Result<OpResult, OpError> {
    // sketch y on XZ is world −Z
    execute_extrude_profile(
        kb,
        &Profile::circle(Point2::new(base.x, -base.z), radius),
        &SketchPlane::xz().offset(base.y),
        length,
    )
}

/// Cylinder running along +X from `base`.
pub fn cylinder_x(
    kb: &mut dyn KernelBundle,
    base: Point3,
    radius: f64,
    length: f64,
) -> Result<OpResult, OpError> {
    execute_extrude_profile(
        kb,
        &Profile::circle(Point2::new(base.y, base.z), radius),
        &SketchPlane::yz().offset(base.x),
        length,
    )
}

/// Ring around the Z axis standing on z = 0.
pub fn ring_z(
    kb: &mut dyn KernelBundle,
    inner: f64,
    outer: f64,
    height: f64,
) -> Result<OpResult, OpError> {
    let section = Profile::rect(Point2::new(inner, -height), Point2::new(outer, 0.0));
    execute_revolve_profile(
        kb,
        &section,
        &SketchPlane::xz(),
        [0.0; 3],
        Vec3::Z.to_array(),
    )
}

/// Axis-aligned box between two corners.
pub fn block(kb: &mut dyn KernelBundle, min: Point3, max: Point3) -> Result<OpResult, OpError> {
    execute_extrude_profile(
        kb,
        &Profile::rect(Point2::new(min.x, min.y), Point2::new(max.x, max.y)),
        &SketchPlane::xy().offset(min.z),
        max.z - min.z,
    )
}

pub fn union(
    kb: &mut dyn KernelBundle,
    target: &KernelSolidHandle,
    tool: &KernelSolidHandle,
) -> Result<KernelSolidHandle, OpError> {
    execute_boolean(kb, target, tool, BooleanKind::Union, &[])?.main()
}

pub fn subtract(
    kb: &mut dyn KernelBundle,
    target: &KernelSolidHandle,
    tool: &KernelSolidHandle,
) -> Result<KernelSolidHandle, OpError> {
    execute_boolean(kb, target, tool, BooleanKind::Subtract, &[])?.main()
}

/// Join every tool into `target`, in order.
pub fn union_all(
    kb: &mut dyn KernelBundle,
    target: &KernelSolidHandle,
    tools: &[KernelSolidHandle],
) -> Result<KernelSolidHandle, OpError> {
    tools
        .iter()
        .try_fold(target.clone(), |body, tool| union(kb, &body, tool))
}

/// Cut every tool from `target`, in order.
pub fn subtract_all(
    kb: &mut dyn KernelBundle,
    target: &KernelSolidHandle,
    tools: &[KernelSolidHandle],
) -> Result<KernelSolidHandle, OpError> {
    tools
        .iter()
        .try_fold(target.clone(), |body, tool| subtract(kb, &body, tool))
}
