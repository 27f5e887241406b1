use nnws_kernel::{Kernel, KernelIntrospect};

/// A kernel session that can both build and inspect solids.
///
/// Ops mutate through [`Kernel`] and read topology back through the introspection view
/// of the same object, so callers only pass one `&mut dyn KernelBundle`.
pub trait KernelBundle: Kernel + KernelIntrospect {
    fn as_introspect(&self) -> &dyn KernelIntrospect;
}

impl<K> KernelBundle for K
where
    K: Kernel + KernelIntrospect,
{
    fn as_introspect(&self) -> &dyn KernelIntrospect {
        self
    }
}
