use crate::components::{Component, ComponentStore, ComponentTypeRegistry, Signature};
use crate::error::EcsResult;

/// A tuple of [Component] types, used to build a [Signature] without spelling out ids.
///
/// Implemented for `()` and for tuples of up to twelve components.
pub trait ComponentSet {
	/// Registers every member with `store` and returns the combined signature.
	fn register(store: &mut ComponentStore) -> EcsResult<Signature>;

	/// The combined signature, or `None` if a member was never registered.
	fn lookup(registry: &ComponentTypeRegistry) -> Option<Signature>;
}

impl ComponentSet for () {
	fn register(_: &mut ComponentStore) -> EcsResult<Signature> {
		Ok(Signature::EMPTY)
	}

	fn lookup(_: &ComponentTypeRegistry) -> Option<Signature> {
		Some(Signature::EMPTY)
	}
}

macro_rules! impl_component_set {
    ($($t: ident),*) => {
        impl<$($t: Component),*> ComponentSet for ($($t,)*) {
            fn register(store: &mut ComponentStore) -> EcsResult<Signature> {
                let mut signature = Signature::EMPTY;
                $(signature |= store.register::<$t>()?.tag();)*
                Ok(signature)
            }

            fn lookup(registry: &ComponentTypeRegistry) -> Option<Signature> {
                let mut signature = Signature::EMPTY;
                $(signature |= registry.lookup::<$t>()?.tag();)*
                Some(signature)
            }
        }
    };
}

impl_component_set!(T0);
impl_component_set!(T0, T1);
impl_component_set!(T0, T1, T2);
impl_component_set!(T0, T1, T2, T3);
impl_component_set!(T0, T1, T2, T3, T4);
impl_component_set!(T0, T1, T2, T3, T4, T5);
impl_component_set!(T0, T1, T2, T3, T4, T5, T6);
impl_component_set!(T0, T1, T2, T3, T4, T5, T6, T7);
impl_component_set!(T0, T1, T2, T3, T4, T5, T6, T7, T8);
impl_component_set!(T0, T1, T2, T3, T4, T5, T6, T7, T8, T9);
impl_component_set!(T0, T1, T2, T3, T4, T5, T6, T7, T8, T9, T10);
impl_component_set!(T0, T1, T2, T3, T4, T5, T6, T7, T8, T9, T10, T11);
