//! Stock transformation units.
//!
//! These are the "external collaborators" the runtime crate (`textpipe-core`)
//! never references directly: each one is a stateless [`Transform`] registered
//! under a name so [`register_all`] can wire every stock stage into a fresh
//! [`StageRegistry`]. The core never special-cases any of these names — a
//! pipeline built from `log log log` behaves exactly like one built from
//! `upper rot flip`.

mod expand;
mod flip;
mod log;
mod rot;
mod throttle;
mod upper;

pub use expand::Expand;
pub use flip::Flip;
pub use log::Log;
pub use rot::Rot;
pub use throttle::Throttle;
pub use upper::Upper;

use textpipe_core::{StageRegistry, Transform, TransformFactory};

/// Registers every stock stage under its canonical name. Each registration
/// resolves to a fresh `Box<dyn Transform>` per call, so the same name can
/// appear any number of times in one pipeline without sharing state.
pub fn register_all(registry: &mut StageRegistry) {
    registry.register("upper", factory(|| Upper));
    registry.register("rot", factory(|| Rot));
    registry.register("flip", factory(|| Flip));
    registry.register("expand", factory(|| Expand));
    registry.register("throttle", factory(|| Throttle::default()));
    registry.register("log", factory(|| Log));
}

fn factory<T, F>(make: F) -> TransformFactory
where
    T: Transform + 'static,
    F: Fn() -> T + Send + Sync + 'static,
{
    std::sync::Arc::new(move || Box::new(make()) as Box<dyn Transform>)
}
