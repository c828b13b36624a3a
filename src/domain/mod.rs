// Domain layer: profile model, defaults and ports (interfaces) for external collaborators.

pub mod defaults;
pub mod model;
pub mod ports;
