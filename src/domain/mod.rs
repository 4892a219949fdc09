// Domain layer: request-scoped models and the catalog port.

pub mod model;
pub mod ports;
