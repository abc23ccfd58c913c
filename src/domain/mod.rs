// Domain layer: request/record models and the ports the supervisor depends on.

pub mod model;
pub mod ports;
