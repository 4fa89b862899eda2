// Domain layer: sensor model and the ports the presentation side plugs into.

pub mod model;
pub mod ports;
