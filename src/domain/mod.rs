// Domain layer: trip model and ports. No HTTP or filesystem code here.

pub mod model;
pub mod ports;
