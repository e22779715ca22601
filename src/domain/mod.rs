// Domain layer: data model and the ports the conversion core talks through.

pub mod model;
pub mod ports;
