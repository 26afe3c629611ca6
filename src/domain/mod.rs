// Domain layer: booking models, static catalogs and ports (interfaces).

pub mod catalog;
pub mod model;
pub mod ports;
