// Domain layer: loan records and the port the scanner pulls pages through.

pub mod model;
pub mod ports;
