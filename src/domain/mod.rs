// Domain layer: plain data types and ports. No I/O here.

pub mod model;
pub mod ports;
