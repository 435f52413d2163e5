// Domain layer: drafts, records and the ports the upstream services sit behind.

pub mod catalog;
pub mod model;
pub mod ports;
