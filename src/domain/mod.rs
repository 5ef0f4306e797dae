// Domain layer: price records and the ports the scraper drives (page, storage).

pub mod model;
pub mod ports;
