// Decision signal aggregation and scoring.
// Connector fan-out lives in engine; every rule consumers must share lives in composite.

pub mod composite;
pub mod digest;
pub mod engine;
pub mod fallback;
pub mod handlers;
pub mod trend;
