pub mod reading;

pub use reading::{ReadingError, SensorReading};
