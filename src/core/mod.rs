pub mod clock;
pub mod timer;

pub use clock::{Clock, Tick};
pub use timer::Throttled;
