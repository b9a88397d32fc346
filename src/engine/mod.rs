pub mod selection;
pub mod session;
pub mod timer;

pub use selection::{Selection, SelectionEngine, pick_excluding};
pub use session::{DisplayExit, DisplayScope, DisplaySession, SessionController, SessionEffect, SessionState};
pub use timer::RepeatingTimer;
