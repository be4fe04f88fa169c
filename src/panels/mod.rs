mod field;
mod tasks;
mod util;

pub use tasks::{TasksPanel, PANEL_HEIGHT};
pub use util::KeyHandleResult;
