mod error;
mod help;
mod util;

pub use error::render_error_overlay;
pub use help::render_help_overlay;
pub use util::centered_rect;
