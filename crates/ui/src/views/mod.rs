mod render;
mod state;

pub use render::{render_help, render_summary, render_view};
pub use state::ViewError;
