mod server;
mod week;

pub use server::serve;
pub use week::{print as print_week, render_text};
