//! Window implementations of [`WindowOutput`](crate::output::WindowOutput).
//!
//! Creating windows and running the event loop stay with the application;
//! these types only adapt an existing window (or none) to the output traits.

mod headless;
mod winit;

pub use headless::HeadlessWindow;
pub use self::winit::WinitWindow;
