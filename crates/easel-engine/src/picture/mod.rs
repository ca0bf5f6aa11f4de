//! Picture resource model.
//!
//! A decoded image lives in exactly one [`RasterBuffer`], shared by `Rc`.
//! [`Picture`]s are cheap views onto it (sub-rect + rotation); slicing never
//! copies pixels. The buffer is released when its last picture is dropped.

mod buffer;
mod view;

pub use buffer::{BufferId, Mutability, RasterBuffer};
pub use view::Picture;
