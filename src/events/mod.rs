pub mod click;
pub mod window;

pub use click::{ClickEvent, ClickKind, MouseButton};
pub use window::{WindowHandle, WindowInfo, WindowRect};
