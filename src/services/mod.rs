pub mod centering;
pub mod click_dispatcher;
pub mod focus_tracker;
pub mod window_system;

pub use centering::WindowCentering;
pub use click_dispatcher::ClickDispatcher;
pub use focus_tracker::FocusTracker;
pub use window_system::{create_window_system, WindowSystem};
