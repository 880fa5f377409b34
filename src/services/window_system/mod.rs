//! WindowSystem service: responsibility and boundaries
//!
//! This module and its submodules wrap ONLY the operating system's window
//! management: geometry and class-name queries, moving and focusing windows,
//! and the foreground-change notification. They MUST NOT decide which window
//! to move or when; that belongs to FocusTracker and ClickDispatcher.

mod dry_run;
mod r#trait;
#[cfg(windows)]
mod win32;

pub use self::r#trait::{
    create_window_system, ForegroundCallback, ForegroundSubscription, WindowSystem,
};

#[cfg(test)]
pub use self::dry_run::{DryRunWindowSystem, WindowOperation};
