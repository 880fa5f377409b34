use crate::error::Result;
use crate::events::{WindowHandle, WindowRect};
use std::sync::Arc;
use tokio::runtime::Handle;

/// Callback invoked for every "foreground window changed" notification
pub type ForegroundCallback = Arc<dyn Fn(WindowHandle) + Send + Sync>;

/// Registration token for a foreground-change listener
pub trait ForegroundSubscription: Send {
    /// Unregister the listener. Calling it more than once is a no-op.
    fn unsubscribe(&mut self);
}

/// Window management operations of the operating system
pub trait WindowSystem: Send + Sync {
    /// Class name of the window, read into a bounded buffer
    fn class_name(&self, handle: WindowHandle) -> Result<String>;

    /// Window title, `None` if it is empty or cannot be read
    fn window_title(&self, handle: WindowHandle) -> Option<String>;

    /// Bounding rectangle of the window in screen coordinates
    fn window_rect(&self, handle: WindowHandle) -> Result<WindowRect>;

    /// Work area of the monitor that contains the window
    fn work_area(&self, handle: WindowHandle) -> Result<WindowRect>;

    fn move_window(
        &self,
        handle: WindowHandle,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        repaint: bool,
    ) -> Result<()>;

    fn set_foreground(&self, handle: WindowHandle) -> Result<()>;

    /// Register a system-wide asynchronous foreground-change listener
    fn subscribe_foreground(
        &self,
        callback: ForegroundCallback,
    ) -> Result<Box<dyn ForegroundSubscription>>;
}

/// Factory function to create an appropriate window system based on the dry_run flag.
///
/// In dry-run mode the fake desktop also starts emulating focus changes on `runtime`.
pub fn create_window_system(dry_run: bool, runtime: &Handle) -> Result<Arc<dyn WindowSystem>> {
    if dry_run {
        let system = Arc::new(super::dry_run::DryRunWindowSystem::with_fake_desktop());
        runtime.spawn(Arc::clone(&system).run_focus_emulation());
        return Ok(system);
    }

    #[cfg(windows)]
    {
        Ok(Arc::new(super::win32::Win32WindowSystem::new()))
    }

    #[cfg(not(windows))]
    {
        Err(crate::centering_error!(
            service_unavailable,
            "управление окнами поддерживается только в Windows, используйте --dry-run"
        ))
    }
}
