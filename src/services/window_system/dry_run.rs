use crate::error::{CenteringError, Result};
use crate::events::{WindowHandle, WindowRect};
use crate::centering_error;
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::time::{interval, Duration};
use tracing::{debug, info};

use super::r#trait::{ForegroundCallback, ForegroundSubscription, WindowSystem};

type Subscribers = Arc<Mutex<Vec<(u64, ForegroundCallback)>>>;

/// Операция, которую dry-run бэкенд выполнил бы над реальным окном
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowOperation {
    Moved {
        handle: WindowHandle,
        rect: WindowRect,
        repaint: bool,
    },
    Foreground(WindowHandle),
}

#[derive(Debug, Clone)]
struct FakeWindow {
    class: String,
    title: String,
    rect: WindowRect,
}

/// Эмуляция рабочего стола: окна живут в памяти, перемещения только логируются
/// и записываются.
pub struct DryRunWindowSystem {
    work_area: WindowRect,
    windows: RwLock<HashMap<WindowHandle, FakeWindow>>,
    operations: Mutex<Vec<WindowOperation>>,
    subscribers: Subscribers,
    next_subscriber_id: AtomicU64,
}

impl DryRunWindowSystem {
    pub fn new(work_area: WindowRect) -> Self {
        Self {
            work_area,
            windows: RwLock::new(HashMap::new()),
            operations: Mutex::new(Vec::new()),
            subscribers: Arc::new(Mutex::new(Vec::new())),
            next_subscriber_id: AtomicU64::new(1),
        }
    }

    /// Рабочий стол 1920x1080 с панелью задач высотой 40 и несколькими окнами
    pub fn with_fake_desktop() -> Self {
        let system = Self::new(WindowRect::new(0, 0, 1920, 1040));
        system.add_window(
            WindowHandle::new(0x1001),
            "ConsoleWindowClass",
            "Terminal - dry_run",
            WindowRect::new(100, 50, 500, 350),
        );
        system.add_window(
            WindowHandle::new(0x1002),
            "Chrome_WidgetWin_1",
            "Browser - dry_run",
            WindowRect::new(0, 0, 1280, 800),
        );
        system.add_window(
            WindowHandle::new(0x1003),
            "Notepad",
            "Editor - dry_run",
            WindowRect::new(1200, 600, 1800, 1000),
        );
        system.add_window(
            WindowHandle::new(0x10FF),
            "Shell_TrayWnd",
            "",
            WindowRect::new(0, 1040, 1920, 1080),
        );
        system
    }

    pub fn add_window(
        &self,
        handle: WindowHandle,
        class: impl Into<String>,
        title: impl Into<String>,
        rect: WindowRect,
    ) {
        self.windows.write().insert(
            handle,
            FakeWindow {
                class: class.into(),
                title: title.into(),
                rect,
            },
        );
    }

    /// Эмулирует закрытие окна: дескриптор становится невалидным
    #[cfg(test)]
    pub fn remove_window(&self, handle: WindowHandle) {
        self.windows.write().remove(&handle);
    }

    /// Доставить уведомление о смене активного окна всем подписчикам
    pub fn emit_foreground(&self, handle: WindowHandle) {
        // Копия списка, чтобы не держать блокировку во время колбэков
        let callbacks: Vec<ForegroundCallback> = self
            .subscribers
            .lock()
            .iter()
            .map(|(_, callback)| Arc::clone(callback))
            .collect();

        for callback in callbacks {
            callback(handle);
        }
    }

    #[cfg(test)]
    pub fn operations(&self) -> Vec<WindowOperation> {
        self.operations.lock().clone()
    }

    #[cfg(test)]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.lock().len()
    }

    /// Периодически переключает «активное» окно, как это делал бы пользователь
    pub async fn run_focus_emulation(self: Arc<Self>) {
        info!("Dry-run режим - смена активного окна эмулируется каждые 10 секунд");

        let mut handles: Vec<WindowHandle> = self.windows.read().keys().copied().collect();
        handles.sort_by_key(|handle| handle.value());
        if handles.is_empty() {
            return;
        }

        let mut window_index = 0;
        let mut interval = interval(Duration::from_secs(10));

        loop {
            interval.tick().await;

            let handle = handles[window_index];
            info!(
                "Dry-run: эмулируем смену окна на: {} \"{}\"",
                handle,
                self.window_title(handle).unwrap_or_default()
            );
            self.emit_foreground(handle);

            window_index = (window_index + 1) % handles.len();
        }
    }

    fn with_window<T>(&self, handle: WindowHandle, f: impl FnOnce(&FakeWindow) -> T) -> Result<T> {
        match self.windows.read().get(&handle) {
            Some(window) => Ok(f(window)),
            None => CenteringError::window_query(format!("окно {} не существует", handle)),
        }
    }
}

impl WindowSystem for DryRunWindowSystem {
    fn class_name(&self, handle: WindowHandle) -> Result<String> {
        self.with_window(handle, |window| window.class.clone())
    }

    fn window_title(&self, handle: WindowHandle) -> Option<String> {
        self.with_window(handle, |window| window.title.clone())
            .ok()
            .filter(|title| !title.is_empty())
    }

    fn window_rect(&self, handle: WindowHandle) -> Result<WindowRect> {
        self.with_window(handle, |window| window.rect)
    }

    fn work_area(&self, handle: WindowHandle) -> Result<WindowRect> {
        self.with_window(handle, |_| self.work_area)
    }

    fn move_window(
        &self,
        handle: WindowHandle,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        repaint: bool,
    ) -> Result<()> {
        let rect = WindowRect::new(x, y, x + width, y + height);

        match self.windows.write().get_mut(&handle) {
            Some(window) => window.rect = rect,
            None => {
                return Err(centering_error!(
                    window_action,
                    "перемещение несуществующего окна {}",
                    handle
                ))
            }
        }

        info!("[DRY RUN] Перемещение окна {} в {}", handle, rect);
        self.operations.lock().push(WindowOperation::Moved {
            handle,
            rect,
            repaint,
        });
        Ok(())
    }

    fn set_foreground(&self, handle: WindowHandle) -> Result<()> {
        if !self.windows.read().contains_key(&handle) {
            return Err(centering_error!(
                window_action,
                "активация несуществующего окна {}",
                handle
            ));
        }

        info!("[DRY RUN] Перевод фокуса на окно {}", handle);
        self.operations.lock().push(WindowOperation::Foreground(handle));
        Ok(())
    }

    fn subscribe_foreground(
        &self,
        callback: ForegroundCallback,
    ) -> Result<Box<dyn ForegroundSubscription>> {
        let id = self.next_subscriber_id.fetch_add(1, Ordering::Relaxed);
        self.subscribers.lock().push((id, callback));
        debug!("Dry-run: зарегистрирован слушатель смены окна #{}", id);

        Ok(Box::new(DryRunSubscription {
            id,
            subscribers: Some(Arc::clone(&self.subscribers)),
        }))
    }
}

struct DryRunSubscription {
    id: u64,
    subscribers: Option<Subscribers>,
}

impl ForegroundSubscription for DryRunSubscription {
    fn unsubscribe(&mut self) {
        if let Some(subscribers) = self.subscribers.take() {
            subscribers.lock().retain(|(id, _)| *id != self.id);
            debug!("Dry-run: слушатель смены окна #{} удалён", self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn test_fake_desktop_queries() {
        let system = DryRunWindowSystem::with_fake_desktop();
        let terminal = WindowHandle::new(0x1001);

        assert_eq!(system.class_name(terminal).unwrap(), "ConsoleWindowClass");
        assert_eq!(system.window_rect(terminal).unwrap(), WindowRect::new(100, 50, 500, 350));
        assert_eq!(system.work_area(terminal).unwrap(), WindowRect::new(0, 0, 1920, 1040));
        assert_eq!(system.window_title(WindowHandle::new(0x10FF)), None);
    }

    #[test]
    fn test_unknown_window_fails() {
        let system = DryRunWindowSystem::with_fake_desktop();
        let missing = WindowHandle::new(0xDEAD);

        assert!(system.class_name(missing).is_err());
        assert!(system.window_rect(missing).is_err());
        assert!(system.move_window(missing, 0, 0, 10, 10, true).is_err());
        assert!(system.set_foreground(missing).is_err());
        assert!(system.operations().is_empty());
    }

    #[test]
    fn test_move_updates_geometry_and_records() {
        let system = DryRunWindowSystem::with_fake_desktop();
        let terminal = WindowHandle::new(0x1001);

        system.move_window(terminal, 760, 50, 400, 300, true).unwrap();

        let rect = WindowRect::new(760, 50, 1160, 350);
        assert_eq!(system.window_rect(terminal).unwrap(), rect);
        assert_eq!(
            system.operations(),
            vec![WindowOperation::Moved {
                handle: terminal,
                rect,
                repaint: true
            }]
        );
    }

    #[test]
    fn test_unsubscribe_is_idempotent() {
        let system = DryRunWindowSystem::with_fake_desktop();
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);

        let mut subscription = system
            .subscribe_foreground(Arc::new(move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
            }))
            .unwrap();

        system.emit_foreground(WindowHandle::new(0x1001));
        subscription.unsubscribe();
        subscription.unsubscribe();
        system.emit_foreground(WindowHandle::new(0x1002));

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(system.subscriber_count(), 0);
    }
}
