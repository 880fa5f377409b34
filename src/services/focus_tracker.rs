use crate::debug_if_enabled;
use crate::events::{WindowHandle, WindowInfo};
use crate::services::window_system::{ForegroundCallback, ForegroundSubscription, WindowSystem};
use parking_lot::Mutex;
use std::sync::{Arc, Weak};
use tracing::{debug, info, warn};

/// Класс окна панели задач Windows
pub const TASKBAR_CLASS_NAME: &str = "Shell_TrayWnd";

/// Отслеживает последнее активное окно верхнего уровня.
///
/// Единственное поле состояния изменяется только обработчиком уведомлений ОС
/// и читается диспетчером кликов. Окно панели задач никогда не становится
/// отслеживаемым: клик по иконке в трее сам активирует панель задач.
pub struct FocusTracker {
    system: Arc<dyn WindowSystem>,
    last_foreground: Mutex<Option<WindowHandle>>,
    subscription: Mutex<Option<Box<dyn ForegroundSubscription>>>,
}

impl FocusTracker {
    /// Создать трекер и подписаться на смену активного окна.
    ///
    /// Ошибка регистрации слушателя не фатальна: трекер продолжает работать
    /// без обновлений, и клики становятся no-op.
    pub fn start(system: Arc<dyn WindowSystem>) -> Arc<Self> {
        let tracker = Arc::new(Self {
            system: Arc::clone(&system),
            last_foreground: Mutex::new(None),
            subscription: Mutex::new(None),
        });

        let weak: Weak<Self> = Arc::downgrade(&tracker);
        let callback: ForegroundCallback = Arc::new(move |handle: WindowHandle| {
            if let Some(tracker) = weak.upgrade() {
                tracker.handle_foreground_change(handle);
            }
        });

        match system.subscribe_foreground(callback) {
            Ok(subscription) => {
                *tracker.subscription.lock() = Some(subscription);
                info!("FocusTracker запущен");
            }
            Err(e) => {
                warn!("Не удалось подписаться на смену активного окна: {}. Центрирование недоступно", e);
            }
        }

        tracker
    }

    /// Последнее активное окно или `None`, если подходящих смен ещё не было
    pub fn current_foreground(&self) -> Option<WindowHandle> {
        *self.last_foreground.lock()
    }

    /// Заголовок последнего активного окна (для логов)
    pub fn last_window_title(&self) -> Option<String> {
        let handle = self.current_foreground()?;
        self.system.window_title(handle)
    }

    /// Обработка уведомления о смене активного окна
    pub fn handle_foreground_change(&self, handle: WindowHandle) {
        if handle.is_null() {
            return;
        }

        // Ошибка запроса класса трактуется как «не панель задач»
        let class = match self.system.class_name(handle) {
            Ok(class) => class,
            Err(e) => {
                debug!("Не удалось получить класс окна {}: {}", handle, e);
                String::new()
            }
        };

        if class.eq_ignore_ascii_case(TASKBAR_CLASS_NAME) {
            debug_if_enabled!("Панель задач {} проигнорирована", handle);
            return;
        }

        *self.last_foreground.lock() = Some(handle);

        debug_if_enabled!(
            "Активное окно: {}",
            WindowInfo::new(handle)
                .with_class(class)
                .with_title(self.system.window_title(handle).unwrap_or_default())
        );
    }

    /// Снять подписку на уведомления. Повторный вызов ничего не делает.
    pub fn dispose(&self) {
        if let Some(mut subscription) = self.subscription.lock().take() {
            subscription.unsubscribe();
            info!("FocusTracker остановлен");
        }
    }
}

impl Drop for FocusTracker {
    fn drop(&mut self) {
        self.dispose();
    }
}
