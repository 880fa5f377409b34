use crate::debug_if_enabled;
use crate::events::{ClickEvent, ClickKind};
use crate::services::centering::WindowCentering;
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{sleep, Duration, Instant};
use tracing::{debug, info};

/// Порог для определения двойного клика
pub const DOUBLE_CLICK_THRESHOLD: Duration = Duration::from_millis(500);

/// Состояние разбора кликов
#[derive(Default)]
struct ClickState {
    last_click: Option<Instant>,
    pending: Option<JoinHandle<()>>,
    // Каждое взведение и отмена таймера увеличивает поколение; таймер
    // устаревшего поколения ничего не делает.
    generation: u64,
}

impl ClickState {
    fn cancel_pending(&mut self) -> bool {
        self.generation = self.generation.wrapping_add(1);
        match self.pending.take() {
            Some(handle) => {
                handle.abort();
                true
            }
            None => false,
        }
    }
}

/// Превращает клики по иконке в трее в центрирование окна.
///
/// Одиночный клик центрирует окно по горизонтали, но только если за
/// `DOUBLE_CLICK_THRESHOLD` не пришёл двойной клик. Двойной клик отменяет
/// ожидание и центрирует по обеим осям.
pub struct ClickDispatcher {
    centering: Arc<WindowCentering>,
    state: Arc<Mutex<ClickState>>,
    runtime: Handle,
}

impl ClickDispatcher {
    pub fn new(centering: Arc<WindowCentering>, runtime: Handle) -> Self {
        info!(
            "Инициализация ClickDispatcher (порог двойного клика: {}мс)",
            DOUBLE_CLICK_THRESHOLD.as_millis()
        );

        Self {
            centering,
            state: Arc::new(Mutex::new(ClickState::default())),
            runtime,
        }
    }

    /// Обработка события мыши от иконки. Не левые кнопки игнорируются.
    pub fn handle_click(&self, event: ClickEvent) {
        if !event.is_left() {
            debug_if_enabled!("Игнорируем {}", event);
            return;
        }

        match event.kind {
            ClickKind::Click => self.on_left_click(),
            ClickKind::DoubleClick => self.on_left_double_click(),
        }
    }

    pub fn on_left_click(&self) {
        let now = Instant::now();
        let mut state = self.state.lock();

        // Повторный клик в пределах порога (например, отпускание после
        // двойного клика) подавляется без перезапуска таймера.
        if let Some(last) = state.last_click {
            if now.duration_since(last) < DOUBLE_CLICK_THRESHOLD {
                debug_if_enabled!("Клик через {:?} после предыдущего подавлен", now.duration_since(last));
                return;
            }
        }

        state.last_click = Some(now);
        state.cancel_pending();
        let generation = state.generation;

        let centering = Arc::clone(&self.centering);
        let shared_state = Arc::clone(&self.state);
        let handle = self.runtime.spawn(async move {
            sleep(DOUBLE_CLICK_THRESHOLD).await;
            Self::single_click_elapsed(shared_state, centering, generation);
        });
        state.pending = Some(handle);

        debug!("Ожидание двойного клика взведено");
    }

    pub fn on_left_double_click(&self) {
        if self.state.lock().cancel_pending() {
            debug!("Ожидание одиночного клика отменено двойным кликом");
        }

        self.centering.center_active_window(false);
    }

    /// Отменить ожидающий одиночный клик. Повторный вызов ничего не делает.
    pub fn dispose(&self) {
        if self.state.lock().cancel_pending() {
            info!("Ожидающее центрирование отменено при завершении");
        }
    }

    fn single_click_elapsed(
        state: Arc<Mutex<ClickState>>,
        centering: Arc<WindowCentering>,
        generation: u64,
    ) {
        {
            let mut state = state.lock();
            if state.generation != generation {
                return;
            }

            let elapsed = state
                .last_click
                .map(|last| last.elapsed() >= DOUBLE_CLICK_THRESHOLD)
                .unwrap_or(false);
            state.pending = None;
            if !elapsed {
                return;
            }
        }

        centering.center_active_window(true);
    }
}

impl Drop for ClickDispatcher {
    fn drop(&mut self) {
        self.dispose();
    }
}
