use crate::error::Result;
use crate::events::{WindowHandle, WindowRect};
use crate::services::focus_tracker::FocusTracker;
use crate::services::window_system::WindowSystem;
use std::sync::Arc;
use tracing::{debug, info};

/// Новая позиция левого верхнего угла окна внутри рабочей области.
///
/// Размер окна не меняется; деление целочисленное (с отбрасыванием дробной
/// части). При `horizontal_only` вертикальная координата остаётся прежней.
pub fn centered_position(rect: WindowRect, work_area: WindowRect, horizontal_only: bool) -> (i32, i32) {
    let new_x = work_area.left + (work_area.width() - rect.width()) / 2;
    let new_y = if horizontal_only {
        rect.top
    } else {
        work_area.top + (work_area.height() - rect.height()) / 2
    };

    (new_x, new_y)
}

/// Центрирует окно, которое FocusTracker считает активным
pub struct WindowCentering {
    tracker: Arc<FocusTracker>,
    system: Arc<dyn WindowSystem>,
}

impl WindowCentering {
    pub fn new(tracker: Arc<FocusTracker>, system: Arc<dyn WindowSystem>) -> Self {
        Self { tracker, system }
    }

    /// Центрировать отслеживаемое окно. Ничего не делает, если окна нет или
    /// оно уже закрыто.
    pub fn center_active_window(&self, horizontal_only: bool) {
        let Some(handle) = self.tracker.current_foreground() else {
            debug!("Нет отслеживаемого окна, центрирование пропущено");
            return;
        };

        if let Err(e) = self.center_window(handle, horizontal_only) {
            debug!("Центрирование окна {} прервано: {}", handle, e);
        }
    }

    fn center_window(&self, handle: WindowHandle, horizontal_only: bool) -> Result<()> {
        if handle.is_null() {
            return Ok(());
        }

        let rect = self.system.window_rect(handle)?;
        let work_area = self.system.work_area(handle)?;
        let (new_x, new_y) = centered_position(rect, work_area, horizontal_only);

        self.system
            .move_window(handle, new_x, new_y, rect.width(), rect.height(), true)?;

        info!(
            "Окно {} \"{}\" перемещено: {} -> {} (только по горизонтали: {})",
            handle,
            self.tracker.last_window_title().unwrap_or_default(),
            rect,
            rect.moved_to(new_x, new_y),
            horizontal_only
        );

        if let Err(e) = self.system.set_foreground(handle) {
            debug!("Не удалось вернуть фокус окну {}: {}", handle, e);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::window_system::{DryRunWindowSystem, WindowOperation};

    const WORK_AREA: WindowRect = WindowRect {
        left: 0,
        top: 0,
        right: 1920,
        bottom: 1040,
    };

    #[test]
    fn test_horizontal_only_keeps_top() {
        let rect = WindowRect::new(100, 50, 500, 350);

        assert_eq!(centered_position(rect, WORK_AREA, true), (760, 50));
    }

    #[test]
    fn test_full_centering() {
        let rect = WindowRect::new(100, 50, 500, 350);

        assert_eq!(centered_position(rect, WORK_AREA, false), (760, 370));
    }

    #[test]
    fn test_offset_work_area_and_truncation() {
        // Вторая половина экрана, панель задач слева
        let work_area = WindowRect::new(1980, 10, 3841, 1081);
        let rect = WindowRect::new(0, 0, 300, 200);

        // (1861 - 300) / 2 = 780, (1071 - 200) / 2 = 435
        assert_eq!(centered_position(rect, work_area, false), (2760, 445));
    }

    #[test]
    fn test_window_larger_than_work_area() {
        let rect = WindowRect::new(0, 0, 2021, 1141);

        // (1920 - 2021) / 2 = -50, усечение к нулю
        assert_eq!(centered_position(rect, WORK_AREA, false), (-50, -50));
    }

    fn centering_with(handle: Option<WindowHandle>) -> (Arc<DryRunWindowSystem>, WindowCentering) {
        let system = Arc::new(DryRunWindowSystem::with_fake_desktop());
        let tracker = FocusTracker::start(system.clone());
        if let Some(handle) = handle {
            system.emit_foreground(handle);
        }
        let centering = WindowCentering::new(tracker, system.clone());
        (system, centering)
    }

    #[test]
    fn test_moves_and_focuses_tracked_window() {
        let terminal = WindowHandle::new(0x1001);
        let (system, centering) = centering_with(Some(terminal));

        centering.center_active_window(false);

        assert_eq!(
            system.operations(),
            vec![
                WindowOperation::Moved {
                    handle: terminal,
                    rect: WindowRect::new(760, 370, 1160, 670),
                    repaint: true,
                },
                WindowOperation::Foreground(terminal),
            ]
        );
    }

    #[test]
    fn test_no_tracked_window_is_noop() {
        let (system, centering) = centering_with(None);

        centering.center_active_window(true);
        centering.center_active_window(false);

        assert!(system.operations().is_empty());
    }

    #[test]
    fn test_closed_window_is_noop() {
        let terminal = WindowHandle::new(0x1001);
        let (system, centering) = centering_with(Some(terminal));
        system.remove_window(terminal);

        centering.center_active_window(false);

        assert!(system.operations().is_empty());
    }
}
