use crate::error::Result;
use crate::events::{ClickEvent, MouseButton};
use tracing::{info, warn};
use tray_icon::{
    menu::{Menu, MenuEvent, MenuId, MenuItem},
    Icon, MouseButtonState, TrayIcon, TrayIconBuilder, TrayIconEvent,
};

/// Подсказка при наведении на иконку
pub const TOOLTIP: &str = "Centering Window";

static TRAY_ICON_PNG: &[u8] =
    include_bytes!(concat!(env!("CARGO_MANIFEST_DIR"), "/assets/tray-icon.png"));

fn tray_icon_image() -> Result<Icon> {
    let rgba = image::load_from_memory(TRAY_ICON_PNG)?.to_rgba8();
    let (width, height) = rgba.dimensions();
    Ok(Icon::from_rgba(rgba.into_raw(), width, height)?)
}

/// Иконка в трее с единственным пунктом меню «Exit»
pub struct Tray {
    icon: TrayIcon,
    exit_id: MenuId,
}

impl Tray {
    pub fn build() -> Result<Self> {
        let menu = Menu::new();
        let exit = MenuItem::new("Exit", true, None);
        menu.append(&exit)?;

        let mut builder = TrayIconBuilder::new()
            .with_menu(Box::new(menu))
            .with_menu_on_left_click(false)
            .with_tooltip(TOOLTIP);

        match tray_icon_image() {
            Ok(icon) => builder = builder.with_icon(icon),
            Err(e) => warn!("Не удалось загрузить иконку трея, используется системная: {}", e),
        }

        let icon = builder.build()?;
        info!("Иконка в трее создана");

        Ok(Self {
            icon,
            exit_id: exit.id().clone(),
        })
    }

    pub fn is_exit(&self, event: &MenuEvent) -> bool {
        event.id == self.exit_id
    }

    pub fn hide(&self) {
        if let Err(e) = self.icon.set_visible(false) {
            warn!("Не удалось скрыть иконку трея: {}", e);
        }
    }
}

fn map_button(button: tray_icon::MouseButton) -> MouseButton {
    match button {
        tray_icon::MouseButton::Left => MouseButton::Left,
        tray_icon::MouseButton::Right => MouseButton::Right,
        tray_icon::MouseButton::Middle => MouseButton::Middle,
    }
}

/// Событие трея в событие клика. Одиночный клик учитывается по отпусканию кнопки.
pub fn to_click_event(event: &TrayIconEvent) -> Option<ClickEvent> {
    match event {
        TrayIconEvent::Click {
            button,
            button_state: MouseButtonState::Up,
            ..
        } => Some(ClickEvent::click(map_button(*button))),
        TrayIconEvent::DoubleClick { button, .. } => {
            Some(ClickEvent::double_click(map_button(*button)))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tray_icon::dpi::PhysicalPosition;
    use tray_icon::{Rect, TrayIconId};

    #[test]
    fn test_embedded_icon_decodes() {
        let rgba = image::load_from_memory(TRAY_ICON_PNG).unwrap().to_rgba8();

        assert_eq!(rgba.dimensions(), (32, 32));
    }

    #[test]
    fn test_button_mapping() {
        assert_eq!(map_button(tray_icon::MouseButton::Left), MouseButton::Left);
        assert_eq!(map_button(tray_icon::MouseButton::Right), MouseButton::Right);
        assert_eq!(map_button(tray_icon::MouseButton::Middle), MouseButton::Middle);
    }

    fn click(button: tray_icon::MouseButton, button_state: MouseButtonState) -> TrayIconEvent {
        TrayIconEvent::Click {
            id: TrayIconId::new("t"),
            position: PhysicalPosition::new(0.0, 0.0),
            rect: Rect::default(),
            button,
            button_state,
        }
    }

    #[test]
    fn test_click_is_forwarded_on_release_only() {
        let press = click(tray_icon::MouseButton::Left, MouseButtonState::Down);
        let release = click(tray_icon::MouseButton::Left, MouseButtonState::Up);

        assert_eq!(to_click_event(&press), None);
        assert_eq!(
            to_click_event(&release),
            Some(ClickEvent::click(MouseButton::Left))
        );
        assert_eq!(
            to_click_event(&click(tray_icon::MouseButton::Right, MouseButtonState::Up)),
            Some(ClickEvent::click(MouseButton::Right))
        );
    }

    #[test]
    fn test_double_click_is_forwarded() {
        let event = TrayIconEvent::DoubleClick {
            id: TrayIconId::new("t"),
            position: PhysicalPosition::new(0.0, 0.0),
            rect: Rect::default(),
            button: tray_icon::MouseButton::Left,
        };

        assert_eq!(
            to_click_event(&event),
            Some(ClickEvent::double_click(MouseButton::Left))
        );
    }

    #[test]
    fn test_hover_events_are_ignored() {
        let enter = TrayIconEvent::Enter {
            id: TrayIconId::new("t"),
            position: PhysicalPosition::new(0.0, 0.0),
            rect: Rect::default(),
        };
        let moved = TrayIconEvent::Move {
            id: TrayIconId::new("t"),
            position: PhysicalPosition::new(10.0, 10.0),
            rect: Rect::default(),
        };

        assert_eq!(to_click_event(&enter), None);
        assert_eq!(to_click_event(&moved), None);
    }
}
