use std::fmt;

/// Кнопка мыши
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Тип клика по иконке
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClickKind {
    Click,
    DoubleClick,
}

/// Событие мыши на иконке в трее
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClickEvent {
    pub kind: ClickKind,
    pub button: MouseButton,
}

impl ClickEvent {
    pub fn new(kind: ClickKind, button: MouseButton) -> Self {
        Self { kind, button }
    }

    pub fn click(button: MouseButton) -> Self {
        Self::new(ClickKind::Click, button)
    }

    pub fn double_click(button: MouseButton) -> Self {
        Self::new(ClickKind::DoubleClick, button)
    }

    pub fn is_left(&self) -> bool {
        self.button == MouseButton::Left
    }
}

impl fmt::Display for ClickEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} {:?}", self.button, self.kind)
    }
}
