use std::fmt;

/// Дескриптор окна верхнего уровня.
///
/// Непрозрачный идентификатор без владения: окно может быть уничтожено в любой
/// момент, поэтому перед использованием его валидность проверяется запросом
/// геометрии.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct WindowHandle(pub isize);

impl WindowHandle {
    pub const NULL: WindowHandle = WindowHandle(0);

    pub fn new(raw: isize) -> Self {
        Self(raw)
    }

    pub fn value(&self) -> isize {
        self.0
    }

    pub fn is_null(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for WindowHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:X}", self.0)
    }
}

/// Прямоугольник в экранных координатах
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct WindowRect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl WindowRect {
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }

    /// Тот же размер, новая позиция левого верхнего угла
    pub fn moved_to(&self, x: i32, y: i32) -> Self {
        Self::new(x, y, x + self.width(), y + self.height())
    }
}

impl fmt::Display for WindowRect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}) {}x{}",
            self.left,
            self.top,
            self.width(),
            self.height()
        )
    }
}

/// Информация об окне (только для логов)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowInfo {
    pub handle: WindowHandle,
    pub class: String,
    pub title: String,
}

impl WindowInfo {
    pub fn new(handle: WindowHandle) -> Self {
        Self {
            handle,
            class: String::new(),
            title: String::new(),
        }
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = class.into();
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }
}

impl fmt::Display for WindowInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.class.is_empty() {
            write!(f, "{} \"{}\"", self.handle, self.title)
        } else {
            write!(f, "{} \"{}\" ({})", self.handle, self.title, self.class)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_dimensions() {
        let rect = WindowRect::new(100, 50, 500, 350);

        assert_eq!(rect.width(), 400);
        assert_eq!(rect.height(), 300);
    }

    #[test]
    fn test_rect_moved_to_keeps_size() {
        let rect = WindowRect::new(100, 50, 500, 350).moved_to(760, 370);

        assert_eq!(rect, WindowRect::new(760, 370, 1160, 670));
        assert_eq!(rect.width(), 400);
        assert_eq!(rect.height(), 300);
    }

    #[test]
    fn test_null_handle() {
        assert!(WindowHandle::NULL.is_null());
        assert!(WindowHandle::default().is_null());
        assert!(!WindowHandle::new(0x1234).is_null());
    }

    #[test]
    fn test_window_info_display() {
        let info = WindowInfo::new(WindowHandle::new(0x2A))
            .with_class("Notepad")
            .with_title("Безымянный");

        assert_eq!(info.to_string(), "0x2A \"Безымянный\" (Notepad)");
    }
}
