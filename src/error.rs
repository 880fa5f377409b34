use thiserror::Error;

#[derive(Error, Debug)]
pub enum CenteringError {
    #[error("Ошибка запроса к окну: {0}")]
    WindowQuery(String),

    #[error("Ошибка операции над окном: {0}")]
    WindowAction(String),

    #[error("Ошибка иконки в трее: {0}")]
    Tray(#[from] tray_icon::Error),

    #[error("Ошибка меню трея: {0}")]
    Menu(#[from] tray_icon::menu::Error),

    #[error("Некорректная иконка: {0}")]
    Icon(#[from] tray_icon::BadIcon),

    #[error("Ошибка декодирования изображения: {0}")]
    Image(#[from] image::ImageError),

    #[error("Сервис недоступен: {0}")]
    ServiceUnavailable(String),
}

impl CenteringError {
    pub fn window_query<T>(msg: impl Into<String>) -> Result<T> {
        Err(CenteringError::WindowQuery(msg.into()))
    }
}

pub type Result<T> = std::result::Result<T, CenteringError>;

// Удобные макросы для создания ошибок
#[macro_export]
macro_rules! centering_error {
    (window_query, $($arg:tt)*) => {
        $crate::error::CenteringError::WindowQuery(format!($($arg)*))
    };
    (window_action, $($arg:tt)*) => {
        $crate::error::CenteringError::WindowAction(format!($($arg)*))
    };
    (service_unavailable, $($arg:tt)*) => {
        $crate::error::CenteringError::ServiceUnavailable(format!($($arg)*))
    };
}
