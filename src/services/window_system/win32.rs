use crate::centering_error;
use crate::error::Result;
use crate::events::{WindowHandle, WindowRect};
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::ffi::OsString;
use std::os::windows::ffi::OsStringExt;
use std::sync::Arc;
use tracing::{debug, info, warn};
use windows_sys::Win32::{
    Foundation::{HWND, RECT},
    Graphics::Gdi::{GetMonitorInfoW, MonitorFromWindow, MONITORINFO, MONITOR_DEFAULTTONEAREST},
    UI::{
        Accessibility::{SetWinEventHook, UnhookWinEvent, HWINEVENTHOOK},
        WindowsAndMessaging::{
            GetClassNameW, GetWindowRect, GetWindowTextW, MoveWindow, SetForegroundWindow,
        },
    },
};

use super::r#trait::{ForegroundCallback, ForegroundSubscription, WindowSystem};

// Константы WinAPI
const EVENT_SYSTEM_FOREGROUND: u32 = 0x0003;
const WINEVENT_OUTOFCONTEXT: u32 = 0x0000;
const MAX_CLASS_NAME_LENGTH: usize = 256;
const MAX_TITLE_LENGTH: usize = 256;

// WinEventProc не принимает пользовательских данных, поэтому колбэки
// находятся по дескриптору хука.
static HOOK_CALLBACKS: Lazy<Mutex<HashMap<isize, ForegroundCallback>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

fn to_hwnd(handle: WindowHandle) -> HWND {
    handle.value() as HWND
}

fn from_rect(rect: &RECT) -> WindowRect {
    WindowRect::new(rect.left, rect.top, rect.right, rect.bottom)
}

fn read_wide(buffer: &[u16], len: i32) -> String {
    let len = (len.max(0) as usize).min(buffer.len());
    OsString::from_wide(&buffer[..len])
        .to_string_lossy()
        .into_owned()
}

/// Реальное управление окнами через user32
pub struct Win32WindowSystem;

impl Win32WindowSystem {
    pub fn new() -> Self {
        info!("Инициализация Win32WindowSystem");
        Self
    }
}

impl WindowSystem for Win32WindowSystem {
    fn class_name(&self, handle: WindowHandle) -> Result<String> {
        let mut buffer = [0u16; MAX_CLASS_NAME_LENGTH];
        let len = unsafe {
            GetClassNameW(to_hwnd(handle), buffer.as_mut_ptr(), buffer.len() as i32)
        };

        if len == 0 {
            return Err(centering_error!(
                window_query,
                "GetClassNameW не вернул имя класса для {}",
                handle
            ));
        }

        Ok(read_wide(&buffer, len))
    }

    fn window_title(&self, handle: WindowHandle) -> Option<String> {
        let mut buffer = [0u16; MAX_TITLE_LENGTH];
        let len = unsafe {
            GetWindowTextW(to_hwnd(handle), buffer.as_mut_ptr(), buffer.len() as i32)
        };

        if len > 0 {
            Some(read_wide(&buffer, len))
        } else {
            None
        }
    }

    fn window_rect(&self, handle: WindowHandle) -> Result<WindowRect> {
        let mut rect: RECT = unsafe { std::mem::zeroed() };
        if unsafe { GetWindowRect(to_hwnd(handle), &mut rect) } == 0 {
            return Err(centering_error!(
                window_query,
                "GetWindowRect завершился ошибкой для {}",
                handle
            ));
        }

        Ok(from_rect(&rect))
    }

    fn work_area(&self, handle: WindowHandle) -> Result<WindowRect> {
        let monitor = unsafe { MonitorFromWindow(to_hwnd(handle), MONITOR_DEFAULTTONEAREST) };
        if monitor.is_null() {
            return Err(centering_error!(
                window_query,
                "не найден монитор для окна {}",
                handle
            ));
        }

        let mut info: MONITORINFO = unsafe { std::mem::zeroed() };
        info.cbSize = std::mem::size_of::<MONITORINFO>() as u32;

        if unsafe { GetMonitorInfoW(monitor, &mut info) } == 0 {
            return Err(centering_error!(
                window_query,
                "GetMonitorInfoW завершился ошибкой для окна {}",
                handle
            ));
        }

        Ok(from_rect(&info.rcWork))
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
        let ok = unsafe { MoveWindow(to_hwnd(handle), x, y, width, height, repaint as i32) };
        if ok == 0 {
            return Err(centering_error!(
                window_action,
                "MoveWindow завершился ошибкой для {}",
                handle
            ));
        }

        Ok(())
    }

    fn set_foreground(&self, handle: WindowHandle) -> Result<()> {
        if unsafe { SetForegroundWindow(to_hwnd(handle)) } == 0 {
            return Err(centering_error!(
                window_action,
                "SetForegroundWindow отклонён для {}",
                handle
            ));
        }

        Ok(())
    }

    fn subscribe_foreground(
        &self,
        callback: ForegroundCallback,
    ) -> Result<Box<dyn ForegroundSubscription>> {
        // Out-of-context хук доставляет события через очередь сообщений
        // потока, который его установил.
        let hook = unsafe {
            SetWinEventHook(
                EVENT_SYSTEM_FOREGROUND,
                EVENT_SYSTEM_FOREGROUND,
                std::ptr::null_mut(),
                Some(win_event_proc),
                0,
                0,
                WINEVENT_OUTOFCONTEXT,
            )
        };

        if hook.is_null() {
            return Err(centering_error!(
                service_unavailable,
                "SetWinEventHook не установил хук EVENT_SYSTEM_FOREGROUND"
            ));
        }

        let key = hook as isize;
        HOOK_CALLBACKS.lock().insert(key, callback);
        info!("Хук смены активного окна установлен");

        Ok(Box::new(WinEventSubscription { hook: key }))
    }
}

struct WinEventSubscription {
    hook: isize,
}

impl ForegroundSubscription for WinEventSubscription {
    fn unsubscribe(&mut self) {
        if self.hook == 0 {
            return;
        }

        HOOK_CALLBACKS.lock().remove(&self.hook);
        if unsafe { UnhookWinEvent(self.hook as HWINEVENTHOOK) } == 0 {
            warn!("UnhookWinEvent завершился ошибкой");
        } else {
            info!("Хук смены активного окна снят");
        }
        self.hook = 0;
    }
}

impl Drop for WinEventSubscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

unsafe extern "system" fn win_event_proc(
    hook: HWINEVENTHOOK,
    _event: u32,
    hwnd: HWND,
    _id_object: i32,
    _id_child: i32,
    _id_event_thread: u32,
    _dwms_event_time: u32,
) {
    let callback = HOOK_CALLBACKS.lock().get(&(hook as isize)).cloned();

    match callback {
        Some(callback) => callback(WindowHandle::new(hwnd as isize)),
        None => debug!("Событие от неизвестного хука проигнорировано"),
    }
}
