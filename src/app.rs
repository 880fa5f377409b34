use crate::services::{ClickDispatcher, FocusTracker, WindowCentering, WindowSystem};
use crate::tray::{self, Tray};
use std::sync::Arc;
use tao::event::{Event, StartCause};
use tao::event_loop::{ControlFlow, EventLoopBuilder};
use tokio::runtime::Runtime;
use tracing::{error, info};
use tray_icon::{menu::MenuEvent, TrayIconEvent};

#[derive(Debug)]
enum UserEvent {
    TrayIcon(TrayIconEvent),
    Menu(MenuEvent),
}

/// Корень композиции: владеет трекером, диспетчером кликов и иконкой в трее
pub struct TrayApplication {
    tracker: Arc<FocusTracker>,
    dispatcher: ClickDispatcher,
    tray: Option<Tray>,
    runtime: Option<Runtime>,
}

impl TrayApplication {
    /// Должен вызываться в потоке, который затем запустит цикл событий:
    /// хук смены окна доставляет уведомления через очередь сообщений этого потока.
    pub fn new(system: Arc<dyn WindowSystem>, runtime: Runtime) -> Self {
        let tracker = FocusTracker::start(Arc::clone(&system));
        let centering = Arc::new(WindowCentering::new(Arc::clone(&tracker), system));
        let dispatcher = ClickDispatcher::new(centering, runtime.handle().clone());

        Self {
            tracker,
            dispatcher,
            tray: None,
            runtime: Some(runtime),
        }
    }

    pub fn run(mut self) -> ! {
        let event_loop = EventLoopBuilder::<UserEvent>::with_user_event().build();

        let proxy = event_loop.create_proxy();
        TrayIconEvent::set_event_handler(Some(move |event| {
            let _ = proxy.send_event(UserEvent::TrayIcon(event));
        }));
        let proxy = event_loop.create_proxy();
        MenuEvent::set_event_handler(Some(move |event| {
            let _ = proxy.send_event(UserEvent::Menu(event));
        }));

        info!("Цикл событий запущен");

        event_loop.run(move |event, _, control_flow| {
            *control_flow = ControlFlow::Wait;

            match event {
                Event::NewEvents(StartCause::Init) => self.on_start(control_flow),
                Event::UserEvent(UserEvent::TrayIcon(event)) => {
                    if let Some(click) = tray::to_click_event(&event) {
                        self.dispatcher.handle_click(click);
                    }
                }
                Event::UserEvent(UserEvent::Menu(event)) => {
                    if self.tray.as_ref().is_some_and(|tray| tray.is_exit(&event)) {
                        info!("Выбран пункт меню Exit");
                        if let Some(tray) = &self.tray {
                            tray.hide();
                        }
                        *control_flow = ControlFlow::Exit;
                    }
                }
                Event::LoopDestroyed => self.shutdown(),
                _ => {}
            }
        })
    }

    fn on_start(&mut self, control_flow: &mut ControlFlow) {
        match Tray::build() {
            Ok(tray) => self.tray = Some(tray),
            Err(e) => {
                error!("Не удалось создать иконку в трее: {}", e);
                *control_flow = ControlFlow::Exit;
            }
        }
    }

    /// Освобождает хук и таймер ровно один раз
    fn shutdown(&mut self) {
        let Some(runtime) = self.runtime.take() else {
            return;
        };

        info!("Завершение работы...");
        self.dispatcher.dispose();
        self.tracker.dispose();
        self.tray = None;
        runtime.shutdown_background();
        info!("Centering Window завершил работу");
    }
}
