#![cfg_attr(all(windows, not(debug_assertions)), windows_subsystem = "windows")]

use anyhow::Result;
use clap::Parser;
use tracing::{info, warn};
mod app;
mod config;
mod error;
mod events;
mod services;
mod tray;
mod utils;

use app::TrayApplication;
use config::Config;
use services::create_window_system;

#[derive(Parser, Debug)]
#[command(name = "centering-window")]
#[command(about = "Центрирование активного окна по клику на иконку в трее")]
struct Args {
    /// Путь к файлу конфигурации
    #[arg(short, long, default_value = "centering-window.toml")]
    config: String,

    /// Режим сухого запуска (эмуляция окон без реальных перемещений)
    #[arg(long)]
    dry_run: bool,

    /// Уровень логирования (переопределяет конфигурацию)
    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Загрузка конфигурации
    let config = Config::load(&args.config)?;
    if let Some(level) = &args.log_level {
        config::validate_level(level)?;
    }

    // Инициализация системы логирования
    init_tracing(&config, args.log_level.as_deref())?;

    info!("Запуск Centering Window v{}", env!("CARGO_PKG_VERSION"));
    info!("Конфигурация загружена из: {}", args.config);

    if args.dry_run {
        warn!("Режим сухого запуска - реальные окна не перемещаются");
    }

    // Рантайм для таймера одиночного клика; главный поток занят циклом событий UI
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .thread_name("centering-timer")
        .enable_time()
        .build()?;

    let window_system = create_window_system(args.dry_run, runtime.handle())?;
    let app = TrayApplication::new(window_system, runtime);

    info!("Все компоненты инициализированы");

    app.run()
}

fn init_tracing(config: &Config, level_override: Option<&str>) -> Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.filter_directives(level_override)))?;

    let registry = tracing_subscriber::registry().with(filter);

    match config.logging.format.as_str() {
        "pretty" => registry.with(tracing_subscriber::fmt::layer().pretty()).init(),
        _ => registry.with(tracing_subscriber::fmt::layer().compact()).init(),
    }

    Ok(())
}
