// filepath: src/main.rs

use std::path::PathBuf;
use std::time::Duration;

use calloop::EventLoop;
use calloop_wayland_source::WaylandSource;
use clap::Parser;
use hypr_clock::app::{parse_layer, AppData};
use hypr_clock::config::{ClockConfig, OffsetSetting, WidgetKind};
use hypr_clock::time::SystemClock;
use hypr_clock::widget::{build_widget, PixelSize};
use log::{info, warn};
use smithay_client_toolkit::{
    compositor::CompositorState,
    output::OutputState,
    registry::RegistryState,
    shell::wlr_layer::LayerShell,
    shm::{slot::SlotPool, Shm},
};
use wayland_client::{globals::registry_queue_init, Connection};

/// Analog clock on a Wayland layer surface
#[derive(Debug, Parser)]
#[command(name = "hypr-clock", version)]
struct Args {
    /// Config file to read instead of the default location
    #[arg(long)]
    config: Option<PathBuf>,

    /// Minutes east of UTC; anything but a whole number means local time
    #[arg(long, allow_hyphen_values = true)]
    offset: Option<String>,

    /// Widget to show
    #[arg(long, value_enum)]
    widget: Option<WidgetKind>,
}

impl Args {
    fn apply(self, config: &mut ClockConfig) {
        if let Some(offset) = self.offset {
            config.offset = Some(OffsetSetting::Text(offset));
        }
        if let Some(widget) = self.widget {
            config.widget = widget;
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    info!("Starting hypr-clock");

    let mut args = Args::parse();
    let mut config = match args.config.take() {
        Some(path) => ClockConfig::load_from_path(&path)?,
        None => ClockConfig::load_from_file().unwrap_or_else(|e| {
            warn!("Using default configuration: {}", e);
            ClockConfig::default()
        }),
    };
    args.apply(&mut config);
    info!("Configuration loaded");

    let conn = Connection::connect_to_env()?;
    let (globals, mut event_queue) = registry_queue_init(&conn)?;
    let qh = event_queue.handle();

    let compositor = CompositorState::bind(&globals, &qh)?;
    let layer_shell = LayerShell::bind(&globals, &qh)?;
    let shm = Shm::bind(&globals, &qh)?;

    let pool_size = PixelSize::new(config.width, config.height).byte_len();
    let pool = SlotPool::new(pool_size.max(4), &shm)?;

    let surface = compositor.create_surface(&qh);
    let layer_surface = layer_shell.create_layer_surface(
        &qh,
        surface,
        parse_layer(&config.layer),
        Some("hypr-clock"),
        None,
    );

    let widget = build_widget(&config, Box::new(SystemClock));

    let mut app_data = AppData::new(
        RegistryState::new(&globals),
        OutputState::new(&globals, &qh),
        shm,
        layer_surface,
        pool,
        &config,
        widget,
    );

    info!("Performing initial round-trip");
    event_queue.roundtrip(&mut app_data)?;

    let mut event_loop: EventLoop<AppData> = EventLoop::try_new()?;
    WaylandSource::new(conn.clone(), event_queue)
        .insert(event_loop.handle())
        .map_err(|e| e.error)?;

    info!("Entering event loop");
    while !app_data.should_exit() {
        event_loop.dispatch(None::<Duration>, &mut app_data)?;
    }

    info!("Exiting");
    Ok(())
}
