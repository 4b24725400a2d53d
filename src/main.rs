#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]
use eframe::{NativeOptions, egui};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, filter::LevelFilter};

mod app;
mod canvas;
mod config;
mod error;
mod geometry;
mod image_io;
mod point_file;
mod resolver;
mod session;
mod startup;

/// 程序入口：先在窗口外完成地图/多边形选择，再进入 eframe/egui 编辑窗口
fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::builder().with_default_directive(LevelFilter::INFO.into()).from_env_lossy())
        .with_writer(std::io::stderr)
        .init();

    let config = config::Config::from_env();
    let startup = match startup::run(&config) {
        Ok(Some(s)) => s,
        Ok(None) => {
            info!("No Image Map Selected. Shutting down.");
            return Ok(());
        }
        Err(e) => {
            error!(error = %e, "failed to run center picker");
            return Ok(());
        }
    };
    info!(map = %startup.map_path.display(), "Map");

    let session = session::Session::new(startup.polygons, startup.map_folder);
    let image = startup.image;
    let native_options = NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([800.0, 600.0]).with_title("Center Picker"),
        ..Default::default()
    };
    eframe::run_native(
        "Center Picker",
        native_options,
        Box::new(move |cc| Box::new(app::CenterPickerApp::new(cc, session, image))),
    )
}
