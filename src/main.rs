#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

use eframe::egui;
use netdash::app::NetDash;
use netdash::logic::{CheckTrigger, checker_task};
use netdash::model::Config;
use std::process::ExitCode;
use std::sync::{Arc, mpsc};
use tr::tr;
#[cfg(not(windows))]
use tr::tr_init;

/// No usable configuration directory, so settings can be neither loaded nor
/// persisted.
const EXIT_CONFIG_UNUSABLE: u8 = 2;
/// The rendering surface could not be created.
const EXIT_GUI_UNAVAILABLE: u8 = 3;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("netdash=info")),
        )
        .init();

    #[cfg(not(windows))]
    tr_init!("./locales");

    let Some(config_dir) = dirs::config_dir() else {
        tracing::error!("no user configuration directory available");
        return ExitCode::from(EXIT_CONFIG_UNUSABLE);
    };
    let config_path = config_dir.join("netdash").join("config.toml");

    let (config, startup_errors) = Config::load(&config_path);
    let config = Arc::new(config);
    for error in &startup_errors {
        tracing::warn!("configuration: {error}");
    }

    let trigger = Arc::new(CheckTrigger::new());
    let (update_tx, update_rx) = mpsc::channel();

    let hosts = config.hosts().to_vec();
    {
        let config = config.clone();
        let trigger = trigger.clone();
        // Daemon-style worker: abandoned at process exit, never joined
        std::thread::spawn(move || {
            tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
                .expect("failed to build tokio runtime")
                .block_on(checker_task(hosts, config, trigger, update_tx));
        });
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(tr!("NetDash"))
            .with_inner_size([640.0, 420.0])
            .with_resizable(true),
        renderer: eframe::Renderer::Wgpu,
        ..Default::default()
    };

    match eframe::run_native(
        "netdash",
        options,
        Box::new(move |cc| {
            Ok(Box::new(NetDash::new(
                cc,
                config,
                trigger,
                update_rx,
                startup_errors,
            )))
        }),
    ) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("could not start GUI: {err}");
            ExitCode::from(EXIT_GUI_UNAVAILABLE)
        }
    }
}
