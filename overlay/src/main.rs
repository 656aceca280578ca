use clap::Parser;
use crossbeam_channel::bounded;
use log::{LevelFilter, info, warn};
#[cfg(debug_assertions)]
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::{
    append::rolling_file::{
        RollingFileAppender,
        policy::compound::{
            CompoundPolicy, roll::fixed_window::FixedWindowRoller, trigger::size::SizeTrigger,
        },
    },
    config::{Appender, Config as LogConfig, Logger, Root},
    encode::pattern::PatternEncoder,
};
use macroquad::prelude::*;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

mod config;
mod context;
mod controller;
mod donations;
mod localization;
mod network;
mod pages;
mod settings;
mod sound;

use config::AppConfig;
use context::StageContext;
use controller::{PollingController, ViewState};
use donations::DonationProvider;
use network::{DonationReply, FetchCommand, SettingsPacket};
use pages::PageRenderer;
use settings::SettingsProvider;
use sound::{AlertSound, AlertSounder};

const APP_NAME: &str = "donation-overlay";

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    #[clap(long, short, action(clap::ArgAction::Count))]
    /// Increase the log verbosity
    verbose: u8,

    #[clap(long)]
    /// Directory within which log files will be placed, default is platform dependent
    log_location: Option<PathBuf>,

    #[clap(long, default_value = "5000000")]
    /// Max size in bytes that a log file is allowed to reach before being rolled over
    log_max_file_size: u64,

    #[clap(long, default_value = "3")]
    /// Number of archived logs to keep
    num_old_logs: u32,
}

#[macroquad::main(window_conf)]
async fn main() {
    init_logging();

    let config: AppConfig = match confy::load(APP_NAME, None) {
        Ok(config) => config,
        Err(e) => {
            warn!("Failed to read config file, overwriting with default. Error: {e}");
            let config = AppConfig::default();
            confy::store(APP_NAME, None, &config).unwrap();
            config
        }
    };

    let (settings_tx, settings_rx) = bounded::<SettingsPacket>(3);
    let (reply_tx, reply_rx) = bounded::<DonationReply>(3);
    let (fetch_tx, fetch_rx) = bounded::<FetchCommand>(3);

    let net_config = config.clone();
    let net_worker = std::thread::spawn(move || {
        network::networking_thread(settings_tx, reply_tx, fetch_rx, net_config);
    });

    let sounder: Arc<dyn AlertSound> = Arc::new(AlertSounder::new());
    let mut trigger = sound::trigger_for_mode(config.runtime_mode, sounder.clone());

    let mut controller = PollingController::new(
        SettingsProvider::new(settings_rx),
        DonationProvider::new(fetch_tx, reply_rx),
        Box::new(StageContext::new()),
        sounder,
        Duration::from_millis(config.polling_interval_ms),
    );

    let mut renderer = PageRenderer::new();
    info!(
        "Overlay initialized, polling donation data every {}ms",
        config.polling_interval_ms
    );

    loop {
        assert!(!net_worker.is_finished(), "Networking thread panicked!");

        controller.tick(Instant::now(), (screen_width(), screen_height()));
        trigger.poll();

        clear_background(BLACK);
        match controller.view() {
            ViewState::Error(message) => {
                let palette = pages::palette(controller.theme());
                renderer.container(&palette, controller.border());
                renderer.error_view(&message, &palette);
            }
            ViewState::Info => {
                let palette = pages::palette(controller.theme());
                renderer.container(&palette, controller.border());
                let notice = controller.fetch_notice();
                renderer.info_view(
                    controller.donation_data(),
                    controller
                        .settings_data()
                        .expect("info view requires settings data"),
                    notice.as_deref(),
                    &palette,
                );
            }
            ViewState::Blank => {}
        }
        next_frame().await;
    }
}

fn init_logging() {
    let args = Cli::parse();

    let log_level = match args.verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    let log_base_path = args.log_location.unwrap_or_else(|| {
        let mut path = directories::BaseDirs::new()
            .expect("Could not find a directory to store logs")
            .data_local_dir()
            .to_path_buf();
        path.push("donation-overlay-logs");
        path
    });
    let mut log_path = log_base_path.clone();
    let mut archived_log_path = log_base_path.clone();
    log_path.push(format!("{APP_NAME}-log.txt"));
    archived_log_path.push(format!("{APP_NAME}-log-{{}}.txt.gz"));

    #[cfg(debug_assertions)]
    println!("Log path: {}", log_path.display());

    // Only log to the console in debug mode
    #[cfg(all(debug_assertions, not(target_os = "windows")))]
    let console_target = Target::Stderr;
    #[cfg(all(debug_assertions, target_os = "windows"))]
    let console_target = Target::Stdout; // Windows apps don't get a stderr handle
    #[cfg(debug_assertions)]
    let console = ConsoleAppender::builder()
        .target(console_target)
        .encoder(Box::new(PatternEncoder::new("[{d} {h({l:5})} {M}] {m}{n}")))
        .build();

    // Setup the file log roller
    let roller = FixedWindowRoller::builder()
        .build(
            archived_log_path.as_os_str().to_str().unwrap(),
            args.num_old_logs,
        )
        .unwrap();
    let file_policy = CompoundPolicy::new(
        Box::new(SizeTrigger::new(args.log_max_file_size)),
        Box::new(roller),
    );
    let file_appender = RollingFileAppender::builder()
        .append(true)
        .encoder(Box::new(PatternEncoder::new("[{d} {l:5} {M}] {m}{n}")))
        .build(log_path, Box::new(file_policy))
        .unwrap();

    // Setup the logging from all locations to use `LevelFilter::Error`
    let root = Root::builder().appender("file_appender");
    #[cfg(debug_assertions)]
    let root = root.appender("console");
    let root = root.build(LevelFilter::Error);

    // Setup the top level logging config
    let log_config = LogConfig::builder()
        .appender(Appender::builder().build("file_appender", Box::new(file_appender)));

    #[cfg(debug_assertions)]
    let log_config = log_config.appender(Appender::builder().build("console", Box::new(console)));

    let log_config = log_config
        .logger(Logger::builder().build("overlay", log_level))
        .logger(Logger::builder().build("tracker_common", log_level))
        .build(root)
        .unwrap();

    log4rs::init_config(log_config).unwrap();
    log_panics::init();
}

fn window_conf() -> Conf {
    Conf {
        window_title: String::from("Donation Tracker Overlay"),
        window_width: 1280,
        window_height: 720,
        window_resizable: true,
        ..Default::default()
    }
}
