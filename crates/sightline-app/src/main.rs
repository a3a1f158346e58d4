mod app_state;
mod cli;

use std::process::ExitCode;

use sightline_shell::{LaunchMode, LAUNCH_MODE_ENV};
use tracing_subscriber::EnvFilter;
use winit::event_loop::EventLoop;

use app_state::init;

fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let path = sightline_platform::crash_report::write_crash_report(info);

        eprintln!("\n--- Sightline crashed ---");
        if let Some(p) = &path {
            eprintln!("Crash report written to: {}", p.display());
        }
        eprintln!("-------------------------\n");

        default_hook(info);
    }));
}

fn init_logging(directive: &str) {
    let filter = EnvFilter::from_default_env();
    let filter = match directive.parse() {
        Ok(d) => filter.add_directive(d),
        Err(e) => {
            eprintln!("ignoring log directive '{directive}': {e}");
            filter.add_directive(tracing_subscriber::filter::LevelFilter::INFO.into())
        }
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn main() -> ExitCode {
    install_panic_hook();

    let args = cli::parse();

    // Config is read before logging so its level can apply; a bad file is
    // reported once the subscriber is up.
    let loaded = sightline_config::load_config_from(args.config.as_deref());
    let configured_level = loaded
        .as_ref()
        .map(|c| c.logging.level)
        .unwrap_or_default();
    init_logging(&init::log_directive(
        args.log_level.as_deref(),
        configured_level,
    ));

    tracing::info!("Sightline v{} starting...", env!("CARGO_PKG_VERSION"));

    let config = match loaded {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "config rejected");
            return ExitCode::FAILURE;
        }
    };
    if let Some(ref path) = args.config {
        tracing::info!(path = %path.display(), "using config override");
    }

    let env_value = std::env::var(LAUNCH_MODE_ENV).ok();
    let mode = match LaunchMode::from_env(
        env_value.as_deref(),
        args.port,
        init::resolve_content_root(&config.content.root),
    ) {
        Ok(mode) => mode,
        Err(e) => {
            tracing::error!(error = %e, "cannot determine launch mode");
            return ExitCode::FAILURE;
        }
    };
    tracing::info!(%mode, surfaces = config.surfaces.len(), "launch mode selected");

    let profile = init::data_profile(&mode);
    if let Err(e) = sightline_platform::ensure_dirs(profile) {
        tracing::warn!(error = %e, "failed to create directories");
    }

    let runtime = match init::build_runtime() {
        Ok(runtime) => runtime,
        Err(e) => {
            tracing::error!(error = %e, "failed to create tokio runtime");
            return ExitCode::FAILURE;
        }
    };

    let webviews = init::build_webviews(&mode, &config);
    let controller = init::build_controller(mode, &config, init::placement_store(profile));
    let mut app =
        app_state::SightlineApp::new(controller, webviews, config.surfaces.clone(), runtime);

    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(e) => {
            tracing::error!(error = %e, "failed to create event loop");
            return ExitCode::FAILURE;
        }
    };

    tracing::info!("Entering event loop");
    if let Err(e) = event_loop.run_app(&mut app) {
        tracing::error!(error = %e, "event loop error");
        return ExitCode::FAILURE;
    }
    tracing::info!("Shutdown complete");
    app.exit_code()
}
