//! # Aspect Desktop
//!
//! Native desktop application that classifies its window by aspect ratio.

use aspect_desktop::{AspectDesktopApp, CliArgs, DesktopConfig, ViewportEvent};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use winit::event_loop::EventLoop;

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "aspect_desktop=debug,aspect_core=debug,winit=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Parse CLI arguments
    let args = CliArgs::parse();
    let print_config = args.print_config;
    let config = DesktopConfig::from(args);
    let classifier = config.classifier_config()?;

    if print_config {
        println!("{}", classifier.to_json()?);
        return Ok(());
    }

    tracing::info!("Starting Aspect Desktop");
    tracing::info!(
        "Window config: {}x{} \"{}\", {} breakpoints, debounce {:?}",
        config.width,
        config.height,
        config.title,
        classifier.breakpoints.len(),
        classifier.debounce()
    );

    tracing::debug!("Creating event loop");
    let event_loop = EventLoop::<ViewportEvent>::with_user_event().build()?;
    let mut app = AspectDesktopApp::new(config, classifier, event_loop.create_proxy())?;

    let result = event_loop.run_app(&mut app);
    tracing::debug!("run_app returned: {:?}", result);
    result?;

    tracing::info!("Aspect Desktop exited");
    Ok(())
}
