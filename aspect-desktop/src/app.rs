//! Desktop application using winit 0.30 `ApplicationHandler`.

use std::sync::{Arc, Mutex};

use anyhow::Result;
use aspect_core::{
    AspectRatioWatcher, ClassifierConfig, Dimensions, Orientation, ViewportEmitter,
    WatcherOptions,
};
use tokio::runtime::Runtime;
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoopProxy},
    window::{Window, WindowAttributes, WindowId},
};

use crate::DesktopConfig;

/// Notifications forwarded from the watcher task to the event loop.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewportEvent {
    /// A debounced recomputation finished.
    Settled,
    /// The breakpoint changed.
    Breakpoint(String),
    /// The orientation changed.
    Orientation(Orientation),
}

/// Desktop aspect-ratio application.
///
/// Window resizes go to a [`ViewportEmitter`]; the watcher runs on a
/// small Tokio runtime and posts [`ViewportEvent`]s back through an
/// [`EventLoopProxy`].
pub struct AspectDesktopApp {
    config: DesktopConfig,
    runtime: Runtime,
    emitter: ViewportEmitter,
    watcher: Option<AspectRatioWatcher>,
    window: Option<Arc<Window>>,
}

impl AspectDesktopApp {
    /// Create the application and start watching the initial window size.
    ///
    /// # Errors
    ///
    /// Returns an error if the Tokio runtime cannot be built.
    pub fn new(
        config: DesktopConfig,
        classifier: ClassifierConfig,
        proxy: EventLoopProxy<ViewportEvent>,
    ) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("aspect-watcher")
            .enable_time()
            .build()?;

        let emitter = ViewportEmitter::new(Dimensions::new(config.width, config.height));
        let options = Self::forwarding_options(classifier, proxy);

        let watcher = {
            let _guard = runtime.enter();
            AspectRatioWatcher::spawn(&emitter, options)
        };
        tracing::info!(
            "Initial viewport {}x{} is {}",
            config.width,
            config.height,
            watcher.breakpoint()
        );

        Ok(Self {
            config,
            runtime,
            emitter,
            watcher: Some(watcher),
            window: None,
        })
    }

    /// Callbacks that post every change back to the event loop.
    fn forwarding_options(
        classifier: ClassifierConfig,
        proxy: EventLoopProxy<ViewportEvent>,
    ) -> WatcherOptions {
        let proxy = Arc::new(Mutex::new(proxy));
        let send = move |event: ViewportEvent| {
            if let Ok(proxy) = proxy.lock() {
                if proxy.send_event(event).is_err() {
                    tracing::debug!("Event loop closed, dropping viewport event");
                }
            }
        };

        let on_ratio = send.clone();
        let on_orientation = send.clone();
        WatcherOptions::new(classifier)
            .on_ratio_change(move |_| on_ratio(ViewportEvent::Settled))
            .on_orientation_change(move |o| on_orientation(ViewportEvent::Orientation(o)))
            .on_breakpoint_change(move |name| send(ViewportEvent::Breakpoint(name.to_string())))
    }

    /// Handle window resize. The emitter drops zero-sized (minimised) sizes.
    fn handle_resize(&self, size: PhysicalSize<u32>) {
        self.emitter.resize(size.width, size.height);
    }

    /// Show the current classification in the window title.
    fn update_title(&self) {
        let (Some(window), Some(watcher)) = (&self.window, &self.watcher) else {
            return;
        };
        let state = watcher.state();
        window.set_title(&format!(
            "{} - {} {}x{} ({:.2}, {})",
            self.config.title,
            state.breakpoint,
            state.width,
            state.height,
            state.ratio,
            state.orientation
        ));
    }

    /// Stop the watcher and wait for its task to finish.
    fn stop_watcher(&mut self) {
        if let Some(watcher) = self.watcher.take() {
            self.runtime.block_on(watcher.shutdown());
            tracing::debug!("Viewport watcher shut down");
        }
    }
}

impl ApplicationHandler<ViewportEvent> for AspectDesktopApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        // Only create window if we don't have one
        if self.window.is_some() {
            tracing::debug!("Window already exists, skipping creation");
            return;
        }

        tracing::debug!(
            "Creating window with size {}x{}",
            self.config.width,
            self.config.height
        );

        let attrs = WindowAttributes::default()
            .with_title(&self.config.title)
            .with_inner_size(PhysicalSize::new(self.config.width, self.config.height));

        match event_loop.create_window(attrs) {
            Ok(window) => {
                let window = Arc::new(window);
                // The platform may not honour the requested size
                self.handle_resize(window.inner_size());
                self.window = Some(window);
                self.update_title();
            }
            Err(e) => {
                tracing::error!("Failed to create window: {e}");
                event_loop.exit();
            }
        }
    }

    fn user_event(&mut self, _event_loop: &ActiveEventLoop, event: ViewportEvent) {
        match event {
            ViewportEvent::Settled => self.update_title(),
            ViewportEvent::Breakpoint(name) => tracing::info!("Breakpoint is now {name}"),
            ViewportEvent::Orientation(orientation) => {
                tracing::info!("Orientation is now {orientation}");
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                tracing::info!("Close requested, exiting");
                self.stop_watcher();
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                tracing::trace!("Window resized to {}x{}", size.width, size.height);
                self.handle_resize(size);
            }
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                tracing::info!("Scale factor changed to {scale_factor}");
                let new_size = self.window.as_ref().map(|w| w.inner_size());
                if let Some(size) = new_size {
                    self.handle_resize(size);
                }
            }
            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.stop_watcher();
    }
}
