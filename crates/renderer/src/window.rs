use std::sync::Arc;
use std::time::Instant;

use anyhow::{anyhow, Result};
use gallery::Gallery;
use tracing::{error, info, warn};
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::{Window, WindowBuilder};

use crate::backend::{FrameError, GpuBackend, SurfaceSize};
use crate::gpu::GpuState;
use crate::input::{action_for_key, InputAction, SwipeTracker};
use crate::session::{ActivationError, Navigation, Session};
use crate::types::RendererConfig;

/// Opens the gallery window and runs until it is closed.
pub(crate) fn run_gallery_window(config: RendererConfig, gallery: Gallery) -> Result<()> {
    let event_loop =
        EventLoop::new().map_err(|err| anyhow!("failed to create event loop: {err}"))?;
    let window = WindowBuilder::new()
        .with_title(config.title.as_str())
        .with_inner_size(PhysicalSize::new(
            config.surface_size.0,
            config.surface_size.1,
        ))
        .build(&event_loop)
        .map_err(|err| anyhow!("failed to create gallery window: {err}"))?;
    let window = Arc::new(window);

    let gpu = GpuState::new(window.clone(), config.gpu_power)?;
    info!(
        width = gpu.size().width,
        height = gpu.size().height,
        entries = gallery.len(),
        "gallery window ready"
    );
    let mut session = Session::new(gpu, gallery, Instant::now());
    start_session(&mut session, config.start_index);
    window.set_title(&window_title(&config.title, &session));

    let mut swipe = SwipeTracker::new();
    let mut failure: Option<FrameError> = None;

    let run_result = event_loop.run(|event, elwt| match event {
        Event::WindowEvent { window_id, event } if window_id == window.id() => match event {
            WindowEvent::CloseRequested | WindowEvent::Destroyed => elwt.exit(),
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state != ElementState::Pressed || event.repeat {
                    return;
                }
                match action_for_key(&event.logical_key) {
                    Some(InputAction::Navigate(navigation)) => {
                        navigate(&mut session, &window, &config.title, navigation);
                    }
                    Some(InputAction::Exit) => elwt.exit(),
                    None => {}
                }
            }
            WindowEvent::Touch(touch) => {
                if let Some(navigation) = swipe.handle(touch.id, touch.phase, touch.location.x) {
                    navigate(&mut session, &window, &config.title, navigation);
                }
            }
            WindowEvent::RedrawRequested => {
                let size = window.inner_size();
                let frame = session.render_frame(
                    SurfaceSize::new(size.width, size.height),
                    Instant::now(),
                );
                if let Err(err) = frame {
                    error!(error = %err, "stopping gallery");
                    failure = Some(err);
                    elwt.exit();
                }
            }
            _ => {}
        },
        Event::AboutToWait => {
            window.request_redraw();
            elwt.set_control_flow(ControlFlow::Wait);
        }
        Event::LoopExiting => session.shutdown(),
        _ => {}
    });

    run_result.map_err(|err| anyhow!("window event loop error: {err}"))?;
    match failure {
        Some(err) => Err(anyhow!(err)),
        None => Ok(()),
    }
}

fn start_session<B: GpuBackend>(session: &mut Session<B>, start_index: Option<usize>) {
    let now = Instant::now();
    let started = match start_index {
        Some(index) => match session.jump_to(index, now) {
            Err(ActivationError::Navigation(err)) => {
                warn!(error = %err, "ignoring --start; showing the first entry");
                session.start(now)
            }
            other => other,
        },
        None => session.start(now),
    };
    log_activation(started);
}

fn navigate<B: GpuBackend>(
    session: &mut Session<B>,
    window: &Window,
    title: &str,
    navigation: Navigation,
) {
    log_activation(session.navigate(navigation, Instant::now()));
    window.set_title(&window_title(title, session));
}

// Build failures are already reported through the diagnostics sink.
fn log_activation(result: Result<(), ActivationError>) {
    if let Err(err @ ActivationError::Navigation(_)) = result {
        warn!(error = %err, "navigation failed");
    }
}

/// `"<prefix> - <name> (<position>/<count>)"`, flagged when the selected entry
/// failed to build.
fn window_title<B: GpuBackend>(prefix: &str, session: &Session<B>) -> String {
    let gallery = session.gallery();
    let Some((index, entry)) = gallery
        .cursor()
        .and_then(|index| gallery.get(index).map(|entry| (index, entry)))
    else {
        return format!("{prefix} (empty)");
    };

    let mut title = format!(
        "{prefix} - {} ({}/{})",
        entry.name(),
        index + 1,
        gallery.len()
    );
    if session.active_entry_index() != Some(index) {
        title.push_str(" [build failed]");
    }
    title
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingBackend;

    fn session() -> Session<RecordingBackend> {
        let mut gallery = Gallery::new();
        gallery.register("Rings", "void main() { o = vec4(t); }", None);
        gallery.register("Broken", "void main() {", None);
        gallery.register("Plasma", "void mainImage(out vec4 c, in vec2 p) { c = vec4(iTime); }", None);
        Session::new(RecordingBackend::new(), gallery, Instant::now())
    }

    #[test]
    fn title_shows_position_and_failure() {
        let mut session = session();
        start_session(&mut session, None);
        assert_eq!(window_title("Gallery", &session), "Gallery - Rings (1/3)");

        let _ = session.next(Instant::now());
        assert_eq!(
            window_title("Gallery", &session),
            "Gallery - Broken (2/3) [build failed]"
        );

        session.next(Instant::now()).unwrap();
        assert_eq!(window_title("Gallery", &session), "Gallery - Plasma (3/3)");
    }

    #[test]
    fn invalid_start_index_falls_back_to_first_entry() {
        let mut session = session();
        start_session(&mut session, Some(9));
        assert_eq!(session.active_entry_index(), Some(0));

        let mut session = self::session();
        start_session(&mut session, Some(2));
        assert_eq!(session.active_entry_index(), Some(2));
    }

    #[test]
    fn empty_gallery_title() {
        let session = Session::new(RecordingBackend::new(), Gallery::new(), Instant::now());
        assert_eq!(window_title("Gallery", &session), "Gallery (empty)");
    }
}
