//! Falling Shapes headless driver
//!
//! Runs a session in virtual time at 60 frames per second and logs the
//! counters once per simulated second.
//!
//! Usage: `falling-shapes [CONFIG.json] [SECONDS]`

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use falling_shapes::counters::{CounterBoard, CounterKind};
    use falling_shapes::renderer::{pointer_click, scene_vertices};
    use falling_shapes::{Control, Result, Session, SessionConfig};
    use glam::Vec2;

    const FPS: u64 = 60;
    const DEFAULT_SECONDS: u64 = 30;

    pub fn run() -> Result<()> {
        let mut args = std::env::args().skip(1);
        let config = match args.next() {
            Some(path) => SessionConfig::load(path)?,
            None => SessionConfig::default(),
        };
        let seconds = args
            .next()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_SECONDS);

        let center = Vec2::new(config.viewport.width / 2.0, config.viewport.height / 2.0);
        let mut session = Session::new(config, CounterBoard::new());

        for frame in 1..=seconds * FPS {
            // Whole milliseconds elapsed since the previous frame
            let elapsed = frame * 1000 / FPS - (frame - 1) * 1000 / FPS;
            session.advance(elapsed);
            session.frame();

            if frame % FPS != 0 {
                continue;
            }
            let second = frame / FPS;

            // Scripted input: poke the center every few seconds, ramp up spawning once
            if second % 3 == 0 {
                let click = pointer_click(session.state(), center);
                let outcome = session.click(click);
                log::info!("t={second}s click at center -> {outcome:?}");
            }
            if second == 5 {
                session.press(Control::SpawnRateUp);
                session.press(Control::GravityUp);
            }
            log_counters(second, session.publisher());
        }

        session.stop();
        let vertices = scene_vertices(session.state());
        log::info!(
            "Finished after {} frames; {} live shapes ({} vertices)",
            session.frame_count(),
            session.state().len(),
            vertices.len()
        );
        println!(
            "shapes={} gravity={} spawn_rate={} area={}",
            session.state().len(),
            session.state().gravity(),
            session.state().spawn_rate(),
            session.state().occupied_area()
        );
        Ok(())
    }

    fn log_counters(second: u64, board: &CounterBoard) {
        let value = |kind| board.get(kind).unwrap_or_default();
        log::info!(
            "t={}s shapes={} gravity={} spawn_rate={} area={}",
            second,
            value(CounterKind::ShapeCount),
            value(CounterKind::Gravity),
            value(CounterKind::SpawnRate),
            value(CounterKind::Area)
        );
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Falling Shapes (native) starting...");

    if let Err(e) = native::run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Web hosts drive `Session` directly; nothing to do here
}
