//! Agent8 entry point
//!
//! There is no window backend in this crate: the native binary plays a
//! headless session with a simple autopilot and logs what happened.
//!
//! Settings path: first argument, else `AGENT8_SETTINGS`, else `agent8.json`.
//! Session length: `AGENT8_DEMO_TICKS` (default one minute of frames).

use std::process::ExitCode;

use agent8::Settings;
use agent8::consts::DISPLAY_SIZE;
use agent8::platform::{Action, Headless};
use agent8::sim::{EntityKind, GameRng, PlayerState, TickOptions, World, tick};

const DEFAULT_DEMO_TICKS: u64 = 60 * 60;

fn main() -> ExitCode {
    env_logger::init();

    let settings_path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("AGENT8_SETTINGS").ok())
        .unwrap_or_else(|| "agent8.json".to_owned());
    let settings = Settings::load(&settings_path);

    let demo_ticks = std::env::var("AGENT8_DEMO_TICKS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_DEMO_TICKS);

    let rng = match settings.seed {
        Some(seed) => GameRng::new(seed),
        None => GameRng::from_entropy(),
    };
    log::info!("Agent8 (headless) starting, seed {}", rng.seed());

    let mut host = Headless::with_settings(DISPLAY_SIZE, &settings);
    let mut world = World::start(rng, &mut host);
    let options = TickOptions {
        show_hud: settings.show_hud,
    };

    let mut best = 0;
    let mut deaths = 0;
    for frame in 0..demo_ticks {
        host.begin_frame();
        autopilot(&world, &mut host, frame);

        let was_dead = world.state.player == PlayerState::Dead;
        match tick(&mut world, &mut host, options) {
            Ok(true) => break,
            Ok(false) => {}
            Err(e) => {
                log::error!("Simulation aborted at tick {frame}: {e}");
                return ExitCode::FAILURE;
            }
        }
        host.end_frame();

        if !was_dead && world.state.player == PlayerState::Dead {
            deaths += 1;
        }
        best = best.max(world.state.score);
    }

    log::info!(
        "Session over after {} ticks: score {}, best {}, deaths {}, {} entities spawned",
        world.state.time_ticks,
        world.state.score,
        best,
        deaths,
        host.renderer.created
    );
    ExitCode::SUCCESS
}

/// Steer toward the nearest coin, fire every half second, restart when dead
fn autopilot(world: &World<GameRng>, host: &mut Headless, frame: u64) {
    host.release_all();

    if world.state.player == PlayerState::Dead {
        if frame % 60 == 0 {
            host.tap(Action::Fire);
        }
        return;
    }

    let Ok(player) = world.store.get_by_type(EntityKind::Player) else {
        return;
    };
    let target_y = world
        .store
        .iter()
        .filter(|e| e.kind == EntityKind::Coin)
        .min_by(|a, b| a.pos.x.total_cmp(&b.pos.x))
        .map(|coin| coin.pos.y)
        .unwrap_or(world.display.y / 2.0);

    if player.pos.y > target_y + 20.0 {
        host.hold(Action::Up, true);
    } else if player.pos.y < target_y - 20.0 {
        host.hold(Action::Down, true);
    }
    if frame % 30 == 0 {
        host.tap(Action::Fire);
    }
}
