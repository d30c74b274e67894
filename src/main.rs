//! Artillery Duel headless runner
//!
//! Plays a scripted volley through the simulation and logs what happens.
//! Usage: `artillery-duel [terrain|gravity|<settings.json>]`

use std::process::ExitCode;

use artillery_duel::sim::{GameEvent, GamePhase, GameState, Team, TickInput, tick};
use artillery_duel::{Settings, Variant};
use glam::Vec2;

/// Pointer offsets (rightward/up for the left team) cycled through turn by turn
const VOLLEY: [(f32, f32); 6] = [
    (120.0, -160.0),
    (150.0, -150.0),
    (180.0, -120.0),
    (100.0, -200.0),
    (200.0, -90.0),
    (140.0, -170.0),
];

const MAX_TURNS: usize = 40;
/// Give up on a shot that never resolves (e.g. trapped in orbit)
const MAX_FLIGHT_TICKS: usize = 60 * 60;

fn load_settings() -> Result<Settings, artillery_duel::SettingsError> {
    match std::env::args().nth(1) {
        None => Ok(Settings::default()),
        Some(arg) => match Variant::from_str(&arg) {
            Some(variant) => Ok(Settings::for_variant(variant)),
            None => Settings::load_from(arg),
        },
    }
}

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Artillery Duel (headless) starting...");

    let settings = match load_settings() {
        Ok(settings) => settings,
        Err(e) => {
            log::error!("Failed to load settings: {e}");
            return ExitCode::FAILURE;
        }
    };
    let mut state = match GameState::new(settings) {
        Ok(state) => state,
        Err(e) => {
            log::error!("Failed to start session: {e}");
            return ExitCode::FAILURE;
        }
    };
    log::info!(
        "{} arena, seed {}",
        state.settings.variant.as_str(),
        state.settings.seed()
    );

    for turn in 0..MAX_TURNS {
        let GamePhase::Aiming { player } = state.phase else {
            break;
        };
        let shooter = &state.players[player];
        let (dx, dy) = VOLLEY[turn % VOLLEY.len()];
        let dir = if shooter.team == Team::Left { 1.0 } else { -1.0 };
        let pointer = shooter.position + Vec2::new(dx * dir, dy);

        if let Ok(path) = state.predicted_path(player) {
            log::debug!("Turn {turn}: preview {:?}", path.collect::<Vec<_>>());
        }

        let fire = TickInput {
            pointer: Some(pointer),
            fire: true,
            ..Default::default()
        };
        let mut view = tick(&mut state, &fire);
        let mut flight_ticks = 0;
        while matches!(view.phase, GamePhase::InFlight { .. }) && flight_ticks < MAX_FLIGHT_TICKS {
            view = tick(&mut state, &TickInput::default());
            flight_ticks += 1;

            for event in &view.events {
                match event {
                    GameEvent::Explosion { position, .. } if view.play_explosion_sound => {
                        log::info!("*boom* at ({:.0}, {:.0})", position.x, position.y)
                    }
                    other => log::info!("Turn {turn} (player {player}): {other:?}"),
                }
            }
        }

        if flight_ticks >= MAX_FLIGHT_TICKS {
            log::warn!("Shot by player {player} never resolved, stopping");
            break;
        }
    }

    match state.phase {
        GamePhase::GameOver { winner } => log::info!("Winner: {winner:?}"),
        _ => log::info!("No winner after {MAX_TURNS} turns"),
    }
    println!(
        "{}",
        serde_json::to_string_pretty(&state.outcome()).unwrap_or_default()
    );
    ExitCode::SUCCESS
}
