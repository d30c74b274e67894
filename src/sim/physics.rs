//! Projectile integration and terminal-event detection
//!
//! One fixed step per tick, no substeps. Velocities are in pixels per tick;
//! the force law is shared with the aiming preview through [`ForceField`].

use glam::Vec2;

use super::collision::{circle_off_horizontal, circle_rect_collide, circles_collide};
use super::state::{Aim, GameState, Team};
use super::world::{Arena, FloatingObject};
use crate::settings::Settings;

/// Per-tick velocity change acting on the projectile
#[derive(Debug, Clone, Copy)]
pub enum ForceField<'a> {
    /// Constant downward pull, already divided by the tick rate
    Uniform { accel: f32 },
    /// Inverse-square attraction toward every gravity source
    Wells {
        bodies: &'a [FloatingObject],
        multiplier: f32,
        dt: f32,
    },
}

impl<'a> ForceField<'a> {
    pub fn for_arena(arena: &'a Arena, settings: &Settings) -> Self {
        match arena {
            Arena::Terrain { .. } => ForceField::Uniform {
                accel: settings.gravity / settings.tick_rate,
            },
            Arena::Gravity { bodies } => ForceField::Wells {
                bodies,
                multiplier: settings.gravity_multiplier,
                dt: settings.dt(),
            },
        }
    }

    /// Velocity change for one tick at `pos`
    pub fn velocity_delta(&self, pos: Vec2) -> Vec2 {
        match *self {
            ForceField::Uniform { accel } => Vec2::new(0.0, accel),
            ForceField::Wells {
                bodies,
                multiplier,
                dt,
            } => {
                let mut accel = Vec2::ZERO;
                for body in bodies.iter().filter(|b| b.gravity_source) {
                    let delta = body.position - pos;
                    let dist_sq = delta.length_squared().max(1.0);
                    let force = multiplier * body.mass / dist_sq;
                    accel += delta * (force / dist_sq.sqrt());
                }
                accel * dt
            }
        }
    }
}

/// Launch velocity for a committed aim, in pixels per tick
pub fn launch_velocity(aim: &Aim, team: Team, launch_scale: f32, tick_rate: f32) -> Vec2 {
    let speed = aim.power * launch_scale / tick_rate;
    crate::launch_direction(aim.angle, team.direction()) * speed
}

/// Why a flight ended
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TurnEnd {
    /// Left the screen sideways, nobody harmed
    OffScreen,
    /// Struck another player, who is now dead
    PlayerHit { player: usize },
    /// Struck a gravity source, which lost mass
    BodyHit { body: usize, mass: f32 },
    /// Struck a building; a crater was recorded in `slot`
    BuildingHit {
        building: usize,
        slot: usize,
        position: Vec2,
    },
}

/// Result of one integration step
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FlightOutcome {
    Flying,
    /// Inside an existing crater; no collision this tick
    PassingCrater,
    Ended(TurnEnd),
}

/// Advance `shooter`'s projectile by one tick and apply any terminal event
///
/// The caller owns the phase check; this assumes a shot is in flight.
pub(crate) fn step_projectile(state: &mut GameState, shooter: usize) -> FlightOutcome {
    let settings = &state.settings;

    if !state.ball.active {
        let player = &state.players[shooter];
        let vel = launch_velocity(
            &player.committed,
            player.team,
            settings.variant.launch_scale(),
            settings.tick_rate,
        );
        state.ball.launch(vel);
    }

    let field = ForceField::for_arena(&state.arena, settings);
    state.ball.vel += field.velocity_delta(state.ball.pos);
    state.ball.pos += state.ball.vel;
    state.ball.record_trail();

    let pos = state.ball.pos;
    let radius = state.ball.radius;

    if circle_off_horizontal(pos, radius, settings.screen_width) {
        return FlightOutcome::Ended(TurnEnd::OffScreen);
    }

    // Identity check, not geometry: the shooter starts inside its own hitbox
    let victim = state
        .players
        .iter()
        .enumerate()
        .find(|(i, p)| *i != shooter && p.alive && p.hitbox.hit_by(p.position, pos, radius))
        .map(|(i, _)| i);
    if let Some(player) = victim {
        state.players[player].alive = false;
        return FlightOutcome::Ended(TurnEnd::PlayerHit { player });
    }

    match &mut state.arena {
        Arena::Gravity { bodies } => {
            let hit = bodies
                .iter()
                .position(|b| b.gravity_source && circles_collide(pos, radius, b.position, b.radius));
            if let Some(body) = hit {
                bodies[body].weaken();
                let mass = bodies[body].mass;
                return FlightOutcome::Ended(TurnEnd::BodyHit { body, mass });
            }
        }
        Arena::Terrain { buildings, craters } => {
            let in_crater = craters
                .active()
                .any(|e| circles_collide(pos, radius, e.position, e.radius - radius));
            if in_crater {
                return FlightOutcome::PassingCrater;
            }

            let hit = buildings
                .iter()
                .position(|b| circle_rect_collide(pos, radius, &b.rect));
            if let Some(building) = hit {
                let slot = craters.record(pos);
                return FlightOutcome::Ended(TurnEnd::BuildingHit {
                    building,
                    slot,
                    position: pos,
                });
            }
        }
    }

    FlightOutcome::Flying
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::settings::Variant;
    use crate::sim::collision::Rect;
    use crate::sim::state::{ExplosionPool, GamePhase, Hitbox, Player};
    use crate::sim::world::{Building, Color};

    fn terrain_state(buildings: Vec<Building>, players: Vec<Player>) -> GameState {
        let settings = Settings::for_variant(Variant::Terrain);
        let arena = Arena::Terrain {
            buildings,
            craters: ExplosionPool::new(MAX_EXPLOSIONS, EXPLOSION_RADIUS),
        };
        GameState::from_parts(settings, arena, players).unwrap()
    }

    fn square_player(x: f32, y: f32, team: Team) -> Player {
        Player::new(
            Vec2::new(x, y),
            Hitbox::Rect {
                size: Vec2::splat(TERRAIN_PLAYER_SIZE),
            },
            team,
        )
    }

    #[test]
    fn test_launch_velocity_terrain_and_gravity_scales() {
        let aim = Aim {
            point: Vec2::ZERO,
            angle: 90.0,
            power: 120.0,
        };
        let v = launch_velocity(&aim, Team::Left, TERRAIN_LAUNCH_SCALE, TICK_RATE);
        assert!(v.x.abs() < 1e-4);
        assert!((v.y + 6.0).abs() < 1e-4);

        let aim = Aim { angle: 0.0, ..aim };
        let v = launch_velocity(&aim, Team::Right, GRAVITY_LAUNCH_SCALE, TICK_RATE);
        assert!((v.x + 3.0).abs() < 1e-4);
        assert!(v.y.abs() < 1e-4);
    }

    #[test]
    fn test_uniform_field_pulls_down() {
        let field = ForceField::Uniform {
            accel: GRAVITY / TICK_RATE,
        };
        let dv = field.velocity_delta(Vec2::new(123.0, 456.0));
        assert_eq!(dv.x, 0.0);
        assert!((dv.y - 0.1635).abs() < 1e-4);
    }

    #[test]
    fn test_wells_sum_inverse_square_pull() {
        let bodies = vec![
            FloatingObject::gravity_source(Vec2::new(100.0, 0.0), 40.0, Color::GREEN),
            FloatingObject::gravity_source(Vec2::new(-100.0, 0.0), 40.0, Color::GREEN),
            FloatingObject::gravity_source(Vec2::new(0.0, 50.0), 10.0, Color::GREEN),
            FloatingObject::inert(Vec2::new(0.0, -10.0), 10.0),
        ];
        let field = ForceField::Wells {
            bodies: &bodies,
            multiplier: 100.0,
            dt: 0.5,
        };
        let dv = field.velocity_delta(Vec2::ZERO);
        // Opposite wells cancel; the small one pulls toward +y: 100*1000/2500*0.5
        assert!(dv.x.abs() < 1e-3);
        assert!((dv.y - 20.0).abs() < 1e-3);
    }

    #[test]
    fn test_wells_clamp_distance_at_center() {
        let bodies = vec![FloatingObject::gravity_source(Vec2::ZERO, 40.0, Color::GREEN)];
        let field = ForceField::Wells {
            bodies: &bodies,
            multiplier: 100.0,
            dt: 1.0 / 60.0,
        };
        let dv = field.velocity_delta(Vec2::ZERO);
        assert!(dv.is_finite());
        assert_eq!(dv, Vec2::ZERO);
    }

    #[test]
    fn test_first_step_activates_ball_from_committed_aim() {
        let mut state = terrain_state(
            Vec::new(),
            vec![
                square_player(400.0, 500.0, Team::Left),
                square_player(1200.0, 500.0, Team::Right),
            ],
        );
        state.players[0].committed = Aim {
            point: Vec2::ZERO,
            angle: 0.0,
            power: 100.0,
        };
        state.ball.pos = state.players[0].position;
        state.phase = GamePhase::InFlight { player: 0 };

        let outcome = step_projectile(&mut state, 0);
        assert_eq!(outcome, FlightOutcome::Flying);
        assert!(state.ball.active);
        // 100 * 3 / 60 = 5 px/tick rightward, plus one tick of gravity
        assert!((state.ball.vel.x - 5.0).abs() < 1e-4);
        assert!((state.ball.vel.y - GRAVITY / TICK_RATE).abs() < 1e-4);
        assert!((state.ball.pos.x - 405.0).abs() < 1e-4);
        assert_eq!(state.ball.trail.len(), 1);
    }

    #[test]
    fn test_shooter_cannot_hit_itself() {
        let mut state = terrain_state(
            Vec::new(),
            vec![
                square_player(400.0, 500.0, Team::Left),
                square_player(1200.0, 500.0, Team::Right),
            ],
        );
        state.ball.pos = state.players[0].position;
        state.ball.active = true;
        state.ball.vel = Vec2::ZERO;

        let outcome = step_projectile(&mut state, 0);
        assert_ne!(outcome, FlightOutcome::Ended(TurnEnd::PlayerHit { player: 0 }));
        assert!(state.players[0].alive);
    }

    #[test]
    fn test_off_screen_takes_precedence_over_hits() {
        let mut state = terrain_state(
            vec![Building {
                rect: Rect::new(1500.0, 0.0, 200.0, 900.0),
                color: Color::gray(150),
            }],
            vec![
                square_player(100.0, 500.0, Team::Left),
                square_player(1605.0, 500.0, Team::Right),
            ],
        );
        state.ball.active = true;
        state.ball.pos = Vec2::new(1605.0, 500.0);
        state.ball.vel = Vec2::new(6.0, 0.0);

        assert_eq!(
            step_projectile(&mut state, 0),
            FlightOutcome::Ended(TurnEnd::OffScreen)
        );
        assert!(state.players[1].alive);
    }

    #[test]
    fn test_building_hit_records_crater() {
        let mut state = terrain_state(
            vec![Building {
                rect: Rect::new(0.0, 700.0, 1600.0, 200.0),
                color: Color::gray(150),
            }],
            vec![
                square_player(100.0, 300.0, Team::Left),
                square_player(1500.0, 300.0, Team::Right),
            ],
        );
        state.ball.active = true;
        state.ball.pos = Vec2::new(800.0, 685.0);
        state.ball.vel = Vec2::new(0.0, 5.0);

        match step_projectile(&mut state, 0) {
            FlightOutcome::Ended(TurnEnd::BuildingHit {
                building, slot, ..
            }) => {
                assert_eq!(building, 0);
                assert_eq!(slot, 0);
            }
            other => panic!("expected building hit, got {other:?}"),
        }
        assert_eq!(state.arena.craters().unwrap().active_count(), 1);
    }

    #[test]
    fn test_dead_players_are_not_targets() {
        let mut state = terrain_state(
            Vec::new(),
            vec![
                square_player(100.0, 500.0, Team::Left),
                square_player(800.0, 500.0, Team::Right),
            ],
        );
        state.players[1].alive = false;
        state.ball.active = true;
        state.ball.pos = Vec2::new(795.0, 500.0);
        state.ball.vel = Vec2::ZERO;

        let outcome = step_projectile(&mut state, 0);
        assert!(!matches!(
            outcome,
            FlightOutcome::Ended(TurnEnd::PlayerHit { .. })
        ));
    }
}
