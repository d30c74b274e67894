//! Aiming: pointer to angle/power, and the fire commit

use glam::Vec2;

use super::state::{Aim, Player, Team};
use crate::settings::Variant;

/// Aim implied by `pointer` for `player`, if the pointer is a legal target
///
/// Terrain shooters must point at or above themselves and toward the enemy
/// side; gravity shooters may point anywhere. A pointer exactly on the player
/// has no direction and is rejected.
pub fn compute_aim(player: &Player, pointer: Vec2, variant: Variant) -> Option<Aim> {
    let dx = pointer.x - player.position.x;
    let dy_up = player.position.y - pointer.y;

    if variant == Variant::Terrain {
        let toward_enemy = match player.team {
            Team::Left => dx >= 0.0,
            Team::Right => dx <= 0.0,
        };
        if dy_up < 0.0 || !toward_enemy {
            return None;
        }
    }

    let (angle, power) = crate::aim_angle_degrees(dx, dy_up)?;
    Some(Aim {
        point: pointer,
        angle,
        power,
    })
}

/// Refresh `player`'s live aim from the pointer; commit it when `fire` is set
///
/// Returns true when the shot was committed. Without a legal aim this tick
/// nothing is fired, even if an older aim is still displayed.
pub fn update_aim(player: &mut Player, pointer: Option<Vec2>, fire: bool, variant: Variant) -> bool {
    let Some(aim) = pointer.and_then(|p| compute_aim(player, p, variant)) else {
        return false;
    };
    player.aim = aim;
    if fire {
        player.commit_aim();
        return true;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Hitbox;

    fn player(team: Team) -> Player {
        Player::new(
            Vec2::new(500.0, 500.0),
            Hitbox::Rect {
                size: Vec2::splat(40.0),
            },
            team,
        )
    }

    #[test]
    fn test_terrain_left_team_aims_right_and_up_only() {
        let p = player(Team::Left);
        let aim = compute_aim(&p, Vec2::new(600.0, 400.0), Variant::Terrain).unwrap();
        assert!((aim.angle - 45.0).abs() < 1e-3);
        assert!((aim.power - 100.0 * 2.0_f32.sqrt()).abs() < 1e-3);

        // Behind the player
        assert!(compute_aim(&p, Vec2::new(400.0, 400.0), Variant::Terrain).is_none());
        // Below the player
        assert!(compute_aim(&p, Vec2::new(600.0, 600.0), Variant::Terrain).is_none());
        // Level with the player is allowed
        let aim = compute_aim(&p, Vec2::new(650.0, 500.0), Variant::Terrain).unwrap();
        assert!(aim.angle.abs() < 1e-6);
    }

    #[test]
    fn test_terrain_right_team_aims_left() {
        let p = player(Team::Right);
        assert!(compute_aim(&p, Vec2::new(400.0, 400.0), Variant::Terrain).is_some());
        assert!(compute_aim(&p, Vec2::new(600.0, 400.0), Variant::Terrain).is_none());
    }

    #[test]
    fn test_gravity_accepts_any_direction() {
        let p = player(Team::Left);
        let aim = compute_aim(&p, Vec2::new(400.0, 600.0), Variant::Gravity).unwrap();
        assert!((aim.angle + 45.0).abs() < 1e-3);
        assert!(compute_aim(&p, Vec2::new(500.0, 500.0), Variant::Gravity).is_none());
    }

    #[test]
    fn test_pointer_on_player_rejected() {
        let p = player(Team::Left);
        assert!(compute_aim(&p, p.position, Variant::Terrain).is_none());
    }

    #[test]
    fn test_non_finite_pointer_rejected() {
        let p = player(Team::Right);
        for pointer in [
            Vec2::new(f32::NAN, 10.0),
            Vec2::new(10.0, f32::NAN),
            Vec2::new(f32::INFINITY, 400.0),
            Vec2::new(f32::MAX, f32::MAX),
        ] {
            assert!(compute_aim(&p, pointer, Variant::Gravity).is_none());
            assert!(compute_aim(&p, pointer, Variant::Terrain).is_none());
        }
    }

    #[test]
    fn test_update_aim_commits_on_fire() {
        let mut p = player(Team::Left);
        let pointer = Vec2::new(600.0, 450.0);

        assert!(!update_aim(&mut p, Some(pointer), false, Variant::Terrain));
        assert_eq!(p.aim.point, pointer);
        assert_eq!(p.committed.power, 0.0);

        assert!(update_aim(&mut p, Some(pointer), true, Variant::Terrain));
        assert_eq!(p.committed, p.aim);
    }

    #[test]
    fn test_update_aim_keeps_stale_aim_but_cannot_fire() {
        let mut p = player(Team::Left);
        update_aim(&mut p, Some(Vec2::new(600.0, 450.0)), false, Variant::Terrain);
        let shown = p.aim;

        assert!(!update_aim(&mut p, Some(Vec2::new(300.0, 450.0)), true, Variant::Terrain));
        assert!(!update_aim(&mut p, None, true, Variant::Terrain));
        assert_eq!(p.aim, shown);
        assert_eq!(p.committed.power, 0.0);
    }
}
