//! Per-frame collision resolution
//!
//! Runs after physics and scrolling. The checks are independent and always
//! evaluated in the same order: bullets against the monster first, then the
//! player against the star, the shield and finally the monster.

use super::entity::{Entity, Recycle};
use super::state::{GameEvent, GameState};

/// Resolve all collisions for the current frame
pub fn resolve(state: &mut GameState) {
    bullets_vs_monster(state);
    player_vs_star(state);
    player_vs_shield(state);

    if !state.player.is_immune() {
        state.shield_active = false;
    }

    player_vs_monster(state);
}

/// A bullet touching the monster sends it back above the view and is consumed
fn bullets_vs_monster(state: &mut GameState) {
    let GameState {
        config,
        rng,
        monster,
        bullets,
        events,
        ..
    } = state;

    bullets.retain(|bullet| {
        if bullet.rect().intersects(&monster.rect()) {
            monster.respawn(config, rng);
            events.push(GameEvent::MonsterKilled);
            log::debug!("Monster shot down");
            false
        } else {
            true
        }
    });
}

fn player_vs_star(state: &mut GameState) {
    if !state.player.rect().intersects(&state.star.rect()) {
        return;
    }
    let GameState {
        config, rng, star, ..
    } = state;
    star.respawn(config, rng);
    let bonus = state.config.star_bonus;
    state.add_score(bonus);
    state.events.push(GameEvent::StarCollected);
}

fn player_vs_shield(state: &mut GameState) {
    if !state.player.rect().intersects(&state.shield.rect()) {
        return;
    }
    let GameState {
        config, rng, shield, ..
    } = state;
    shield.respawn(config, rng);
    state.player.set_immunity(true);
    state.shield_active = true;
    state.events.push(GameEvent::ShieldCollected);
}

/// The monster only kills a fully visible, unshielded player; a player whose
/// top is above the view during a tall jump passes through unharmed
fn player_vs_monster(state: &mut GameState) {
    let top = state.player.rect().top();
    if top < 0 || top >= state.config.play_height {
        return;
    }
    if state.player.rect().intersects(&state.monster.rect()) && !state.shield_active {
        state.player.kill();
    }
}
