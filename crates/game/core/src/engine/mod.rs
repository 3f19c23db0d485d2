//! Bout simulation loop.
//!
//! The [`CombatEngine`] runs a bout to completion in one synchronous call.
//! Each tick, in fixed order:
//!
//! 1. status ticks for the player, then the enemy
//! 2. death check
//! 3. player turn
//! 4. idle `wait` marker for the player
//! 5. enemy turn
//! 6. death check
//!
//! Player-before-enemy ordering is part of the rules: it breaks ties for
//! simultaneous actions, and simultaneous deaths go to the enemy.

mod log;
mod result;
mod ticks;

pub use log::{CastDetail, CombatLog, LogDetail, LogEntry, LogKind};
pub use result::{BoutStats, BoutSummary, CombatResult, SideSummary, Winner};
pub use ticks::process_status_ticks;

use tracing::{debug, warn};

use crate::action::resolve_turn;
use crate::config::CombatConfig;
use crate::env::{CombatEnv, EnemyDefinition, RollStream};
use crate::state::{CombatantState, PlayerCombatData, Side};

/// Runs bouts against a fixed set of catalogs, random source and config.
#[derive(Clone, Copy)]
pub struct CombatEngine<'a> {
    env: CombatEnv<'a>,
}

impl<'a> CombatEngine<'a> {
    pub fn new(env: CombatEnv<'a>) -> Self {
        Self { env }
    }

    pub fn env(&self) -> &CombatEnv<'a> {
        &self.env
    }

    /// Simulate one bout. Identical inputs and seed yield an identical result.
    pub fn simulate(
        &self,
        player: &PlayerCombatData,
        enemy: &EnemyDefinition,
        seed: u64,
    ) -> CombatResult {
        simulate_combat(player, enemy, &self.env, seed)
    }
}

/// Simulate one bout between `player` and `enemy`.
pub fn simulate_combat(
    player: &PlayerCombatData,
    enemy: &EnemyDefinition,
    env: &CombatEnv<'_>,
    seed: u64,
) -> CombatResult {
    let config = env.config();
    let techniques = env.techniques();

    let mut player_state = CombatantState::from_player(player, techniques);
    let mut enemy_state = CombatantState::from_enemy(enemy, techniques);

    if techniques
        .technique(CombatConfig::STRUGGLE_TECHNIQUE_ID)
        .is_none()
    {
        warn!(
            id = CombatConfig::STRUGGLE_TECHNIQUE_ID,
            "struggle technique missing from catalog, using built-in fallback"
        );
    }

    debug!(
        seed,
        player = %player_state.name,
        enemy = %enemy_state.name,
        "bout started"
    );

    let initial_stats = BoutStats {
        player: player_state.snapshot(),
        enemy: enemy_state.snapshot(),
    };

    let mut log = CombatLog::new();
    let mut rolls = RollStream::new(env.rng(), seed);
    let max_ticks = config.max_ticks();
    let mut tick = 0;
    let mut decided = None;

    while tick < max_ticks {
        let now = config.time_at(tick);

        log.extend(process_status_ticks(&mut player_state, now, env));
        log.extend(process_status_ticks(&mut enemy_state, now, env));
        if let Some(winner) = decide_winner(&player_state, &enemy_state) {
            decided = Some(winner);
            break;
        }

        if let Some(entry) = resolve_turn(&mut player_state, &mut enemy_state, now, env, &mut rolls)
        {
            log.push(entry);
        }

        if should_mark_idle(&player_state, now, config, &log) {
            log.push(LogEntry::wait(
                now,
                Side::Player,
                player_state.next_action_time,
            ));
            player_state.last_action_time = now;
        }

        if let Some(entry) = resolve_turn(&mut enemy_state, &mut player_state, now, env, &mut rolls)
        {
            log.push(entry);
        }

        if let Some(winner) = decide_winner(&player_state, &enemy_state) {
            decided = Some(winner);
            break;
        }

        tick += 1;
    }

    let duration = config.time_at(tick);
    let winner = match decided {
        Some(winner) => winner,
        None => {
            log.push(LogEntry::info(duration, "time limit reached"));
            Winner::Draw
        }
    };

    let rewards = (winner == Winner::Player).then_some(enemy.rewards);

    debug!(
        %winner,
        duration,
        entries = log.len(),
        rolls = rolls.rolls_drawn(),
        "bout finished"
    );

    CombatResult {
        winner,
        log,
        rewards,
        initial_stats,
        final_stats: BoutStats {
            player: player_state.snapshot(),
            enemy: enemy_state.snapshot(),
        },
        duration,
        seed,
    }
}

/// Player death is checked first and enemy death cannot override it.
fn decide_winner(player: &CombatantState, enemy: &CombatantState) -> Option<Winner> {
    if player.is_dead() {
        Some(Winner::Enemy)
    } else if enemy.is_dead() {
        Some(Winner::Player)
    } else {
        None
    }
}

fn should_mark_idle(
    player: &CombatantState,
    now: f64,
    config: &CombatConfig,
    log: &CombatLog,
) -> bool {
    player.next_action_time - now > config.idle_wait_threshold
        && now > player.last_action_time + config.idle_wait_throttle
        && log.last_kind() != Some(LogKind::Wait)
}
