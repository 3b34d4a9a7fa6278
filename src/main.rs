//! Clash Mini headless runner
//!
//! Plays matches at a fixed timestep and prints each final snapshot as JSON.
//!
//! Usage: `clash-mini [config.json] [--seed N] [--booster NAME]... [--manual]`

use anyhow::{Context, Result, bail};
use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use clash_mini::consts::*;
use clash_mini::sim::{BoosterKind, MatchEvent, MatchOutcome};
use clash_mini::{Game, MatchConfig, Wallet};

fn parse_args() -> Result<MatchConfig> {
    let mut args = std::env::args().skip(1).peekable();
    let mut config = match args.peek() {
        Some(first) if !first.starts_with("--") => {
            let path = args.next().unwrap_or_default();
            MatchConfig::load(&path).with_context(|| format!("loading config from {}", path))?
        }
        _ => MatchConfig::default(),
    };

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--seed" => {
                let value = args.next().context("--seed needs a value")?;
                config.seed = value
                    .parse()
                    .with_context(|| format!("invalid seed {:?}", value))?;
            }
            "--booster" => {
                let name = args.next().context("--booster needs a name")?;
                let kind = BoosterKind::from_str(&name)
                    .with_context(|| format!("unknown booster {:?}", name))?;
                config.boosters.push(kind);
            }
            "--manual" => config.autoplay = false,
            other => bail!("unexpected argument {:?}", other),
        }
    }
    Ok(config)
}

/// Deploys the cheapest affordable hand card somewhere in the player's zone
struct Autoplayer {
    rng: Pcg32,
}

impl Autoplayer {
    fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed ^ 0x5eed_cafe),
        }
    }

    fn act(&mut self, game: &mut Game<Wallet>) {
        let Some(card) = game
            .hand()
            .iter()
            .filter(|c| game.can_deploy(c.id))
            .min_by_key(|c| c.cost())
            .copied()
        else {
            return;
        };
        let half = ARENA_WIDTH / 2.0 - 20.0;
        let pos = Vec2::new(
            self.rng.random_range(-half..=half),
            self.rng.random_range(DEPLOY_ZONE_BACK + 10.0..=DEPLOY_ZONE_FRONT - 10.0),
        );
        if let Err(e) = game.deploy(card.id, pos) {
            log::warn!("Autoplay deploy refused: {}", e);
        }
    }
}

fn log_event(event: &MatchEvent) {
    match event {
        MatchEvent::UnitSpawned { id, side, archetype } => {
            log::debug!("{:?} deployed {} (#{})", side, archetype.as_str(), id)
        }
        MatchEvent::UnitDied { id, side, archetype } => {
            log::debug!("{:?} lost {} (#{})", side, archetype.as_str(), id)
        }
        MatchEvent::TowerDestroyed { kind, side } => {
            log::info!("{:?} {} tower destroyed", side, kind.as_str())
        }
        MatchEvent::CrownAwarded { side, total } => log::info!("{:?} crowns: {}", side, total),
        MatchEvent::DoubleElixirStarted => log::info!("Double elixir!"),
        MatchEvent::MatchEnded { outcome } => log::info!("Match ended: {:?}", outcome),
    }
}

/// Run one match to completion
fn run_match(game: &mut Game<Wallet>, config: &MatchConfig, autoplayer: &mut Autoplayer) -> Result<MatchOutcome> {
    for &kind in &config.boosters {
        game.economy_mut().arm(kind);
    }
    game.start_game().context("starting match")?;

    // Long frames are clamped like a stalled host
    let frame_dt = config.frame_dt().min(0.1);
    let max_frames = ((MATCH_DURATION + 10.0) / frame_dt) as u64 + 1;
    let mut accumulator = 0.0;
    let mut outcome = None;

    for _ in 0..max_frames {
        if config.autoplay {
            autoplayer.act(game);
        }

        accumulator += frame_dt;
        let mut substeps = 0;
        while accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            accumulator -= SIM_DT;
            substeps += 1;
            if let Some(o) = game.tick(SIM_DT) {
                outcome = Some(o);
                break;
            }
        }

        for event in game.drain_events() {
            log_event(&event);
        }
        if let Some(o) = outcome {
            return Ok(o);
        }
    }
    bail!("match did not finish within {} frames", max_frames)
}

fn main() -> Result<()> {
    env_logger::init();
    let config = parse_args()?;
    log::info!(
        "Clash Mini starting: {} match(es), seed {}, autoplay {}",
        config.max_matches,
        config.seed,
        config.autoplay
    );

    let mut game = Game::new(config.seed, Wallet::new(0));
    let mut autoplayer = Autoplayer::new(config.seed);

    for n in 0..config.max_matches.max(1) {
        let outcome = run_match(&mut game, &config, &mut autoplayer)
            .with_context(|| format!("match {}", n + 1))?;
        let state = game.state();
        println!("{}", serde_json::to_string_pretty(&state)?);
        log::info!(
            "Match {}: {:?} by {:?}, reward {:?}",
            n + 1,
            outcome.winner,
            outcome.reason,
            game.last_reward()
        );
        game.return_to_menu().context("returning to menu")?;
    }

    let wallet = game.economy();
    log::info!("Done: {} win(s), {} gold", wallet.wins, wallet.gold);
    Ok(())
}
