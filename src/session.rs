//! Session context and frame pacing
//!
//! A [`Session`] owns everything one run needs (config, state, input, clock).
//! The host calls [`Session::frame`] from its redraw callback with a
//! millisecond timestamp; the session converts host time into fixed
//! simulation ticks and tells the host whether to schedule another frame.

use glam::Vec2;
use rand::Rng;

use crate::config::{ConfigError, GameConfig};
use crate::consts::{MAX_FRAME_GAP_MS, MAX_SUBSTEPS, SIM_DT_MS};
use crate::sim::{GameEvent, GameState, InputState, TickInput, tick};

/// What the host should do after a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStatus {
    /// Schedule another frame
    Continue,
    /// Stop scheduling until a restart
    Halt,
}

/// Converts host frame timestamps into a whole number of fixed ticks
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last_time: Option<f64>,
    accumulator: f64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Anchor the clock at `now_ms`, discarding any pending time
    pub fn start(&mut self, now_ms: f64) {
        self.last_time = Some(now_ms);
        self.accumulator = 0.0;
    }

    /// Feed a host timestamp; returns how many ticks to run
    pub fn advance(&mut self, now_ms: f64) -> u32 {
        let dt = match self.last_time {
            Some(last) => (now_ms - last).clamp(0.0, MAX_FRAME_GAP_MS),
            None => SIM_DT_MS,
        };
        self.last_time = Some(now_ms);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT_MS && substeps < MAX_SUBSTEPS {
            self.accumulator -= SIM_DT_MS;
            substeps += 1;
        }
        substeps
    }
}

/// One player's run, from start through any number of restarts
pub struct Session {
    config: GameConfig,
    state: GameState,
    input: InputState,
    clock: FrameClock,
    running: bool,
    restarts: u32,
}

impl Session {
    /// Validate the config and set up a fresh (not yet started) session
    pub fn new(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        let state = GameState::new(&config, seed);
        Ok(Self {
            config,
            state,
            input: InputState::new(),
            clock: FrameClock::new(),
            running: false,
            restarts: 0,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Read-only view for rendering and HUD
    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    /// Host input events go here
    pub fn input_mut(&mut self) -> &mut InputState {
        &mut self.input
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn restarts(&self) -> u32 {
        self.restarts
    }

    /// Begin scheduling frames
    pub fn start(&mut self, now_ms: f64) -> FrameStatus {
        self.clock.start(now_ms);
        self.running = !self.state.is_over();
        log::info!(
            "Session started (seed {}, combo {}, input {})",
            self.state.seed,
            self.config.combo_mode.as_str(),
            self.config.input_blend.as_str()
        );
        self.status()
    }

    /// Run the ticks owed for this host frame
    pub fn frame(&mut self, now_ms: f64) -> FrameStatus {
        if !self.running {
            return FrameStatus::Halt;
        }

        let substeps = self.clock.advance(now_ms);
        if substeps == 0 {
            return FrameStatus::Continue;
        }

        // Held state carries across the frame's ticks; mouse motion only
        // drives the first one
        let first = self.input.take_tick_input();
        let rest = TickInput {
            mouse_delta: first.mouse_delta.map(|_| Vec2::ZERO),
            ..first.clone()
        };
        for step in 0..substeps {
            let input = if step == 0 { &first } else { &rest };
            tick(&mut self.state, input, &self.config, SIM_DT_MS);
            self.log_events();
            if self.state.is_over() {
                self.running = false;
                log::info!(
                    "Game over after {:.1}s (score {}, {} combos)",
                    self.state.elapsed_ms / 1000.0,
                    self.state.score,
                    self.state.combos_fired
                );
                break;
            }
        }
        self.status()
    }

    /// Throw the current run away and start a new one at `now_ms`
    pub fn restart(&mut self, now_ms: f64) -> FrameStatus {
        let seed: u64 = self.state.rng.random();
        self.state.reset(&self.config, seed);
        self.input.clear();
        self.restarts += 1;
        log::info!("Session restarted (seed {}, restart #{})", seed, self.restarts);
        self.start(now_ms)
    }

    /// New canvas extents. Sizes too small for play are ignored.
    pub fn resize(&mut self, width: f32, height: f32) -> bool {
        let candidate = GameConfig {
            canvas_width: width,
            canvas_height: height,
            ..self.config.clone()
        };
        if let Err(e) = candidate.validate() {
            log::warn!("Ignoring resize to {}x{}: {}", width, height, e);
            return false;
        }
        self.config = candidate;
        self.state.resize(Vec2::new(width, height));
        log::debug!("Canvas resized to {}x{}", width, height);
        true
    }

    fn status(&self) -> FrameStatus {
        if self.running {
            FrameStatus::Continue
        } else {
            FrameStatus::Halt
        }
    }

    fn log_events(&mut self) {
        for event in self.state.drain_events() {
            match event {
                GameEvent::ComboFired { destroyed, pushed } => {
                    log::debug!("Combo! destroyed {}, pushed {}", destroyed, pushed)
                }
                GameEvent::PlayerCaught { enemy_id } => log::debug!("Caught by enemy {}", enemy_id),
                GameEvent::BoostStarted => log::debug!("Boost"),
                GameEvent::EnemySpawned { id } => log::trace!("Enemy {} spawned", id),
            }
        }
    }
}
