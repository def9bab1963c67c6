//! Frame loop driver
//!
//! Sequences one frame as physics → recycle → render and owns the run
//! lifecycle. The host (browser shell, headless runner, tests) only schedules
//! frames while [`LoopDriver::frame`] reports [`DriverState::Running`].
//!
//! Input listeners are attached once when a run starts and detached once when
//! it ends (game over, teardown or drop), never per frame.

use rand::Rng;
use rand_pcg::Pcg32;

use crate::error::Result;
use crate::input::{InputState, Intent};
use crate::sim::{PlatformGenerator, World, recycle, tick};
use crate::tuning::{Tuning, Viewport};

/// Whether the host should schedule another frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    Running,
    Halted,
}

/// Kind of render the driver is requesting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frame {
    /// Regular frame of a live run
    Running,
    /// Final frame of a run that just ended
    Terminal,
}

/// Presentation side of the loop
pub trait Host {
    fn render(&mut self, world: &World, frame: Frame);
    /// Start delivering input events to the driver
    fn attach_input(&mut self);
    /// Stop delivering input events; no event may arrive afterwards
    fn detach_input(&mut self);
}

pub struct LoopDriver<H: Host, R: Rng = Pcg32> {
    host: H,
    generator: PlatformGenerator<R>,
    world: World,
    input: InputState,
    state: DriverState,
    listening: bool,
    /// Viewport to use from the next reset on
    pending_viewport: Option<Viewport>,
    runs: u32,
    /// Set by teardown; no run may start afterwards
    torn_down: bool,
}

impl<H: Host> LoopDriver<H, Pcg32> {
    pub fn with_seed(host: H, viewport: Viewport, tuning: Tuning, seed: u64) -> Result<Self> {
        let generator = PlatformGenerator::seeded(seed, &viewport, &tuning);
        log::info!("Seeded platform stream with {}", seed);
        Self::new(host, viewport, tuning, generator)
    }
}

impl<H: Host, R: Rng> LoopDriver<H, R> {
    /// Build the first run and attach input.
    ///
    /// Fails if `viewport` or `tuning` does not validate.
    pub fn new(
        host: H,
        viewport: Viewport,
        tuning: Tuning,
        mut generator: PlatformGenerator<R>,
    ) -> Result<Self> {
        viewport.validate()?;
        tuning.validate()?;
        generator.configure(&viewport, &tuning);

        let world = World::new(viewport, tuning, &mut generator);
        let mut driver = Self {
            host,
            generator,
            world,
            input: InputState::default(),
            state: DriverState::Running,
            listening: false,
            pending_viewport: None,
            runs: 1,
            torn_down: false,
        };
        driver.attach();
        log::info!(
            "Run 1 started ({}x{}, {} platforms)",
            viewport.width,
            viewport.height,
            driver.world.target_platform_count()
        );
        Ok(driver)
    }

    /// Run one frame. Returns the state the host should act on.
    pub fn frame(&mut self) -> DriverState {
        if self.state == DriverState::Halted {
            return DriverState::Halted;
        }

        let input = self.input.snapshot(self.world.tuning.move_speed);
        tick(&mut self.world, &input);
        recycle(&mut self.world, &mut self.generator);

        if self.world.is_over() {
            self.state = DriverState::Halted;
            self.detach();
            self.host.render(&self.world, Frame::Terminal);
        } else {
            self.host.render(&self.world, Frame::Running);
        }
        self.state
    }

    /// Record a movement intent; ignored while no run is listening
    pub fn apply_intent(&mut self, intent: Intent) {
        if self.listening {
            self.input.apply(intent);
        }
    }

    /// Throw the current run away and start a fresh one
    pub fn reset(&mut self) {
        if self.torn_down {
            log::warn!("Ignoring reset after teardown");
            return;
        }
        if let Some(viewport) = self.pending_viewport.take() {
            self.world.viewport = viewport;
        }
        let viewport = self.world.viewport;
        let tuning = self.world.tuning.clone();
        self.generator.configure(&viewport, &tuning);

        self.world = World::new(viewport, tuning, &mut self.generator);
        self.input.reset();
        self.state = DriverState::Running;
        self.runs += 1;
        self.attach();
        log::info!("Run {} started", self.runs);
    }

    /// Apply new screen dimensions from the next reset on
    pub fn resize(&mut self, viewport: Viewport) {
        self.pending_viewport = Some(viewport);
    }

    /// Stop for good: detach input, no further frames run, reset is refused
    pub fn teardown(&mut self) {
        self.torn_down = true;
        self.state = DriverState::Halted;
        self.detach();
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    pub fn is_over(&self) -> bool {
        self.world.is_over()
    }

    pub fn runs(&self) -> u32 {
        self.runs
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    fn attach(&mut self) {
        if !self.listening {
            self.host.attach_input();
            self.listening = true;
        }
    }

    fn detach(&mut self) {
        if self.listening {
            self.host.detach_input();
            self.listening = false;
            self.input.reset();
        }
    }
}

impl<H: Host, R: Rng> Drop for LoopDriver<H, R> {
    fn drop(&mut self) {
        self.detach();
    }
}
