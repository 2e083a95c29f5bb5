//! Host frame loop.
//!
//! Drives a [`Registry`] the way a host game loop is expected to:
//!
//! 1. [`Registry::update`]: stop and return the error if any updater fails.
//! 2. [`Registry::draw`] onto the host surface.
//! 3. Hand the surface to the host's `present` callback.
//! 4. Advance the frame counter and sleep out the remaining frame budget.

use std::time::{Duration, Instant};

use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::error::RegistryError;
use crate::registry::Registry;

/// Configuration for the frame loop.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FrameConfig {
    /// Target frames per second. Non-positive values, and rates too small for
    /// their frame time to fit in a [`Duration`], disable pacing.
    pub frame_rate: f64,
    /// Maximum number of frames to run (0 = unlimited).
    pub max_frames: u64,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            frame_rate: 60.0,
            max_frames: 0,
        }
    }
}

impl FrameConfig {
    /// The time budget of one frame, if pacing is enabled.
    #[must_use]
    pub fn frame_budget(&self) -> Option<Duration> {
        if self.frame_rate > 0.0 {
            Duration::try_from_secs_f64(1.0 / self.frame_rate).ok()
        } else {
            None
        }
    }
}

/// Owns a registry and runs it frame by frame.
pub struct FrameLoop<S: ?Sized> {
    /// Number of frames completed.
    frame_id: u64,
    config: FrameConfig,
    registry: Registry<S>,
}

impl<S: ?Sized> FrameLoop<S> {
    /// Wrap `registry` in a frame loop.
    #[must_use]
    pub fn new(registry: Registry<S>, config: FrameConfig) -> Self {
        Self {
            frame_id: 0,
            config,
            registry,
        }
    }

    /// Returns the number of completed frames.
    #[must_use]
    pub fn frame_id(&self) -> u64 {
        self.frame_id
    }

    /// Returns a reference to the registry.
    #[must_use]
    pub fn registry(&self) -> &Registry<S> {
        &self.registry
    }

    /// Returns a mutable reference to the registry, for registration between
    /// frames.
    pub fn registry_mut(&mut self) -> &mut Registry<S> {
        &mut self.registry
    }

    /// Consume the loop, returning the registry.
    #[must_use]
    pub fn into_registry(self) -> Registry<S> {
        self.registry
    }

    /// Run one frame: update, then draw onto `surface`.
    ///
    /// # Errors
    ///
    /// Returns the first updater error. The frame is not drawn and the frame
    /// counter does not advance.
    pub fn frame(&mut self, surface: &mut S) -> Result<(), RegistryError> {
        self.registry.update()?;
        self.registry.draw(surface);
        self.frame_id += 1;
        debug!(frame_id = self.frame_id, "frame complete");
        Ok(())
    }

    /// Run frames until `max_frames` is reached, or forever when it is 0.
    ///
    /// After each drawn frame `present` receives the frame number (starting
    /// at 1) and the surface.
    ///
    /// # Errors
    ///
    /// Returns the first updater error; the host is expected to shut down.
    pub fn run<F>(&mut self, surface: &mut S, mut present: F) -> Result<(), RegistryError>
    where
        F: FnMut(u64, &mut S),
    {
        let budget = self.config.frame_budget();
        let mut frames = 0u64;

        info!(
            frame_rate = self.config.frame_rate,
            max_frames = self.config.max_frames,
            "starting frame loop"
        );

        loop {
            let start = Instant::now();

            if let Err(e) = self.frame(surface) {
                warn!(frame_id = self.frame_id, error = %e, "frame loop stopped");
                return Err(e);
            }
            present(self.frame_id, surface);

            frames += 1;
            if self.config.max_frames > 0 && frames >= self.config.max_frames {
                info!(frames, "frame loop complete");
                return Ok(());
            }

            let Some(budget) = budget else {
                continue;
            };
            let elapsed = start.elapsed();
            if elapsed < budget {
                std::thread::sleep(budget - elapsed);
            } else {
                warn!(
                    frame_id = self.frame_id,
                    elapsed_ms = elapsed.as_millis() as u64,
                    budget_ms = budget.as_millis() as u64,
                    "frame exceeded time budget"
                );
            }
        }
    }
}

impl<S: ?Sized> std::fmt::Debug for FrameLoop<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameLoop")
            .field("frame_id", &self.frame_id)
            .field("config", &self.config)
            .field("registry", &self.registry)
            .finish()
    }
}
