//! # Logical Timer Facade
//!
//! The uniform timer contract over one Tegra timer block: read the clock,
//! arm one-shot/periodic timeouts, reset, tear down.
//!
//! ## Lifecycle
//!
//! ```text
//! UNINITIALIZED ──describe()──▶ DESCRIBED ──init()──▶ INITIALIZED
//!                              (resource map,          (mapped, counter
//!                               no hardware)            running)
//!                                                          │
//!                                               destroy()/Drop
//!                                                          ▼
//!                                                      DESTROYED
//! ```
//!
//! The describe step is the free [`describe`](crate::config::describe)
//! function; it owns no state, so the facade value only exists from
//! INITIALIZED onward. Construction acquires mappings one by one and
//! releases them in reverse order on any failure; a caller never observes
//! partial state. Teardown is the consuming [`TegraLtimer::destroy`] (or
//! `Drop`), so destroying twice is unrepresentable.
//!
//! Firing is observed by the caller: it registers the described interrupt
//! with its own controller and calls [`TegraLtimer::handle_irq`] from the
//! handler. There is no cancel operation; re-arming or reset replaces an
//! outstanding timeout.

use arrayvec::ArrayVec;
use basalt_core::resources::MAX_REGIONS;
use basalt_core::{Error, LogicalTimer, Result, TimeoutKind, TimerEvent};
use basalt_hal::{DeviceMapper, DeviceMapping};

use crate::config::{self, TegraSoc};
use crate::driver::NvTmr;

/// Callback invoked from [`TegraLtimer::handle_irq`] with the stored token
pub type TimerCallback<T> = fn(&mut T, TimerEvent);

// =============================================================================
// FACADE
// =============================================================================

/// Logical timer over one Tegra timer block
///
/// `M` is the environment's mapping service, `T` an opaque token surfaced to
/// the callback on every fire. The token is stored and passed through,
/// nothing more.
pub struct TegraLtimer<M: DeviceMapper, T = ()> {
    mapper: M,
    mappings: ArrayVec<DeviceMapping, MAX_REGIONS>,
    tmr: NvTmr,
    started: bool,
    period_ns: u64,
    token: T,
    callback: Option<TimerCallback<T>>,
}

impl<M: DeviceMapper> TegraLtimer<M, ()> {
    /// Initialize the timer on `soc` without a fire callback
    ///
    /// Maps every region reported by [`describe`](crate::config::describe)
    /// through `mapper`, constructs the physical driver and starts the
    /// hardware counter. On any failure the acquired mappings are released
    /// before the error is returned.
    pub fn init(soc: TegraSoc, mapper: M) -> Result<Self> {
        Self::init_inner(soc, mapper, (), None)
    }
}

impl<M: DeviceMapper, T> TegraLtimer<M, T> {
    /// Initialize the timer on `soc` with a fire callback and its token
    pub fn init_with_callback(
        soc: TegraSoc,
        mapper: M,
        token: T,
        callback: TimerCallback<T>,
    ) -> Result<Self> {
        Self::init_inner(soc, mapper, token, Some(callback))
    }

    fn init_inner(
        soc: TegraSoc,
        mapper: M,
        token: T,
        callback: Option<TimerCallback<T>>,
    ) -> Result<Self> {
        let resources = config::describe(soc);
        let block = config::timer_block(soc);

        let mut mappings: ArrayVec<DeviceMapping, MAX_REGIONS> = ArrayVec::new();
        for region in resources.regions() {
            match mapper.map_device(region) {
                Ok(mapping) => mappings.push(mapping),
                Err(err) => {
                    log::error!("tegra ltimer: mapping {} failed", region.base);
                    release_mappings(&mapper, &mut mappings);
                    return Err(err);
                }
            }
        }

        let tmr = match NvTmr::from_mappings(block, &mappings) {
            Ok(tmr) => tmr,
            Err(err) => {
                release_mappings(&mapper, &mut mappings);
                return Err(err);
            }
        };

        let mut ltimer = Self {
            mapper,
            mappings,
            tmr,
            started: false,
            period_ns: 0,
            token,
            callback,
        };
        ltimer.tmr.start();
        ltimer.started = true;

        log::debug!("tegra ltimer: initialized for {soc:?}");
        Ok(ltimer)
    }

    /// The stored callback token
    pub fn token(&self) -> &T {
        &self.token
    }

    /// Service the timer's interrupt
    ///
    /// Acknowledges the hardware, re-arms a recorded periodic interval (or
    /// stops a fired one-shot), then hands the token to the callback.
    pub fn handle_irq(&mut self) {
        self.tmr.clear_interrupt();

        if self.period_ns > 0 {
            // The interval was range-checked when it was first armed.
            let _ = self.tmr.set_timeout(false, self.period_ns);
        } else {
            self.tmr.stop();
        }

        if let Some(callback) = self.callback {
            callback(&mut self.token, TimerEvent::Timeout);
        }
    }

    /// Tear the timer down
    ///
    /// Stops the hardware if it was ever started and returns every mapping
    /// to the mapping service. Consumes the facade; `Drop` performs the same
    /// teardown for instances that go out of scope.
    pub fn destroy(self) {}

    fn teardown(&mut self) {
        if self.started {
            self.tmr.stop();
            self.started = false;
        }
        release_mappings(&self.mapper, &mut self.mappings);
        log::debug!("tegra ltimer: destroyed");
    }
}

/// Release acquired mappings in reverse acquisition order.
fn release_mappings<M: DeviceMapper>(
    mapper: &M,
    mappings: &mut ArrayVec<DeviceMapping, MAX_REGIONS>,
) {
    while let Some(mapping) = mappings.pop() {
        mapper.unmap_device(mapping);
    }
}

impl<M: DeviceMapper, T> Drop for TegraLtimer<M, T> {
    fn drop(&mut self) {
        self.teardown();
    }
}

// =============================================================================
// TIMER CONTRACT
// =============================================================================

impl<M: DeviceMapper, T> LogicalTimer for TegraLtimer<M, T> {
    fn time(&self) -> u64 {
        self.tmr.time()
    }

    fn resolution(&self) -> Result<u64> {
        Err(Error::NotSupported)
    }

    fn set_timeout(&mut self, ns: u64, kind: TimeoutKind) -> Result<()> {
        self.period_ns = 0;

        match kind {
            TimeoutKind::Absolute => {
                let now = self.tmr.time();
                if now >= ns {
                    return Err(Error::TimerExpired);
                }
                self.tmr.set_timeout(false, ns - now)
            }
            TimeoutKind::Periodic => {
                self.period_ns = ns;
                self.tmr.set_timeout(false, ns)
            }
            TimeoutKind::Relative => self.tmr.set_timeout(false, ns),
        }
    }

    fn reset(&mut self) -> Result<()> {
        // Start-then-stop forces a counter reload and leaves the timer
        // inactive; the caller re-arms.
        self.tmr.start();
        self.tmr.stop();
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================
