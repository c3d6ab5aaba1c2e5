use crate::{Backend, Error, GammaRamp, Result, VideoMode};

/// Stand-in backend for targets without a display backend
///
/// [`init`](Backend::init) always fails, so none of the queries are reachable
/// through a [`Session`](crate::Session).
#[derive(Debug)]
pub struct UnsupportedBackend {
    _private: (),
}

impl Backend for UnsupportedBackend {
    type Handle = ();

    fn init() -> Result<Self> {
        Err(Error::BackendInitFailure(format!(
            "no display backend available for {}",
            std::env::consts::OS
        )))
    }

    fn monitors(&self) -> Result<Vec<()>> {
        Ok(Vec::new())
    }

    fn primary_monitor(&self) -> Option<()> {
        None
    }

    fn name(&self, _monitor: ()) -> Option<String> {
        None
    }

    fn position(&self, _monitor: ()) -> (i32, i32) {
        (0, 0)
    }

    fn physical_size(&self, _monitor: ()) -> (u32, u32) {
        (0, 0)
    }

    fn current_mode(&self, _monitor: ()) -> Option<VideoMode> {
        None
    }

    fn video_modes(&self, _monitor: ()) -> Vec<VideoMode> {
        Vec::new()
    }

    fn gamma_ramp(&self, _monitor: ()) -> Option<GammaRamp> {
        None
    }
}
