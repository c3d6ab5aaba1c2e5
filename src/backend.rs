use {
    crate::{GammaRamp, Result, VideoMode},
    std::{
        fmt::{self, Debug, Formatter},
        ops::{Deref, DerefMut},
    },
};

/// The query surface of a display backend
///
/// Handles are opaque and only meaningful to the backend that produced them.
/// Every query copies its result into owned values, so nothing returned here
/// borrows from the backend.
///
/// Per-monitor queries never fail outright: fields the backend can't resolve
/// come back as `None` (or zero for sizes and positions).
pub trait Backend {
    /// Backend-specific reference to one attached monitor
    type Handle: Copy + Eq + Debug;

    /// Bring the backend up
    fn init() -> Result<Self>
    where
        Self: Sized;

    /// All attached monitors, in backend order
    fn monitors(&self) -> Result<Vec<Self::Handle>>;

    /// The backend-designated primary monitor
    fn primary_monitor(&self) -> Option<Self::Handle>;

    /// Human-readable monitor name
    fn name(&self, monitor: Self::Handle) -> Option<String>;

    /// Offset of the monitor's top-left corner in desktop coordinates
    fn position(&self, monitor: Self::Handle) -> (i32, i32);

    /// Physical `(width, height)` in millimeters, zero when unknown
    fn physical_size(&self, monitor: Self::Handle) -> (u32, u32);

    /// The video mode the monitor is currently using
    fn current_mode(&self, monitor: Self::Handle) -> Option<VideoMode>;

    /// Every video mode the monitor supports
    fn video_modes(&self, monitor: Self::Handle) -> Vec<VideoMode>;

    /// The monitor's current gamma ramp
    fn gamma_ramp(&self, monitor: Self::Handle) -> Option<GammaRamp>;

    /// Release backend resources
    ///
    /// Called exactly once by [`Session`] when it is dropped.
    fn terminate(&mut self) {}
}

/// An initialized backend that is torn down when dropped
pub struct Session<B: Backend> {
    backend: B,
}

impl<B: Backend> Session<B> {
    /// [Initialize](Backend::init) a new backend session
    pub fn init() -> Result<Self> {
        let backend = B::init()?;
        log::debug!("display backend initialized");
        Ok(Self::new(backend))
    }

    /// Take ownership of an already initialized backend
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// The underlying backend
    pub fn backend(&self) -> &B {
        &self.backend
    }
}

impl<B: Backend> Deref for Session<B> {
    type Target = B;

    fn deref(&self) -> &Self::Target {
        &self.backend
    }
}

impl<B: Backend> DerefMut for Session<B> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.backend
    }
}

impl<B: Backend> Drop for Session<B> {
    fn drop(&mut self) {
        self.backend.terminate();
        log::debug!("display backend terminated");
    }
}

impl<B: Backend + Debug> Debug for Session<B> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.debug_struct("Session").field("backend", &self.backend).finish()
    }
}

#[cfg(test)]
pub(crate) mod fake {
    //! An in-memory backend for tests

    use {
        super::*,
        crate::Error,
        std::{cell::Cell, rc::Rc},
    };

    #[derive(Debug, Clone, Default)]
    pub struct FakeMonitor {
        pub name: Option<String>,
        pub position: (i32, i32),
        pub physical_size: (u32, u32),
        pub current_mode: Option<VideoMode>,
        pub modes: Vec<VideoMode>,
        pub gamma_ramp: Option<GammaRamp>,
    }

    impl FakeMonitor {
        pub fn named(name: &str) -> Self {
            let mode = VideoMode::with_bits_per_pixel(1920, 1080, 60, 24);
            Self {
                name: Some(name.into()),
                position: (0, 0),
                physical_size: (530, 300),
                current_mode: Some(mode),
                modes: vec![VideoMode::with_bits_per_pixel(1280, 720, 60, 24), mode],
                gamma_ramp: GammaRamp::new(vec![0, 65535], vec![0, 65535], vec![0, 65535]),
            }
        }
    }

    #[derive(Debug, Default)]
    pub struct FakeBackend {
        pub monitors: Vec<FakeMonitor>,
        pub primary: Option<usize>,
        pub fail_enumeration: bool,
        pub queries: Cell<usize>,
        pub terminated: Rc<Cell<usize>>,
    }

    impl FakeBackend {
        pub fn new(monitors: Vec<FakeMonitor>, primary: Option<usize>) -> Self {
            Self {
                monitors,
                primary,
                ..Default::default()
            }
        }

        fn get(&self, monitor: usize) -> &FakeMonitor {
            self.queries.set(self.queries.get() + 1);
            &self.monitors[monitor]
        }
    }

    impl Backend for FakeBackend {
        type Handle = usize;

        fn init() -> Result<Self> {
            Err(Error::BackendInitFailure("fake backend has no display".into()))
        }

        fn monitors(&self) -> Result<Vec<usize>> {
            match self.fail_enumeration {
                true => Err(Error::Backend("enumeration failed".into())),
                false => Ok((0..self.monitors.len()).collect()),
            }
        }

        fn primary_monitor(&self) -> Option<usize> {
            self.primary
        }

        fn name(&self, monitor: usize) -> Option<String> {
            self.get(monitor).name.clone()
        }

        fn position(&self, monitor: usize) -> (i32, i32) {
            self.get(monitor).position
        }

        fn physical_size(&self, monitor: usize) -> (u32, u32) {
            self.get(monitor).physical_size
        }

        fn current_mode(&self, monitor: usize) -> Option<VideoMode> {
            self.get(monitor).current_mode
        }

        fn video_modes(&self, monitor: usize) -> Vec<VideoMode> {
            self.get(monitor).modes.clone()
        }

        fn gamma_ramp(&self, monitor: usize) -> Option<GammaRamp> {
            self.get(monitor).gamma_ramp.clone()
        }

        fn terminate(&mut self) {
            self.terminated.set(self.terminated.get() + 1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{fake::FakeBackend, *};

    #[test]
    fn terminates_once_on_drop() {
        let backend = FakeBackend::default();
        let terminated = backend.terminated.clone();
        {
            let session = Session::new(backend);
            assert_eq!(session.monitors().map(|m| m.len()), Ok(0));
            assert_eq!(terminated.get(), 0);
        }
        assert_eq!(terminated.get(), 1);
    }

    #[test]
    fn terminates_on_early_return() {
        fn enumerate(session: Session<FakeBackend>) -> Result<usize> {
            let monitors = session.monitors()?;
            Ok(monitors.len())
        }

        let backend = FakeBackend {
            fail_enumeration: true,
            ..Default::default()
        };
        let terminated = backend.terminated.clone();
        assert!(enumerate(Session::new(backend)).is_err());
        assert_eq!(terminated.get(), 1);
    }

    #[test]
    fn init_failure_is_reported() {
        assert!(matches!(
            Session::<FakeBackend>::init(),
            Err(crate::Error::BackendInitFailure(..))
        ));
    }
}
