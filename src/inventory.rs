use {
    crate::{Backend, DefaultBackend, Error, GammaRamp, ModeCatalog, Result, Session, VideoMode},
    std::{
        fmt::{self, Display, Formatter},
        slice,
    },
};

/// Identifies a monitor by its position in the backend's enumeration order
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonitorId(pub usize);

impl MonitorId {
    /// The enumeration index
    pub const fn index(&self) -> usize {
        self.0
    }
}

impl Display for MonitorId {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

bitflags::bitflags! {
    /// Fields a backend failed to resolve for a monitor
    ///
    /// A monitor with any of these set is still listed, but is considered
    /// [incomplete](MonitorSnapshot::is_incomplete).
    #[derive(Default)]
    pub struct MissingFields: u8 {
        /// No display name, see [`Error::NameUnavailable`]
        const NAME = 0b001;

        /// No current video mode, see [`Error::ModeUnavailable`]
        const CURRENT_MODE = 0b010;

        /// No gamma ramp, see [`Error::GammaUnavailable`]
        const GAMMA_RAMP = 0b100;
    }
}

/// Everything known about one monitor at the time of the query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorSnapshot {
    id: MonitorId,
    name: Option<String>,
    primary: bool,
    position: (i32, i32),
    physical_size: (u32, u32),
    modes: ModeCatalog,
    gamma_ramp: Option<GammaRamp>,
}

impl MonitorSnapshot {
    /// Resolve every field of `monitor`
    pub fn query<B: Backend + ?Sized>(backend: &B, id: MonitorId, monitor: B::Handle, primary: bool) -> Self {
        let snapshot = Self {
            id,
            name: backend.name(monitor),
            primary,
            position: backend.position(monitor),
            physical_size: backend.physical_size(monitor),
            modes: ModeCatalog::query(backend, monitor),
            gamma_ramp: backend.gamma_ramp(monitor),
        };

        match snapshot.missing() {
            missing if missing.is_empty() => log::debug!(
                "monitor {id} ({monitor:?}): {:?}{}",
                snapshot.name.as_deref().unwrap_or_default(),
                if primary { " (primary)" } else { "" },
            ),
            missing => log::warn!("monitor {id} ({monitor:?}) is incomplete, missing {missing:?}"),
        }

        snapshot
    }

    /// The monitor's identifier within its inventory
    pub fn id(&self) -> MonitorId {
        self.id
    }

    /// Display name of the monitor
    pub fn name(&self) -> Result<&str> {
        self.name.as_deref().ok_or(Error::NameUnavailable)
    }

    /// Whether this is the primary monitor
    pub fn is_primary(&self) -> bool {
        self.primary
    }

    /// Offset in the desktop coordinate space
    pub fn position(&self) -> (i32, i32) {
        self.position
    }

    /// Physical `(width, height)` in millimeters; zero when unknown
    pub fn physical_size(&self) -> (u32, u32) {
        self.physical_size
    }

    /// The mode the monitor is currently using
    pub fn current_mode(&self) -> Result<&VideoMode> {
        self.modes.current()
    }

    /// All supported video modes
    pub fn modes(&self) -> &ModeCatalog {
        &self.modes
    }

    /// The supported mode at `index`
    pub fn mode_at(&self, index: usize) -> Option<&VideoMode> {
        self.modes.mode_at(index)
    }

    /// The gamma ramp in effect when the snapshot was taken
    pub fn gamma_ramp(&self) -> Result<&GammaRamp> {
        self.gamma_ramp.as_ref().ok_or(Error::GammaUnavailable)
    }

    /// Which fields could not be resolved
    pub fn missing(&self) -> MissingFields {
        let mut missing = MissingFields::empty();
        missing.set(MissingFields::NAME, self.name.is_none());
        missing.set(MissingFields::CURRENT_MODE, self.modes.current().is_err());
        missing.set(MissingFields::GAMMA_RAMP, self.gamma_ramp.is_none());
        missing
    }

    /// Whether any field could not be resolved
    pub fn is_incomplete(&self) -> bool {
        !self.missing().is_empty()
    }
}

/// The immutable result of one enumeration pass over all attached monitors
///
/// Snapshots are never updated; query again to observe hot-plugged monitors.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InventorySnapshot {
    monitors: Vec<MonitorSnapshot>,
    primary: Option<usize>,
}

impl InventorySnapshot {
    /// Take a snapshot of every monitor attached to `backend`
    ///
    /// The primary monitor is found by comparing handles against
    /// [`Backend::primary_monitor`]. When the backend names no primary, or
    /// names one that wasn't enumerated, the first monitor is used.
    pub fn build<B: Backend + ?Sized>(backend: &B) -> Result<Self> {
        let handles = backend.monitors()?;
        let primary = match backend.primary_monitor() {
            Some(primary) => handles.iter().position(|&handle| handle == primary),
            None => None,
        };
        let primary = match (primary, handles.is_empty()) {
            (_, true) => None,
            (Some(primary), false) => Some(primary),
            (None, false) => {
                log::debug!("backend reported no enumerated primary monitor, using the first");
                Some(0)
            },
        };

        let monitors = handles
            .into_iter()
            .enumerate()
            .map(|(index, handle)| MonitorSnapshot::query(backend, MonitorId(index), handle, primary == Some(index)))
            .collect::<Vec<_>>();
        log::debug!("found {} monitors", monitors.len());

        Ok(Self { monitors, primary })
    }

    /// Number of monitors
    pub fn len(&self) -> usize {
        self.monitors.len()
    }

    /// Whether no monitors are attached
    pub fn is_empty(&self) -> bool {
        self.monitors.is_empty()
    }

    /// The monitor at `index`, if there is one
    pub fn get(&self, index: usize) -> Option<&MonitorSnapshot> {
        self.monitors.get(index)
    }

    /// The monitor at `index`
    pub fn monitor(&self, index: usize) -> Result<&MonitorSnapshot> {
        self.get(index).ok_or(Error::MonitorIndexOutOfRange {
            index,
            count: self.len(),
        })
    }

    /// Index of the primary monitor; `None` only when empty
    pub fn primary_index(&self) -> Option<usize> {
        self.primary
    }

    /// The primary monitor; `None` only when empty
    pub fn primary(&self) -> Option<&MonitorSnapshot> {
        self.get(self.primary?)
    }

    /// All monitors, in backend order
    pub fn monitors(&self) -> &[MonitorSnapshot] {
        &self.monitors
    }

    /// Iterate over all monitors, in backend order
    pub fn iter(&self) -> slice::Iter<'_, MonitorSnapshot> {
        self.monitors.iter()
    }
}

impl<'a> IntoIterator for &'a InventorySnapshot {
    type Item = &'a MonitorSnapshot;
    type IntoIter = slice::Iter<'a, MonitorSnapshot>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Snapshot all monitors using the [default backend](DefaultBackend)
///
/// The backend session is opened for the duration of the query only.
pub fn query() -> Result<InventorySnapshot> {
    let session = Session::<DefaultBackend>::init()?;
    InventorySnapshot::build(&*session)
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::backend::fake::{FakeBackend, FakeMonitor},
    };

    fn primaries(inventory: &InventorySnapshot) -> usize {
        inventory.iter().filter(|m| m.is_primary()).count()
    }

    #[test]
    fn empty_inventory_has_no_primary() {
        let inventory = InventorySnapshot::build(&FakeBackend::new(Vec::new(), None)).unwrap();
        assert!(inventory.is_empty());
        assert_eq!(inventory.primary_index(), None);
        assert!(inventory.primary().is_none());
        assert_eq!(primaries(&inventory), 0);
    }

    #[test]
    fn primary_by_handle() {
        let backend = FakeBackend::new(
            vec![FakeMonitor::named("left"), FakeMonitor::named("right")],
            Some(1),
        );
        let inventory = InventorySnapshot::build(&backend).unwrap();
        assert_eq!(inventory.len(), 2);
        assert_eq!(inventory.primary_index(), Some(1));
        assert_eq!(inventory.primary().unwrap().name(), Ok("right"));
        assert!(!inventory.monitors()[0].is_primary());
        assert_eq!(primaries(&inventory), 1);
    }

    #[test]
    fn exactly_one_primary_without_backend_primary() {
        for primary in [None, Some(7)] {
            let backend = FakeBackend::new(
                vec![FakeMonitor::named("a"), FakeMonitor::named("b"), FakeMonitor::named("c")],
                primary,
            );
            let inventory = InventorySnapshot::build(&backend).unwrap();
            assert_eq!(inventory.primary_index(), Some(0));
            assert_eq!(primaries(&inventory), 1);
        }
    }

    #[test]
    fn incomplete_monitor_is_kept() {
        let broken = FakeMonitor {
            name: None,
            gamma_ramp: None,
            ..FakeMonitor::named("ignored")
        };
        let backend = FakeBackend::new(vec![FakeMonitor::named("ok"), broken], Some(0));
        let inventory = InventorySnapshot::build(&backend).unwrap();

        let ok = inventory.monitor(0).unwrap();
        assert!(!ok.is_incomplete());

        let broken = inventory.monitor(1).unwrap();
        assert!(broken.is_incomplete());
        assert_eq!(broken.missing(), MissingFields::NAME | MissingFields::GAMMA_RAMP);
        assert_eq!(broken.name(), Err(Error::NameUnavailable));
        assert_eq!(broken.gamma_ramp(), Err(Error::GammaUnavailable));
        assert!(broken.current_mode().is_ok());
    }

    #[test]
    fn missing_current_mode_is_flagged() {
        let monitor = FakeMonitor {
            current_mode: None,
            ..FakeMonitor::named("dark")
        };
        let inventory = InventorySnapshot::build(&FakeBackend::new(vec![monitor], None)).unwrap();
        let monitor = inventory.monitor(0).unwrap();
        assert_eq!(monitor.missing(), MissingFields::CURRENT_MODE);
        assert_eq!(monitor.current_mode(), Err(Error::ModeUnavailable));
    }

    #[test]
    fn snapshot_copies_backend_values() {
        let mut backend = FakeBackend::new(vec![FakeMonitor::named("one")], None);
        backend.monitors[0].position = (-1920, 120);
        backend.monitors[0].physical_size = (600, 340);
        let inventory = InventorySnapshot::build(&backend).unwrap();

        backend.monitors[0].name = Some("changed".into());
        backend.monitors[0].modes.clear();

        let monitor = inventory.monitor(0).unwrap();
        assert_eq!(monitor.id(), MonitorId(0));
        assert_eq!(monitor.name(), Ok("one"));
        assert_eq!(monitor.position(), (-1920, 120));
        assert_eq!(monitor.physical_size(), (600, 340));
        assert_eq!(monitor.modes().len(), 2);
        assert_eq!(monitor.mode_at(1), monitor.current_mode().ok());
        assert_eq!(monitor.mode_at(2), None);
    }

    #[test]
    fn out_of_range_index() {
        let backend = FakeBackend::new(vec![FakeMonitor::named("a"), FakeMonitor::named("b")], None);
        let inventory = InventorySnapshot::build(&backend).unwrap();
        assert_eq!(
            inventory.monitor(5),
            Err(Error::MonitorIndexOutOfRange { index: 5, count: 2 })
        );
        assert!(inventory.get(2).is_none());
    }

    #[test]
    fn enumeration_failure_is_fatal() {
        let backend = FakeBackend {
            fail_enumeration: true,
            ..FakeBackend::new(vec![FakeMonitor::named("a")], None)
        };
        assert_eq!(
            InventorySnapshot::build(&backend),
            Err(Error::Backend("enumeration failed".into()))
        );
    }
}
