//! Plain-text rendering of an [`InventorySnapshot`]
//!
//! Rendering is pure: the same snapshot and options always produce the same
//! text, and nothing here touches a backend.

use {
    crate::{InventorySnapshot, MonitorSnapshot},
    std::fmt::{self, Display, Formatter},
};

/// Placeholder printed for fields the backend couldn't resolve
pub const NOT_AVAILABLE: &str = "NOT AVAILABLE";

/// What to include in a [`Report`]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ReportOptions {
    /// Print each monitor's gamma ramp before its other details
    pub gamma: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self { gamma: true }
    }
}

/// Which monitors a [`Report`] covers
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    /// Every monitor in the inventory
    #[default]
    All,
    /// Only the monitor at this index
    Monitor(usize),
}

/// A renderable report over an inventory
///
/// ```
/// use list_monitors::{InventorySnapshot, Report};
///
/// let inventory = InventorySnapshot::default();
/// assert_eq!(Report::new(&inventory).to_string(), "Total Monitors: 0\n");
/// ```
#[derive(Debug, Copy, Clone)]
pub struct Report<'a> {
    inventory: &'a InventorySnapshot,
    selection: Selection,
    options: ReportOptions,
}

impl<'a> Report<'a> {
    /// Report on every monitor with the default options
    pub fn new(inventory: &'a InventorySnapshot) -> Self {
        Self {
            inventory,
            selection: Selection::All,
            options: ReportOptions::default(),
        }
    }

    /// Restrict the report to the given monitors
    pub fn select(self, selection: Selection) -> Self {
        Self { selection, ..self }
    }

    /// Replace the report options
    pub fn options(self, options: ReportOptions) -> Self {
        Self { options, ..self }
    }

    fn fmt_monitor(&self, f: &mut Formatter, monitor: &MonitorSnapshot) -> fmt::Result {
        if self.options.gamma {
            match monitor.gamma_ramp() {
                Ok(ramp) => write!(f, "{ramp}")?,
                Err(_) => writeln!(f, "Monitor Gamma not initialized.")?,
            }
        }

        write!(f, "Monitor name: {}", monitor.name().unwrap_or(NOT_AVAILABLE))?;
        if monitor.is_primary() {
            write!(f, " (primary)")?;
        }
        writeln!(f)?;

        match monitor.current_mode() {
            Ok(mode) => writeln!(f, "Current video mode: {mode}")?,
            Err(_) => writeln!(f, "Current video mode: {NOT_AVAILABLE}")?,
        }
        for (index, mode) in monitor.modes().iter().enumerate() {
            writeln!(f, "Video mode #{index}: {mode}")?;
        }

        let (width, height) = monitor.physical_size();
        writeln!(f, "Physical Size: {width}mm. x {height}mm.")?;
        let (x, y) = monitor.position();
        writeln!(f, "Desktop Position Offset: {x},{y}")
    }
}

impl<'a> Display for Report<'a> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self.selection {
            Selection::All =>
                for (index, monitor) in self.inventory.iter().enumerate() {
                    if index > 0 {
                        writeln!(f)?;
                    }
                    self.fmt_monitor(f, monitor)?;
                },
            Selection::Monitor(index) => match self.inventory.monitor(index) {
                Ok(monitor) => self.fmt_monitor(f, monitor)?,
                Err(e) => writeln!(f, "{e}")?,
            },
        }
        writeln!(f, "Total Monitors: {}", self.inventory.len())
    }
}

/// Render every monitor followed by the monitor count, with default options
pub fn format(inventory: &InventorySnapshot) -> String {
    Report::new(inventory).to_string()
}

/// Render the monitor at `index`, or a "not available" line, followed by the
/// monitor count
pub fn format_monitor(inventory: &InventorySnapshot, index: usize, options: ReportOptions) -> String {
    Report::new(inventory)
        .select(Selection::Monitor(index))
        .options(options)
        .to_string()
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{
            backend::fake::{FakeBackend, FakeMonitor},
            GammaRamp, VideoMode,
        },
    };

    fn inventory(monitors: Vec<FakeMonitor>, primary: Option<usize>) -> (InventorySnapshot, FakeBackend) {
        let backend = FakeBackend::new(monitors, primary);
        (InventorySnapshot::build(&backend).unwrap(), backend)
    }

    fn laptop() -> FakeMonitor {
        FakeMonitor {
            name: Some("Built-in Retina Display".into()),
            position: (0, 0),
            physical_size: (302, 188),
            current_mode: Some(VideoMode::with_bits_per_pixel(1440, 900, 60, 24)),
            modes: vec![
                VideoMode::with_bits_per_pixel(1024, 768, 60, 24),
                VideoMode::with_bits_per_pixel(1440, 900, 60, 24),
            ],
            gamma_ramp: GammaRamp::new(vec![0, 65535], vec![0, 65535], vec![0, 65535]),
        }
    }

    #[test]
    fn empty_inventory() {
        let (inventory, _) = inventory(Vec::new(), None);
        assert_eq!(format(&inventory), "Total Monitors: 0\n");
    }

    #[test]
    fn single_monitor_block() {
        let (inventory, _) = inventory(vec![laptop()], None);
        assert_eq!(
            format(&inventory),
            "\
0,0,0
65535,65535,65535
Monitor name: Built-in Retina Display (primary)
Current video mode: 1440x900_60Hz R8G8B8
Video mode #0: 1024x768_60Hz R8G8B8
Video mode #1: 1440x900_60Hz R8G8B8
Physical Size: 302mm. x 188mm.
Desktop Position Offset: 0,0
Total Monitors: 1
"
        );
    }

    #[test]
    fn without_gamma() {
        let (inventory, _) = inventory(vec![laptop()], None);
        let text = format_monitor(&inventory, 0, ReportOptions { gamma: false });
        assert!(text.starts_with("Monitor name: Built-in Retina Display (primary)\n"));
        assert!(!text.contains("65535"));
    }

    #[test]
    fn blocks_separated_by_blank_line() {
        let external = FakeMonitor {
            position: (1440, -200),
            ..FakeMonitor::named("DELL U2719D")
        };
        let (inventory, _) = inventory(vec![laptop(), external], Some(0));
        let text = Report::new(&inventory)
            .options(ReportOptions { gamma: false })
            .to_string();
        assert!(text.contains("Desktop Position Offset: 0,0\n\nMonitor name: DELL U2719D\n"));
        assert!(text.ends_with("Desktop Position Offset: 1440,-200\nTotal Monitors: 2\n"));
        assert_eq!(text.matches("(primary)").count(), 1);
    }

    #[test]
    fn deterministic() {
        let (inventory, _) = inventory(vec![laptop(), FakeMonitor::named("other")], Some(1));
        assert_eq!(format(&inventory), format(&inventory));
        assert_eq!(
            format_monitor(&inventory, 1, Default::default()),
            format_monitor(&inventory.clone(), 1, Default::default())
        );
    }

    #[test]
    fn index_out_of_range() {
        let (inventory, backend) = inventory(vec![laptop(), FakeMonitor::named("other")], None);
        let queries = backend.queries.get();
        assert_eq!(
            format_monitor(&inventory, 5, Default::default()),
            "Monitor #5 not available.\nTotal Monitors: 2\n"
        );
        assert_eq!(backend.queries.get(), queries);
    }

    #[test]
    fn placeholders_for_missing_fields() {
        let broken = FakeMonitor {
            name: None,
            current_mode: None,
            gamma_ramp: None,
            ..laptop()
        };
        let (inventory, _) = inventory(vec![broken], None);
        let text = format_monitor(&inventory, 0, Default::default());
        assert!(text.starts_with("Monitor Gamma not initialized.\nMonitor name: NOT AVAILABLE (primary)\n"));
        assert!(text.contains("Current video mode: NOT AVAILABLE\n"));
        assert!(text.contains("Video mode #1: 1440x900_60Hz R8G8B8\n"));
    }

    #[test]
    fn monitor_without_modes() {
        let bare = FakeMonitor {
            modes: Vec::new(),
            ..FakeMonitor::named("virtual")
        };
        let (inventory, _) = inventory(vec![bare], None);
        let text = format_monitor(&inventory, 0, ReportOptions { gamma: false });
        assert!(!text.contains("Video mode #"));
    }
}
