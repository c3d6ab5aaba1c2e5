use {
    crate::{Backend, Error, Result},
    std::{
        fmt::{self, Display, Formatter},
        slice,
    },
};

/// A supported combination of resolution, refresh rate and color depth
///
/// Video modes describe what a monitor is capable of, not what it is
/// currently doing; see [`ModeCatalog::current`] for the latter.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct VideoMode {
    /// Horizontal resolution in pixels
    pub width: u32,
    /// Vertical resolution in pixels
    pub height: u32,
    /// Refresh rate in Hz, or 0 if the backend does not know it
    pub refresh_rate: u32,
    /// Bit depth of the red channel
    pub red_bits: u8,
    /// Bit depth of the green channel
    pub green_bits: u8,
    /// Bit depth of the blue channel
    pub blue_bits: u8,
}

impl VideoMode {
    /// Construct a mode from a packed pixel depth, see [`split_bits_per_pixel`]
    pub fn with_bits_per_pixel(width: u32, height: u32, refresh_rate: u32, bits_per_pixel: u32) -> Self {
        let (red_bits, green_bits, blue_bits) = split_bits_per_pixel(bits_per_pixel);
        Self {
            width,
            height,
            refresh_rate,
            red_bits,
            green_bits,
            blue_bits,
        }
    }
}

/// Renders as `{width}x{height}_{refresh}Hz R{r}G{g}B{b}`, e.g. `1920x1080_60Hz R8G8B8`
impl Display for VideoMode {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(
            f,
            "{}x{}_{}Hz R{}G{}B{}",
            self.width, self.height, self.refresh_rate, self.red_bits, self.green_bits, self.blue_bits
        )
    }
}

/// Split a packed pixel depth into `(red, green, blue)` channel depths
///
/// 32 bits per pixel is treated as 24 (the remainder is alpha or padding).
/// Bits that don't divide evenly go to green first, then red, so 16 bpp
/// becomes 5/6/5.
pub fn split_bits_per_pixel(bits_per_pixel: u32) -> (u8, u8, u8) {
    let bpp = match bits_per_pixel {
        32 => 24,
        bpp => bpp.min(u8::MAX as u32 * 3),
    };
    let base = (bpp / 3) as u8;
    let (mut red, mut green, blue) = (base, base, base);
    let delta = bpp - base as u32 * 3;
    if delta >= 1 {
        green += 1;
    }
    if delta == 2 {
        red += 1;
    }
    (red, green, blue)
}

/// Every video mode a monitor supports, plus the one it is currently using
///
/// Modes are kept in exactly the order the backend reported them.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ModeCatalog {
    modes: Vec<VideoMode>,
    current: Option<VideoMode>,
}

impl ModeCatalog {
    /// Build a catalog from already resolved values
    pub fn new(modes: Vec<VideoMode>, current: Option<VideoMode>) -> Self {
        Self { modes, current }
    }

    /// Query the supported and current modes of `monitor`
    pub fn query<B: Backend + ?Sized>(backend: &B, monitor: B::Handle) -> Self {
        let modes = backend.video_modes(monitor);
        let current = backend.current_mode(monitor);
        log::trace!("{monitor:?}: {} video modes, current {current:?}", modes.len());

        let catalog = Self::new(modes, current);
        if let Some(current) = catalog.current {
            if catalog.current_index().is_none() {
                log::warn!("{monitor:?}: current mode {current} is not among its supported modes");
            }
        }
        catalog
    }

    /// All supported modes, in backend order
    pub fn modes(&self) -> &[VideoMode] {
        &self.modes
    }

    /// Iterate over the supported modes, in backend order
    pub fn iter(&self) -> slice::Iter<'_, VideoMode> {
        self.modes.iter()
    }

    /// Number of supported modes
    pub fn len(&self) -> usize {
        self.modes.len()
    }

    /// Whether the backend reported no supported modes at all
    pub fn is_empty(&self) -> bool {
        self.modes.is_empty()
    }

    /// The mode at `index`, or `None` if the index is out of bounds
    pub fn mode_at(&self, index: usize) -> Option<&VideoMode> {
        self.modes.get(index)
    }

    /// The mode the monitor is currently using
    pub fn current(&self) -> Result<&VideoMode> {
        self.current.as_ref().ok_or(Error::ModeUnavailable)
    }

    /// Position of the current mode within [`modes`](Self::modes)
    pub fn current_index(&self) -> Option<usize> {
        let current = self.current.as_ref()?;
        self.modes.iter().position(|mode| mode == current)
    }
}

impl<'a> IntoIterator for &'a ModeCatalog {
    type Item = &'a VideoMode;
    type IntoIter = slice::Iter<'a, VideoMode>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mode(width: u32, height: u32, refresh_rate: u32) -> VideoMode {
        VideoMode::with_bits_per_pixel(width, height, refresh_rate, 24)
    }

    #[test]
    fn display_format() {
        let mode = VideoMode {
            width: 1920,
            height: 1080,
            refresh_rate: 60,
            red_bits: 8,
            green_bits: 8,
            blue_bits: 8,
        };
        assert_eq!(mode.to_string(), "1920x1080_60Hz R8G8B8");
    }

    #[test]
    fn split_depths() {
        assert_eq!(split_bits_per_pixel(32), (8, 8, 8));
        assert_eq!(split_bits_per_pixel(24), (8, 8, 8));
        assert_eq!(split_bits_per_pixel(16), (5, 6, 5));
        assert_eq!(split_bits_per_pixel(15), (5, 5, 5));
        assert_eq!(split_bits_per_pixel(30), (10, 10, 10));
        assert_eq!(split_bits_per_pixel(8), (3, 3, 2));
        assert_eq!(split_bits_per_pixel(0), (0, 0, 0));
    }

    #[test]
    fn mode_at_out_of_bounds() {
        let catalog = ModeCatalog::new(vec![mode(640, 480, 60), mode(800, 600, 60)], None);
        assert_eq!(catalog.mode_at(1), Some(&mode(800, 600, 60)));
        assert_eq!(catalog.mode_at(2), None);
        assert_eq!(catalog.mode_at(usize::MAX), None);
    }

    #[test]
    fn preserves_backend_order() {
        let modes = vec![mode(1920, 1080, 60), mode(640, 480, 75), mode(1024, 768, 60)];
        let catalog = ModeCatalog::new(modes.clone(), Some(mode(640, 480, 75)));
        assert_eq!(catalog.modes(), &modes[..]);
        assert_eq!(catalog.current_index(), Some(1));
    }

    #[test]
    fn missing_current_mode() {
        let catalog = ModeCatalog::new(vec![mode(640, 480, 60)], None);
        assert_eq!(catalog.current(), Err(Error::ModeUnavailable));
        assert_eq!(catalog.current_index(), None);
    }
}
