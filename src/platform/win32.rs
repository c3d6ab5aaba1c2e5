use {
    crate::{Backend, DeviceContext, DisplayDevice, Error, GammaRamp, Output, Result, VideoMode},
    windows::Win32::Graphics::Gdi::DEVMODEW,
};

/// Modes shallower than this are palette modes and never reported
const MIN_BITS_PER_PIXEL: u32 = 15;

/// Display backend built on the Win32 GDI monitor APIs
///
/// Monitors are [`Output`]s. Names, modes, physical sizes and gamma ramps are
/// looked up through the [display adapter](DisplayDevice) driving each one.
#[derive(Debug, Default)]
pub struct Win32Backend {
    _private: (),
}

impl Win32Backend {
    fn display_device(output: Output) -> Option<DisplayDevice> {
        match output.display_device() {
            Ok(display) => display,
            Err(e) => {
                log::debug!("{output:?}: GetMonitorInfoW failed: {e}");
                None
            },
        }
    }

    fn device_context(output: Output) -> Option<DeviceContext> {
        let display = Self::display_device(output)?;
        let dc = DeviceContext::for_display(&display);
        if dc.is_none() {
            log::debug!("{output:?}: CreateDCW failed for {}", display.name());
        }
        dc
    }
}

impl Backend for Win32Backend {
    type Handle = Output;

    fn init() -> Result<Self> {
        Ok(Self::default())
    }

    fn monitors(&self) -> Result<Vec<Output>> {
        Output::enumerate()
            .map(Iterator::collect)
            .map_err(|e| Error::Backend(e.to_string()))
    }

    fn primary_monitor(&self) -> Option<Output> {
        Output::enumerate()
            .ok()?
            .find(|output| output.info().map_or(false, |info| info.is_primary()))
    }

    fn name(&self, monitor: Output) -> Option<String> {
        Self::display_device(monitor)?.monitor_name()
    }

    fn position(&self, monitor: Output) -> (i32, i32) {
        monitor.info().map(|info| info.position()).unwrap_or_default()
    }

    fn physical_size(&self, monitor: Output) -> (u32, u32) {
        Self::device_context(monitor)
            .map(|dc| dc.physical_size())
            .unwrap_or_default()
    }

    fn current_mode(&self, monitor: Output) -> Option<VideoMode> {
        Self::display_device(monitor)?
            .current_settings()
            .map(|devmode| video_mode(&devmode))
    }

    fn video_modes(&self, monitor: Output) -> Vec<VideoMode> {
        let display = match Self::display_device(monitor) {
            Some(display) => display,
            None => return Vec::new(),
        };

        let mut modes = Vec::<VideoMode>::new();
        for devmode in display.enumerate_settings() {
            if devmode.dmBitsPerPel < MIN_BITS_PER_PIXEL {
                continue
            }
            let mode = video_mode(&devmode);
            if !modes.contains(&mode) {
                modes.push(mode);
            }
        }
        modes
    }

    fn gamma_ramp(&self, monitor: Output) -> Option<GammaRamp> {
        match Self::device_context(monitor)?.gamma_ramp() {
            Ok([red, green, blue]) => GammaRamp::new(red.to_vec(), green.to_vec(), blue.to_vec()),
            Err(e) => {
                log::debug!("{monitor:?}: GetDeviceGammaRamp failed: {e}");
                None
            },
        }
    }
}

fn video_mode(devmode: &DEVMODEW) -> VideoMode {
    VideoMode::with_bits_per_pixel(
        devmode.dmPelsWidth,
        devmode.dmPelsHeight,
        devmode.dmDisplayFrequency,
        devmode.dmBitsPerPel,
    )
}
