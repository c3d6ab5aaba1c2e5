use {
    crate::{Backend, Error, GammaRamp, Result, VideoMode},
    std::fmt::Display,
    x11rb::{
        connection::Connection,
        errors::ReplyError,
        protocol::{
            randr::{self, ConnectionExt as _, GetCrtcInfoReply, GetOutputInfoReply, GetScreenResourcesCurrentReply, ModeInfo},
            xproto::Window,
        },
        rust_connection::RustConnection,
    },
};

/// Minimum RandR version providing `GetScreenResourcesCurrent` and `GetOutputPrimary`
const RANDR_VERSION: (u32, u32) = (1, 3);

/// `Rotate_90 | Rotate_270`
const ROTATION_SIDEWAYS: u32 = 0b1010;

/// A connected RandR output and the CRTC driving it
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct X11Monitor {
    /// The RandR output
    pub output: randr::Output,
    /// The CRTC currently scanning out to [`output`](Self::output)
    pub crtc: randr::Crtc,
}

/// Display backend for X11 servers supporting RandR 1.3
///
/// Screen resources are fetched once during [`init`](Backend::init), so all
/// handles refer to the configuration at that point in time.
pub struct X11Backend {
    conn: Option<RustConnection>,
    root: Window,
    root_depth: u8,
    resources: GetScreenResourcesCurrentReply,
}

impl X11Backend {
    fn connection(&self) -> Option<&RustConnection> {
        self.conn.as_ref()
    }

    fn output_info(&self, output: randr::Output) -> Option<GetOutputInfoReply> {
        let conn = self.connection()?;
        request("GetOutputInfo", || {
            Ok(conn.randr_get_output_info(output, self.resources.config_timestamp)?.reply()?)
        })
    }

    fn crtc_info(&self, crtc: randr::Crtc) -> Option<GetCrtcInfoReply> {
        let conn = self.connection()?;
        request("GetCrtcInfo", || {
            Ok(conn.randr_get_crtc_info(crtc, self.resources.config_timestamp)?.reply()?)
        })
    }

    fn mode_info(&self, mode: randr::Mode) -> Option<&ModeInfo> {
        self.resources.modes.iter().find(|info| info.id == mode)
    }

    fn sideways(&self, crtc: Option<&GetCrtcInfoReply>) -> bool {
        crtc.map_or(false, |crtc| is_sideways(crtc.rotation.into()))
    }
}

impl Backend for X11Backend {
    type Handle = X11Monitor;

    fn init() -> Result<Self> {
        let (conn, screen_num) = RustConnection::connect(None).map_err(init_error)?;
        let (root, root_depth) = match conn.setup().roots.get(screen_num) {
            Some(screen) => (screen.root, screen.root_depth),
            None => return Err(Error::BackendInitFailure(format!("X11 screen {screen_num} does not exist"))),
        };

        let version = conn
            .randr_query_version(RANDR_VERSION.0, RANDR_VERSION.1)
            .map_err(init_error)?
            .reply()
            .map_err(init_error)?;
        if (version.major_version, version.minor_version) < RANDR_VERSION {
            return Err(Error::BackendInitFailure(format!(
                "RandR {}.{} is too old, {}.{} is required",
                version.major_version, version.minor_version, RANDR_VERSION.0, RANDR_VERSION.1,
            )))
        }

        let resources = conn
            .randr_get_screen_resources_current(root)
            .map_err(init_error)?
            .reply()
            .map_err(init_error)?;
        log::trace!(
            "RandR {}.{}: {} outputs, {} crtcs, {} modes",
            version.major_version,
            version.minor_version,
            resources.outputs.len(),
            resources.crtcs.len(),
            resources.modes.len(),
        );

        Ok(Self {
            conn: Some(conn),
            root,
            root_depth,
            resources,
        })
    }

    fn monitors(&self) -> Result<Vec<X11Monitor>> {
        if self.connection().is_none() {
            return Err(Error::Backend("X11 connection already closed".into()))
        }

        let mut monitors = Vec::new();
        for &output in &self.resources.outputs {
            let info = match self.output_info(output) {
                Some(info) => info,
                None => {
                    log::debug!("skipping RandR output {output}");
                    continue
                },
            };
            if info.connection != randr::Connection::CONNECTED || info.crtc == x11rb::NONE {
                continue
            }
            monitors.push(X11Monitor { output, crtc: info.crtc });
        }
        Ok(monitors)
    }

    fn primary_monitor(&self) -> Option<X11Monitor> {
        let conn = self.connection()?;
        let output = request("GetOutputPrimary", || Ok(conn.randr_get_output_primary(self.root)?.reply()?))?.output;
        if output == x11rb::NONE {
            return None
        }
        let info = self.output_info(output)?;
        Some(X11Monitor { output, crtc: info.crtc })
    }

    fn name(&self, monitor: X11Monitor) -> Option<String> {
        let info = self.output_info(monitor.output)?;
        match info.name.is_empty() {
            true => None,
            false => Some(String::from_utf8_lossy(&info.name).into_owned()),
        }
    }

    fn position(&self, monitor: X11Monitor) -> (i32, i32) {
        self.crtc_info(monitor.crtc)
            .map(|crtc| (crtc.x.into(), crtc.y.into()))
            .unwrap_or_default()
    }

    fn physical_size(&self, monitor: X11Monitor) -> (u32, u32) {
        let info = match self.output_info(monitor.output) {
            Some(info) => info,
            None => return (0, 0),
        };
        let crtc = self.crtc_info(monitor.crtc);
        oriented((info.mm_width, info.mm_height), self.sideways(crtc.as_ref()))
    }

    fn current_mode(&self, monitor: X11Monitor) -> Option<VideoMode> {
        let crtc = self.crtc_info(monitor.crtc)?;
        let info = self.mode_info(crtc.mode)?;
        Some(video_mode(info, self.root_depth, self.sideways(Some(&crtc))))
    }

    fn video_modes(&self, monitor: X11Monitor) -> Vec<VideoMode> {
        let output = match self.output_info(monitor.output) {
            Some(output) => output,
            None => return Vec::new(),
        };
        let crtc = self.crtc_info(monitor.crtc);
        let infos = output.modes.iter().filter_map(|&mode| self.mode_info(mode));
        video_modes(infos, self.root_depth, self.sideways(crtc.as_ref()))
    }

    fn gamma_ramp(&self, monitor: X11Monitor) -> Option<GammaRamp> {
        let conn = self.connection()?;
        let gamma = request("GetCrtcGamma", || Ok(conn.randr_get_crtc_gamma(monitor.crtc)?.reply()?))?;
        crtc_gamma_ramp(gamma.red, gamma.green, gamma.blue)
    }

    fn terminate(&mut self) {
        self.conn = None;
    }
}

/// Refresh rate in whole Hz from mode timings, or 0 when they're incomplete
pub fn refresh_rate(dot_clock: u32, htotal: u16, vtotal: u16) -> u32 {
    match (htotal, vtotal) {
        (0, _) | (_, 0) => 0,
        (htotal, vtotal) => (dot_clock as f64 / (htotal as f64 * vtotal as f64)).round() as u32,
    }
}

fn is_sideways(rotation: u32) -> bool {
    rotation & ROTATION_SIDEWAYS != 0
}

/// Swap a `(width, height)` pair when the CRTC is rotated a quarter turn
fn oriented<T>((width, height): (T, T), sideways: bool) -> (T, T) {
    match sideways {
        true => (height, width),
        false => (width, height),
    }
}

fn video_mode(info: &ModeInfo, depth: u8, sideways: bool) -> VideoMode {
    let (width, height) = oriented((info.width, info.height), sideways);
    VideoMode::with_bits_per_pixel(
        width.into(),
        height.into(),
        refresh_rate(info.dot_clock, info.htotal, info.vtotal),
        depth.into(),
    )
}

/// Non-interlaced modes in the order given, without duplicates
fn video_modes<'a, I: IntoIterator<Item = &'a ModeInfo>>(infos: I, depth: u8, sideways: bool) -> Vec<VideoMode> {
    let mut modes = Vec::<VideoMode>::new();
    for info in infos {
        if u32::from(info.mode_flags) & u32::from(randr::ModeFlag::INTERLACE) != 0 {
            continue
        }
        let mode = video_mode(info, depth, sideways);
        if !modes.contains(&mode) {
            modes.push(mode);
        }
    }
    modes
}

/// A CRTC without gamma entries has no usable ramp
fn crtc_gamma_ramp(red: Vec<u16>, green: Vec<u16>, blue: Vec<u16>) -> Option<GammaRamp> {
    GammaRamp::new(red, green, blue).filter(|ramp| !ramp.is_empty())
}

fn request<T, F: FnOnce() -> Result<T, ReplyError>>(name: &str, f: F) -> Option<T> {
    match f() {
        Ok(reply) => Some(reply),
        Err(e) => {
            log::debug!("RandR {name} failed: {e}");
            None
        },
    }
}

fn init_error<E: Display>(e: E) -> Error {
    Error::BackendInitFailure(e.to_string())
}
