#[cfg(doc)]
use windows::Win32;
use {
    crate::win32::wide_str_from_slice_truncated,
    std::{
        fmt::{self, Debug, Display, Formatter},
        mem,
    },
    widestring::{WideCStr, WideStr},
    windows::{
        core::PCWSTR,
        Win32::Graphics::Gdi::{
            self, EnumDisplayDevicesW, EnumDisplaySettingsW, DEVMODEW, DISPLAY_DEVICEW, ENUM_CURRENT_SETTINGS,
            ENUM_DISPLAY_SETTINGS_MODE,
        },
    },
};

/// Information representing a display or monitor device
///
/// This wraps a [`DISPLAY_DEVICE`][display_device].
///
/// See also: [`Win32::Graphics::Gdi::DISPLAY_DEVICEW`]
///
/// [display_device]: https://learn.microsoft.com/en-us/windows/win32/api/wingdi/ns-wingdi-display_devicew
#[derive(Copy, Clone, PartialEq, Eq)]
#[repr(transparent)]
#[doc(alias = "DISPLAY_DEVICEW")]
#[doc(alias = "DISPLAY_DEVICE")]
pub struct DisplayDevice {
    info: DISPLAY_DEVICEW,
}

impl DisplayDevice {
    /// Enumerate all display devices
    ///
    /// This is a wrapper around [`EnumDisplayDevicesW`][enumdisplaydevicesw],
    /// with no `lpDevice` requested.
    ///
    /// [enumdisplaydevicesw]: https://learn.microsoft.com/en-us/windows/win32/api/winuser/nf-winuser-enumdisplaydevicesw
    #[doc(alias = "EnumDisplayDevicesW")]
    pub fn enumerate() -> impl Iterator<Item = Self> {
        Self::win32_enumerate().map(Self::from_win32)
    }

    /// Enumerate all monitor devices attached to this display device
    ///
    /// This is a wrapper around [`EnumDisplayDevicesW`][enumdisplaydevicesw],
    /// with [`self.name()`](Self::name) passed as `lpDevice`.
    ///
    /// [enumdisplaydevicesw]: https://learn.microsoft.com/en-us/windows/win32/api/winuser/nf-winuser-enumdisplaydevicesw
    #[doc(alias = "EnumDisplayDevicesW")]
    pub fn enumerate_monitors<'a>(&'a self) -> impl Iterator<Item = Self> + 'a {
        self.win32_enumerate_monitors().map(Self::from_win32)
    }

    /// Either the adapter or the monitor device's name
    pub fn name<'a>(&'a self) -> impl Display + Debug + 'a {
        self.win32_name().display()
    }

    /// Device state flags
    pub fn flags(&self) -> DisplayDeviceFlags {
        DisplayDeviceFlags::from_bits_truncate(self.win32_flags())
    }

    /// Description of the first monitor attached to this display adapter
    ///
    /// Falls back to the adapter's own description when it reports no monitors.
    pub fn monitor_name(&self) -> Option<String> {
        let name = match self.enumerate_monitors().next() {
            Some(monitor) => monitor.win32_string().to_string_lossy(),
            None => self.win32_string().to_string_lossy(),
        };
        match name.trim() {
            "" => None,
            name => Some(name.to_owned()),
        }
    }

    /// The display settings currently in use
    #[doc(alias = "EnumDisplaySettingsW")]
    pub fn current_settings(&self) -> Option<DEVMODEW> {
        self.win32_display_settings(ENUM_CURRENT_SETTINGS)
    }

    /// Every graphics mode the display device supports
    #[doc(alias = "EnumDisplaySettingsW")]
    pub fn enumerate_settings<'a>(&'a self) -> impl Iterator<Item = DEVMODEW> + 'a {
        (0..)
            .map(move |i| self.win32_display_settings(ENUM_DISPLAY_SETTINGS_MODE(i)))
            .take_while(|d| d.is_some())
            .filter_map(|d| d)
    }
}

#[allow(missing_docs)]
#[cfg_attr(feature = "doc", doc(cfg(feature = "win32")))]
#[cfg_attr(not(feature = "win32"), doc(hidden))]
impl DisplayDevice {
    pub const fn from_win32(info: DISPLAY_DEVICEW) -> Self {
        Self { info }
    }

    pub const fn win32_info(&self) -> &DISPLAY_DEVICEW {
        &self.info
    }

    pub fn win32_id(&self) -> &WideStr {
        wide_str_from_slice_truncated(&self.info.DeviceID)
    }

    pub fn win32_name_(&self) -> Option<&WideCStr> {
        WideCStr::from_slice_truncate(&self.info.DeviceName).ok()
    }

    pub fn win32_name(&self) -> &WideStr {
        wide_str_from_slice_truncated(&self.info.DeviceName)
    }

    pub fn win32_string(&self) -> &WideStr {
        wide_str_from_slice_truncated(&self.info.DeviceString)
    }

    pub const fn win32_flags(&self) -> u32 {
        self.info.StateFlags
    }

    #[doc(alias = "EnumDisplayDevicesW")]
    pub fn win32_enum(name: Option<&WideCStr>, index: u32, flags: u32) -> Option<DISPLAY_DEVICEW> {
        let mut info = DISPLAY_DEVICEW::default();
        info.cb = mem::size_of::<DISPLAY_DEVICEW>() as u32;
        unsafe { EnumDisplayDevicesW(name.map(|s| PCWSTR(s.as_ptr())), index, &mut info, flags) }
            .ok()
            .map(|()| info)
            .ok()
    }

    #[doc(alias = "EnumDisplayDevicesW")]
    pub fn win32_enumerate() -> impl Iterator<Item = DISPLAY_DEVICEW> {
        (0..)
            .map(|i| Self::win32_enum(None, i, 0))
            .take_while(|d| d.is_some())
            .filter_map(|d| d)
    }

    #[doc(alias = "EnumDisplayDevicesW")]
    pub fn win32_enumerate_monitors<'a>(&'a self) -> impl Iterator<Item = DISPLAY_DEVICEW> + 'a {
        let name = self.win32_name_();
        (0..)
            .map(move |i| name.and_then(|name| Self::win32_enum(Some(name), i, 0)))
            .take_while(|d| d.is_some())
            .filter_map(|d| d)
    }

    #[doc(alias = "EnumDisplaySettingsW")]
    pub fn win32_display_settings(&self, mode: ENUM_DISPLAY_SETTINGS_MODE) -> Option<DEVMODEW> {
        let name = self.win32_name_()?;
        let mut devmode = DEVMODEW::default();
        devmode.dmSize = mem::size_of::<DEVMODEW>() as u16;
        unsafe { EnumDisplaySettingsW(PCWSTR(name.as_ptr()), mode, &mut devmode) }
            .ok()
            .map(|()| devmode)
            .ok()
    }
}

impl Debug for DisplayDevice {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.debug_struct("DisplayDevice")
            .field("id", &self.win32_id())
            .field("name", &self.win32_name())
            .field("string", &self.win32_string())
            .field("flags", &self.flags())
            .finish()
    }
}

impl From<DISPLAY_DEVICEW> for DisplayDevice {
    fn from(info: DISPLAY_DEVICEW) -> Self {
        Self::from_win32(info)
    }
}

bitflags::bitflags! {
    /// The [`StateFlags` field][stateflags] of [`DisplayDevice::flags`]
    ///
    /// [stateflags]: https://learn.microsoft.com/en-us/windows/win32/api/wingdi/ns-wingdi-display_devicew#members
    #[derive(Default)]
    pub struct DisplayDeviceFlags: u32 {
        /// Specifies whether a monitor is presented as being "on" by the respective GDI view
        ///
        /// See also: [`Gdi::DISPLAY_DEVICE_ACTIVE`]
        #[doc(alias = "DISPLAY_DEVICE_ACTIVE")]
        const ACTIVE = Gdi::DISPLAY_DEVICE_ACTIVE;

        /// Represents a pseudo device used to mirror application drawing for remoting or other purposes
        ///
        /// See also: [`Gdi::DISPLAY_DEVICE_MIRRORING_DRIVER`]
        #[doc(alias = "DISPLAY_DEVICE_MIRRORING_DRIVER")]
        const MIRRORING_DRIVER = Gdi::DISPLAY_DEVICE_MIRRORING_DRIVER;

        /// The primary desktop is on the device
        ///
        /// See also: [`Gdi::DISPLAY_DEVICE_PRIMARY_DEVICE`]
        #[doc(alias = "DISPLAY_DEVICE_PRIMARY_DEVICE")]
        const PRIMARY_DEVICE = Gdi::DISPLAY_DEVICE_PRIMARY_DEVICE;
    }
}
