#![warn(missing_docs)]
#![cfg_attr(feature = "doc", feature(doc_cfg))]

//! Enumerate attached display monitors and report their geometry, video
//! modes and gamma ramps.
//!
//! A [`Session`] brings up a display [`Backend`]; an [`InventorySnapshot`]
//! copies everything the backend knows about each monitor; a [`Report`]
//! renders that snapshot as text.
//!
//! # Example
//!
//! ```rust,no_run
//! # fn main() -> Result<(), list_monitors::Error> {
//! let inventory = list_monitors::query()?;
//! for monitor in &inventory {
//!     println!("{}: {}", monitor.id(), monitor.current_mode()?);
//! }
//! print!("{}", list_monitors::Report::new(&inventory));
//! # Ok(())
//! # }
//! ```

pub use self::{
    backend::{Backend, Session},
    error::{Error, Result},
    gamma::{Entries, GammaRamp},
    inventory::{query, InventorySnapshot, MissingFields, MonitorId, MonitorSnapshot},
    mode::{split_bits_per_pixel, ModeCatalog, VideoMode},
    platform::DefaultBackend,
    report::{Report, ReportOptions, Selection},
};
#[cfg(windows)]
pub use self::{
    context::DeviceContext,
    display::{DisplayDevice, DisplayDeviceFlags},
    output::{Output, OutputInfo},
};

mod backend;
mod error;
mod gamma;
mod inventory;
mod mode;
pub mod platform;
pub mod report;

#[cfg(windows)]
mod context;
#[cfg(windows)]
mod display;
#[cfg(windows)]
mod output;

#[cfg(windows)]
#[cfg_attr(feature = "doc", doc(cfg(feature = "win32")))]
pub mod win32 {
    //! [`windows`] API re-exports

    #[allow(missing_docs)]
    #[cfg_attr(feature = "doc", doc(cfg(feature = "win32")))]
    #[cfg_attr(not(feature = "win32"), doc(hidden))]
    #[doc(no_inline)]
    pub use windows::Win32::{
        Foundation::RECT,
        Graphics::Gdi::{DEVMODEW, DISPLAY_DEVICEW, HMONITOR, MONITORINFO, MONITORINFOEXW},
    };
    pub use {
        widestring::{self, WideCStr, WideCString, WideStr, WideString},
        windows::{self, core, Win32},
    };

    pub(crate) fn wide_str_from_slice_truncated(sz: &[u16]) -> &WideStr {
        match WideCStr::from_slice_truncate(sz) {
            Ok(str) => str.as_ref(),
            Err(_) => WideStr::from_slice(sz),
        }
    }
}
