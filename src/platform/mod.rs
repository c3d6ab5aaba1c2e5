//! Concrete [display backends](crate::Backend)
//!
//! [`DefaultBackend`] names the backend used for the compilation target.

#[cfg(windows)]
mod win32;
#[cfg(windows)]
pub use self::win32::Win32Backend as DefaultBackend;
#[cfg(windows)]
pub use self::win32::Win32Backend;

#[cfg(all(unix, not(target_os = "macos")))]
mod x11;
#[cfg(all(unix, not(target_os = "macos")))]
pub use self::x11::X11Backend as DefaultBackend;
#[cfg(all(unix, not(target_os = "macos")))]
pub use self::x11::{refresh_rate, X11Backend, X11Monitor};

#[cfg(not(any(windows, all(unix, not(target_os = "macos")))))]
mod unsupported;
#[cfg(not(any(windows, all(unix, not(target_os = "macos")))))]
pub use self::unsupported::UnsupportedBackend as DefaultBackend;
#[cfg(not(any(windows, all(unix, not(target_os = "macos")))))]
pub use self::unsupported::UnsupportedBackend;
