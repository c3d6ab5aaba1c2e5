#[cfg(doc)]
use windows::Win32;
use {
    crate::DisplayDevice,
    std::{
        fmt::{self, Debug, Formatter},
        ptr,
    },
    widestring::widecstr,
    windows::{
        core::{Result as WinResult, PCWSTR},
        Win32::{
            Graphics::Gdi::{CreateDCW, DeleteDC, GetDeviceCaps, CreatedHDC, HORZSIZE, VERTSIZE},
            UI::ColorSystem::GetDeviceGammaRamp,
        },
    },
};

/// Number of entries per channel in a GDI gamma ramp
pub const GAMMA_RAMP_SIZE: usize = 256;

/// A device context for a whole display adapter, deleted on drop
///
/// See also: [`Win32::Graphics::Gdi::CreateDCW`]
#[doc(alias = "HDC")]
pub struct DeviceContext {
    hdc: CreatedHDC,
}

impl DeviceContext {
    /// Create a device context for the specified [display device](DisplayDevice)
    #[doc(alias = "CreateDCW")]
    pub fn for_display(display: &DisplayDevice) -> Option<Self> {
        let name = display.win32_name_()?;
        let hdc = unsafe {
            CreateDCW(
                PCWSTR(widecstr!("DISPLAY").as_ptr()),
                PCWSTR(name.as_ptr()),
                PCWSTR::null(),
                None,
            )
        };
        match hdc.0 {
            0 => None,
            _ => Some(Self { hdc }),
        }
    }

    /// Physical `(width, height)` of the screen in millimeters
    #[doc(alias = "GetDeviceCaps")]
    pub fn physical_size(&self) -> (u32, u32) {
        let width = unsafe { GetDeviceCaps(self.hdc, HORZSIZE) };
        let height = unsafe { GetDeviceCaps(self.hdc, VERTSIZE) };
        (width.max(0) as u32, height.max(0) as u32)
    }

    /// The red, green and blue gamma tables currently loaded
    #[doc(alias = "GetDeviceGammaRamp")]
    pub fn gamma_ramp(&self) -> WinResult<[[u16; GAMMA_RAMP_SIZE]; 3]> {
        let mut ramp = [[0u16; GAMMA_RAMP_SIZE]; 3];
        unsafe { GetDeviceGammaRamp(self.hdc, ptr::addr_of_mut!(ramp) as *mut _) }.ok()?;
        Ok(ramp)
    }
}

impl Drop for DeviceContext {
    fn drop(&mut self) {
        let _ = unsafe { DeleteDC(self.hdc) };
    }
}

impl Debug for DeviceContext {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.debug_struct("DeviceContext").field("hdc", &self.hdc).finish()
    }
}
