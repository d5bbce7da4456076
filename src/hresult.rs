//! HRESULT status codes returned by the join-info query
//!
//! Sprint 2: raw status propagation
//!
//! `NetGetAadJoinInformation` reports failure through an HRESULT, and the
//! wrapper hands that value through untranslated. Everything here is
//! presentation: a printable hex form, a short symbolic name for the codes
//! the query is known to produce, and (on Windows) the system message text.

use std::fmt;

/// The sole success value. Any other HRESULT is a failure.
pub const S_OK: i32 = 0;

/// A raw HRESULT as returned by the OS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Hresult(pub i32);

impl Hresult {
    /// True for `S_OK` and nothing else.
    pub fn is_ok(self) -> bool {
        self.0 == S_OK
    }

    /// Short symbolic name, when the code is one we recognize.
    pub fn name(self) -> Option<&'static str> {
        hresult_name(self.0)
    }

    /// Message text from the system message table, trimmed of the trailing
    /// newline `FormatMessageW` appends. `None` when the system has no
    /// message for this code.
    #[cfg(windows)]
    pub fn system_message(self) -> Option<String> {
        use windows_sys::Win32::System::Diagnostics::Debug::{
            FormatMessageW, FORMAT_MESSAGE_FROM_SYSTEM, FORMAT_MESSAGE_IGNORE_INSERTS,
        };

        let mut buf = [0u16; 512];
        // SAFETY: buf outlives the call and nsize matches its capacity;
        // no source module or insert arguments are passed.
        let len = unsafe {
            FormatMessageW(
                FORMAT_MESSAGE_FROM_SYSTEM | FORMAT_MESSAGE_IGNORE_INSERTS,
                std::ptr::null(),
                self.0 as u32,
                0,
                buf.as_mut_ptr(),
                buf.len() as u32,
                std::ptr::null(),
            )
        };
        if len == 0 {
            return None;
        }
        let text = String::from_utf16_lossy(&buf[..len as usize]);
        let text = text.trim_end_matches(['\r', '\n', ' ', '.']).to_string();
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

impl fmt::Display for Hresult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{:#010X} ({})", self.0 as u32, name),
            None => write!(f, "{:#010X}", self.0 as u32),
        }
    }
}

/// Map an HRESULT to its symbolic name.
///
/// Covers the generic COM failure codes plus the Win32-wrapped codes the
/// join-info query produces in practice. Returns `None` for anything else;
/// callers fall back to the hex form.
pub fn hresult_name(hr: i32) -> Option<&'static str> {
    let name = match hr as u32 {
        0x0000_0000 => "S_OK",
        0x0000_0001 => "S_FALSE",
        0x8000_4001 => "E_NOTIMPL",
        0x8000_4002 => "E_NOINTERFACE",
        0x8000_4003 => "E_POINTER",
        0x8000_4004 => "E_ABORT",
        0x8000_4005 => "E_FAIL",
        0x8000_FFFF => "E_UNEXPECTED",
        0x8007_0002 => "HRESULT_FROM_WIN32(ERROR_FILE_NOT_FOUND)",
        0x8007_0005 => "E_ACCESSDENIED",
        0x8007_000E => "E_OUTOFMEMORY",
        0x8007_0032 => "HRESULT_FROM_WIN32(ERROR_NOT_SUPPORTED)",
        0x8007_0057 => "E_INVALIDARG",
        0x8007_0490 => "HRESULT_FROM_WIN32(ERROR_NOT_FOUND)",
        0x8007_054B => "HRESULT_FROM_WIN32(ERROR_NO_SUCH_DOMAIN)",
        _ => return None,
    };
    Some(name)
}
