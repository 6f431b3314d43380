//! # Windows Spooler Transport
//!
//! Buffers the job and submits it as a single RAW document through the
//! Win32 print spooler when finished. Only available on Windows; opening it
//! elsewhere is an invalid descriptor.

use crate::error::{Result, StrukError};

/// Raw job for a Windows printer queue
pub struct WindowsTransport {
    printer: String,
    buf: Vec<u8>,
    submitted: bool,
}

impl WindowsTransport {
    #[cfg(windows)]
    pub fn open(printer: &str) -> Result<Self> {
        let printer = printer.trim();
        if printer.is_empty() {
            return Err(StrukError::InvalidTransportDescriptor(
                "windows transport needs a printer name".to_string(),
            ));
        }
        Ok(Self {
            printer: printer.to_string(),
            buf: Vec::new(),
            submitted: false,
        })
    }

    #[cfg(not(windows))]
    pub fn open(printer: &str) -> Result<Self> {
        Err(StrukError::InvalidTransportDescriptor(format!(
            "windows transport for '{}' requires a Windows host",
            printer
        )))
    }

    pub fn printer(&self) -> &str {
        &self.printer
    }

    pub fn write_all(&mut self, data: &[u8]) -> Result<()> {
        if self.submitted {
            return Err(StrukError::Transport("Windows job already submitted".to_string()));
        }
        self.buf.extend_from_slice(data);
        Ok(())
    }

    pub fn finish(&mut self) -> Result<()> {
        if self.submitted {
            return Ok(());
        }
        self.submitted = true;
        if self.buf.is_empty() {
            return Ok(());
        }
        spool(&self.printer, &self.buf)
    }
}

#[cfg(windows)]
fn spool(name: &str, data: &[u8]) -> Result<()> {
    use core::ffi::c_void;
    use windows::Win32::Graphics::Printing::{
        ClosePrinter, DOC_INFO_1W, EndDocPrinter, EndPagePrinter, OpenPrinterW, PRINTER_HANDLE,
        StartDocPrinterW, StartPagePrinter, WritePrinter,
    };
    use windows::core::{PCWSTR, PWSTR};

    fn to_wide(s: &str) -> Vec<u16> {
        s.encode_utf16().chain(std::iter::once(0)).collect()
    }

    let spooler = |msg: &str| StrukError::Transport(format!("{} ({})", msg, name));

    unsafe {
        let mut handle: PRINTER_HANDLE = PRINTER_HANDLE::default();
        let name_w = to_wide(name);

        OpenPrinterW(PCWSTR::from_raw(name_w.as_ptr()), &mut handle, None)
            .map_err(|_| spooler("OpenPrinterW failed"))?;

        let doc_name_w = to_wide("Receipt");
        let datatype_w = to_wide("RAW");
        let doc_info = DOC_INFO_1W {
            pDocName: PWSTR(doc_name_w.as_ptr() as *mut _),
            pOutputFile: PWSTR::null(),
            pDatatype: PWSTR(datatype_w.as_ptr() as *mut _),
        };

        if StartDocPrinterW(handle, 1, &doc_info as *const DOC_INFO_1W) == 0 {
            let _ = ClosePrinter(handle);
            return Err(spooler("StartDocPrinter failed"));
        }

        if !StartPagePrinter(handle).as_bool() {
            let _ = EndDocPrinter(handle);
            let _ = ClosePrinter(handle);
            return Err(spooler("StartPagePrinter failed"));
        }

        let mut written: u32 = 0;
        let ok = WritePrinter(
            handle,
            data.as_ptr() as *const c_void,
            data.len() as u32,
            &mut written,
        );

        let _ = EndPagePrinter(handle);
        let _ = EndDocPrinter(handle);
        let _ = ClosePrinter(handle);

        if !ok.as_bool() {
            return Err(spooler("WritePrinter failed"));
        }
        if written != data.len() as u32 {
            return Err(spooler("Incomplete write"));
        }
    }

    Ok(())
}

#[cfg(not(windows))]
fn spool(name: &str, _data: &[u8]) -> Result<()> {
    Err(StrukError::Transport(format!(
        "cannot spool to '{}' without a Windows host",
        name
    )))
}

#[cfg(all(test, not(windows)))]
mod tests {
    use super::*;

    #[test]
    fn test_unavailable_off_windows() {
        let err = WindowsTransport::open("POS-80").err().unwrap();
        assert!(matches!(err, StrukError::InvalidTransportDescriptor(_)));
    }
}
