//! # Native QR Codes (GS ( k)
//!
//! The printer builds the QR symbol itself; we only send the payload and
//! its parameters. Sequence: select model 2, set module size, set error
//! correction, store data, print.

use serde::{Deserialize, Serialize};

use super::commands::GS;

/// QR error correction level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum QrErrorLevel {
    /// ~7% recovery
    #[default]
    L,
    /// ~15% recovery
    M,
    /// ~25% recovery
    Q,
    /// ~30% recovery
    H,
}

impl QrErrorLevel {
    fn code(self) -> u8 {
        match self {
            Self::L => b'0',
            Self::M => b'1',
            Self::Q => b'2',
            Self::H => b'3',
        }
    }
}

/// `GS ( k pL pH cn fn [params]` with cn = 49 (QR)
fn function(fn_code: u8, params: &[u8]) -> Vec<u8> {
    let len = (params.len() + 2) as u16;
    let mut cmd = vec![GS, b'(', b'k', len as u8, (len >> 8) as u8, b'1', fn_code];
    cmd.extend_from_slice(params);
    cmd
}

/// Full command sequence for one QR code.
///
/// `module_size` is clamped to 1..=16 dots. Payloads longer than the
/// store-data limit are cut at 7089 bytes.
pub fn qr_code(data: &str, error_level: QrErrorLevel, module_size: u8) -> Vec<u8> {
    let bytes = &data.as_bytes()[..data.len().min(7089)];
    let mut cmd = Vec::with_capacity(bytes.len() + 40);

    // 165: model 2
    cmd.extend(function(b'A', &[b'2', 0]));
    // 167: module size
    cmd.extend(function(b'C', &[module_size.clamp(1, 16)]));
    // 169: error correction
    cmd.extend(function(b'E', &[error_level.code()]));
    // 180: store data
    let mut store = vec![b'0'];
    store.extend_from_slice(bytes);
    cmd.extend(function(b'P', &store));
    // 181: print
    cmd.extend(function(b'Q', &[b'0']));
    cmd
}
