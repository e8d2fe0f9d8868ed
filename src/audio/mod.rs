//! Audio container handling for speech-provider output.

pub mod wav;

pub use wav::{encode_wav, extension_for_mime, PcmFormat};
