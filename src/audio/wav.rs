//! Raw-PCM-to-WAV container encoding.
//!
//! The speech provider streams raw linear PCM with a MIME descriptor like
//! `audio/L16;codec=pcm;rate=24000`. When the declared type maps to no known
//! file extension, the bytes get wrapped in a standard single-channel RIFF
//! container before being written to disk. When a standard extension is
//! resolvable the provider is assumed to have produced a complete container
//! already and the bytes are written through unmodified. This is an
//! extension-table heuristic, not a content sniff: an unrecognized but
//! already-wrapped format would be double-wrapped.

/// Sample parameters extracted from a MIME descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PcmFormat {
    /// Sample rate in Hz
    pub sample_rate: u32,

    /// Bits per sample
    pub bits_per_sample: u16,
}

impl Default for PcmFormat {
    fn default() -> Self {
        Self {
            sample_rate: 24_000,
            bits_per_sample: 16,
        }
    }
}

impl PcmFormat {
    /// Parse sample parameters from a `type/subtype;param=value;...` MIME
    /// descriptor.
    ///
    /// The sample rate comes from a `rate=` parameter and the bit depth from
    /// the numeral suffix of an `audio/L<N>` token. Missing or unparseable
    /// values silently fall back to the defaults (24000 Hz, 16 bit) — there
    /// is no validation against the payload's true format.
    pub fn parse(mime_type: &str) -> Self {
        let mut format = Self::default();

        for param in mime_type.split(';') {
            let param = param.trim();
            if let Some(rate_str) = param
                .to_ascii_lowercase()
                .strip_prefix("rate=")
                .map(str::to_string)
            {
                if let Ok(rate) = rate_str.parse::<u32>() {
                    format.sample_rate = rate;
                }
            } else if let Some(bits_str) = param.strip_prefix("audio/L") {
                if let Ok(bits) = bits_str.parse::<u16>() {
                    format.bits_per_sample = bits;
                }
            }
        }

        format
    }

    /// Bytes per sample frame (mono: one sample per frame)
    pub fn block_align(&self) -> u16 {
        self.bits_per_sample / 8
    }

    /// Bytes of audio per second
    pub fn byte_rate(&self) -> u32 {
        self.sample_rate * u32::from(self.block_align())
    }
}

/// Number of channels the provider delivers (mono)
const NUM_CHANNELS: u16 = 1;

/// RIFF header length excluding the leading ChunkID + ChunkSize pair
const HEADER_BODY_SIZE: u32 = 36;

/// Wrap raw mono PCM bytes in a RIFF/WAVE container.
///
/// The payload is appended verbatim; the header's declared sizes are always
/// consistent with the payload length and the sample parameters.
pub fn encode_wav(pcm: &[u8], format: PcmFormat) -> Vec<u8> {
    let data_size = pcm.len() as u32;

    let mut buf = Vec::with_capacity(44 + pcm.len());
    buf.extend_from_slice(b"RIFF");
    buf.extend_from_slice(&(HEADER_BODY_SIZE + data_size).to_le_bytes());
    buf.extend_from_slice(b"WAVE");
    buf.extend_from_slice(b"fmt ");
    buf.extend_from_slice(&16u32.to_le_bytes()); // Subchunk1Size for PCM
    buf.extend_from_slice(&1u16.to_le_bytes()); // AudioFormat: uncompressed
    buf.extend_from_slice(&NUM_CHANNELS.to_le_bytes());
    buf.extend_from_slice(&format.sample_rate.to_le_bytes());
    buf.extend_from_slice(&format.byte_rate().to_le_bytes());
    buf.extend_from_slice(&format.block_align().to_le_bytes());
    buf.extend_from_slice(&format.bits_per_sample.to_le_bytes());
    buf.extend_from_slice(b"data");
    buf.extend_from_slice(&data_size.to_le_bytes());
    buf.extend_from_slice(pcm);
    buf
}

/// Map a declared content type to a known audio file extension.
///
/// Returns `None` for raw-PCM descriptors like `audio/L16;rate=24000`, which
/// is the signal to apply [`encode_wav`].
pub fn extension_for_mime(mime_type: &str) -> Option<&'static str> {
    let essence = mime_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase();

    match essence.as_str() {
        "audio/wav" | "audio/x-wav" | "audio/wave" => Some("wav"),
        "audio/mpeg" | "audio/mp3" => Some("mp3"),
        "audio/ogg" | "application/ogg" => Some("ogg"),
        "audio/flac" | "audio/x-flac" => Some("flac"),
        "audio/aac" => Some("aac"),
        "audio/opus" => Some("opus"),
        "audio/webm" => Some("webm"),
        "audio/mp4" | "audio/x-m4a" => Some("m4a"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn u32_at(buf: &[u8], offset: usize) -> u32 {
        u32::from_le_bytes(buf[offset..offset + 4].try_into().unwrap())
    }

    fn u16_at(buf: &[u8], offset: usize) -> u16 {
        u16::from_le_bytes(buf[offset..offset + 2].try_into().unwrap())
    }

    #[test]
    fn test_parse_l16_24000() {
        let format = PcmFormat::parse("audio/L16;rate=24000");
        assert_eq!(format.bits_per_sample, 16);
        assert_eq!(format.sample_rate, 24_000);
    }

    #[test]
    fn test_parse_l24_48000() {
        let format = PcmFormat::parse("audio/L24;rate=48000");
        assert_eq!(format.bits_per_sample, 24);
        assert_eq!(format.sample_rate, 48_000);
    }

    #[test]
    fn test_parse_missing_params_uses_defaults() {
        let format = PcmFormat::parse("audio/pcm");
        assert_eq!(format, PcmFormat::default());
        assert_eq!(format.bits_per_sample, 16);
        assert_eq!(format.sample_rate, 24_000);
    }

    #[test]
    fn test_parse_unparseable_rate_falls_back() {
        let format = PcmFormat::parse("audio/L16;rate=abc");
        assert_eq!(format.sample_rate, 24_000);
        assert_eq!(format.bits_per_sample, 16);
    }

    #[test]
    fn test_parse_ignores_extra_params() {
        let format = PcmFormat::parse("audio/L16;codec=pcm;rate=24000");
        assert_eq!(format.bits_per_sample, 16);
        assert_eq!(format.sample_rate, 24_000);
    }

    #[test]
    fn test_header_fields() {
        let pcm = vec![0u8; 1000];
        let wav = encode_wav(&pcm, PcmFormat::parse("audio/L16;rate=24000"));

        assert_eq!(&wav[0..4], b"RIFF");
        assert_eq!(u32_at(&wav, 4), 36 + 1000); // ChunkSize
        assert_eq!(&wav[8..12], b"WAVE");
        assert_eq!(&wav[12..16], b"fmt ");
        assert_eq!(u32_at(&wav, 16), 16); // Subchunk1Size
        assert_eq!(u16_at(&wav, 20), 1); // AudioFormat: PCM
        assert_eq!(u16_at(&wav, 22), 1); // NumChannels
        assert_eq!(u32_at(&wav, 24), 24_000); // SampleRate
        assert_eq!(u32_at(&wav, 28), 48_000); // ByteRate
        assert_eq!(u16_at(&wav, 32), 2); // BlockAlign
        assert_eq!(u16_at(&wav, 34), 16); // BitsPerSample
        assert_eq!(&wav[36..40], b"data");
        assert_eq!(u32_at(&wav, 40), 1000); // Subchunk2Size
        assert_eq!(&wav[44..], &pcm[..]);
    }

    #[test]
    fn test_sizes_hold_for_any_payload_length() {
        for n in [0usize, 1, 2, 3, 44, 999, 48_000] {
            let pcm = vec![0xA5u8; n];
            let wav = encode_wav(&pcm, PcmFormat::default());
            assert_eq!(wav.len(), 44 + n);
            assert_eq!(u32_at(&wav, 4) as usize, 36 + n);
            assert_eq!(u32_at(&wav, 40) as usize, n);
        }
    }

    #[test]
    fn test_byte_rate_and_block_align_relation() {
        for (rate, bits) in [(8_000u32, 8u16), (24_000, 16), (48_000, 24), (44_100, 32)] {
            let format = PcmFormat {
                sample_rate: rate,
                bits_per_sample: bits,
            };
            assert_eq!(format.block_align(), bits / 8);
            assert_eq!(format.byte_rate(), rate * u32::from(bits / 8));
        }
    }

    #[test]
    fn test_encoding_is_deterministic() {
        let pcm: Vec<u8> = (0..=255).collect();
        let format = PcmFormat::parse("audio/L24;rate=48000");
        assert_eq!(encode_wav(&pcm, format), encode_wav(&pcm, format));
    }

    #[test]
    fn test_extension_mapping() {
        assert_eq!(extension_for_mime("audio/wav"), Some("wav"));
        assert_eq!(extension_for_mime("audio/mpeg"), Some("mp3"));
        assert_eq!(extension_for_mime("audio/ogg; codecs=opus"), Some("ogg"));
        assert_eq!(extension_for_mime("audio/L16;rate=24000"), None);
        assert_eq!(extension_for_mime("application/octet-stream"), None);
    }
}
