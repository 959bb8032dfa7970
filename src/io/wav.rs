use std::io::Write;
use std::path::Path;

use tracing::info;

use crate::error::{PendulumError, Result};
use crate::sonify::StereoBuffer;

const CHANNELS: u16 = 2;
const BITS_PER_SAMPLE: u16 = 16;

/// Quantize one sample: clamp to [-1, 1], scale by 32767, truncate.
pub fn quantize(v: f64) -> i16 {
    (v.clamp(-1.0, 1.0) * 32767.0) as i16
}

/// Write a 16-bit PCM stereo WAV (RIFF) stream, samples interleaved L, R.
pub fn write_stereo<W: Write>(writer: &mut W, left: &[f64], right: &[f64], sample_rate: u32) -> Result<()> {
    if left.len() != right.len() {
        return Err(PendulumError::out_of_range(
            "right",
            right.len() as f64,
            "channel lengths must match",
        ));
    }

    let block_align = CHANNELS * BITS_PER_SAMPLE / 8;
    let byte_rate = sample_rate
        .checked_mul(block_align as u32)
        .ok_or_else(|| {
            PendulumError::out_of_range("sample_rate", sample_rate as f64, "byte rate exceeds 32 bits")
        })?;
    let (data_len, riff_len) = chunk_sizes(left.len())?;

    // RIFF header
    writer.write_all(b"RIFF")?;
    writer.write_all(&riff_len.to_le_bytes())?;
    writer.write_all(b"WAVE")?;

    // fmt chunk (PCM)
    writer.write_all(b"fmt ")?;
    writer.write_all(&16u32.to_le_bytes())?;
    writer.write_all(&1u16.to_le_bytes())?;
    writer.write_all(&CHANNELS.to_le_bytes())?;
    writer.write_all(&sample_rate.to_le_bytes())?;
    writer.write_all(&byte_rate.to_le_bytes())?;
    writer.write_all(&block_align.to_le_bytes())?;
    writer.write_all(&BITS_PER_SAMPLE.to_le_bytes())?;

    // data chunk
    writer.write_all(b"data")?;
    writer.write_all(&data_len.to_le_bytes())?;
    for (l, r) in left.iter().zip(right) {
        writer.write_all(&quantize(*l).to_le_bytes())?;
        writer.write_all(&quantize(*r).to_le_bytes())?;
    }
    Ok(())
}

/// Data chunk size and RIFF chunk size for `frames` stereo frames; both
/// must fit the 32-bit size fields.
fn chunk_sizes(frames: usize) -> Result<(u32, u32)> {
    let too_long = || {
        PendulumError::out_of_range("frames", frames as f64, "audio exceeds the 4 GiB WAV limit")
    };
    let data_len = frames
        .checked_mul((CHANNELS * BITS_PER_SAMPLE / 8) as usize)
        .and_then(|bytes| u32::try_from(bytes).ok())
        .ok_or_else(too_long)?;
    let riff_len = data_len.checked_add(36).ok_or_else(too_long)?;
    Ok((data_len, riff_len))
}

/// Write a stereo buffer to a WAV file.
pub fn write_wav_file(path: impl AsRef<Path>, buf: &StereoBuffer) -> Result<()> {
    let path = path.as_ref();
    let mut file = std::io::BufWriter::new(std::fs::File::create(path)?);
    write_stereo(&mut file, &buf.left, &buf.right, buf.sample_rate)?;
    file.flush()?;
    info!(
        path = %path.display(),
        seconds = format!("{:.2}", buf.duration()),
        "Wrote WAV"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantize_clamps_and_truncates() {
        assert_eq!(quantize(0.0), 0);
        assert_eq!(quantize(1.0), 32767);
        assert_eq!(quantize(2.5), 32767);
        assert_eq!(quantize(-1.0), -32767);
        assert_eq!(quantize(-7.0), -32767);
        assert_eq!(quantize(0.5), 16383);
        assert_eq!(quantize(-0.5), -16383);
    }

    #[test]
    fn header_and_interleaving() {
        let mut buf: Vec<u8> = Vec::new();
        write_stereo(&mut buf, &[1.0, 0.0], &[-1.0, 0.5], 8000).unwrap();

        assert_eq!(buf.len(), 44 + 8);
        assert_eq!(&buf[0..4], b"RIFF");
        assert_eq!(u32::from_le_bytes([buf[4], buf[5], buf[6], buf[7]]), 36 + 8);
        assert_eq!(&buf[8..16], b"WAVEfmt ");
        assert_eq!(u16::from_le_bytes([buf[22], buf[23]]), 2); // channels
        assert_eq!(u32::from_le_bytes([buf[24], buf[25], buf[26], buf[27]]), 8000);
        assert_eq!(u32::from_le_bytes([buf[28], buf[29], buf[30], buf[31]]), 32000); // byte rate
        assert_eq!(u16::from_le_bytes([buf[34], buf[35]]), 16);
        assert_eq!(&buf[36..40], b"data");

        let samples: Vec<i16> = buf[44..]
            .chunks(2)
            .map(|c| i16::from_le_bytes([c[0], c[1]]))
            .collect();
        assert_eq!(samples, vec![32767, -32767, 0, 16383]);
    }

    #[test]
    fn chunk_sizes_stop_at_32_bits() {
        assert_eq!(chunk_sizes(2).unwrap(), (8, 44));
        // 4 bytes per frame: the largest data chunk whose RIFF size still fits
        let max_frames = (u32::MAX as usize - 36) / 4;
        assert!(chunk_sizes(max_frames).is_ok());
        assert!(matches!(chunk_sizes(max_frames + 1), Err(PendulumError::OutOfRange { .. })));
        assert!(matches!(chunk_sizes(usize::MAX), Err(PendulumError::OutOfRange { .. })));
    }

    #[test]
    fn mismatched_channels_rejected() {
        let err = write_stereo(&mut Vec::<u8>::new(), &[0.0], &[], 44_100).unwrap_err();
        assert!(matches!(err, PendulumError::OutOfRange { .. }));
    }
}
