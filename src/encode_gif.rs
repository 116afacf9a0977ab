use image::{
    Delay, Frame, RgbaImage,
    codecs::gif::{GifEncoder, Repeat},
};

use crate::error::{ChessgifError, ChessgifResult};

/// Duplicates of the final frame appended so the animation visibly pauses on
/// the finished position before looping.
pub const FINAL_HOLD_FRAMES: usize = 3;

/// Encode the frame sequence as one infinitely looping GIF with a uniform
/// per-frame delay.
///
/// The final frame is held [`FINAL_HOLD_FRAMES`] extra times. An empty
/// sequence is a caller contract violation and fails with
/// [`ChessgifError::EmptyFrameSequence`] instead of emitting a degenerate
/// image.
pub fn assemble(frames: Vec<RgbaImage>, duration_ms: u32) -> ChessgifResult<Vec<u8>> {
    if frames.is_empty() {
        return Err(ChessgifError::EmptyFrameSequence);
    }

    let delay = Delay::from_numer_denom_ms(duration_ms, 1);
    let held = frames[frames.len() - 1].clone();
    let total = frames.len() + FINAL_HOLD_FRAMES;

    let mut bytes = Vec::new();
    let mut encoder = GifEncoder::new(&mut bytes);
    encoder
        .set_repeat(Repeat::Infinite)
        .map_err(|e| ChessgifError::encoding(e.to_string()))?;

    for img in frames
        .into_iter()
        .chain(std::iter::repeat_n(held, FINAL_HOLD_FRAMES))
    {
        encoder
            .encode_frame(Frame::from_parts(img, 0, 0, delay))
            .map_err(|e| ChessgifError::encoding(e.to_string()))?;
    }
    drop(encoder);

    tracing::debug!(frames = total, bytes = bytes.len(), "assembled gif");
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn empty_sequence_is_rejected() {
        assert!(matches!(
            assemble(Vec::new(), 400),
            Err(ChessgifError::EmptyFrameSequence)
        ));
    }

    #[test]
    fn output_is_a_gif_byte_stream() {
        let frame = RgbaImage::from_pixel(8, 8, Rgba([10, 20, 30, 255]));
        let bytes = assemble(vec![frame], 400).unwrap();
        assert!(bytes.starts_with(b"GIF89a"));
    }

    #[test]
    fn frame_count_includes_the_held_tail() {
        use image::{AnimationDecoder as _, codecs::gif::GifDecoder};

        let a = RgbaImage::from_pixel(4, 4, Rgba([255, 0, 0, 255]));
        let b = RgbaImage::from_pixel(4, 4, Rgba([0, 0, 255, 255]));
        let bytes = assemble(vec![a, b], 100).unwrap();

        let decoder = GifDecoder::new(std::io::Cursor::new(bytes)).unwrap();
        let decoded = decoder.into_frames().collect_frames().unwrap();
        assert_eq!(decoded.len(), 2 + FINAL_HOLD_FRAMES);
    }
}
