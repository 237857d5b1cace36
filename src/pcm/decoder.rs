//! Streaming frame decoder with carry-over of incomplete frames.

use bytes::BytesMut;

use super::format::SampleFormat;

/// Splits an unbounded byte stream into interleaved frames and decodes them.
///
/// Bytes that do not complete a frame are kept until the next `push`, so a
/// stream can be cut anywhere without losing or corrupting samples.
#[derive(Debug)]
pub struct FrameDecoder {
    format: SampleFormat,
    channels: usize,
    /// Bytes received but not yet decoded, always shorter than one frame
    pending: BytesMut,
    /// Decoded samples of the current frame, one per channel
    frame: Vec<i64>,
}

impl FrameDecoder {
    pub fn new(format: SampleFormat, channels: usize) -> Self {
        let frame_bytes = format.word_bytes * channels;
        Self {
            format,
            channels,
            pending: BytesMut::with_capacity(frame_bytes),
            frame: vec![0; channels],
        }
    }

    /// Size of one interleaved frame in bytes.
    pub fn frame_bytes(&self) -> usize {
        self.format.word_bytes * self.channels
    }

    /// Bytes carried over from previous calls.
    pub fn pending(&self) -> &[u8] {
        &self.pending
    }

    /// Decode every complete frame in `pending ++ chunk`, calling `on_frame`
    /// with the frame's samples in channel order.
    pub fn push<F>(&mut self, mut chunk: &[u8], mut on_frame: F)
    where
        F: FnMut(&[i64]),
    {
        let frame_bytes = self.frame_bytes();

        // Complete the frame left over from the previous call first
        if !self.pending.is_empty() {
            let missing = frame_bytes - self.pending.len();
            if chunk.len() < missing {
                self.pending.extend_from_slice(chunk);
                return;
            }
            self.pending.extend_from_slice(&chunk[..missing]);
            chunk = &chunk[missing..];

            decode_frame(&self.pending, self.format, &mut self.frame);
            on_frame(&self.frame);
            self.pending.clear();
        }

        let mut frames = chunk.chunks_exact(frame_bytes);
        for bytes in &mut frames {
            decode_frame(bytes, self.format, &mut self.frame);
            on_frame(&self.frame);
        }
        self.pending.extend_from_slice(frames.remainder());
    }
}

fn decode_frame(bytes: &[u8], format: SampleFormat, out: &mut [i64]) {
    for (word, sample) in bytes.chunks_exact(format.word_bytes).zip(out.iter_mut()) {
        *sample = format.decode(word);
    }
}
