// Frame buffers and frame sources
// Frames are immutable once constructed; analyzers borrow regions, never copy pixels.

use crate::error::{Result, VeracityError};

/// Rec. 601 luma weights, matching common RGB-to-gray conversions.
const LUMA_R: f64 = 0.299;
const LUMA_G: f64 = 0.587;
const LUMA_B: f64 = 0.114;

/// A decoded video frame: height x width x 3 interleaved 8-bit RGB.
#[derive(Debug, Clone)]
pub struct Frame {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Frame {
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        let expected = width as usize * height as usize * 3;
        if data.len() != expected {
            return Err(VeracityError::InvalidFrame {
                width,
                height,
                len: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Frame filled with a single RGB color. Used by tests and fixtures.
    pub fn solid(width: u32, height: u32, rgb: [u8; 3]) -> Self {
        let mut data = Vec::with_capacity(width as usize * height as usize * 3);
        for _ in 0..(width as usize * height as usize) {
            data.extend_from_slice(&rgb);
        }
        Self {
            width,
            height,
            data,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// RGB pixel at (x, y). Caller must stay in bounds.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        let i = (y as usize * self.width as usize + x as usize) * 3;
        [self.data[i], self.data[i + 1], self.data[i + 2]]
    }

    /// Single-channel luminance of the whole frame, row-major.
    pub fn luminance(&self) -> Vec<f64> {
        luminance_of(&self.data, self.width as usize * self.height as usize)
    }

    /// Borrow a rectangular region, clipped to the frame bounds.
    pub fn region(&self, frame_index: usize, x: u32, y: u32, width: u32, height: u32) -> FrameRegion<'_> {
        let x = x.min(self.width);
        let y = y.min(self.height);
        let width = width.min(self.width - x);
        let height = height.min(self.height - y);
        FrameRegion {
            frame: self,
            frame_index,
            x,
            y,
            width,
            height,
        }
    }
}

fn luminance_of(rgb: &[u8], pixels: usize) -> Vec<f64> {
    let mut out = Vec::with_capacity(pixels);
    for p in rgb.chunks_exact(3) {
        out.push(LUMA_R * p[0] as f64 + LUMA_G * p[1] as f64 + LUMA_B * p[2] as f64);
    }
    out
}

/// A rectangular view into a frame, tagged with the originating frame index.
#[derive(Debug, Clone, Copy)]
pub struct FrameRegion<'a> {
    frame: &'a Frame,
    pub frame_index: usize,
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl FrameRegion<'_> {
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Luminance grid of the region, row-major, `width * height` values.
    pub fn luminance(&self) -> Vec<f64> {
        let mut out = Vec::with_capacity(self.width as usize * self.height as usize);
        for row in self.y..self.y + self.height {
            for col in self.x..self.x + self.width {
                let [r, g, b] = self.frame.pixel(col, row);
                out.push(LUMA_R * r as f64 + LUMA_G * g as f64 + LUMA_B * b as f64);
            }
        }
        out
    }
}

/// Sequential pull-based frame supply. Decoding is the collaborator's problem;
/// the core only consumes materialized frames.
pub trait FrameSource {
    fn next_frame(&mut self) -> Result<Option<Frame>>;
}

/// In-memory frame source over an owned frame list.
///
/// `fail_after` makes the source error once that many frames have been served,
/// which lets tests exercise partial-stream behavior.
pub struct SliceSource {
    frames: std::vec::IntoIter<Frame>,
    served: usize,
    fail_after: Option<usize>,
}

impl SliceSource {
    pub fn new(frames: Vec<Frame>) -> Self {
        Self {
            frames: frames.into_iter(),
            served: 0,
            fail_after: None,
        }
    }

    pub fn failing_after(frames: Vec<Frame>, fail_after: usize) -> Self {
        Self {
            frames: frames.into_iter(),
            served: 0,
            fail_after: Some(fail_after),
        }
    }
}

impl FrameSource for SliceSource {
    fn next_frame(&mut self) -> Result<Option<Frame>> {
        if let Some(limit) = self.fail_after {
            if self.served >= limit {
                return Err(VeracityError::FrameDecode(format!(
                    "decode failed after {} frames",
                    self.served
                )));
            }
        }
        let frame = self.frames.next();
        if frame.is_some() {
            self.served += 1;
        }
        Ok(frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_rejects_short_buffer() {
        let result = Frame::new(4, 4, vec![0u8; 10]);
        assert!(result.is_err());
    }

    #[test]
    fn test_solid_frame_luminance() {
        let frame = Frame::solid(8, 8, [128, 128, 128]);
        let luma = frame.luminance();
        assert_eq!(luma.len(), 64);
        assert!((luma[0] - 128.0).abs() < 0.01);
    }

    #[test]
    fn test_region_clips_to_bounds() {
        let frame = Frame::solid(10, 10, [0, 0, 0]);
        let region = frame.region(0, 8, 8, 10, 10);
        assert_eq!(region.width, 2);
        assert_eq!(region.height, 2);
        assert_eq!(region.luminance().len(), 4);
    }

    #[test]
    fn test_region_fully_outside_is_empty() {
        let frame = Frame::solid(10, 10, [0, 0, 0]);
        let region = frame.region(0, 10, 10, 5, 5);
        assert!(region.is_empty());
    }

    #[test]
    fn test_slice_source_serves_in_order() {
        let frames = vec![Frame::solid(2, 2, [1, 1, 1]), Frame::solid(2, 2, [2, 2, 2])];
        let mut source = SliceSource::new(frames);
        assert_eq!(source.next_frame().unwrap().unwrap().pixel(0, 0)[0], 1);
        assert_eq!(source.next_frame().unwrap().unwrap().pixel(0, 0)[0], 2);
        assert!(source.next_frame().unwrap().is_none());
    }

    #[test]
    fn test_slice_source_fails_after_limit() {
        let frames = vec![Frame::solid(2, 2, [0, 0, 0]); 3];
        let mut source = SliceSource::failing_after(frames, 2);
        assert!(source.next_frame().is_ok());
        assert!(source.next_frame().is_ok());
        assert!(source.next_frame().is_err());
    }
}
