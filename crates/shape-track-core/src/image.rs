/// Errors produced when constructing image buffers from raw data.
#[derive(thiserror::Error, Debug)]
pub enum ImageError {
    #[error("invalid buffer length (expected {expected} bytes, got {got})")]
    InvalidBufferLength { expected: usize, got: usize },

    #[error("invalid image dimensions (width={width}, height={height})")]
    InvalidDimensions { width: usize, height: usize },
}

/// Owned color frame: row-major, 3 bytes per pixel (RGB).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RgbFrame {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>, // len = w*h*3
}

impl RgbFrame {
    /// All-black frame of the given size.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0; width * height * 3],
        }
    }

    /// Wrap a raw interleaved RGB buffer, validating its length.
    pub fn from_raw(width: usize, height: usize, data: Vec<u8>) -> Result<Self, ImageError> {
        if width == 0 || height == 0 {
            return Err(ImageError::InvalidDimensions { width, height });
        }
        let expected = width * height * 3;
        if data.len() != expected {
            return Err(ImageError::InvalidBufferLength {
                expected,
                got: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> [u8; 3] {
        let i = (y * self.width + x) * 3;
        [self.data[i], self.data[i + 1], self.data[i + 2]]
    }

    #[inline]
    pub fn set_pixel(&mut self, x: usize, y: usize, rgb: [u8; 3]) {
        let i = (y * self.width + x) * 3;
        self.data[i..i + 3].copy_from_slice(&rgb);
    }
}

/// Single-channel binary mask, same dimensions as the frame it derives from.
///
/// A pixel is "set" when its byte is non-zero; `threshold` writes 255.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mask {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>, // len = w*h
}

impl Mask {
    /// All-zero mask of the given size.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0; width * height],
        }
    }

    /// Wrap a raw single-channel buffer, validating its length.
    pub fn from_raw(width: usize, height: usize, data: Vec<u8>) -> Result<Self, ImageError> {
        if width == 0 || height == 0 {
            return Err(ImageError::InvalidDimensions { width, height });
        }
        let expected = width * height;
        if data.len() != expected {
            return Err(ImageError::InvalidBufferLength {
                expected,
                got: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height && self.data[y * self.width + x] != 0
    }

    /// Signed-coordinate accessor; out-of-image pixels read as unset.
    #[inline]
    pub fn get_signed(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 {
            return false;
        }
        self.get(x as usize, y as usize)
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize) {
        self.data[y * self.width + x] = 255;
    }

    /// Number of set pixels.
    pub fn count_set(&self) -> usize {
        self.data.iter().filter(|&&v| v != 0).count()
    }
}
