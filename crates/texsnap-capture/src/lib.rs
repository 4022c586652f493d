mod capture;
mod session;

pub use capture::{
    BitmapSource, CaptureError, FileSource, capture_file_name, crop, encode_png, screen_size,
};
#[cfg(feature = "screen")]
pub use capture::MonitorSource;
pub use session::{CaptureSession, CapturedImage};
