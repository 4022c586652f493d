pub mod confidence;
pub mod document;
pub mod error;
pub mod region;

pub use confidence::{confidence_from_json, parse_confidence};
pub use document::Document;
pub use error::{DocumentError, ParseError, SelectionError};
pub use region::{CaptureRegion, RegionMode};
