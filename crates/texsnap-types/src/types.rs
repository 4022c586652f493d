use std::fmt;
use std::ops::{Add, Sub};
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Replay pointer events over a captured screen and recognize the selection
    CaptureRegion {
        source: ImageSource,
        events: Vec<PointerEvent>,
    },
    /// Upload an existing image file
    RecognizeFile(PathBuf),
    /// Save the document, optionally under a new path
    SaveDocument(Option<PathBuf>),
    CopyDocument,
    StatusUpdate {
        status: String,
        busy: bool,
    },
    /// A request could not be completed; the app keeps running
    Failed {
        reason: String,
    },
    FormulaRecognized(Recognition),
    DocumentSaved(PathBuf),
    /// Acknowledges that one front-end request has been fully handled
    RequestDone,
}

/// Where the full-screen bitmap of a capture session comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    File(PathBuf),
    Screen,
}

/// Integer point in screen pixel coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    /// Marker for a drag endpoint that has not been set yet
    pub const UNSET: Point = Point { x: -1, y: -1 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn is_unset(&self) -> bool {
        *self == Self::UNSET
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenSize {
    pub width: u32,
    pub height: u32,
}

impl ScreenSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Confirmed selection in screen pixels, ready for cropping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl CropRect {
    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }
}

impl fmt::Display for CropRect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}+{}+{}", self.width, self.height, self.x, self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Down,
    Move,
    Up,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub point: Point,
}

impl PointerEvent {
    pub fn down(x: i32, y: i32) -> Self {
        Self {
            kind: PointerKind::Down,
            point: Point::new(x, y),
        }
    }

    pub fn moved(x: i32, y: i32) -> Self {
        Self {
            kind: PointerKind::Move,
            point: Point::new(x, y),
        }
    }

    pub fn up(x: i32, y: i32) -> Self {
        Self {
            kind: PointerKind::Up,
            point: Point::new(x, y),
        }
    }

    /// A complete press-drag-release gesture from `from` to `to`
    pub fn drag(from: Point, to: Point) -> Vec<PointerEvent> {
        vec![
            Self::down(from.x, from.y),
            Self::moved(to.x, to.y),
            Self::up(to.x, to.y),
        ]
    }
}

/// How a recognized formula lands in the document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsertMode {
    /// Replace the whole document with the formula
    #[default]
    Replace,
    /// Append the formula as a new paragraph
    Append,
}

/// Formula returned by the recognition service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recognition {
    pub latex: String,
    /// 0.0 to 1.0
    pub confidence: f32,
    pub request_id: Option<String>,
}

impl Recognition {
    /// Confidence as a whole percentage
    pub fn score_percent(&self) -> u8 {
        (self.confidence * 100.0).round().clamp(0.0, 100.0) as u8
    }
}
