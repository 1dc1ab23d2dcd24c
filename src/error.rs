use crate::geometry::SurfaceSize;
use crate::model::{DeskId, Ms};

#[derive(Debug, Clone, PartialEq)]
pub enum ViewError {
    MissingContainer,
    NoQuery,
    NotLaidOut(Option<SurfaceSize>),
    InvertedSpan { start: Ms, end: Ms },
    SurfaceDisposed,
    UnknownDesk(DeskId),
}

impl std::fmt::Display for ViewError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ViewError::MissingContainer => write!(f, "no container attached"),
            ViewError::NoQuery => write!(f, "no query interval selected"),
            ViewError::NotLaidOut(None) => write!(f, "container has no measurable size yet"),
            ViewError::NotLaidOut(Some(size)) => {
                write!(f, "container not laid out: {}x{}", size.width, size.height)
            }
            ViewError::InvertedSpan { start, end } => {
                write!(f, "inverted interval: start {start} is after end {end}")
            }
            ViewError::SurfaceDisposed => write!(f, "surface already disposed"),
            ViewError::UnknownDesk(id) => write!(f, "unknown desk: {id}"),
        }
    }
}

impl std::error::Error for ViewError {}
