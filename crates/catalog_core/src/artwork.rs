use crate::ImageBytes;

/// Which list layout a row belongs to. Each surface recycles rows independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ListSurface {
    Table,
    Grid,
}

/// A visible row position. A slot owns at most one image request at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RowSlot {
    pub surface: ListSurface,
    pub section: usize,
    pub row: usize,
}

impl RowSlot {
    pub fn new(surface: ListSurface, section: usize, row: usize) -> Self {
        Self {
            surface,
            section,
            row,
        }
    }
}

pub type ImageRequestId = u64;

/// What a row should currently show in its image view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Artwork {
    Placeholder,
    Image(ImageBytes),
}
