//! Slicing a bulk dump into per-document fragments

use std::str::Split;

/// The declaration that precedes every document embedded in a dump file
pub const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

/// Lazy iterator over the documents of one dump file
///
/// Splits on [`XML_DECLARATION`] without parsing anything. A blank preamble
/// before the first declaration is dropped; any later blank piece is yielded
/// and fails extraction like any other bad document.
/// Cloning restarts from the clone point.
#[derive(Clone)]
pub struct FragmentSplitter<'a> {
    pieces: Split<'a, &'static str>,
    started: bool,
}

impl<'a> FragmentSplitter<'a> {
    /// Split the full text of one file
    pub fn new(text: &'a str) -> Self {
        Self {
            pieces: text.split(XML_DECLARATION),
            started: false,
        }
    }
}

impl<'a> Iterator for FragmentSplitter<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let piece = self.pieces.next()?;
        if !self.started {
            self.started = true;
            if piece.trim().is_empty() {
                return self.pieces.next();
            }
        }
        Some(piece)
    }
}
