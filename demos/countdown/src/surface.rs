//! A headless character-grid surface standing in for a window.

/// A fixed-size grid of characters plus free-form text lines.
#[derive(Debug, Clone)]
pub struct TextSurface {
    width: usize,
    height: usize,
    cells: Vec<char>,
    captions: Vec<String>,
}

impl TextSurface {
    /// Create a blank surface of `width` × `height` cells.
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec!['.'; width * height],
            captions: Vec::new(),
        }
    }

    /// Blank every cell and drop the captions.
    pub fn clear(&mut self) {
        self.cells.fill('.');
        self.captions.clear();
    }

    /// Put `glyph` at cell (`x`, `y`). Out-of-range cells are ignored.
    pub fn plot(&mut self, x: usize, y: usize, glyph: char) {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x] = glyph;
        }
    }

    /// Append a caption line below the grid.
    pub fn caption(&mut self, text: impl Into<String>) {
        self.captions.push(text.into());
    }

    /// The grid rows followed by the captions.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.cells
            .chunks(self.width.max(1))
            .map(|row| row.iter().collect())
            .chain(self.captions.iter().cloned())
            .collect()
    }
}
