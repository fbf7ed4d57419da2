use plotters::prelude::*;

/// Cycles through a fixed list of colors, one per series
#[derive(Debug, Clone)]
pub struct ColorSource<C: Clone> {
    colors: Vec<C>,
    index: usize,
}
impl<C: Clone> ColorSource<C> {
    /// Create a color source from a list of colors
    ///
    /// # Panics
    /// Panics if `colors` is empty
    #[must_use]
    pub fn new(colors: Vec<C>) -> Self {
        assert!(!colors.is_empty(), "color source needs at least one color");
        Self { colors, index: 0 }
    }

    /// Get the next color, wrapping around at the end of the list
    pub fn next_color(&mut self) -> C {
        let color = self.colors[self.index].clone();
        self.index = (self.index + 1) % self.colors.len();
        color
    }
}
impl Default for ColorSource<RGBColor> {
    /// Mean, +σ, -σ, known samples
    fn default() -> Self {
        Self::new(vec![
            BLUE,
            RGBColor(255, 140, 0), // Orange
            RGBColor(255, 140, 0),
            BLACK,
            RED,
            GREEN,
            MAGENTA,
            CYAN,
        ])
    }
}
