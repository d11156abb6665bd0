use ballotpress_types::Rect;

/// Adjacent items share one point so a contest's bottom rule and the next top rule overlap.
pub const BORDER_OVERLAP: f32 = 1.0;

pub struct BreakAnalysis {
    pub should_break: bool,
    pub remaining_height: f32,
}

/// Centralized logic to check if a child fits in the remaining space.
///
/// * `cursor_y`: The current Y position measured down from the top of the container bounds.
/// * `child_height`: The required height for the child.
/// * `bounds`: The bounds of the current container.
pub fn check_child_fit(cursor_y: f32, child_height: f32, bounds: Rect) -> BreakAnalysis {
    let available = (bounds.height - cursor_y).max(0.0);
    // Use a small epsilon to handle floating point inaccuracies
    const EPSILON: f32 = 0.01;
    BreakAnalysis {
        should_break: child_height > available + EPSILON,
        remaining_height: available,
    }
}

/// Where the flow moved when a column was closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    Column,
    /// All columns were used; the caller must open a new page and call `start_page`.
    Page,
}

/// Column and cursor state for flowing items down a page's columns.
///
/// Coordinates are page space (y grows upward). `y` is the top of the next item.
#[derive(Debug, Clone)]
pub struct ColumnFlow {
    left: f32,
    column_width: f32,
    column_margin: f32,
    column_count: usize,
    top: f32,
    bottom: f32,
    column: usize,
    y: f32,
    column_has_content: bool,
    page_has_content: bool,
}

impl ColumnFlow {
    pub fn new(left: f32, right: f32, column_count: usize, column_margin: f32) -> Self {
        let columns = column_count.max(1);
        let column_width =
            (right - left - column_margin * (columns as f32 - 1.0)) / columns as f32;
        Self {
            left,
            column_width,
            column_margin,
            column_count: columns,
            top: 0.0,
            bottom: 0.0,
            column: 0,
            y: 0.0,
            column_has_content: false,
            page_has_content: false,
        }
    }

    /// Resets to the first column of a fresh page with the given content band.
    pub fn start_page(&mut self, top: f32, bottom: f32) {
        self.top = top;
        self.bottom = bottom;
        self.column = 0;
        self.y = top;
        self.column_has_content = false;
        self.page_has_content = false;
    }

    pub fn x(&self) -> f32 {
        self.left + self.column as f32 * (self.column_width + self.column_margin)
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    /// 0-based index of the current column.
    pub fn column(&self) -> usize {
        self.column
    }

    pub fn column_width(&self) -> f32 {
        self.column_width
    }

    pub fn column_has_content(&self) -> bool {
        self.column_has_content
    }

    pub fn page_has_content(&self) -> bool {
        self.page_has_content
    }

    fn column_bounds(&self) -> Rect {
        Rect::new(
            self.x(),
            self.bottom,
            self.column_width,
            self.top - self.bottom,
        )
    }

    pub fn fits(&self, height: f32) -> BreakAnalysis {
        check_child_fit(self.top - self.y, height, self.column_bounds())
    }

    /// Height available in an empty column.
    pub fn column_height(&self) -> f32 {
        self.top - self.bottom
    }

    pub fn next_column(&mut self) -> Advance {
        if self.column + 1 >= self.column_count {
            return Advance::Page;
        }
        self.column += 1;
        self.y = self.top;
        self.column_has_content = false;
        Advance::Column
    }

    /// Records an item of `height` drawn at the cursor.
    pub fn commit(&mut self, height: f32) {
        self.y -= height;
        self.y += BORDER_OVERLAP;
        self.column_has_content = true;
        self.page_has_content = true;
    }
}
