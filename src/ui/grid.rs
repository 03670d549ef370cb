use ratatui::layout::{Position, Rect};

/// One 1x1 rect per solution cell, in cell order. Hebrew reads right to
/// left, so the first letter sits at the right edge of `area` and the row
/// grows leftwards, with one blank column between letters and three between
/// words. Cells that fall past the left edge come back zero-sized.
pub fn cell_rects(area: Rect, words: &[String]) -> Vec<Rect> {
    let mut rects = Vec::new();
    let mut x = area.right() as i32;

    for (word_idx, word) in words.iter().enumerate() {
        if word_idx > 0 {
            // widen the letter gap into a word gap
            x -= 2;
        }
        for _ in word.chars() {
            x -= 1;
            let col = x;
            x -= 1;
            if col >= area.x as i32 {
                rects.push(Rect::new(col as u16, area.y, 1, 1));
            } else {
                rects.push(Rect::ZERO);
            }
        }
    }

    rects
}

/// map a click position back to the cell it landed on
pub fn hit_cell(rects: &[Rect], column: u16, row: u16) -> Option<usize> {
    rects
        .iter()
        .position(|rect| rect.contains(Position::new(column, row)))
}
