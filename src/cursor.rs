use crate::puzzle::SolutionCell;

pub fn first_editable(cells: &[SolutionCell]) -> Option<usize> {
    cells.iter().position(|c| !c.is_const)
}

pub fn last_editable(cells: &[SolutionCell]) -> Option<usize> {
    cells.iter().rposition(|c| !c.is_const)
}

/// nearest editable cell after the cursor, clamped to the last editable
pub fn move_forward(cells: &[SolutionCell], cursor: usize) -> usize {
    cells
        .get(cursor + 1..)
        .and_then(|rest| rest.iter().position(|c| !c.is_const))
        .map(|offset| cursor + 1 + offset)
        .or_else(|| last_editable(cells))
        .unwrap_or(cursor)
}

/// nearest editable cell before the cursor, clamped to the first editable
pub fn move_backwards(cells: &[SolutionCell], cursor: usize) -> usize {
    cells
        .get(..cursor)
        .and_then(|before| before.iter().rposition(|c| !c.is_const))
        .or_else(|| first_editable(cells))
        .unwrap_or(cursor)
}
