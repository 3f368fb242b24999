// Skeleton placeholders shown while the dashboard loads.

use ratatui::{prelude::*, widgets::*};

const GRID_COLUMNS: usize = 4;
const FILTER_CELLS: usize = 6;

fn placeholder(frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let fill = "░".repeat(area.width.saturating_sub(4) as usize);
    let text = Paragraph::new(fill)
        .style(Style::default().fg(Color::DarkGray))
        .block(block);
    frame.render_widget(text, area);
}

/// Draw a filter bar placeholder of the real bar's shape.
pub fn draw_filter_bar(frame: &mut Frame, area: Rect) {
    let row = Rect {
        height: area.height.min(3),
        ..area
    };
    let cells = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, FILTER_CELLS as u32); FILTER_CELLS])
        .split(row);

    for cell in cells.iter() {
        placeholder(frame, *cell);
    }
}

/// Split `area` into `count` grid cells, four per row.
pub fn grid_cells(area: Rect, count: usize) -> Vec<Rect> {
    let rows = count.div_ceil(GRID_COLUMNS);
    if rows == 0 {
        return Vec::new();
    }

    let row_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Ratio(1, rows as u32); rows])
        .split(area);

    let mut cells = Vec::with_capacity(count);
    for row_area in row_areas.iter() {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, GRID_COLUMNS as u32); GRID_COLUMNS])
            .split(*row_area);
        for cell in columns.iter() {
            if cells.len() < count {
                cells.push(*cell);
            }
        }
    }
    cells
}

/// Draw `count` card placeholders.
pub fn draw_grid(frame: &mut Frame, area: Rect, count: usize) {
    for cell in grid_cells(area, count) {
        placeholder(frame, cell);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::SKELETON_CARD_COUNT;

    #[test]
    fn test_grid_cells_count() {
        let area = Rect::new(0, 0, 100, 30);
        let cells = grid_cells(area, SKELETON_CARD_COUNT);
        assert_eq!(cells.len(), 12);
        assert!(cells.iter().all(|cell| area.contains(cell.as_position())));
    }

    #[test]
    fn test_partial_last_row() {
        let cells = grid_cells(Rect::new(0, 0, 80, 20), 5);
        assert_eq!(cells.len(), 5);
        assert_eq!(cells[4].x, 0);
        assert!(cells[4].y > cells[0].y);
    }

    #[test]
    fn test_no_cells() {
        assert!(grid_cells(Rect::new(0, 0, 80, 20), 0).is_empty());
    }
}
