use crate::error::{AppError, AppResult};
use crate::models::budget::BudgetAllocation;
use crate::models::event_type::EventType;
use crate::operations::allocation::allocate;
use crate::operations::currency::format_currency;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::{Color, Constraint, Direction, Layout, Rect, Style},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use std::io;

const PALETTE: [Color; 9] = [
    Color::Blue,
    Color::Green,
    Color::Magenta,
    Color::Yellow,
    Color::Red,
    Color::Cyan,
    Color::LightGreen,
    Color::LightMagenta,
    Color::LightBlue,
];

pub const NO_BUDGET_MESSAGE: &str = "Please set a budget for your event to see allocations.";

/// Allocation to present, or `None` when no budget is set.
pub fn displayed_allocations(
    event_type: EventType,
    total_budget: u64,
    guest_count: u32,
) -> Option<Vec<BudgetAllocation>> {
    if total_budget == 0 {
        return None;
    }
    Some(allocate(event_type, total_budget, guest_count))
}

/// Selection and expansion state of the allocation viewer. At most one
/// category is expanded at a time.
#[derive(Debug)]
pub struct AllocationView {
    allocations: Vec<BudgetAllocation>,
    selected: usize,
    expanded: Option<usize>,
}

impl AllocationView {
    pub fn new(allocations: Vec<BudgetAllocation>) -> Self {
        Self {
            allocations,
            selected: 0,
            expanded: None,
        }
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn expanded(&self) -> Option<&BudgetAllocation> {
        self.expanded.and_then(|i| self.allocations.get(i))
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.allocations.len() {
            self.selected += 1;
        }
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Expands the selected category, or collapses it if it already is.
    pub fn toggle_selected(&mut self) {
        if self.allocations.is_empty() {
            return;
        }
        self.expanded = if self.expanded == Some(self.selected) {
            None
        } else {
            Some(self.selected)
        };
    }

    /// Rendered body lines plus the index of the selected category's first line.
    fn lines(&self, bar_width: usize) -> (Vec<Line<'static>>, usize) {
        let mut lines = Vec::new();
        let mut selected_line = 0;

        for (idx, allocation) in self.allocations.iter().enumerate() {
            let color = PALETTE[idx % PALETTE.len()];
            let is_selected = idx == self.selected;
            if is_selected {
                selected_line = lines.len();
            }

            let name_style = if is_selected {
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            let marker = if self.expanded == Some(idx) {
                "▼ "
            } else if is_selected {
                "▶ "
            } else {
                "  "
            };
            lines.push(Line::from(vec![
                Span::styled(marker.to_string(), Style::default().fg(color)),
                Span::styled(format!("{:32}", allocation.category), name_style),
                Span::styled(format!("{:>14}", format_currency(allocation.amount)), name_style),
            ]));
            lines.push(Line::from(Span::styled(
                format!(
                    "  {}% of total budget   {} tasks",
                    allocation.percentage,
                    allocation.tasks.len()
                ),
                Style::default().fg(Color::Gray),
            )));

            let filled = (allocation.percentage as usize * bar_width / 100).min(bar_width);
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled("█".repeat(filled), Style::default().fg(color)),
                Span::styled(
                    "░".repeat(bar_width - filled),
                    Style::default().fg(Color::DarkGray),
                ),
            ]));

            if self.expanded == Some(idx) {
                lines.push(Line::from(Span::styled(
                    "    Task Breakdown:".to_string(),
                    Style::default().add_modifier(Modifier::BOLD),
                )));
                for task in &allocation.tasks {
                    lines.push(Line::from(vec![
                        Span::raw(format!("    {:28}", task.name)),
                        Span::raw(format!("{:>14}", format_currency(task.amount))),
                    ]));
                }
            }
            lines.push(Line::from(""));
        }

        (lines, selected_line)
    }
}

pub fn run_allocation_view(
    title: &str,
    total_budget: u64,
    guest_count: u32,
    allocations: Vec<BudgetAllocation>,
) -> AppResult<()> {
    let mut view = AllocationView::new(allocations);

    enable_raw_mode()
        .map_err(|e| AppError::Terminal(format!("Failed to enable raw mode: {}", e)))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)
        .map_err(|e| AppError::Terminal(format!("Failed to enter alternate screen: {}", e)))?;

    let result = (|| -> AppResult<()> {
        let backend = ratatui::backend::CrosstermBackend::new(stdout);
        let mut terminal = ratatui::Terminal::new(backend)
            .map_err(|e| AppError::Terminal(format!("Failed to initialize terminal: {}", e)))?;

        loop {
            terminal
                .draw(|frame| {
                    let layout = Layout::default()
                        .direction(Direction::Vertical)
                        .constraints([
                            Constraint::Length(4),
                            Constraint::Min(3),
                            Constraint::Length(1),
                        ])
                        .split(frame.area());

                    render_header(frame, layout[0], title, total_budget, guest_count);
                    render_categories(frame, layout[1], &view);
                    frame.render_widget(
                        Paragraph::new("↑/↓ select   enter expand/collapse   q exit")
                            .style(Style::default().fg(Color::DarkGray)),
                        layout[2],
                    );
                })
                .map_err(|e| AppError::Terminal(format!("Failed to draw terminal UI: {}", e)))?;

            if event::poll(std::time::Duration::from_millis(250))
                .map_err(|e| AppError::Terminal(format!("Failed to poll input: {}", e)))?
            {
                let input = event::read()
                    .map_err(|e| AppError::Terminal(format!("Failed to read input: {}", e)))?;
                match input {
                    Event::Key(key) if key.kind != KeyEventKind::Press => {}
                    Event::Key(key) => match key.code {
                        KeyCode::Char('q') | KeyCode::Esc => break,
                        KeyCode::Down | KeyCode::Char('j') => view.select_next(),
                        KeyCode::Up | KeyCode::Char('k') => view.select_previous(),
                        KeyCode::Enter | KeyCode::Char(' ') => view.toggle_selected(),
                        _ => {}
                    },
                    _ => {}
                }
            }
        }

        Ok(())
    })();

    disable_raw_mode()
        .map_err(|e| AppError::Terminal(format!("Failed to disable raw mode: {}", e)))?;
    let mut stdout = io::stdout();
    execute!(stdout, LeaveAlternateScreen)
        .map_err(|e| AppError::Terminal(format!("Failed to leave alternate screen: {}", e)))?;

    result
}

fn render_header(
    frame: &mut ratatui::Frame,
    area: Rect,
    title: &str,
    total_budget: u64,
    guest_count: u32,
) {
    let block = Block::default()
        .title(Line::from(Span::styled(
            format!("{}  (press q to exit)", title),
            Style::default().fg(Color::White),
        )))
        .borders(Borders::ALL);
    let lines = vec![
        Line::from(vec![
            Span::raw("Total Budget: "),
            Span::styled(
                format_currency(total_budget),
                Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(Span::styled(
            format!("Recommended allocation for {} guests", guest_count),
            Style::default().fg(Color::Gray),
        )),
    ];
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_categories(frame: &mut ratatui::Frame, area: Rect, view: &AllocationView) {
    let position = format!("({}/{})", view.selected() + 1, view.allocations.len());
    let title = match view.expanded() {
        Some(allocation) => format!("Budget Allocation {} {}", position, allocation.category),
        None => format!("Budget Allocation {}", position),
    };
    let block = Block::default().title(title).borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let bar_width = (inner.width as usize).saturating_sub(4).clamp(10, 60);
    let (lines, selected_line) = view.lines(bar_width);
    let offset = scroll_offset(selected_line, inner.height as usize);
    frame.render_widget(Paragraph::new(lines).scroll((offset as u16, 0)), inner);
}

/// Keeps the selected category's header and bar on screen.
fn scroll_offset(selected_line: usize, height: usize) -> usize {
    (selected_line + 3).saturating_sub(height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::budget::templates_for;
    use crate::operations::allocation::compute_allocations;

    fn wedding_view() -> AllocationView {
        AllocationView::new(compute_allocations("wedding", 500000, 75))
    }

    #[test]
    fn test_selection_stays_in_bounds() {
        let mut view = wedding_view();
        view.select_previous();
        assert_eq!(view.selected(), 0);

        for _ in 0..20 {
            view.select_next();
        }
        assert_eq!(view.selected(), 6);
    }

    #[test]
    fn test_toggle_expands_and_collapses() {
        let mut view = wedding_view();
        assert!(view.expanded().is_none());

        view.toggle_selected();
        assert_eq!(view.expanded().unwrap().category, "Venue & Catering");

        view.toggle_selected();
        assert!(view.expanded().is_none());
    }

    #[test]
    fn test_expanding_another_category_replaces_previous() {
        let mut view = wedding_view();
        view.toggle_selected();
        view.select_next();
        view.toggle_selected();
        assert_eq!(view.expanded().unwrap().category, "Decor & Flowers");
    }

    #[test]
    fn test_toggle_on_empty_view_is_noop() {
        let mut view = AllocationView::new(Vec::new());
        view.toggle_selected();
        view.select_next();
        assert!(view.expanded().is_none());
        assert_eq!(view.selected(), 0);
    }

    #[test]
    fn test_lines_grow_with_task_breakdown() {
        let mut view = wedding_view();
        let (collapsed, _) = view.lines(20);
        assert_eq!(collapsed.len(), 7 * 4);

        view.toggle_selected();
        let (expanded, _) = view.lines(20);
        assert_eq!(expanded.len(), 7 * 4 + 1 + 3);
    }

    #[test]
    fn test_selected_line_tracks_selection() {
        let mut view = wedding_view();
        view.toggle_selected();
        view.select_next();
        let (_, selected_line) = view.lines(20);
        // first category: 4 lines plus heading and 3 tasks
        assert_eq!(selected_line, 8);
    }

    #[test]
    fn test_zero_budget_has_nothing_to_display() {
        assert!(displayed_allocations(EventType::Wedding, 0, 50).is_none());
        assert!(displayed_allocations(EventType::Other, 0, 0).is_none());
    }

    #[test]
    fn test_positive_budget_is_displayed() {
        let allocations = displayed_allocations(EventType::Wedding, 500000, 75).unwrap();
        assert_eq!(allocations.len(), 7);
        assert_eq!(allocations[0].amount, 225000);

        let smallest = displayed_allocations(EventType::Birthday, 1, 50).unwrap();
        assert_eq!(smallest.len(), templates_for(EventType::Birthday).len());
    }

    #[test]
    fn test_scroll_offset() {
        assert_eq!(scroll_offset(0, 20), 0);
        assert_eq!(scroll_offset(16, 20), 0);
        assert_eq!(scroll_offset(24, 20), 7);
    }
}
