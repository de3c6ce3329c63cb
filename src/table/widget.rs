//! Terminal rendering of a [`DataTable`]

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, Wrap},
    Frame,
};

use super::{
    actions::RowAction,
    column::ColumnHeader,
    pagination::{PageItem, PaginationControls},
    selection::CheckState,
    view::{DataTable, EmptyState, HeaderView, RowsView, SortIndicator, TableView},
};
use crate::models::Record;
use crate::tui::ui::Styles;

/// Width of the selection checkbox column
const CHECKBOX_WIDTH: u16 = 3;

/// Minimum width for columns without an explicit width
const FLEX_MIN_WIDTH: u16 = 6;

const SKELETON_CELL: &str = "░";

impl<T: Record> DataTable<T> {
    /// Draw the table, its placeholder states and the pagination footer
    pub fn render(&mut self, f: &mut Frame, area: Rect, focused: bool) {
        let border_style = if focused {
            Styles::active_border()
        } else {
            Styles::inactive_border()
        };
        let block = Block::default()
            .title(self.config.title.as_str())
            .borders(Borders::ALL)
            .border_style(border_style);

        match self.view() {
            TableView::Loading { rows, .. } => {
                let headers = self.headers();
                let skeleton = skeleton_rows(&headers, rows, self.config.selectable);
                let table = Table::new(skeleton, self.widths(&headers))
                    .header(self.plain_header_row(&headers))
                    .column_spacing(self.column_spacing())
                    .block(block);
                f.render_widget(table, area);
            }
            TableView::Empty(empty_state) => {
                f.render_widget(empty_placeholder(&empty_state).block(block), area);
            }
            TableView::Rows(view) => {
                let inner = block.inner(area);
                f.render_widget(block, area);

                let (table_area, footer_area) = match view.pagination {
                    Some(_) => {
                        let chunks = Layout::default()
                            .direction(Direction::Vertical)
                            .constraints([Constraint::Min(0), Constraint::Length(1)])
                            .split(inner);
                        (chunks[0], Some(chunks[1]))
                    }
                    None => (inner, None),
                };

                let headers: Vec<ColumnHeader> =
                    view.headers.iter().map(|header| header.column.clone()).collect();
                let table = Table::new(self.body_rows(&view), self.widths(&headers))
                    .header(header_row(&view))
                    .column_spacing(self.column_spacing())
                    .highlight_style(Styles::selected());
                f.render_stateful_widget(table, table_area, &mut self.state);

                if let (Some(controls), Some(footer_area)) = (view.pagination.as_ref(), footer_area) {
                    f.render_widget(Paragraph::new(pagination_line(controls)), footer_area);
                }
            }
        }
    }

    fn column_spacing(&self) -> u16 {
        if self.config.compact {
            1
        } else {
            2
        }
    }

    fn widths(&self, headers: &[ColumnHeader]) -> Vec<Constraint> {
        let mut widths = Vec::with_capacity(headers.len() + 1);
        if self.config.selectable {
            widths.push(Constraint::Length(CHECKBOX_WIDTH));
        }
        widths.extend(headers.iter().map(|header| match header.width {
            Some(width) => Constraint::Length(width),
            None => Constraint::Min(FLEX_MIN_WIDTH),
        }));
        widths
    }

    fn plain_header_row(&self, headers: &[ColumnHeader]) -> Row<'static> {
        let mut cells = Vec::with_capacity(headers.len() + 1);
        if self.config.selectable {
            cells.push(Cell::from(CheckState::Unchecked.symbol()));
        }
        cells.extend(headers.iter().map(|header| {
            Cell::from(Line::from(header.title.clone()).alignment(header.align.to_alignment()))
        }));
        Row::new(cells).style(Styles::header()).bottom_margin(1)
    }

    fn body_rows(&self, view: &RowsView) -> Vec<Row<'static>> {
        view.rows
            .iter()
            .map(|row| {
                let mut cells = Vec::with_capacity(row.cells.len() + 2);
                if self.config.selectable {
                    let state = if row.selected {
                        CheckState::Checked
                    } else {
                        CheckState::Unchecked
                    };
                    cells.push(Cell::from(state.symbol()));
                }

                for (cell, header) in row.cells.iter().zip(view.headers.iter()) {
                    cells.push(Cell::from(
                        cell.clone().alignment(header.column.align.to_alignment()),
                    ));
                }

                if !row.actions.is_empty() {
                    cells.push(Cell::from(actions_line(&row.actions)));
                }

                let style = if row.selected {
                    Styles::checked_row()
                } else {
                    Style::default()
                };
                Row::new(cells).style(style)
            })
            .collect()
    }
}

fn header_row(view: &RowsView) -> Row<'static> {
    let mut cells = Vec::with_capacity(view.headers.len() + 1);
    if let Some(state) = view.select_all {
        cells.push(Cell::from(state.symbol()));
    }
    cells.extend(view.headers.iter().map(|header| Cell::from(header_line(header))));
    Row::new(cells).style(Styles::header()).bottom_margin(1)
}

fn header_line(header: &HeaderView) -> Line<'static> {
    let title_style = if header.focused {
        Styles::focused_header()
    } else {
        Styles::header()
    };
    let mut spans = vec![Span::styled(header.column.title.clone(), title_style)];

    match header.indicator {
        SortIndicator::Hidden => {}
        SortIndicator::Neutral => {
            spans.push(Span::styled(" ▲▼", Styles::inactive()));
        }
        SortIndicator::Ascending => {
            spans.push(Span::styled(" ▲", Styles::sort_active()));
            spans.push(Span::styled("▼", Styles::inactive()));
        }
        SortIndicator::Descending => {
            spans.push(Span::styled(" ▲", Styles::inactive()));
            spans.push(Span::styled("▼", Styles::sort_active()));
        }
    }

    Line::from(spans).alignment(header.column.align.to_alignment())
}

/// Shortcut buttons shown in the actions column, e.g. `[p][e][d]`
pub fn actions_line(actions: &[RowAction]) -> Line<'static> {
    let spans: Vec<Span<'static>> = actions
        .iter()
        .map(|action| {
            let style = match action {
                RowAction::Preview => Styles::info(),
                RowAction::Edit => Styles::warning(),
                RowAction::Delete => Styles::error(),
            };
            Span::styled(format!("[{}]", action.shortcut()), style)
        })
        .collect();
    Line::from(spans).alignment(Alignment::Right)
}

fn skeleton_rows(headers: &[ColumnHeader], count: usize, selectable: bool) -> Vec<Row<'static>> {
    (0..count)
        .map(|_| {
            let mut cells = Vec::with_capacity(headers.len() + 1);
            if selectable {
                cells.push(Cell::from(SKELETON_CELL.repeat(CHECKBOX_WIDTH as usize)));
            }
            cells.extend(headers.iter().map(|header| {
                let width = header.width.unwrap_or(FLEX_MIN_WIDTH) as usize;
                Cell::from(SKELETON_CELL.repeat(width))
            }));
            Row::new(cells).style(Styles::skeleton())
        })
        .collect()
}

fn empty_placeholder(empty_state: &EmptyState) -> Paragraph<'static> {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(empty_state.icon.clone(), Styles::inactive())),
        Line::from(Span::styled(empty_state.title.clone(), Styles::title())),
        Line::from(Span::styled(empty_state.description.clone(), Styles::inactive())),
    ];
    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
}

/// Footer line: result summary followed by the page strip
pub fn pagination_line(controls: &PaginationControls) -> Line<'static> {
    let mut spans = vec![
        Span::styled(controls.summary.clone(), Styles::inactive()),
        Span::raw("   "),
    ];

    let previous_style = if controls.previous_enabled {
        Styles::default()
    } else {
        Styles::inactive()
    };
    spans.push(Span::styled("‹ Prev ", previous_style));

    for item in &controls.items {
        match item {
            PageItem::Page(page) if *page == controls.current => {
                spans.push(Span::styled(format!(" {} ", page), Styles::selected()));
            }
            PageItem::Page(page) => spans.push(Span::raw(format!(" {} ", page))),
            PageItem::Ellipsis => spans.push(Span::styled(" … ", Styles::inactive())),
        }
    }

    let next_style = if controls.next_enabled {
        Styles::default()
    } else {
        Styles::inactive()
    };
    spans.push(Span::styled(" Next ›", next_style));
    Line::from(spans)
}
