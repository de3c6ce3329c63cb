//! Column definitions for the data table

use ratatui::text::Line;

use crate::models::Record;

/// Key of the implicit trailing column that hosts row actions
pub const ACTIONS_COLUMN_KEY: &str = "__actions";

/// Fixed width of the actions column, in terminal cells
pub const ACTIONS_COLUMN_WIDTH: u16 = 12;

/// Horizontal alignment of a column's header and cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

impl Align {
    pub fn to_alignment(self) -> ratatui::layout::Alignment {
        match self {
            Align::Left => ratatui::layout::Alignment::Left,
            Align::Center => ratatui::layout::Alignment::Center,
            Align::Right => ratatui::layout::Alignment::Right,
        }
    }
}

type CellRenderer<T> = Box<dyn Fn(&T) -> Line<'static> + Send + Sync>;

/// Declarative description of how to show one attribute of a row
pub struct Column<T> {
    pub key: String,
    pub title: String,
    pub sortable: bool,
    /// Width in terminal cells; `None` shares the remaining space
    pub width: Option<u16>,
    pub align: Align,
    pub visible: bool,
    render: Option<CellRenderer<T>>,
}

impl<T> std::fmt::Debug for Column<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Column")
            .field("key", &self.key)
            .field("title", &self.title)
            .field("sortable", &self.sortable)
            .field("width", &self.width)
            .field("align", &self.align)
            .field("visible", &self.visible)
            .field("custom_render", &self.render.is_some())
            .finish()
    }
}

impl<T: Record> Column<T> {
    pub fn new(key: &str, title: &str) -> Self {
        Self {
            key: key.to_string(),
            title: title.to_string(),
            sortable: false,
            width: None,
            align: Align::Left,
            visible: true,
            render: None,
        }
    }

    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    pub fn with_width(mut self, width: u16) -> Self {
        self.width = Some(width);
        self
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    pub fn with_render<F>(mut self, render: F) -> Self
    where
        F: Fn(&T) -> Line<'static> + Send + Sync + 'static,
    {
        self.render = Some(Box::new(render));
        self
    }

    pub fn has_custom_render(&self) -> bool {
        self.render.is_some()
    }

    /// Produce the displayed content of this column for one row.
    ///
    /// A custom renderer wins; otherwise the raw field is stringified and a
    /// missing field yields an empty cell.
    pub fn cell(&self, row: &T) -> Line<'static> {
        match &self.render {
            Some(render) => render(row),
            None => Line::from(self.raw_text(row)),
        }
    }

    /// Raw field text, ignoring any custom renderer
    pub fn raw_text(&self, row: &T) -> String {
        row.field(&self.key)
            .map(|value| value.to_string())
            .unwrap_or_default()
    }
}

/// Concatenated text of a rendered line, without styling
pub fn plain_text(line: &Line<'_>) -> String {
    line.spans.iter().map(|span| span.content.as_ref()).collect()
}

/// Header metadata for one rendered column, including the actions column
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnHeader {
    pub key: String,
    pub title: String,
    pub sortable: bool,
    pub width: Option<u16>,
    pub align: Align,
}

impl ColumnHeader {
    pub fn actions() -> Self {
        Self {
            key: ACTIONS_COLUMN_KEY.to_string(),
            title: "Actions".to_string(),
            sortable: false,
            width: Some(ACTIONS_COLUMN_WIDTH),
            align: Align::Right,
        }
    }

    pub fn is_actions(&self) -> bool {
        self.key == ACTIONS_COLUMN_KEY
    }
}

impl<T: Record> From<&Column<T>> for ColumnHeader {
    fn from(column: &Column<T>) -> Self {
        Self {
            key: column.key.clone(),
            title: column.title.clone(),
            sortable: column.sortable,
            width: column.width,
            align: column.align,
        }
    }
}
