//! # Core Event Types
//!
//! Widgets that can own focus, the three content tabs and the UI mode tag the
//! router matches on.

/// Focusable widgets, in Tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Widget {
    Method,
    Url,
    Headers,
    Body,
    Send,
    History,
    Tabs,
}

impl Widget {
    pub const ORDER: [Widget; 7] = [
        Widget::Method,
        Widget::Url,
        Widget::Headers,
        Widget::Body,
        Widget::Send,
        Widget::History,
        Widget::Tabs,
    ];

    /// Widgets drawn inside the Request tab
    pub fn belongs_to_request_tab(self) -> bool {
        matches!(
            self,
            Widget::Method | Widget::Url | Widget::Headers | Widget::Body | Widget::Send
        )
    }

    /// Field edited through the single-line edit dialog
    pub fn editable_field(self) -> Option<EditableField> {
        match self {
            Widget::Method => Some(EditableField::Method),
            Widget::Url => Some(EditableField::Url),
            Widget::Body => Some(EditableField::Body),
            _ => None,
        }
    }
}

/// Draft fields with a single-line edit dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditableField {
    Method,
    Url,
    Body,
}

impl EditableField {
    pub fn label(self) -> &'static str {
        match self {
            EditableField::Method => "METHOD",
            EditableField::Url => "URL",
            EditableField::Body => "BODY",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            EditableField::Method => "GET",
            EditableField::Url => "https://api.example.com/data",
            EditableField::Body => "{ \"key\": \"value\" }",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tab {
    #[default]
    Request,
    Response,
    Metrics,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Request, Tab::Response, Tab::Metrics];

    pub fn title(self) -> &'static str {
        match self {
            Tab::Request => "Request",
            Tab::Response => "Response",
            Tab::Metrics => "Metrics",
        }
    }

    fn index(self) -> usize {
        Tab::ALL.iter().position(|&t| t == self).unwrap_or(0)
    }

    /// Next tab, wrapping
    pub fn next(self) -> Tab {
        Tab::ALL[(self.index() + 1) % Tab::ALL.len()]
    }

    /// Previous tab, wrapping
    pub fn previous(self) -> Tab {
        Tab::ALL[(self.index() + Tab::ALL.len() - 1) % Tab::ALL.len()]
    }
}

/// Which input owner is active. Modal variants capture every key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UiMode {
    #[default]
    Normal,
    /// History list query is being typed; letters go to the query
    HistorySearch,
    FieldEditor,
    HeadersEditor,
    ThemePicker,
    ExportDialog,
}

impl UiMode {
    pub fn is_modal(self) -> bool {
        matches!(
            self,
            UiMode::FieldEditor | UiMode::HeadersEditor | UiMode::ThemePicker | UiMode::ExportDialog
        )
    }

    /// A widget is consuming printable characters, so letter hotkeys are off
    pub fn captures_text(self) -> bool {
        !matches!(self, UiMode::Normal | UiMode::ThemePicker)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    PageUp,
    PageDown,
}
