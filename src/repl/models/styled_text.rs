//! Styled text expressed in theme roles, resolved to colors only when drawn

use super::theme::ThemeRole;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledSpan {
    pub text: String,
    /// `None` draws with the terminal default color
    pub role: Option<ThemeRole>,
    pub bold: bool,
}

impl StyledSpan {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            role: None,
            bold: false,
        }
    }

    pub fn colored(text: impl Into<String>, role: ThemeRole) -> Self {
        Self {
            text: text.into(),
            role: Some(role),
            bold: false,
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }
}

/// One terminal row of styled spans
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StyledLine {
    pub spans: Vec<StyledSpan>,
}

impl StyledLine {
    pub fn new(spans: Vec<StyledSpan>) -> Self {
        Self { spans }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(vec![StyledSpan::plain(text)])
    }

    pub fn colored(text: impl Into<String>, role: ThemeRole) -> Self {
        Self::new(vec![StyledSpan::colored(text, role)])
    }

    pub fn push(&mut self, span: StyledSpan) {
        self.spans.push(span);
    }

    /// Concatenated text without styling
    pub fn text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }
}
