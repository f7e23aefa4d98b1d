//! Centered dialog chrome for ratatui

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Color,
    widgets::Clear,
    Frame,
};

use super::common::{create_dialog_block, create_instructions_paragraph, shortcuts, InstructionShortcut};
use crate::constants::CONFIRM_LOADING_TEXT;
use crate::ui::boundary::ChromeRenderer;
use crate::ui::chrome::ChromeProps;
use crate::ui::layout::LayoutManager;

/// Draws an overlay as a centered, bordered popup with an optional footer
#[derive(Debug, Clone)]
pub struct DialogChrome {
    pub theme_color: Color,
    pub danger_color: Color,
}

impl Default for DialogChrome {
    fn default() -> Self {
        Self {
            theme_color: Color::Cyan,
            danger_color: Color::Red,
        }
    }
}

impl DialogChrome {
    /// Area the popup occupies inside `area`
    pub fn popup_area(props: &ChromeProps, area: Rect) -> Rect {
        LayoutManager::centered_rect_lines(props.width, props.height, area)
    }

    /// Footer hints as (key, color, description)
    fn footer_hints(props: &ChromeProps) -> Vec<(&'static str, Color, String)> {
        if props.confirm_loading {
            return vec![("", Color::Yellow, CONFIRM_LOADING_TEXT.to_string())];
        }

        let mut footer = Vec::new();
        if props.on_ok.is_some() {
            footer.push(("Enter", Color::Green, format!(" {}", props.ok_text)));
        }
        if props.can_dismiss_with_key() {
            if !footer.is_empty() {
                let (key, color, desc) = shortcuts::SEPARATOR;
                footer.push((key, color, desc.to_string()));
            }
            footer.push(("Esc", Color::Red, format!(" {}", props.cancel_text)));
        }
        footer
    }
}

impl ChromeRenderer for DialogChrome {
    fn render(&self, f: &mut Frame, area: Rect, props: &ChromeProps) -> Option<Rect> {
        if !props.open {
            return None;
        }

        let popup = Self::popup_area(props, area);
        let color = if props.danger { self.danger_color } else { self.theme_color };
        let block = create_dialog_block(props.title.as_deref(), color);
        let inner = block.inner(popup);

        f.render_widget(Clear, popup);
        f.render_widget(block, popup);

        let hints = Self::footer_hints(props);
        if !props.footer || hints.is_empty() || inner.height < 2 {
            return Some(inner);
        }

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(inner);

        let footer: Vec<InstructionShortcut> = hints
            .iter()
            .map(|(key, color, desc)| (*key, *color, desc.as_str()))
            .collect();
        f.render_widget(create_instructions_paragraph(&footer), chunks[1]);
        Some(chunks[0])
    }
}
