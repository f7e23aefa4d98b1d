use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

/// Creates a styled overlay block
pub fn create_dialog_block<'a>(title: Option<&'a str>, theme_color: Color) -> Block<'a> {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title_alignment(Alignment::Center)
        .title_style(Style::default().fg(theme_color).add_modifier(Modifier::BOLD))
        .style(Style::default().fg(theme_color));

    match title {
        Some(title) => block.title(format!(" {} ", title)),
        None => block,
    }
}

/// Instruction shortcut definition: (key, color, description)
pub type InstructionShortcut<'a> = (&'a str, Color, &'a str);

/// Creates a paragraph with color-coded instruction shortcuts
pub fn create_instructions_paragraph<'a>(instructions: &[InstructionShortcut<'a>]) -> Paragraph<'a> {
    let mut instruction_text = Vec::new();
    for (key, color, desc) in instructions {
        instruction_text.push(Span::styled(
            *key,
            Style::default().fg(*color).add_modifier(Modifier::BOLD),
        ));
        instruction_text.push(Span::styled(*desc, Style::default().fg(Color::Gray)));
    }

    Paragraph::new(Line::from(instruction_text)).alignment(Alignment::Center)
}

/// Common instruction shortcuts used across overlays
pub mod shortcuts {
    use super::*;

    pub const SEPARATOR: InstructionShortcut<'static> = (" • ", Color::Gray, "");
}
