// ============================================================================
// Sélecteur de devise et overlay de chargement
// ============================================================================
// Deux popups dessinées par-dessus le tableau
// CONCEPT RATATUI : le widget Clear efface la zone avant de dessiner
// ============================================================================

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{
        block::{Position, Title},
        Block, Borders, Clear, List, ListItem, ListState, Paragraph,
    },
    Frame,
};

use crate::app::App;
use crate::models::Currency;

/// Rectangle centré de `width` x `height` cellules, borné à `area`
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);

    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

/// Dessine la liste des devises, la devise courante est marquée d'un ●
pub fn render_currency_picker(frame: &mut Frame, app: &App) {
    let currencies = Currency::all();
    let area = centered_rect(36, currencies.len() as u16 + 4, frame.size());

    let items: Vec<ListItem> = currencies
        .iter()
        .map(|currency| {
            let marker = if *currency == app.view.currency { "●" } else { " " };
            ListItem::new(Line::from(vec![
                Span::styled(format!(" {} ", marker), Style::default().fg(Color::Green)),
                Span::styled(
                    format!("{:<4}", currency.code()),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw(format!("{:<4}", currency.symbol())),
                Span::styled(currency.label(), Style::default().fg(Color::Gray)),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Green))
                .title(" Devise ")
                .title(
                    Title::from(" [Enter] Choisir  [ESC] Annuler ")
                        .position(Position::Bottom)
                        .alignment(Alignment::Center),
                ),
        )
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));

    let mut state = ListState::default();
    state.select(Some(app.picker_index));

    frame.render_widget(Clear, area);
    frame.render_stateful_widget(list, area, &mut state);
}

/// Overlay affiché pendant un fetch
pub fn render_loading_overlay(frame: &mut Frame, app: &App) {
    let area = centered_rect(44, 5, frame.size());
    let message = app
        .loading_message
        .clone()
        .unwrap_or_else(|| "Chargement...".to_string());

    let paragraph = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("⏳ {}", message),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )),
    ])
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow)),
    )
    .alignment(Alignment::Center);

    frame.render_widget(Clear, area);
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect() {
        let area = Rect::new(0, 0, 100, 40);
        let popup = centered_rect(36, 10, area);
        assert_eq!(popup, Rect::new(32, 15, 36, 10));
    }

    #[test]
    fn test_centered_rect_is_bounded() {
        let area = Rect::new(0, 0, 20, 5);
        let popup = centered_rect(36, 10, area);
        assert_eq!(popup.width, 20);
        assert_eq!(popup.height, 5);
    }
}
