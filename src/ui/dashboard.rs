// ============================================================================
// Dashboard - Rendu de l'interface principale
// ============================================================================
// Header (devise, tri, heure de mise à jour), barre de recherche, tableau,
// footer (raccourcis / erreurs), puis popups éventuelles
// ============================================================================

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::{App, Screen};
use crate::ui::currency_picker::{render_currency_picker, render_loading_overlay};
use crate::ui::table::render_table;

/// Dessine l'interface complète
///
/// Le tableau est toujours dessiné ; le sélecteur de devise et l'overlay
/// de chargement viennent par-dessus
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = create_layout(frame.size());

    render_header(frame, app, chunks[0]);
    render_search_bar(frame, app, chunks[1]);
    render_main_content(frame, app, chunks[2]);
    render_footer(frame, app, chunks[3]);

    match app.current_screen {
        Screen::CurrencyPicker => render_currency_picker(frame, app),
        Screen::Table | Screen::Search => {}
    }

    if app.is_loading_data() {
        render_loading_overlay(frame, app);
    }
}

/// Header, recherche, contenu, footer
fn create_layout(area: Rect) -> Vec<Rect> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(3), // Recherche
            Constraint::Min(0),    // Tableau
            Constraint::Length(3), // Footer
        ])
        .split(area)
        .to_vec()
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" CoinBoard ")
        .title_alignment(Alignment::Center);

    let currency = app.view.currency;
    let updated = app
        .last_updated
        .map(|t| t.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "-".to_string());

    let label = Style::default().fg(Color::Gray);
    let value = Style::default().fg(Color::Green).add_modifier(Modifier::BOLD);

    let line = Line::from(vec![
        Span::styled("Devise : ", label),
        Span::styled(format!("{} ({})", currency.code(), currency.symbol()), value),
        Span::styled("   Tri : ", label),
        Span::styled(
            format!(
                "{} {}",
                app.view.sort_by.label(),
                app.view.sort_direction.indicator()
            ),
            value,
        ),
        Span::styled("   Mis à jour : ", label),
        Span::styled(updated, value),
    ]);

    let paragraph = Paragraph::new(vec![line])
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

fn render_search_bar(frame: &mut Frame, app: &App, area: Rect) {
    let editing = app.is_in_search_mode();
    let border_color = if editing { Color::Green } else { Color::Cyan };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(" 🔍 Recherche ");

    let line = if editing {
        Line::from(vec![
            Span::styled(&app.view.search_text, Style::default().fg(Color::White)),
            Span::styled(
                "█",
                Style::default().fg(Color::White).add_modifier(Modifier::SLOW_BLINK),
            ),
        ])
    } else if app.view.search_text.is_empty() {
        Line::from(Span::styled(
            "Appuyez sur / pour filtrer par nom ou symbole",
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        Line::from(vec![
            Span::styled(&app.view.search_text, Style::default().fg(Color::White)),
            Span::styled("   [x] Effacer", Style::default().fg(Color::DarkGray)),
        ])
    };

    frame.render_widget(Paragraph::new(vec![line]).block(block), area);
}

fn render_main_content(frame: &mut Frame, app: &App, area: Rect) {
    // Filtre sans résultat : message au lieu d'un tableau vide
    if !app.view.last_dataset.is_empty() && app.derived().is_empty() {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" 📊 Marché ");

        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                format!("Aucun coin ne correspond à « {} »", app.view.search_text),
                Style::default().fg(Color::Gray),
            )),
        ];

        let paragraph = Paragraph::new(text)
            .block(block)
            .alignment(Alignment::Center);
        frame.render_widget(paragraph, area);
        return;
    }

    render_table(frame, app, area);
}

fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let key = |k: &'static str| {
        Span::styled(k, Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
    };

    let line = if app.is_awaiting_quit_confirmation() {
        Line::from(vec![
            Span::styled(
                "⚠  Appuyez sur ",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                "[q]",
                Style::default()
                    .fg(Color::Red)
                    .add_modifier(Modifier::BOLD)
                    .add_modifier(Modifier::SLOW_BLINK),
            ),
            Span::styled(
                " à nouveau pour quitter, ou n'importe quelle autre touche pour annuler ⚠",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
        ])
    } else if let Some(error) = &app.last_error {
        Line::from(vec![
            Span::styled("✗ ", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
            Span::styled(error.as_str(), Style::default().fg(Color::Red)),
        ])
    } else if app.is_in_search_mode() {
        Line::from(vec![
            key("[Enter]"),
            Span::raw(" Garder le filtre  "),
            key("[ESC]"),
            Span::raw(" Effacer  "),
            key("[Backspace]"),
            Span::raw(" Supprimer"),
        ])
    } else {
        Line::from(vec![
            key("[q]"),
            Span::raw(" Quit  "),
            key("[1-8]"),
            Span::raw(" Trier  "),
            key("[/]"),
            Span::raw(" Rechercher  "),
            key("[c]"),
            Span::raw(" Devise  "),
            key("[r]"),
            Span::raw(" Recharger  "),
            key("[↑↓ / j k]"),
            Span::raw(" Naviguer"),
        ])
    };

    let paragraph = Paragraph::new(vec![line])
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}
