// ============================================================================
// Dashboard - Rendu de l'interface
// ============================================================================
// De haut en bas :
// - Titre "AI Investment Trader"
// - Section "Stock Quote" et sa description
// - Champ de saisie du symbole
// - Boutons "Get Quote" / "Get Health"
// - Ligne d'état ("Fetching quote for AAPL...")
// - Zone de sortie (JSON, warning ou erreur)
// - Footer avec les raccourcis
// ============================================================================

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, Focus};
use crate::models::Panel;

/// Titre de la page
pub const TITLE: &str = "AI Investment Trader";

/// Libellé du champ de saisie
pub const INPUT_LABEL: &str = "Enter Stock Symbol (e.g. AAPL)";

/// Dessine le dashboard complet
///
/// # Arguments
/// * `frame` - Surface de dessin ratatui
/// * `app` - État de l'application (lecture seule)
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = create_layout(frame.size());

    render_header(frame, chunks[0]);
    render_section(frame, chunks[1]);
    render_input(frame, app, chunks[2]);
    render_buttons(frame, app, chunks[3]);
    render_status(frame, app, chunks[4]);
    render_output(frame, app, chunks[5]);
    render_footer(frame, app, chunks[6]);
}

// ============================================================================
// Layout : Découpage de l'écran
// ============================================================================

/// Crée le layout vertical du dashboard
fn create_layout(area: Rect) -> Vec<Rect> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Titre
            Constraint::Length(2), // Section "Stock Quote"
            Constraint::Length(3), // Champ de saisie
            Constraint::Length(3), // Boutons
            Constraint::Length(1), // Ligne d'état
            Constraint::Min(0),    // Sortie : tout le reste
            Constraint::Length(3), // Footer
        ])
        .split(area)
        .to_vec()
}

// ============================================================================
// Header et section
// ============================================================================

/// Dessine le titre de la page
fn render_header(frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let title = Line::from(Span::styled(
        TITLE,
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD),
    ));

    let paragraph = Paragraph::new(title)
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

/// Dessine le sous-titre "Stock Quote" et sa description
fn render_section(frame: &mut Frame, area: Rect) {
    let text = vec![
        Line::from(Span::styled(
            " Stock Quote",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        Line::from(" This section will display the latest stock quote."),
    ];

    frame.render_widget(Paragraph::new(text), area);
}

// ============================================================================
// Champ de saisie et boutons
// ============================================================================

/// Style de bordure selon le focus
fn focus_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

/// Dessine le champ de saisie du symbole
fn render_input(frame: &mut Frame, app: &App, area: Rect) {
    let editing = app.is_editing();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(focus_style(editing))
        .title(format!(" {} ", INPUT_LABEL));

    let mut spans = vec![Span::styled(
        app.input_buffer.as_str(),
        Style::default().fg(Color::White),
    )];
    if editing {
        spans.push(Span::styled(
            "█", // Curseur
            Style::default().fg(Color::White).add_modifier(Modifier::SLOW_BLINK),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

/// Dessine les boutons côte à côte
///
/// Le bouton "Get Health" n'existe qu'en API v1.
fn render_buttons(frame: &mut Frame, app: &App, area: Rect) {
    let mut buttons = vec![("Get Quote", Focus::QuoteButton)];
    if app.health_enabled {
        buttons.push(("Get Health", Focus::HealthButton));
    }

    let mut constraints: Vec<Constraint> = buttons.iter().map(|_| Constraint::Length(16)).collect();
    constraints.push(Constraint::Min(0));

    let cells = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);

    for ((label, focus), cell) in buttons.into_iter().zip(cells.iter()) {
        let focused = app.focus == focus;
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(focus_style(focused));

        let style = if focused {
            Style::default().fg(Color::Black).bg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };

        let button = Paragraph::new(Span::styled(label, style))
            .block(block)
            .alignment(Alignment::Center);

        frame.render_widget(button, *cell);
    }
}

// ============================================================================
// Sortie
// ============================================================================

/// Dessine la ligne d'état (message d'attente)
fn render_status(frame: &mut Frame, app: &App, area: Rect) {
    if let Some(status) = &app.status {
        let line = Line::from(Span::styled(
            format!(" {}", status),
            Style::default().fg(Color::Gray),
        ));
        frame.render_widget(Paragraph::new(line), area);
    }
}

/// Dessine la zone de sortie selon le Panel courant
fn render_output(frame: &mut Frame, app: &App, area: Rect) {
    let (title, color) = match &app.panel {
        Panel::Empty => (" Output ".to_string(), Color::DarkGray),
        Panel::Json { title, received_at, .. } => (
            format!(" {} - {} ", title, received_at.format("%H:%M:%S")),
            Color::Green,
        ),
        Panel::Warning(_) => (" Warning ".to_string(), Color::Yellow),
        Panel::Error(_) => (" Error ".to_string(), Color::Red),
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
        .title(title);

    let text_style = match &app.panel {
        Panel::Json { .. } => Style::default().fg(Color::White),
        _ => Style::default().fg(color).add_modifier(Modifier::BOLD),
    };

    let lines: Vec<Line> = app
        .panel
        .lines()
        .into_iter()
        .map(|line| Line::from(Span::styled(line, text_style)))
        .collect();

    // trim: false garde l'indentation du JSON sur les lignes repliées
    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((app.scroll, 0));

    frame.render_widget(paragraph, area);
}

// ============================================================================
// Footer : raccourcis ou confirmation de quit
// ============================================================================

fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let key = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);

    let shortcuts = if app.is_awaiting_quit_confirmation() {
        Line::from(vec![
            Span::styled("⚠  Appuyez sur ", key),
            Span::styled(
                "[Esc]",
                Style::default()
                    .fg(Color::Red)
                    .add_modifier(Modifier::BOLD)
                    .add_modifier(Modifier::SLOW_BLINK),
            ),
            Span::styled(
                " à nouveau pour quitter, ou n'importe quelle autre touche pour annuler ⚠",
                key,
            ),
        ])
    } else {
        Line::from(vec![
            Span::styled("[Tab]", key),
            Span::raw(" Focus  "),
            Span::styled("[Enter]", key),
            Span::raw(" Press  "),
            Span::styled("[PgUp/PgDn]", key),
            Span::raw(" Scroll  "),
            Span::styled("[Esc]", key),
            Span::raw(" Quit"),
        ])
    };

    let paragraph = Paragraph::new(shortcuts)
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

// ============================================================================
// Tests
// ============================================================================
