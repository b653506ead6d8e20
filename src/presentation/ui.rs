use crate::application::{nav_items, App, LoginField, Route};
use crate::domain::{Role, UserIdentity, ValidationError};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
    Frame,
};

/// Renders the whole screen for the current route.
///
/// The header and status bar are always drawn; the body is the login form,
/// a dashboard, or a busy screen, with popups layered on top.
pub fn render_ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.area());

    let route = app.route();
    render_header(f, app, chunks[0]);

    match route {
        Route::SigningOut => render_busy(f, chunks[1], "Signing out..."),
        Route::Login { signing_in } => {
            render_login(f, app, chunks[1]);
            if signing_in {
                render_busy(f, centered(chunks[1], 40, 5), "Signing in...");
            }
        }
        Route::Dashboard {
            role,
            logout_dialog,
        } => {
            render_dashboard(f, app, role, chunks[1]);
            if logout_dialog {
                render_logout_dialog(f, app, centered(chunks[1], 60, 8));
            }
        }
    }

    render_status_bar(f, app, route, chunks[2]);
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let text = match app.session.user() {
        Some(user) => format!("CapTrack | {} ({})", user.name, user.role),
        None => "CapTrack - Capstone Project Tracker".to_string(),
    };
    f.render_widget(
        Paragraph::new(text).style(Style::default().fg(Color::Cyan)),
        area,
    );
}

fn render_login(f: &mut Frame, app: &App, area: Rect) {
    let form_area = centered(area, 60, 12);
    let masked = "*".repeat(app.password_input.chars().count());

    let mut lines = vec![
        Line::from("Sign in with any credentials (demo mode)"),
        Line::from(""),
    ];
    lines.extend(field_lines(
        "Email",
        &app.email_input,
        app.focus == LoginField::Email,
        app.field_errors.email.as_ref(),
    ));
    lines.extend(field_lines(
        "Password",
        &masked,
        app.focus == LoginField::Password,
        app.field_errors.password.as_ref(),
    ));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Demo accounts: F1 student | F2 faculty | F3 admin",
        Style::default().fg(Color::DarkGray),
    )));

    let form = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Welcome to CapTrack"),
    );
    f.render_widget(form, form_area);
}

fn field_lines<'a>(
    label: &'a str,
    value: &'a str,
    focused: bool,
    error: Option<&ValidationError>,
) -> Vec<Line<'a>> {
    let label_style = if focused {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    let cursor = if focused { "_" } else { "" };

    let mut lines = vec![Line::from(vec![
        Span::styled(format!("{:<9}", label), label_style),
        Span::raw(value),
        Span::raw(cursor),
    ])];
    match error {
        Some(error) => lines.push(Line::from(Span::styled(
            format!("         {}", error),
            Style::default().fg(Color::Red),
        ))),
        None => lines.push(Line::from("")),
    }
    lines
}

fn render_dashboard(f: &mut Frame, app: &App, role: Role, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(24), Constraint::Min(0)])
        .split(area);

    let items: Vec<ListItem> = nav_items(role)
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let style = if i == app.selected_nav {
                Style::default().bg(Color::Blue).fg(Color::White)
            } else {
                Style::default()
            };
            ListItem::new(item.label).style(style)
        })
        .collect();
    let nav = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!("{} Portal", role.title())),
    );
    f.render_widget(nav, columns[0]);

    let title = app
        .current_view()
        .map(|item| item.label)
        .unwrap_or("Dashboard");
    let body = match app.session.user() {
        Some(user) => profile_lines(user),
        None => Vec::new(),
    };
    let content = Paragraph::new(body)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(content, columns[1]);
}

fn profile_lines(user: &UserIdentity) -> Vec<Line<'_>> {
    let mut lines = vec![
        Line::from(Span::styled(
            format!("Welcome back, {}", user.name),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(format!("Email:       {}", user.email)),
        Line::from(format!("Role:        {}", user.role.title())),
        Line::from(format!("Department:  {}", user.department)),
    ];
    if let Some(student_id) = &user.student_id {
        lines.push(Line::from(format!("Student ID:  {}", student_id)));
    }
    if let Some(permissions) = &user.permissions {
        lines.push(Line::from(format!("Permissions: {}", permissions.join(", "))));
    }
    lines
}

fn render_logout_dialog(f: &mut Frame, app: &App, area: Rect) {
    f.render_widget(Clear, area);
    let lines = vec![
        Line::from(app.logout_prompt()),
        Line::from(""),
        Line::from(Span::styled(
            "You will need to sign in again to access your account.",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
        Line::from("[y] Sign Out    [n] Cancel"),
    ];
    let dialog = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Confirm Sign Out")
                .style(Style::default().fg(Color::Yellow)),
        );
    f.render_widget(dialog, area);
}

fn render_busy(f: &mut Frame, area: Rect, message: &str) {
    f.render_widget(Clear, area);
    let busy = Paragraph::new(message)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Cyan))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(busy, area);
}

fn render_status_bar(f: &mut Frame, app: &App, route: Route, area: Rect) {
    let hint = match route {
        Route::Login { signing_in: false } => {
            "Tab: switch field | Enter: sign in | F1-F3: demo accounts | Esc: quit"
        }
        Route::Login { signing_in: true } | Route::SigningOut => "Please wait...",
        Route::Dashboard {
            logout_dialog: true,
            ..
        } => "y/Enter: sign out | n/Esc: cancel",
        Route::Dashboard { .. } => "↑↓/jk: navigate | o: sign out | q: quit",
    };
    let text = match &app.status_message {
        Some(status) => format!("{} | {}", status, hint),
        None => hint.to_string(),
    };

    let style = match &app.status_message {
        Some(status) if status.starts_with("Validation Error") || status.starts_with("Login Failed") => {
            Style::default().fg(Color::Red)
        }
        Some(_) => Style::default().fg(Color::Green),
        None => Style::default(),
    };

    let status = Paragraph::new(text)
        .style(style)
        .block(Block::default().borders(Borders::ALL).title("Status"));
    f.render_widget(status, area);
}

/// A `width` x `height` rectangle centered in `area`, clipped to fit.
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
