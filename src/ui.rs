/*
 * This file is part of Envyswitch.
 *
 * Copyright (C) 2025 Envyswitch contributors
 *
 * Envyswitch is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * Envyswitch is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with Envyswitch. If not, see <https://www.gnu.org/licenses/>.
 */

use crate::app::App;
use crate::profile::GpuProfile;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

pub fn ui(f: &mut Frame, app: &App) {
    let size = f.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(3),
        ])
        .split(size);

    // Header: active profile
    let header = Paragraph::new(format!("Active profile: {}", app.current.label()))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .title(" envyswitch "),
        );
    f.render_widget(header, chunks[0]);

    // Profile list. The marker is derived from the single detected profile,
    // so exactly one entry carries it per draw.
    let mut items: Vec<ListItem> = Vec::new();
    for (i, p) in GpuProfile::ALL.iter().enumerate() {
        let sel = if i == app.selected { "> " } else { "  " };
        let marker = if *p == app.current { "●" } else { " " };
        items.push(ListItem::new(format!("{}{} {}", sel, marker, p.label())));
    }
    let mut state = ListState::default();
    state.select(Some(app.selected));
    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title(" GPU Profiles "),
    );
    f.render_stateful_widget(list, chunks[1], &mut state);

    // Footer: feedback takes precedence over the key help line
    let (footer_text, footer_style) = match &app.feedback {
        Some((true, msg)) => (msg.clone(), Style::default().fg(Color::Red)),
        Some((false, msg)) => (msg.clone(), Style::default().fg(Color::Green)),
        None => (app.status.clone(), Style::default().fg(Color::Gray)),
    };
    let footer = Paragraph::new(footer_text)
        .style(footer_style)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        );
    f.render_widget(footer, chunks[2]);

    // Confirm popup overlay
    if app.show_confirm_popup {
        let area = centered_rect(60, 30, size);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title(" Confirm switch ");
        let inner = block.inner(area);
        f.render_widget(Clear, area);
        f.render_widget(block, area);

        let name = app.pending.map(|p| p.label()).unwrap_or("?");
        let text = format!(
            "Switch GPU profile to {}?\n\nThis runs envycontrol with elevated rights\nand restarts the session.\n\nEnter/y apply  |  Esc/n cancel",
            name
        );
        let msg = Paragraph::new(text)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        f.render_widget(msg, inner);
    }
}
