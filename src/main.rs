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

mod profile;
mod detect;
mod switcher;
mod logger;
mod app;
mod events;
mod ui;

#[cfg(test)]
mod test_utils;

use std::io::stdout;

use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::Terminal;

use app::App;
use detect::DetectionPaths;
use events::handle_key_event;
use profile::GpuProfile;
use switcher::Switcher;
use ui::ui;

fn main() -> anyhow::Result<()> {
    // Gather args once
    let args: Vec<String> = std::env::args().collect();

    // Optional logging to $XDG_STATE_HOME/envyswitch/logs.json
    let logging_enabled = args.iter().any(|a| a == "--logging");
    if logging_enabled {
        logger::init_logging();
        logger::log_event("startup", serde_json::json!({ "args": args }));
    }

    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_usage();
        return Ok(());
    }
    if args.iter().any(|a| a == "--version" || a == "-V") {
        println!("envyswitch {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    // `envyswitch status [--json]` prints the active profile and exits
    if args.get(1).map(|s| s.as_str()) == Some("status") {
        let paths = DetectionPaths::default();
        let profile = paths.detect();
        if logging_enabled {
            logger::log_event("detect", serde_json::json!({ "profile": profile.as_str() }));
        }
        if args.iter().any(|a| a == "--json") {
            let out = serde_json::json!({
                "profile": profile,
                "evidence": paths.evidence(),
            });
            println!("{}", out);
        } else {
            println!("{}", profile);
        }
        return Ok(());
    }

    // `envyswitch switch <profile> [--dry-run]` applies a profile and exits
    if args.get(1).map(|s| s.as_str()) == Some("switch") {
        let name = match first_positional(&args, 2) {
            Some(n) => n,
            None => {
                eprintln!("usage: envyswitch switch <integrated|hybrid|nvidia> [--dry-run]");
                std::process::exit(2);
            }
        };
        let profile: GpuProfile = match name.parse() {
            Ok(p) => p,
            Err(e) => {
                eprintln!("error: {}", e);
                std::process::exit(2);
            }
        };
        let switcher = Switcher::default();
        if args.iter().any(|a| a == "--dry-run") {
            println!("{}", switcher.command_for(profile));
            return Ok(());
        }
        if logging_enabled {
            logger::log_event("switch_requested", serde_json::json!({ "profile": profile.as_str() }));
        }
        return match switcher.switch_to(profile) {
            Ok(()) => {
                println!("Switching to {}; the session will restart shortly.", profile);
                Ok(())
            }
            Err(e) => {
                eprintln!("error: {}", e);
                if logging_enabled {
                    logger::log_event("switch_error", serde_json::json!({ "error": e.to_string() }));
                }
                std::process::exit(1);
            }
        };
    }

    if let Some(first) = args.get(1) {
        if !first.starts_with('-') {
            eprintln!("unknown command: {}", first);
            print_usage();
            std::process::exit(2);
        }
    }

    // Terminal init
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    if logging_enabled {
        logger::log_event("tui_start", serde_json::json!({}));
    }
    let res = run_app(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("error: {err}");
        if logging_enabled {
            logger::log_event("fatal_error", serde_json::json!({ "error": err.to_string() }));
        }
        std::process::exit(1);
    }

    Ok(())
}

fn run_app(terminal: &mut Terminal<ratatui::backend::CrosstermBackend<std::io::Stdout>>) -> anyhow::Result<()> {
    let mut app = App::new();

    loop {
        // draw
        terminal.draw(|f| ui(f, &app))?;

        // tick: re-detect periodically so external changes show up
        let timeout = app
            .refresh_interval
            .saturating_sub(app.last_refresh.elapsed());
        if event::poll(timeout).unwrap_or(false) {
            if let Event::Key(key_event) = event::read()? {
                if handle_key_event(&mut app, key_event)? {
                    return Ok(());
                }
            }
        }

        if app.last_refresh.elapsed() >= app.refresh_interval {
            app.refresh();
        }
    }
}

/// First non-flag argument at or after `skip`, so flags may appear on either
/// side of a positional.
fn first_positional(args: &[String], skip: usize) -> Option<&str> {
    args.iter()
        .skip(skip)
        .find(|a| !a.starts_with('-'))
        .map(|s| s.as_str())
}

fn print_usage() {
    println!("envyswitch - GPU power profile switcher for envycontrol");
    println!();
    println!("USAGE:");
    println!("    envyswitch [--logging]                 interactive profile menu");
    println!("    envyswitch status [--json]             print the active profile");
    println!("    envyswitch switch <profile> [--dry-run]");
    println!("                                           switch profile (integrated|hybrid|nvidia)");
    println!();
    println!("Switching invokes 'envycontrol' through pkexec and then restarts the");
    println!("session with 'gnome-session-quit --reboot'.");
}
