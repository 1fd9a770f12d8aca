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

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::App;

/// Main event handler that processes keyboard input. Returns Ok(true) when
/// the app should exit.
pub fn handle_key_event(app: &mut App, key_event: KeyEvent) -> anyhow::Result<bool> {
    let KeyEvent { code, modifiers, .. } = key_event;

    // Confirm popup has priority over global keys
    if app.show_confirm_popup {
        match code {
            KeyCode::Enter | KeyCode::Char('y') | KeyCode::Char('Y') => app.confirm_switch(),
            KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => app.cancel_switch(),
            _ => {}
        }
        return Ok(false);
    }

    match code {
        KeyCode::Char('q') | KeyCode::Char('Q') => return Ok(true),
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => return Ok(true),
        KeyCode::Up | KeyCode::Char('k') => app.move_up(),
        KeyCode::Down | KeyCode::Char('j') => app.move_down(),
        // Re-applying the active profile is allowed: with partial evidence on
        // disk the detected profile may be a half-written state worth
        // re-running envycontrol for.
        KeyCode::Enter => app.request_switch(),
        KeyCode::Char('r') | KeyCode::Char('R') => {
            app.refresh();
            app.feedback = None;
        }
        _ => {}
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::GpuProfile;
    use crate::test_utils::test_utils::{create_temp_detection, failing_switcher};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn temp_app() -> (tempfile::TempDir, App) {
        let (dir, paths) = create_temp_detection();
        let app = App::with_parts(paths, failing_switcher());
        (dir, app)
    }

    #[test]
    fn test_q_exits() {
        let (_dir, mut app) = temp_app();
        assert!(handle_key_event(&mut app, key(KeyCode::Char('q'))).unwrap());
    }

    #[test]
    fn test_ctrl_c_exits() {
        let (_dir, mut app) = temp_app();
        let ev = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(handle_key_event(&mut app, ev).unwrap());
    }

    #[test]
    fn test_arrows_and_vi_keys_navigate() {
        let (_dir, mut app) = temp_app();
        assert_eq!(app.selected, 1); // Hybrid with no evidence files
        handle_key_event(&mut app, key(KeyCode::Up)).unwrap();
        assert_eq!(app.selected, 0);
        handle_key_event(&mut app, key(KeyCode::Char('j'))).unwrap();
        handle_key_event(&mut app, key(KeyCode::Char('j'))).unwrap();
        assert_eq!(app.selected, 2);
        handle_key_event(&mut app, key(KeyCode::Char('k'))).unwrap();
        assert_eq!(app.selected, 1);
    }

    #[test]
    fn test_enter_on_active_profile_offers_reapply() {
        let (_dir, mut app) = temp_app();
        assert_eq!(app.selected_profile(), app.current);
        handle_key_event(&mut app, key(KeyCode::Enter)).unwrap();
        assert!(app.show_confirm_popup);
        assert_eq!(app.pending, Some(GpuProfile::Hybrid));
    }

    #[test]
    fn test_enter_on_other_profile_opens_popup() {
        let (_dir, mut app) = temp_app();
        handle_key_event(&mut app, key(KeyCode::Down)).unwrap();
        handle_key_event(&mut app, key(KeyCode::Enter)).unwrap();
        assert!(app.show_confirm_popup);
        assert_eq!(app.pending, Some(GpuProfile::Nvidia));
    }

    #[test]
    fn test_esc_cancels_popup() {
        let (_dir, mut app) = temp_app();
        handle_key_event(&mut app, key(KeyCode::Down)).unwrap();
        handle_key_event(&mut app, key(KeyCode::Enter)).unwrap();
        handle_key_event(&mut app, key(KeyCode::Esc)).unwrap();
        assert!(!app.show_confirm_popup);
        assert!(app.pending.is_none());
        assert!(!app.switch_started);
    }

    #[test]
    fn test_popup_swallows_global_keys() {
        let (_dir, mut app) = temp_app();
        handle_key_event(&mut app, key(KeyCode::Down)).unwrap();
        handle_key_event(&mut app, key(KeyCode::Enter)).unwrap();
        // q must not quit while the popup is open
        assert!(!handle_key_event(&mut app, key(KeyCode::Char('q'))).unwrap());
        assert!(app.show_confirm_popup);
    }

    #[test]
    fn test_confirm_runs_the_switcher() {
        let (_dir, mut app) = temp_app();
        handle_key_event(&mut app, key(KeyCode::Down)).unwrap();
        handle_key_event(&mut app, key(KeyCode::Enter)).unwrap();
        handle_key_event(&mut app, key(KeyCode::Char('y'))).unwrap();
        assert!(!app.show_confirm_popup);
        // The test switcher points at a nonexistent shell, so the failure
        // must surface as feedback instead of a panic.
        let (is_error, _) = app.feedback.clone().expect("feedback after confirm");
        assert!(is_error);
    }

    #[test]
    fn test_r_refreshes_and_clears_feedback() {
        let (_dir, mut app) = temp_app();
        app.feedback = Some((false, "old".to_string()));
        handle_key_event(&mut app, key(KeyCode::Char('r'))).unwrap();
        assert!(app.feedback.is_none());
        assert_eq!(app.current, GpuProfile::Hybrid);
    }
}
