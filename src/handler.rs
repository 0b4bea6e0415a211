use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tokio::sync::mpsc::UnboundedSender;

use crate::app::{App, AppMode, DialogKind, ViewMode};
use crate::browse::columns::ColumnRequest;
use crate::event::{Event, MutationKind};

/// Handle a key event.
pub fn handle_key_event(app: &mut App, key: KeyEvent, tx: &UnboundedSender<Event>) {
    match app.mode.clone() {
        AppMode::Normal => handle_normal_key(app, key, tx),
        AppMode::Dialog(kind) => handle_dialog_key(app, &kind, key, tx),
    }
}

fn handle_normal_key(app: &mut App, key: KeyEvent, tx: &UnboundedSender<Event>) {
    match key.code {
        KeyCode::Char('q') => app.quit(),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => app.quit(),
        KeyCode::Tab => switch_view(app, tx),
        KeyCode::Char('r') => refresh_active_view(app, tx),
        KeyCode::Enter => activate(app, tx),
        KeyCode::Up | KeyCode::Char('k') => match app.view {
            ViewMode::Tree => app.tree_select_previous(),
            ViewMode::Columns => app.col_move_up(),
        },
        KeyCode::Down | KeyCode::Char('j') => match app.view {
            ViewMode::Tree => app.tree_select_next(),
            ViewMode::Columns => app.col_move_down(),
        },
        KeyCode::Left | KeyCode::Char('h') => {
            if app.view == ViewMode::Columns {
                app.col_move_left();
            }
        }
        KeyCode::Right | KeyCode::Char('l') => {
            if app.view == ViewMode::Columns {
                app.col_move_right();
            }
        }
        KeyCode::Home | KeyCode::Char('g') => {
            if app.view == ViewMode::Tree {
                app.tree_select_first();
            }
        }
        KeyCode::End | KeyCode::Char('G') => {
            if app.view == ViewMode::Tree {
                app.tree_select_last();
            }
        }
        KeyCode::Char('d') => request_delete(app, tx),
        KeyCode::Char('a') => {
            // Mutations belong to the recursive variant (resync contract).
            if app.view == ViewMode::Tree {
                let parent = app.create_parent();
                app.open_dialog(DialogKind::CreateFolder { parent });
            }
        }
        _ => {}
    }
}

fn handle_dialog_key(app: &mut App, kind: &DialogKind, key: KeyEvent, tx: &UnboundedSender<Event>) {
    match kind {
        DialogKind::DeleteConfirm { target } => match key.code {
            KeyCode::Char('y') | KeyCode::Enter => {
                let target = target.clone();
                app.close_dialog();
                spawn_delete(app, target, tx);
            }
            KeyCode::Char('n') | KeyCode::Esc => app.close_dialog(),
            _ => {}
        },
        DialogKind::CreateFolder { parent } => match key.code {
            KeyCode::Enter => {
                let name = app.dialog_state.input.trim().to_string();
                if !name.is_empty() {
                    let parent = parent.clone();
                    app.close_dialog();
                    spawn_create_folder(app, parent, name, tx);
                }
            }
            KeyCode::Esc => app.close_dialog(),
            KeyCode::Backspace => app.dialog_backspace(),
            KeyCode::Char(c) => app.dialog_input_char(c),
            _ => {}
        },
        DialogKind::Error { .. } => match key.code {
            KeyCode::Enter | KeyCode::Esc => app.close_dialog(),
            _ => {}
        },
    }
}

fn switch_view(app: &mut App, tx: &UnboundedSender<Event>) {
    app.view = match app.view {
        ViewMode::Tree => ViewMode::Columns,
        ViewMode::Columns => ViewMode::Tree,
    };
    match app.view {
        // Lazily mount the column browser on first entry.
        ViewMode::Columns if app.columns.columns().is_empty() => {
            let request = app.columns.begin();
            spawn_column_fetch(app, request, tx);
        }
        ViewMode::Tree if app.tree.snapshot().is_empty() && !app.loading => {
            spawn_tree_refresh(app, tx);
        }
        _ => {}
    }
}

fn refresh_active_view(app: &mut App, tx: &UnboundedSender<Event>) {
    match app.view {
        ViewMode::Tree => spawn_tree_refresh(app, tx),
        ViewMode::Columns => {
            let request = app.columns.begin();
            spawn_column_fetch(app, request, tx);
        }
    }
}

fn activate(app: &mut App, tx: &UnboundedSender<Event>) {
    match app.view {
        ViewMode::Tree => app.tree_activate(),
        ViewMode::Columns => {
            if let Some(request) = app.column_activate() {
                spawn_column_fetch(app, request, tx);
            }
        }
    }
}

fn request_delete(app: &mut App, tx: &UnboundedSender<Event>) {
    if app.view != ViewMode::Tree {
        return;
    }
    let Some(row) = app.selected_tree_row() else {
        return;
    };
    if app.confirm_delete {
        app.open_dialog(DialogKind::DeleteConfirm { target: row.path });
    } else {
        spawn_delete(app, row.path, tx);
    }
}

/// Refetch the whole tree (resync after a mutation, or manual refresh).
pub fn spawn_tree_refresh(app: &mut App, tx: &UnboundedSender<Event>) {
    app.loading = true;
    let client = app.client.clone();
    let tx = tx.clone();
    tokio::spawn(async move {
        let result = client.list_full_tree().await.map_err(|e| e.to_string());
        let _ = tx.send(Event::TreeLoaded(result));
    });
}

/// Resolve one directory level for the column browser.
pub fn spawn_column_fetch(app: &App, request: ColumnRequest, tx: &UnboundedSender<Event>) {
    let client = app.client.clone();
    let tx = tx.clone();
    tokio::spawn(async move {
        let result = client
            .list_children(&request.segments)
            .await
            .map_err(|e| e.to_string());
        let _ = tx.send(Event::ColumnLoaded { request, result });
    });
}

fn spawn_delete(app: &App, path: String, tx: &UnboundedSender<Event>) {
    let client = app.client.clone();
    let tx = tx.clone();
    tokio::spawn(async move {
        let result = client.delete_entry(&path).await.map_err(|e| e.to_string());
        let _ = tx.send(Event::MutationComplete {
            kind: MutationKind::Delete { path },
            result,
        });
    });
}

fn spawn_create_folder(app: &App, parent: String, name: String, tx: &UnboundedSender<Event>) {
    let client = app.client.clone();
    let tx = tx.clone();
    tokio::spawn(async move {
        let result = client
            .create_folder(&parent, &name)
            .await
            .map_err(|e| e.to_string());
        let _ = tx.send(Event::MutationComplete {
            kind: MutationKind::CreateFolder { parent, name },
            result,
        });
    });
}
