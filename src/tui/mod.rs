pub mod app;
pub mod event;
pub mod layout;

use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use crossterm::event::KeyCode;
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::app::{AppContext, Result};

use self::app::{InputMode, TuiApp};
use self::event::{Action, AppEvent, EventHandler};

type Tui = Terminal<CrosstermBackend<Stdout>>;

pub async fn run(ctx: Arc<AppContext>) -> Result<()> {
    let mut terminal = setup_terminal()?;
    let result = run_app(&mut terminal, ctx).await;
    restore_terminal(&mut terminal)?;
    result
}

fn setup_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

async fn run_app(terminal: &mut Tui, ctx: Arc<AppContext>) -> Result<()> {
    let mut tui_app = TuiApp::new();
    let event_handler = EventHandler::new(Duration::from_millis(100));

    // The store's constructor already kicked off the first fetch; the
    // sync below picks it up as it completes.
    tui_app.sync(&ctx.store);

    loop {
        terminal.draw(|frame| layout::render(frame, &mut tui_app))?;

        match event_handler.next()? {
            AppEvent::Key(key) => {
                if tui_app.input_mode != InputMode::Normal {
                    handle_input_key(&mut tui_app, &ctx, key.code);
                } else if tui_app.pending_delete.is_some() {
                    handle_confirm_key(&mut tui_app, &ctx, key.code);
                } else {
                    handle_action(&mut tui_app, &ctx, Action::from(key));
                }
                tui_app.sync(&ctx.store);
            }
            AppEvent::Tick => {
                tui_app.sync(&ctx.store);
            }
        }

        if tui_app.should_quit {
            break;
        }
    }

    Ok(())
}

fn handle_input_key(tui_app: &mut TuiApp, ctx: &Arc<AppContext>, code: KeyCode) {
    match code {
        KeyCode::Esc => tui_app.leave_input(),
        KeyCode::Backspace => {
            tui_app.input_buffer.pop();
        }
        KeyCode::Enter => {
            let buffer = tui_app.input_buffer.clone();
            match tui_app.input_mode {
                InputMode::Search => {
                    ctx.store.filter_by_description(&buffer);
                }
                InputMode::MaxPrice => match buffer.trim().parse::<u32>() {
                    Ok(max) => ctx.store.filter_by_max_price(Some(max)),
                    Err(_) if buffer.trim().is_empty() => {}
                    Err(_) => tui_app.set_status(format!("Not a price: {}", buffer)),
                },
                InputMode::Normal => {}
            }
            tui_app.leave_input();
        }
        KeyCode::Char(c) => tui_app.input_buffer.push(c),
        _ => {}
    }
}

fn handle_confirm_key(tui_app: &mut TuiApp, ctx: &Arc<AppContext>, code: KeyCode) {
    match code {
        KeyCode::Char('y') | KeyCode::Char('Y') => {
            if let Some((id, description)) = tui_app.pending_delete.take() {
                // Fire-and-forget; the resync shows up on a later tick.
                let _ = ctx.store.delete_by_id(id);
                tui_app.set_status(format!("Deleting \"{}\"...", description));
            }
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            tui_app.pending_delete = None;
        }
        _ => {}
    }
}

fn handle_action(tui_app: &mut TuiApp, ctx: &Arc<AppContext>, action: Action) {
    match action {
        Action::Quit => tui_app.should_quit = true,
        Action::MoveUp => tui_app.move_up(),
        Action::MoveDown => tui_app.move_down(),
        Action::NextPage => tui_app.next_page(),
        Action::PrevPage => tui_app.prev_page(),
        Action::SortPriceAscending => ctx.store.sort_by_price(true),
        Action::SortPriceDescending => ctx.store.sort_by_price(false),
        Action::SortDateAscending => ctx.store.sort_by_time(true),
        Action::SortDateDescending => ctx.store.sort_by_time(false),
        Action::Search => tui_app.enter_input(InputMode::Search),
        Action::MaxPrice => tui_app.enter_input(InputMode::MaxPrice),
        Action::ResetFilters => {
            ctx.store.reset_filters();
            tui_app.status_message = None;
        }
        Action::Refresh => {
            let _ = ctx.store.fetch_all();
            tui_app.set_status("Refreshing...".to_string());
        }
        Action::OpenPicture => {
            if let Some(item) = tui_app.selected_item() {
                match &item.picture_url {
                    Some(url) => {
                        if let Err(e) = open::that(url) {
                            tui_app.set_status(format!("Failed to open browser: {}", e));
                        }
                    }
                    None => tui_app.set_status("No picture for this item".to_string()),
                }
            }
        }
        Action::Delete => {
            if let Some(item) = tui_app.selected_item() {
                tui_app.pending_delete = Some((item.id, item.description.clone()));
            }
        }
        Action::None => {}
    }
}
