mod config;
mod game;
mod input;
mod logging;
mod time;
mod widgets;

use std::{cell::RefCell, io, rc::Rc};

use ratzilla::event::{KeyCode, MouseButton, MouseEventKind};
use ratzilla::ratatui::Terminal;
use ratzilla::{DomBackend, WebRenderer};

use config::GameConfig;
use game::save::SaveStore;
use game::ClickerGame;
use input::{pixel_x_to_col, pixel_y_to_row, ClickState, InputEvent, Modifiers};
use time::GameTime;

fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}

/// Map a pointer position to a terminal cell via the grid container's bounding rect.
fn dom_pixel_to_cell(mouse_x: u32, mouse_y: u32, cs: &ClickState) -> Option<(u16, u16)> {
    let document = web_sys::window()?.document()?;

    // DomBackend renders its grid as a <div> directly under <body>.
    let grid = document.query_selector("body > div").ok()??;
    let rect = grid.get_bounding_client_rect();

    let col = pixel_x_to_col(mouse_x as f64 - rect.left(), rect.width(), cs.terminal_cols)?;
    let row = pixel_y_to_row(mouse_y as f64 - rect.top(), rect.height(), cs.terminal_rows)?;
    log::trace!("pointer at ({mouse_x}, {mouse_y}) -> cell ({col}, {row})");
    Some((col, row))
}

fn save_store(key: &'static str) -> Box<dyn SaveStore> {
    #[cfg(target_arch = "wasm32")]
    {
        Box::new(game::save::LocalStorage::new(key))
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = key;
        Box::new(game::save::MemoryStore::default())
    }
}

fn main() -> io::Result<()> {
    console_error_panic_hook::set_once();
    logging::init(log::LevelFilter::Info);

    let config = GameConfig::default();
    let clock = RefCell::new(GameTime::new(config.ticks_per_sec, config.max_frame_delta_ms));
    let store = save_store(config.storage_key);
    let seed = js_sys::Date::now() as u64 as u32;
    let game = Rc::new(RefCell::new(ClickerGame::load(config, store, now_ms(), seed)));
    let click_state = Rc::new(RefCell::new(ClickState::new()));

    let backend = DomBackend::new()?;
    let terminal = Terminal::new(backend)?;

    terminal.on_mouse_event({
        let game = game.clone();
        let click_state = click_state.clone();
        move |mouse_event| {
            if mouse_event.event != MouseEventKind::Pressed
                || mouse_event.button != MouseButton::Left
            {
                return;
            }

            let action = {
                let cs = click_state.borrow();
                if cs.terminal_rows == 0 || cs.terminal_cols == 0 {
                    return;
                }
                dom_pixel_to_cell(mouse_event.x, mouse_event.y, &cs)
                    .and_then(|(col, row)| cs.hit_test(col, row))
            };

            if let Some(action) = action {
                let mods = Modifiers {
                    shift: mouse_event.shift,
                    ctrl: mouse_event.ctrl,
                };
                game.borrow_mut()
                    .handle_input(&InputEvent::Click(action, mods), now_ms());
            }
        }
    });

    terminal.on_key_event({
        let game = game.clone();
        move |key_event| {
            if let KeyCode::Char(c) = key_event.code {
                game.borrow_mut()
                    .handle_input(&InputEvent::Key(c.to_ascii_lowercase()), now_ms());
            }
        }
    });

    terminal.draw_web(move |f| {
        let now = now_ms();
        let ticks = clock.borrow_mut().update(now);
        let mut game = game.borrow_mut();
        game.tick(ticks, now);

        let size = f.area();
        {
            let mut cs = click_state.borrow_mut();
            cs.terminal_cols = size.width;
            cs.terminal_rows = size.height;
            cs.clear_targets();
        }
        game.render(f, size, &click_state);
    });

    Ok(())
}
