//! Password Catch entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlButtonElement, HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use password_catch::consts::COUNTDOWN_PERIOD_MS;
    use password_catch::renderer::CanvasRenderer;
    use password_catch::sim::{HeldDirections, PcgRandom, Session, SessionReport, SessionToken};
    use password_catch::{LabelPools, Tuning};

    /// Game instance holding all state
    struct Game {
        session: Session,
        renderer: CanvasRenderer,
        held: HeldDirections,
    }

    fn document() -> Option<Document> {
        web_sys::window()?.document()
    }

    fn set_text(id: &str, text: &str) {
        if let Some(el) = document().and_then(|d| d.get_element_by_id(id)) {
            el.set_text_content(Some(text));
        }
    }

    fn set_hidden(id: &str, hidden: bool) {
        if let Some(el) = document().and_then(|d| d.get_element_by_id(id)) {
            let classes = el.class_list();
            let _ = if hidden {
                classes.add_1("hidden")
            } else {
                classes.remove_1("hidden")
            };
        }
    }

    fn set_disabled(id: &str, disabled: bool) {
        if let Some(btn) = document()
            .and_then(|d| d.get_element_by_id(id))
            .and_then(|el| el.dyn_into::<HtmlButtonElement>().ok())
        {
            btn.set_disabled(disabled);
        }
    }

    fn escape_html(text: &str) -> String {
        text.replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
            .replace('"', "&quot;")
    }

    /// Read a global injected by the host page as a JSON string
    fn global_json(name: &str) -> Option<String> {
        let window = web_sys::window()?;
        let value = js_sys::Reflect::get(&window, &JsValue::from_str(name)).ok()?;
        if value.is_undefined() || value.is_null() {
            return None;
        }
        js_sys::JSON::stringify(&value).ok()?.as_string()
    }

    fn update_hud(game: &Game) {
        let hud = game.session.hud();
        set_text("score", &hud.score.to_string());
        set_text("misses", &hud.misses.to_string());
        set_text("time", &hud.time_left.to_string());
    }

    fn show_report(report: &SessionReport) -> Result<(), JsValue> {
        let document = document().ok_or_else(|| JsValue::from_str("no document"))?;
        if let Some(body) = document.query_selector("#reviewTable tbody")? {
            body.set_inner_html("");
            for row in report.rows() {
                let tr = document.create_element("tr")?;
                tr.set_inner_html(&format!(
                    "<td>{}</td><td><code>{}</code></td><td>{}</td><td>{}</td>",
                    row.index,
                    escape_html(&row.label),
                    row.verdict,
                    escape_html(&row.tip)
                ));
                body.append_child(&tr)?;
            }
        }
        set_text("modalTitle", report.title());
        set_text("modalReason", report.reason_text());
        set_hidden("overlay", false);
        set_disabled("startBtn", false);
        set_disabled("restartBtn", false);
        Ok(())
    }

    fn end_game(game: &Game) {
        if let Some(report) = game.session.report() {
            if let Err(e) = show_report(&report) {
                log::warn!("Failed to show report: {:?}", e);
            }
        }
    }

    fn start_game(game: Rc<RefCell<Game>>) {
        let token = {
            let mut g = game.borrow_mut();
            let token = g.session.start();
            update_hud(&g);
            token
        };
        set_disabled("startBtn", true);
        set_disabled("restartBtn", false);
        set_hidden("overlay", true);

        request_animation_frame(game.clone(), token);
        schedule_countdown(game, token);
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>, token: SessionToken) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            frame_loop(game, token, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn frame_loop(game: Rc<RefCell<Game>>, token: SessionToken, time: f64) {
        let (was_live, keep_going) = {
            let mut g = game.borrow_mut();
            let was_live = g.session.is_current(token);
            let Game {
                session,
                renderer,
                held,
            } = &mut *g;
            let keep_going = session.frame(token, time, *held, renderer);
            update_hud(&g);
            if was_live && !keep_going {
                end_game(&g);
            }
            (was_live, keep_going)
        };

        if was_live && keep_going {
            request_animation_frame(game, token);
        }
    }

    fn schedule_countdown(game: Rc<RefCell<Game>>, token: SessionToken) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move || {
            countdown_tick(game, token);
        });
        let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            COUNTDOWN_PERIOD_MS as i32,
        );
        closure.forget();
    }

    fn countdown_tick(game: Rc<RefCell<Game>>, token: SessionToken) {
        let keep_going = {
            let mut g = game.borrow_mut();
            let was_live = g.session.is_current(token);
            let keep_going = g.session.countdown(token);
            update_hud(&g);
            if was_live && !keep_going {
                end_game(&g);
            }
            keep_going
        };

        if keep_going {
            schedule_countdown(game, token);
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Password Catch starting...");

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .ok_or_else(|| JsValue::from_str("no canvas"))?
            .dyn_into()?;

        let mut tuning = global_json("gameTuning")
            .map(|json| Tuning::from_json(&json))
            .unwrap_or_default();
        tuning.playfield_width = canvas.width() as f32;
        tuning.playfield_height = canvas.height() as f32;

        let seed = js_sys::Date::now() as u64;
        let mut rng = PcgRandom::new(seed);
        let pools = LabelPools::from_injected(global_json("gameData").as_deref())
            .shuffled(&mut rng);
        if pools.is_empty() {
            log::warn!("Both label pools are empty, the session can only end on time");
        }

        log::info!("Game initialized with seed: {}", seed);

        let game = Rc::new(RefCell::new(Game {
            session: Session::new(tuning, pools, rng),
            renderer: CanvasRenderer::new(&canvas)?,
            held: HeldDirections::default(),
        }));
        update_hud(&game.borrow());

        setup_input_handlers(&canvas, game.clone())?;
        setup_buttons(&document, game)?;

        log::info!("Password Catch ready!");
        Ok(())
    }

    fn setup_input_handlers(
        canvas: &HtmlCanvasElement,
        game: Rc<RefCell<Game>>,
    ) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;

        // Held arrow keys
        for (event_name, pressed) in [("keydown", true), ("keyup", false)] {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    "ArrowLeft" => g.held.left = pressed,
                    "ArrowRight" => g.held.right = pressed,
                    _ => {}
                }
            });
            window.add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Mouse move - absolute position, live in every phase
        {
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let rect = canvas_clone.get_bounding_client_rect();
                let x = event.client_x() as f32 - rect.left() as f32;
                game.borrow_mut().session.pointer_moved(x);
            });
            canvas.add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn setup_buttons(document: &Document, game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        // Start, restart and play-again all start a fresh session
        for id in ["startBtn", "restartBtn", "playAgain"] {
            if let Some(btn) = document.get_element_by_id(id) {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                    start_game(game.clone());
                });
                btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
                closure.forget();
            }
        }

        if let Some(btn) = document.get_element_by_id("closeModal") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                set_hidden("overlay", true);
            });
            btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use password_catch::platform::{FrameInput, HeadlessLoop};
    use password_catch::renderer::HeadlessRenderer;
    use password_catch::sim::{PcgRandom, Session, autopilot_target};
    use password_catch::{LabelPools, Tuning};

    env_logger::init();
    log::info!("Password Catch (native) starting...");
    log::info!("Native mode runs a headless autopilot session - serve the wasm build to play");

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or(0)
        });
    let mut rng = PcgRandom::new(seed);
    let pools = LabelPools::builtin().shuffled(&mut rng);
    let mut session = Session::new(Tuning::default(), pools, rng);
    let mut renderer = HeadlessRenderer::default();

    log::info!("Game initialized with seed: {}", seed);

    let report = HeadlessLoop::default().run(&mut session, &mut renderer, |s| FrameInput {
        pointer_x: autopilot_target(s.state(), s.basket()),
        ..Default::default()
    });

    let Some(report) = report else {
        log::error!("Session did not finish");
        return;
    };

    println!("\n{}: {}", report.title(), report.reason_text());
    println!("Score: {}\n", report.score);
    for row in report.rows() {
        println!("{:>3}  {:<18} {:<18} {}", row.index, row.label, row.verdict, row.tip);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
