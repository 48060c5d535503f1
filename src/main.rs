//! Times Table entry point
//!
//! Wires the quiz core to the browser DOM (wasm32) or to a terminal (native).

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlInputElement, KeyboardEvent, MouseEvent};

    use times_table::Settings;
    use times_table::quiz::{
        DifficultyLevel, GamePhase, GameSession, NextQuestionTicket, SessionId, SubmitOutcome,
    };

    /// Screen element id for each phase
    fn screen_for(phase: GamePhase) -> &'static str {
        match phase {
            GamePhase::Idle => "level-screen",
            GamePhase::Active => "game-screen",
            GamePhase::Finished => "results-screen",
        }
    }

    /// Running 1 s interval and the closure it calls
    struct Ticker {
        session: SessionId,
        handle: i32,
        _callback: Closure<dyn FnMut()>,
    }

    /// Game instance holding all state
    struct Game {
        session: GameSession,
        settings: Settings,
        ticker: Option<Ticker>,
        /// Scheduled next-question timeout
        next_question: Option<(NextQuestionTicket, i32)>,
    }

    impl Game {
        fn new(seed: u64, settings: Settings) -> Self {
            Self {
                session: GameSession::new(seed, &settings),
                settings,
                ticker: None,
                next_question: None,
            }
        }
    }

    fn document() -> Option<Document> {
        web_sys::window()?.document()
    }

    fn answer_input(document: &Document) -> Option<HtmlInputElement> {
        document
            .get_element_by_id("answer-input")?
            .dyn_into::<HtmlInputElement>()
            .ok()
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    /// Clear and focus the answer box for a fresh question
    fn reset_answer_input() {
        if let Some(input) = document().as_ref().and_then(answer_input) {
            input.set_value("");
            let _ = input.focus();
        }
    }

    /// Update DOM from the current snapshot
    fn render(game: &Game) {
        let Some(document) = document() else {
            return;
        };
        let snap = game.session.snapshot();

        // Show exactly one screen
        if let Ok(screens) = document.query_selector_all(".screen") {
            for i in 0..screens.length() {
                if let Some(el) = screens.get(i).and_then(|n| n.dyn_into::<web_sys::Element>().ok()) {
                    let _ = el.class_list().remove_1("active");
                }
            }
        }
        if let Some(el) = document.get_element_by_id(screen_for(snap.phase)) {
            let _ = el.class_list().add_1("active");
        }

        // Game screen
        let operand = |n: Option<u32>| n.map(|n| n.to_string()).unwrap_or_default();
        set_text(&document, "num1", &operand(snap.num1));
        set_text(&document, "num2", &operand(snap.num2));
        set_text(&document, "score", &snap.score.to_string());
        set_text(&document, "streak", &snap.streak.to_string());
        set_text(&document, "timer", &snap.elapsed);

        if let Some(el) = document.get_element_by_id("feedback") {
            match &snap.feedback {
                Some(feedback) => {
                    el.set_text_content(Some(&feedback.message));
                    el.set_class_name(&format!("feedback {}", feedback.kind.css_class()));
                }
                None => {
                    el.set_text_content(Some(""));
                    el.set_class_name("feedback");
                }
            }
        }

        if let Some(input) = answer_input(&document) {
            input.set_disabled(snap.awaiting_next);
        }

        // Results screen
        if let Some(summary) = &snap.summary {
            set_text(&document, "final-score", &summary.final_score.to_string());
            set_text(&document, "total-questions", &summary.total_questions.to_string());
            set_text(&document, "correct-answers", &summary.correct_answers.to_string());
            set_text(&document, "accuracy", &format!("{}%", summary.accuracy));
            set_text(&document, "time-played", &summary.time_played);
            set_text(&document, "celebration", summary.celebration.message());
        }
    }

    /// Bring the browser interval and timeout in line with the session.
    ///
    /// Runs after every transition. The core also drops stale ticks and tickets,
    /// so a callback that fires before it is cleared does nothing.
    fn sync_tasks(game: &Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let mut g = game.borrow_mut();

        // Session timer interval
        let running = g.session.timer().is_running();
        let current = g.session.session_id();
        let stale = g.ticker.as_ref().is_some_and(|t| !running || t.session != current);
        if stale {
            if let Some(ticker) = g.ticker.take() {
                window.clear_interval_with_handle(ticker.handle);
                log::debug!("Cleared timer for session {}", ticker.session.value());
            }
        }
        if running && g.ticker.is_none() {
            let game_cb = game.clone();
            let callback = Closure::<dyn FnMut()>::new(move || {
                let mut g = game_cb.borrow_mut();
                if g.session.tick(current) {
                    render(&g);
                }
            });
            let interval = i32::try_from(g.settings.tick_interval_ms).unwrap_or(i32::MAX);
            match window.set_interval_with_callback_and_timeout_and_arguments_0(
                callback.as_ref().unchecked_ref(),
                interval,
            ) {
                Ok(handle) => {
                    g.ticker = Some(Ticker {
                        session: current,
                        handle,
                        _callback: callback,
                    })
                }
                Err(e) => log::error!("Failed to start timer: {:?}", e),
            }
        }

        // Next-question timeout
        let pending = g.session.pending_ticket();
        if g.next_question.map(|(ticket, _)| ticket) != pending {
            if let Some((ticket, handle)) = g.next_question.take() {
                window.clear_timeout_with_handle(handle);
                log::debug!("Cancelled next question {:?}", ticket);
            }
            if let Some(ticket) = pending {
                let game_cb = game.clone();
                let callback = Closure::once_into_js(move || on_next_question(&game_cb, ticket));
                match window.set_timeout_with_callback_and_timeout_and_arguments_0(
                    callback.unchecked_ref(),
                    i32::try_from(ticket.delay_ms).unwrap_or(i32::MAX),
                ) {
                    Ok(handle) => g.next_question = Some((ticket, handle)),
                    Err(e) => log::error!("Failed to schedule next question: {:?}", e),
                }
            }
        }
    }

    fn on_next_question(game: &Rc<RefCell<Game>>, ticket: NextQuestionTicket) {
        {
            let mut g = game.borrow_mut();
            if g.next_question.is_some_and(|(t, _)| t == ticket) {
                g.next_question = None;
            }
            if !g.session.advance(ticket) {
                return;
            }
            render(&g);
        }
        reset_answer_input();
    }

    /// Run a transition, then reschedule tasks and redraw
    fn apply<F: FnOnce(&mut GameSession)>(game: &Rc<RefCell<Game>>, f: F) {
        f(&mut game.borrow_mut().session);
        sync_tasks(game);
        render(&game.borrow());
    }

    fn submit_answer(game: &Rc<RefCell<Game>>) {
        let raw = document()
            .as_ref()
            .and_then(answer_input)
            .map(|input| input.value())
            .unwrap_or_default();
        apply(game, |session| match session.submit(&raw) {
            SubmitOutcome::Answered { evaluation, .. } => {
                log::debug!("Answer {:?} correct: {}", raw, evaluation.is_correct())
            }
            SubmitOutcome::Invalid(_) => log::debug!("Invalid answer {:?}", raw),
            SubmitOutcome::Ignored => {}
        });
    }

    fn on_click<F: FnMut() + 'static>(document: &Document, id: &str, mut f: F) {
        let Some(el) = document.get_element_by_id(id) else {
            log::warn!("Missing #{}", id);
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| f());
        let _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_level_buttons(document: &Document, game: &Rc<RefCell<Game>>) {
        let Ok(buttons) = document.query_selector_all(".level-btn") else {
            return;
        };
        for i in 0..buttons.length() {
            let Some(btn) = buttons.get(i).and_then(|n| n.dyn_into::<web_sys::Element>().ok()) else {
                continue;
            };
            let attr = btn.get_attribute("data-level").unwrap_or_default();
            let Some(level) = DifficultyLevel::from_str(&attr) else {
                log::warn!("Unknown level button {:?}", attr);
                continue;
            };
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                apply(&game, |session| {
                    session.select_level(level);
                });
                reset_answer_input();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_answer_input(document: &Document, game: &Rc<RefCell<Game>>) {
        {
            let game = game.clone();
            on_click(document, "submit-btn", move || submit_answer(&game));
        }

        if let Some(input) = answer_input(document) {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if event.key() == "Enter" {
                    submit_answer(&game);
                }
            });
            let _ = input.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_session_buttons(document: &Document, game: &Rc<RefCell<Game>>) {
        {
            let game = game.clone();
            on_click(document, "quit-btn", move || {
                apply(&game, |session| {
                    session.quit();
                })
            });
        }
        {
            let game = game.clone();
            on_click(document, "play-again-btn", move || {
                apply(&game, |session| {
                    session.play_again();
                });
                reset_answer_input();
            });
        }
        {
            let game = game.clone();
            on_click(document, "change-level-btn", move || {
                apply(&game, |session| {
                    session.change_level();
                })
            });
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Times Table starting...");

        let Some(document) = document() else {
            log::error!("No document available");
            return;
        };

        let settings = Settings::load();
        let seed = settings.seed.unwrap_or_else(|| js_sys::Date::now() as u64);
        let game = Rc::new(RefCell::new(Game::new(seed, settings)));
        log::info!("Quiz initialized with seed: {}", game.borrow().session.seed());

        setup_level_buttons(&document, &game);
        setup_answer_input(&document, &game);
        setup_session_buttons(&document, &game);

        render(&game.borrow());
        log::info!("Times Table running!");
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
mod terminal {
    use std::io::{self, BufRead, Write};
    use std::thread;
    use std::time::{Duration, Instant};

    use times_table::Settings;
    use times_table::quiz::{DifficultyLevel, GameSession, SessionId, SubmitOutcome, Summary};

    /// Wall clock feeding whole-interval ticks to the session
    struct Clock {
        session: SessionId,
        started: Instant,
        interval: Duration,
        ticked: u32,
    }

    impl Clock {
        fn new(session: SessionId, interval_ms: u32) -> Self {
            Self {
                session,
                started: Instant::now(),
                interval: Duration::from_millis(u64::from(interval_ms)),
                ticked: 0,
            }
        }

        /// Deliver every tick that has come due since the last call
        fn catch_up(&mut self, session: &mut GameSession) {
            let due = (self.started.elapsed().as_millis() / self.interval.as_millis().max(1)) as u32;
            while self.ticked < due {
                session.tick(self.session);
                self.ticked += 1;
            }
        }
    }

    fn prompt(lines: &mut impl Iterator<Item = io::Result<String>>, text: &str) -> io::Result<Option<String>> {
        print!("{}", text);
        io::stdout().flush()?;
        lines.next().transpose()
    }

    fn print_summary(summary: &Summary) {
        println!();
        println!("=== Results ({}) ===", summary.level.name());
        println!("Final score:     {}", summary.final_score);
        println!("Questions:       {}", summary.total_questions);
        println!("Correct answers: {}", summary.correct_answers);
        println!("Accuracy:        {}%", summary.accuracy);
        println!("Time played:     {}", summary.time_played);
        println!("{}", summary.celebration.message());
        println!();
    }

    fn choose_level(lines: &mut impl Iterator<Item = io::Result<String>>) -> io::Result<Option<DifficultyLevel>> {
        loop {
            let Some(line) = prompt(lines, "Level (easy/medium/hard/expert): ")? else {
                return Ok(None);
            };
            match DifficultyLevel::from_str(&line) {
                Some(level) => return Ok(Some(level)),
                None => println!("Unknown level {:?}", line.trim()),
            }
        }
    }

    /// Answer questions until the player quits. Returns false on end of input.
    fn play_session(
        session: &mut GameSession,
        settings: &Settings,
        lines: &mut impl Iterator<Item = io::Result<String>>,
    ) -> io::Result<bool> {
        let mut clock = Clock::new(session.session_id(), settings.tick_interval_ms);
        println!("{} level. Type q to quit.", session.level().name());

        loop {
            clock.catch_up(session);
            let snap = session.snapshot();
            let (Some(num1), Some(num2)) = (snap.num1, snap.num2) else {
                return Ok(true);
            };
            let text = format!(
                "[score {} | streak {} | {}] {} × {} = ",
                snap.score, snap.streak, snap.elapsed, num1, num2
            );
            let line = prompt(lines, &text)?;
            clock.catch_up(session);

            let Some(line) = line else {
                if let Some(summary) = session.quit() {
                    print_summary(&summary);
                }
                return Ok(false);
            };
            if line.trim().eq_ignore_ascii_case("q") {
                if let Some(summary) = session.quit() {
                    print_summary(&summary);
                }
                return Ok(true);
            }

            match session.submit(&line) {
                SubmitOutcome::Invalid(feedback) => println!("{}", feedback.message),
                SubmitOutcome::Answered { evaluation, ticket } => {
                    println!("{}", evaluation.message);
                    thread::sleep(Duration::from_millis(u64::from(ticket.delay_ms)));
                    clock.catch_up(session);
                    session.advance(ticket);
                }
                SubmitOutcome::Ignored => {}
            }
        }
    }

    pub fn play(session: &mut GameSession, level: DifficultyLevel, settings: &Settings) -> io::Result<()> {
        let stdin = io::stdin();
        let mut lines = stdin.lock().lines();

        session.select_level(level);
        loop {
            if !play_session(session, settings, &mut lines)? {
                return Ok(());
            }
            let Some(choice) = prompt(&mut lines, "[p]lay again, [c]hange level, [e]xit: ")? else {
                return Ok(());
            };
            match choice.trim().to_lowercase().as_str() {
                "p" | "play" => {
                    session.play_again();
                }
                "c" | "change" => {
                    session.change_level();
                    let Some(level) = choose_level(&mut lines)? else {
                        return Ok(());
                    };
                    session.select_level(level);
                }
                _ => return Ok(()),
            }
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use times_table::quiz::{DifficultyLevel, GameSession};
    use times_table::Settings;

    env_logger::init();
    log::info!("Times Table (native) starting...");

    let settings = Settings::load();
    let level = match std::env::args().nth(1) {
        Some(arg) => match DifficultyLevel::from_str(&arg) {
            Some(level) => level,
            None => {
                eprintln!("Unknown level {:?}, expected easy, medium, hard or expert", arg);
                std::process::exit(2);
            }
        },
        None => settings.default_level,
    };

    let seed = settings.seed.unwrap_or_else(|| {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or_default()
    });
    let mut session = GameSession::new(seed, &settings);
    log::info!("Quiz initialized with seed: {}", session.seed());
    if let Err(e) = terminal::play(&mut session, level, &settings) {
        log::error!("Terminal error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
