//! Chicken Cross entry point
//!
//! The playable build runs in the browser (see `platform::web`). Natively
//! this runs a short headless session with a naive hop-forward bot.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use chicken_cross::consts::SIM_DT;
    use chicken_cross::platform::LogPresenter;
    use chicken_cross::sim::Move;
    use chicken_cross::{Command, Difficulty, Game, Tuning};

    env_logger::init();
    log::info!("Chicken Cross (native) starting...");
    log::info!("Native mode is headless - serve the web build to play");

    let mut tuning = Tuning::load("chicken-cross.json");
    if let Ok(name) = std::env::var("CHICKEN_CROSS_DIFFICULTY") {
        match Difficulty::from_name(&name) {
            Some(difficulty) => tuning.apply_preset(difficulty),
            None => log::warn!("Unknown difficulty {:?}, keeping {}", name, tuning.difficulty.as_str()),
        }
    }
    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);

    let mut game = match Game::new(seed, tuning) {
        Ok(game) => game,
        Err(e) => {
            log::error!("Could not build course: {}", e);
            std::process::exit(1);
        }
    };
    let mut presenter = LogPresenter::default();

    game.command(Command::PlayerLoaded);
    game.command(Command::SetStarted(true));

    // 60 simulated seconds, one hop every half second
    let frames = (60.0 / SIM_DT) as u32;
    for frame in 0..frames {
        if frame % 30 == 0 {
            game.command(Command::Move(Move::Up));
        }
        game.frame(SIM_DT, &mut presenter);
    }

    let state = game.state();
    println!(
        "\nSeed {}: {} crossings, {} deaths, score {} ({} frames, {} cues)",
        seed, state.crossings, state.deaths, state.score, presenter.frames, presenter.cues
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::wasm_start, this is just to satisfy the compiler
}
