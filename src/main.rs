//! Hole Dodge entry point
//!
//! The native build has no window; it plays one headless round in real time
//! with the pointer held at the spawn point and reports the result. The
//! browser build sets up the session against LocalStorage and leaves the
//! frame loop to the page.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use hole_dodge::Session;
    use hole_dodge::persistence::FileStore;
    use hole_dodge::platform::{self, GameClock, MonotonicClock};
    use hole_dodge::settings::Settings;
    use hole_dodge::sim::TickInput;

    /// Frame length at 60 fps
    const FRAME_MS: u64 = 16;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Hole Dodge (native, headless) starting...");

    let settings = Settings::load(&platform::settings_path());
    let store = FileStore::new(platform::achievements_path());
    let mut session = Session::new(store, &settings);

    let clock = MonotonicClock::new();
    let bounds = settings.window_bounds();
    let spawn = session
        .start_round_with(settings.default_difficulty, bounds, clock.now_ms())
        .player
        .pos;

    let report = loop {
        std::thread::sleep(std::time::Duration::from_millis(FRAME_MS));
        session.tick(&TickInput {
            pointer: spawn,
            bounds,
            now_ms: clock.now_ms(),
        });
        if let Some(report) = session.settle(clock.now_ms()) {
            break report;
        }
    };

    log::info!(
        "Result: {} ({}), +{} score, total {}",
        report.reason,
        report.difficulty,
        report.score_awarded,
        report.total_score
    );
    if let Some(unlock) = &report.achievement {
        log::info!("{} {}: {}", unlock.icon, unlock.name, unlock.message);
    }

    let achievements = session.achievements();
    log::info!(
        "Achievements {}/{}",
        achievements.unlocked_count(),
        achievements.total_count()
    );
    for achievement in achievements.achievements() {
        log::info!(
            "  {} {} - {}",
            achievement.display_icon(),
            achievement.name(),
            achievement.display_description()
        );
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    use hole_dodge::Session;
    use hole_dodge::persistence::LocalStorageStore;
    use hole_dodge::platform::{GameClock, MonotonicClock};
    use hole_dodge::settings::Settings;

    let settings = Settings::default();
    let store = LocalStorageStore::new(LocalStorageStore::DEFAULT_KEY);
    let mut session = Session::new(store, &settings);

    // TODO: hand `session` to a requestAnimationFrame loop once there is a canvas front end
    let clock = MonotonicClock::new();
    session.start_round_with(
        settings.default_difficulty,
        settings.window_bounds(),
        clock.now_ms(),
    );
}
