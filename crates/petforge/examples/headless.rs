//! Headless demo: run the pet for a short simulated day from a terminal.
//!
//! ```text
//! cargo run --example headless
//! ```
//!
//! Builds the engine against a JSON file store in `./petforge-data`,
//! walks through a few rooms, plays a bit of quiz, and prints every
//! engine event as it happens. Run it twice and the energy carries over.

use petforge::prelude::*;
use petforge_games::quiz::QUESTION_BANK;

struct PrintlnAlerts;

impl AlertSink for PrintlnAlerts {
    fn alert(&self, title: &str, body: &str) {
        println!("[alert] {title}: {body}");
    }
}

struct PrintlnSounds;

impl SoundPlayer for PrintlnSounds {
    fn play(&self, cue: SoundCue) {
        println!("[sound] {cue:?}");
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), PetforgeError> {
    petforge::init_tracing();

    let (app, handle) = PetAppBuilder::new()
        .store(JsonFileStore::new("./petforge-data"))
        .alerts(PrintlnAlerts)
        .sounds(PrintlnSounds)
        .build()
        .await;

    let mut events = handle.subscribe();
    tokio::spawn(app.run());

    let overview = handle.overview().await?;
    println!(
        "hello {} pet: energy {}, room {}",
        overview.sleep, overview.energy(), overview.room
    );

    // Visit the Math Room and ace the first three questions.
    handle.request_room_change(Direction::Next).await?;
    for question in &QUESTION_BANK[..3] {
        handle
            .game(GameAction::Quiz(Answer {
                selected: question.correct,
            }))
            .await?;
    }

    // Stroll over to the gacha and try our luck once.
    for _ in 0..5 {
        handle.request_room_change(Direction::Next).await?;
    }
    handle.game(GameAction::Gacha(GachaAction::Spin)).await?;

    // Watch the engine for a few seconds of real time, then tuck the
    // pet in and leave.
    let watch = tokio::time::sleep(std::time::Duration::from_secs(5));
    tokio::pin!(watch);
    loop {
        tokio::select! {
            event = events.recv() => match event {
                Ok(event) => println!("[event] {event:?}"),
                Err(_) => break,
            },
            _ = &mut watch => break,
        }
    }

    handle.shutdown().await?;
    println!("snapshot saved to ./petforge-data/pet_status.json");
    Ok(())
}
