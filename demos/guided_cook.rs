//! Guided Cook
//!
//! This example walks a recipe from creation to the end of a cooking session.
//!
//! Key concepts:
//! - Validation that reports every problem of a rejected draft at once
//! - Best-effort persistence to a directory (`COOKWISE_DATA_DIR`, or a temp dir)
//! - Wall-clock countdowns that absorb late ticks
//! - Controller-driven auto-advance between steps
//!
//! Run with: cargo run --example guided_cook

use cookwise::clock::ManualClock;
use cookwise::config::CookbookConfig;
use cookwise::recipe::{Difficulty, Direction, RecipeBuilder};
use cookwise::session::{CookController, CookingEngine, TickOutcome};
use cookwise::store::RecipeStore;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let scratch = tempfile::tempdir()?;
    let config = CookbookConfig {
        data_dir: Some(
            std::env::var_os("COOKWISE_DATA_DIR")
                .map(Into::into)
                .unwrap_or_else(|| scratch.path().to_path_buf()),
        ),
        ..CookbookConfig::default()
    };

    println!("=== Guided Cook ===\n");

    let mut store = RecipeStore::open(config.open_storage(), config.storage_key.clone());
    println!("Loaded {} stored recipe(s)", store.len());

    // A draft with several mistakes is rejected in full.
    let sloppy = RecipeBuilder::new()
        .title("Eg")
        .difficulty(Difficulty::Easy)
        .ingredient("egg", "Egg", 0.0, "pcs")
        .cooking_step("fry", "Fry", 3, 260, 1)
        .build()?;
    if let Err(err) = store.create(sloppy) {
        println!("\nRejected draft:");
        for violation in err.violations() {
            println!("  - {violation}");
        }
    }

    let draft = RecipeBuilder::new()
        .title("Fried eggs")
        .cuisine("Breakfast")
        .difficulty(Difficulty::Easy)
        .ingredient("egg", "Egg", 2.0, "pcs")
        .ingredient("butter", "Butter", 10.0, "g")
        .cooking_step("fry", "Fry until the whites set", 3, 160, 1)
        .instruction_step("melt", "Melt butter in the pan", 1, ["butter"])
        .instruction_step("crack", "Crack in the eggs", 1, ["egg"])
        .build()?;
    let id = store.create(draft)?.id.clone();

    // Frying belongs last.
    store.reorder_step(&id, "fry", Direction::Down);
    store.reorder_step(&id, "fry", Direction::Down);
    store.toggle_favorite(&id);

    let recipe = store.get(&id).ok_or("recipe vanished")?;
    println!("\nCreated '{}' ({} steps):", recipe.title, recipe.steps.len());
    for (n, step) in recipe.steps.iter().enumerate() {
        println!("  {}. {} ({} min)", n + 1, step.description, step.duration_minutes);
    }

    // Simulated time so the demo finishes instantly. Each loop iteration
    // stands for one configured tick.
    let tick = chrono::Duration::from_std(config.tick_interval())?;
    let clock = ManualClock::default();
    let mut controller = CookController::with_engine(CookingEngine::with_clock(clock.clone()));
    controller.start(&store, &id);

    println!("\nCooking:");
    let mut second = 0;
    loop {
        second += 1;
        // Every 45th tick arrives 20 intervals late.
        clock.advance(if second % 45 == 0 { tick * 20 } else { tick });

        let outcome = controller.on_tick(&store);
        match outcome {
            TickOutcome::Advanced { .. } | TickOutcome::Finished => {
                println!("  tick {second:>3}: {outcome:?}");
            }
            _ => {}
        }
        if second % 30 == 0 {
            if let Some(view) = controller.view(&store) {
                println!(
                    "  tick {second:>3}: step {}/{} {} [{}%], overall {} [{}%]",
                    view.step_index + 1,
                    view.step_count,
                    view.step_clock,
                    view.step_percent,
                    view.overall_clock,
                    view.overall_percent,
                );
            }
        }
        if outcome.is_terminal() {
            break;
        }
    }

    println!(
        "\nSession path: {:?}",
        controller.engine().history().get_path()
    );
    println!("\n=== Done ===");
    Ok(())
}
