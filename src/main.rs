//! Methuselah CLI - Run the pattern search from JSON configuration.

use std::fmt::Write as _;
use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use methuselah::{
    compute::{Board, BoardStatus, evolution::SearchEngine},
    schema::{SearchConfig, SearchHistory},
};

/// Step cap when replaying the winning pattern after the search.
const REPLAY_STEPS: u64 = 500;

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() > 1 && args[1] == "--example" {
        print_example_config();
        return;
    }

    // Load configuration, or run with defaults when no file is given.
    let config: SearchConfig = match args.get(1) {
        Some(path) => {
            let config_str = fs::read_to_string(PathBuf::from(path)).unwrap_or_else(|e| {
                eprintln!("Error reading config file: {}", e);
                std::process::exit(1);
            });
            serde_json::from_str(&config_str).unwrap_or_else(|e| {
                eprintln!("Error parsing config: {}", e);
                std::process::exit(1);
            })
        }
        None => SearchConfig::default(),
    };

    println!("Methuselah Search");
    println!("=================");
    println!(
        "Bounding box: {}x{} (live probability {})",
        config.bounding_box.width, config.bounding_box.height, config.bounding_box.live_probability
    );
    println!(
        "Population: {} (elitism {}, mutation {})",
        config.population.size, config.population.elitism, config.genetic.mutation_probability
    );
    println!(
        "Generations: up to {} (stagnation limit {})",
        config.population.max_generations, config.population.stagnation_limit
    );
    println!("Step budget: {}", config.step_budget);
    println!();

    let mut engine = SearchEngine::new(config.clone()).unwrap_or_else(|e| {
        eprintln!("Invalid configuration: {}", e);
        std::process::exit(1);
    });

    let start = Instant::now();
    let result = engine
        .run_with_callback(|progress| {
            println!(
                "Generation {}/{}: best={:.1} gen max={:.1} avg={:.1} stagnation={}",
                progress.generation,
                progress.total_generations,
                progress.best_fitness,
                progress.generation_best,
                progress.avg_fitness,
                progress.stagnation_count
            );
        })
        .unwrap_or_else(|e| {
            eprintln!("Search failed: {}", e);
            std::process::exit(1);
        });
    let elapsed = start.elapsed();

    println!();
    println!(
        "Stopped after {} generations ({:?}), {} evaluations in {:.2}s",
        result.stats.generations,
        result.stats.stop_reason,
        result.stats.total_evaluations,
        elapsed.as_secs_f32()
    );
    println!();
    println!("Best pattern (fitness {:.1}):", result.best.fitness);
    print!("{}", result.best.chromosome.render(config.bounding_box.width));
    println!();
    println!("  Lifespan: {}", result.best.board.lifespan());
    println!("  Initial size: {}", result.best.board.initial_live_cells());
    println!("  Final size: {}", result.best.board.live_cells());
    println!("  Max size: {}", result.best.board.max_live_cells());

    // Replay the winner with a larger budget to see how far it really goes.
    println!();
    println!("Replaying the best pattern up to {} steps...", REPLAY_STEPS);
    let mut replay = Board::new(&result.best.chromosome, config.bounding_box.width, config.board)
        .unwrap_or_else(|e| {
            eprintln!("Replay failed: {}", e);
            std::process::exit(1);
        });
    replay.evolve(REPLAY_STEPS);
    let outcome = match replay.status() {
        BoardStatus::Extinct => "died out".to_string(),
        BoardStatus::Cycled => "entered a cycle".to_string(),
        BoardStatus::Exhausted { steps } => format!("still live after {} steps", steps),
        BoardStatus::Active => "active".to_string(),
    };
    println!(
        "  Lifespan {} ({}), final size {}, max size {}, board {}x{}",
        replay.lifespan(),
        outcome,
        replay.live_cells(),
        replay.max_live_cells(),
        replay.width(),
        replay.height()
    );

    if let Err(e) = write_stats(&config, &result.history) {
        eprintln!("Error writing stats files: {}", e);
        std::process::exit(1);
    }
}

/// Persist per-generation aggregates, one value per line per file.
fn write_stats(config: &SearchConfig, history: &SearchHistory) -> std::io::Result<()> {
    let base = format!(
        "bb{}x{}_population{}",
        config.bounding_box.height, config.bounding_box.width, config.population.size
    );
    for (suffix, values) in [
        ("max", &history.max_fitness),
        ("min", &history.min_fitness),
        ("avg", &history.avg_fitness),
    ] {
        let mut contents = String::new();
        for value in values {
            let _ = writeln!(contents, "{}", value);
        }
        fs::write(format!("{}_{}.txt", base, suffix), contents)?;
    }
    Ok(())
}

fn print_example_config() {
    let config = SearchConfig::default();

    println!("Example configuration (config.json):");
    println!("{}", serde_json::to_string_pretty(&config).unwrap());
}
