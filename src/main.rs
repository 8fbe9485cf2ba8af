use scoreboard_lib::config::Config;
use scoreboard_lib::pipeline;

fn main() {
    env_logger::init();

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            log::error!("{e}");
            std::process::exit(1);
        }
    };

    match pipeline::run(&config) {
        Ok(report) => {
            // The scheduler captures stdout; one line confirms the publish.
            println!(
                "published {} rows to {}",
                report.rows,
                report.output_path.display()
            );
        }
        Err(e) => {
            log::error!("leaderboard regeneration failed: {e}");
            std::process::exit(1);
        }
    }
}
