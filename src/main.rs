use log::{debug, LevelFilter};
use schedsim::{
    config::{Config, Source},
    input,
    report::{ComparisonReport, ScheduleReport},
    scheduler,
    view::ScheduleViewer,
    Result,
};
use std::{io, process};

fn init_logging(verbosity: u64) {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    // RUST_LOG still wins when set
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn run(config: &Config) -> Result<()> {
    let processes = match &config.source {
        Source::Sample => input::sample_workload(),
        Source::File(path) => input::load_file(path)?,
        Source::Stdin => input::read_processes(io::stdin().lock())?,
    };
    debug!("loaded {} processes", processes.len());

    let schedules = scheduler::compare(&config.policies, &processes)?;

    if config.interactive {
        let mut viewer = ScheduleViewer::new(schedules)?;
        while viewer.run()? {}
        return Ok(());
    }

    for schedule in &schedules {
        println!("{}", ScheduleReport(schedule));
    }
    if schedules.len() > 1 {
        print!("{}", ComparisonReport(&schedules));
    }
    Ok(())
}

fn main() {
    let matches = Config::app().get_matches();
    let config = match Config::from_matches(&matches) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: {err}");
            process::exit(1);
        }
    };
    init_logging(config.verbosity);
    debug!("{config:?}");

    if let Err(err) = run(&config) {
        eprintln!("error: {err}");
        process::exit(1);
    }
}
