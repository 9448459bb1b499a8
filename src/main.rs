use clap::Parser;
use log::LevelFilter;
use log4rs::append::console::ConsoleAppender;
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;

use popcode::config::SimulationConfig;
use popcode::error::PopCodeError;
use popcode::session::{Session, SessionEvent};
use popcode::tuning::TuningCurve;

#[derive(Parser, Debug)]
struct Args {
    /// The seed for the session random number generator
    #[arg(long, default_value = "0")]
    seed: u64,
    /// The number of neurons in the ring
    #[arg(short = 'N', long, default_value = "8")]
    num_neurons: usize,
    /// The tuning width parameter
    #[arg(long, default_value = "0.5")]
    sigma: f64,
    /// The peak firing rate
    #[arg(long, default_value = "1.0")]
    r_max: f64,
    /// The tuning curve shape, one of: gaussian, square, sine
    #[arg(long, default_value = "gaussian")]
    curve: String,
    /// The true stimulus angle in radians
    #[arg(short = 's', long, default_value = "0.0")]
    stimulus: f64,
    /// The number of trials
    #[arg(short = 'T', long, default_value = "20")]
    num_trials: usize,
    /// The inter-trial interval in milliseconds
    #[arg(long, default_value = "50")]
    interval_ms: u64,
}

fn main() -> Result<(), PopCodeError> {
    let args = Args::parse();

    let stdout = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::new("{l} - {m}\n")))
        .build();

    let config = Config::builder()
        .appender(Appender::builder().build("stdout", Box::new(stdout)))
        .build(Root::builder().appender("stdout").build(LevelFilter::Info))
        .map_err(|e| PopCodeError::IOError(e.to_string()))?;

    log4rs::init_config(config).map_err(|e| PopCodeError::IOError(e.to_string()))?;

    log::info!("{:?}", args);

    let curve = TuningCurve::from_str(&args.curve)?;
    let sim_config = SimulationConfig::build(args.num_neurons, args.sigma, args.r_max, curve)?;

    let mut session = Session::with_seed(sim_config, args.seed);
    session.set_stimulus(args.stimulus);

    session.run(args.num_trials, args.interval_ms, |event| match event {
        SessionEvent::Trial(report) => {
            let total: u64 = report.spikes.iter().sum();
            match report.estimate {
                Some(estimate) => log::info!(
                    "Trial {}: {} spikes, estimate {:.4}, running MSE {:.4}",
                    report.trial,
                    total,
                    estimate,
                    report.mean_squared_error
                ),
                None => log::info!(
                    "Trial {}: no spikes, estimate undefined, running MSE {:.4}",
                    report.trial,
                    report.mean_squared_error
                ),
            }
        }
        SessionEvent::Ended(reason) => log::info!("Run ended: {:?}", reason),
    })?;

    Ok(())
}
