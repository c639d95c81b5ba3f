use log::error;
use survivable_paths::controller::Controller;
use survivable_paths::utils::config::Arguments;
use survivable_paths::utils::error::Result;
use survivable_paths::utils::{json, logger, yaml};

fn main() {
    logger::init();
    let args: Arguments = argh::from_env();
    if let Err(e) = run(args) {
        error!("{}", e);
        std::process::exit(1);
    }
}

fn run(args: Arguments) -> Result<()> {
    let mut config = yaml::load_config(&args.config)?;
    config.override_from_args(&args);

    let topology = yaml::load_network(&args.network)?;
    let demand = yaml::load_demand(&args.demand, &topology)?;

    let mut controller = Controller::new(config)?;
    let solution = controller.solve(&topology, &demand)?;
    print!("{}", solution);

    if let Some(path) = &args.json {
        json::dump_solution(path, &solution)?;
    }
    Ok(())
}
