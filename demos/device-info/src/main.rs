//! Displays information about the Metal devices in the system.

use gfx_primer::{
    app,
    device_info::{self, CliOptions},
};
use structopt::StructOpt;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    app::init_logging();

    if let Err(e) = CliOptions::from_iter_safe(std::env::args_os()) {
        eprintln!("{}", e.message);
        std::process::exit(device_info::usage_exit_code(&e));
    }

    let (preferred, all) = match device_info::metal_adapters().await {
        Ok(found) => found,
        Err(e) => {
            // Metal is missing on this system; say so and stop.
            println!("{e}");
            return Ok(());
        }
    };
    println!("preferred system default Metal device: {}", preferred.name);

    for report in all {
        println!();
        print!("{}", report.render());
    }

    Ok(())
}
