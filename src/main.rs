use anyhow::Result;
use structopt::StructOpt;

pub mod render_gl;
pub mod resources;

mod app;
mod camera;
mod config;
mod controls;
mod logging;
mod quad;

use config::Opt;

fn main() -> Result<()> {
    let opt = Opt::from_args();
    logging::init_logging(opt.verbose);

    app::run(&opt)
}
