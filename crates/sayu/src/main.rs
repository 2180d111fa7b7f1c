use clap::Parser;
use relm4::prelude::*;
use sayu::config;
use sayu::gui::app::AppModel;
use sayu::gui::menu::{self, CommitHooks};
use sayu::sys::runtime;
use sayu_core::{FrameQueue, Menu};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "sayu", version, about, long_about = None)]
struct Cli {
    /// Config file to use instead of the per-user one
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Print the sector clip paths as SVG and exit
    #[arg(long)]
    print_paths: bool,

    /// Render the open menu to a PNG file and exit
    #[arg(long, value_name = "FILE")]
    snapshot: Option<PathBuf>,

    /// Sector to highlight in the snapshot
    #[arg(long, requires = "snapshot")]
    select: Option<usize>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config_path = config::resolve_config_path(cli.config.as_deref())?;
    let config = config::load_or_setup(&config_path);

    let (tx, rx) = async_channel::bounded(32);
    let hooks = CommitHooks::new(tx.clone());
    let menu = Menu::new(config.menu, FrameQueue::new())?.with_hooks(hooks.clone());

    if cli.print_paths {
        print!("{}", menu::clip_path_defs(&menu));
        return Ok(());
    }

    if let Some(path) = cli.snapshot {
        menu::snapshot(&menu, cli.select, &path)?;
        log::info!("Wrote {}", path.display());
        return Ok(());
    }

    // Start Background Services
    runtime::start_background_services(config_path.clone(), tx);

    let app = RelmApp::new("org.sayu.sayu").with_args(Vec::new());
    app.run::<AppModel>((menu, hooks, config_path, rx));

    Ok(())
}
