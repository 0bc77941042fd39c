mod opts;
mod render;

use std::error::Error;
use std::fs::File;
use std::sync::Arc;

use clap::Parser;
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode, WriteLogger};
use treetable_lib::model::TreeData;
use treetable_view::SimpleTreeView;

use crate::opts::Opts;
use crate::render::render_table;

fn init_logging(opts: &Opts) -> Result<(), Box<dyn Error>> {
    if let Some(path) = &opts.log_file {
        let log_file = File::create(path)?;
        WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)?;
    } else if opts.verbose {
        TermLogger::init(
            LevelFilter::Debug,
            Config::default(),
            TerminalMode::Stderr,
            ColorChoice::Auto,
        )?;
    }
    Ok(())
}

fn run(opts: &Opts) -> Result<(), Box<dyn Error>> {
    let file = File::open(&opts.file)?;
    let data: TreeData = serde_json::from_reader(std::io::BufReader::new(file))?;
    log::info!("[cli] Loaded {} entries from {}", data.len(), opts.file.display());

    let config = opts.tree_config(&data);
    let select_path = opts.select_path(&data);
    let view = SimpleTreeView::new(Arc::new(data), config)?;
    if opts.expand_all {
        view.expand_all();
    }

    let selected = match select_path {
        Some(path) => {
            let found = view.select_path(&path)?;
            if found.is_none() {
                log::warn!("[cli] Selection path {:?} does not exist", opts.select);
            }
            found
        }
        None => None,
    };

    print!("{}", render_table(&view.columns(), &view.visible_rows()));

    if let (Some(_), Some(path)) = (selected, view.selected_path()) {
        let ids: Vec<String> = path.iter().map(ToString::to_string).collect();
        println!();
        println!("selected: {}", ids.join("/"));
    }
    Ok(())
}

fn main() {
    let opts = Opts::parse();
    if let Err(e) = init_logging(&opts).and_then(|()| run(&opts)) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
