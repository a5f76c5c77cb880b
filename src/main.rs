mod builder;
mod config;
mod consumer;
mod desktop;
mod error;
mod icons;
mod index;
mod menu;
mod merge;
mod model;
mod ordered;
mod sources;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use log::{error, info, warn};
use std::io;
use std::path::PathBuf;

use crate::config::{bundled_data_dir, load_config, user_config_dir};
use crate::consumer::{EntryConsumer, JsonConsumer, PlainConsumer};
use crate::desktop::ProcessEnv;
use crate::icons::ThemeIconResolver;
use crate::menu::{DesktopChoice, Locations, PowerMenu};
use crate::sources::desktops::load_descriptors;

#[derive(ValueEnum, Debug, Clone, Copy)]
enum Format {
    Json,
    Plain,
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Text matched against entry aliases; empty lists everything
    #[arg(trailing_var_arg = true)]
    query: Vec<String>,

    /// Desktop key to use instead of detecting one ("none" disables)
    #[arg(short, long)]
    desktop: Option<String>,

    /// Directory holding the bundled desktops.json and entries/
    #[arg(long)]
    data_dir: Option<PathBuf>,

    #[arg(short, long, value_enum, default_value = "json")]
    format: Format,

    /// Print the desktop table and the detected desktop, then exit
    #[arg(long)]
    list_desktops: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = load_config()?;
    let locations = Locations {
        data_dir: bundled_data_dir(args.data_dir.as_deref(), &config),
        user_dir: user_config_dir(),
    };

    if args.list_desktops {
        return list_desktops(&locations);
    }

    let setting = args.desktop.as_deref().or(config.general.desktop.as_deref());
    let choice = DesktopChoice::from_setting(setting);
    let icons = ThemeIconResolver::new(&config.icons);

    let mut consumer: Box<dyn EntryConsumer> = match args.format {
        Format::Json => Box::new(JsonConsumer::new(io::stdout().lock())),
        Format::Plain => Box::new(PlainConsumer::new(io::stdout().lock())),
    };

    let menu = match PowerMenu::load(&locations, choice, &ProcessEnv, &icons) {
        Ok(menu) => menu,
        Err(e) => {
            error!("Power menu unavailable: {}", e);
            consumer.render(&[])?;
            drop(consumer);
            std::process::exit(1);
        }
    };

    info!(
        "Serving {} entries for desktop {}",
        menu.index().len(),
        menu.desktop().unwrap_or("none")
    );
    if menu.index().is_empty() {
        warn!("Power menu has no entries");
    }

    let query = args.query.join(" ");
    consumer.render(&menu.query(Some(query.as_str())))
}

fn list_desktops(locations: &Locations) -> Result<()> {
    let descriptors = load_descriptors(&locations.data_dir, locations.user_dir.as_deref())?;
    for descriptor in &descriptors {
        let aliases = descriptor
            .aliases
            .as_ref()
            .map(|a| a.join(", "))
            .unwrap_or_else(|| "<any>".to_string());
        println!("{}\t{}\t{}", descriptor.key, descriptor.env_var, aliases);
    }
    match desktop::detect(&descriptors, &ProcessEnv) {
        Some(key) => println!("detected: {}", key),
        None => println!("detected: none"),
    }
    Ok(())
}
