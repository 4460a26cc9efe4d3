//! Utils

use clap::Parser;

/// Arguments for the storefront demo
#[derive(Debug, Parser)]
pub struct DemoArgs {
    /// Hair color, as a label or slug
    #[clap(short, long, default_value = "natural-black")]
    pub color: String,

    /// Length, as a label or bare inch count
    #[clap(short, long, default_value = "18")]
    pub length: String,

    /// Packs per purchase unit
    #[clap(short, long, default_value_t = 2)]
    pub packs: u32,

    /// Purchase units of the chosen bundle
    #[clap(short, long, default_value_t = 1)]
    pub quantity: u32,

    /// Fixture set to load instead of the shipped catalog
    #[clap(short, long)]
    pub fixture: Option<String>,

    /// Ship expedited instead of standard
    #[clap(short, long)]
    pub expedited: bool,
}
