use anyhow::{bail, Result};
use applink::{
    drive, ConsoleNavigator, Navigator, Params, PlatformRegistry, RedirectOptions, Sequencer,
    SequencerState,
};
use clap::Parser;

/// Resolve a loose social reference and drive the browser toward the native app
#[derive(Parser)]
#[command(name = "applink", version, about)]
struct Cli {
    /// Request parameters as a query string,
    /// e.g. "youtube=dQw4w9WgXcQ&delay=500" or "tw=@jack&intent=web"
    query: String,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let params = Params::from_query(&cli.query);
    let options = RedirectOptions::from_params(&params);

    let registry = PlatformRegistry::new();
    let route = match registry.resolve(&params) {
        Ok(route) => route,
        Err(e) => bail!(
            "{}. Provide one of youtube=, instagram=, linkedin=, x=, facebook=, tiktok= (or q=)",
            e
        ),
    };

    let descriptor = route.parse();
    println!(
        "Resolved {} reference: {:?}",
        descriptor.platform.name(),
        descriptor.kind
    );

    if options.debug {
        println!("Debug mode (no redirect). Parsed descriptor:\n");
        println!("{}", serde_json::to_string_pretty(&descriptor)?);
        println!("\nOpen web URL: {}", descriptor.canonical_web_url);
        return Ok(());
    }

    let mut navigator = ConsoleNavigator::new();

    if options.intent_web {
        println!("Opening web version (intent=web).");
        navigator.navigate(&descriptor.canonical_web_url);
        return Ok(());
    }

    println!(
        "Trying {} app link candidate(s), falling back after {} ms...",
        descriptor.app_url_candidates.len(),
        options.fallback_delay_ms
    );
    let mut sequencer = Sequencer::new(&descriptor, &options);
    drive(&mut sequencer, &mut navigator);

    match sequencer.state() {
        SequencerState::FallenBack => println!("Done (web fallback)."),
        SequencerState::Navigated => println!("Done (app navigation detected)."),
        _ => println!("Done."),
    }

    Ok(())
}
