//! yaml-style: parse YAML, run it through stylers and write it back out.

use anyhow::{Context, Result, bail};
use clap::Parser;
use regex::Regex;
use std::io::Read;
use std::path::PathBuf;
use styled_yaml::stylers::{
    CapStyler, FlowStyler, HierarchyStyler, MapFlowStyler, NoSymStyler, NoTagStyler,
    SeqFlowStyler,
};
use styled_yaml::{Options, Scalar, ScalarStyle, Sniffer, Style, Styler, emit, parse_tree};
use tracing::{debug, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "yaml-style")]
#[command(about = "Restyle YAML by node level and position")]
#[command(version)]
struct Cli {
    /// Input YAML file (reads stdin when absent or "-")
    input: Option<PathBuf>,

    /// Write the result here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Spaces per indentation level (2 to 9)
    #[arg(long, default_value_t = 2)]
    indent: usize,

    /// Put mappings and sequences at or below this level in flow style
    #[arg(long)]
    flow_level: Option<usize>,

    /// Put mappings at or below this level in flow style
    #[arg(long)]
    map_flow_level: Option<usize>,

    /// Put sequences at or below this level in flow style
    #[arg(long)]
    seq_flow_level: Option<usize>,

    /// Capitalize the start of every scalar
    #[arg(long)]
    cap: bool,

    /// Capitalize every word of every scalar
    #[arg(long)]
    cap_words: bool,

    /// Word delimiter pattern for --cap-words
    #[arg(long, requires = "cap_words")]
    delim: Option<String>,

    /// Replace each word delimiter with this text
    #[arg(long, requires = "cap_words")]
    new_delim: Option<String>,

    /// Turn ":symbol" scalars into capitalized text
    #[arg(long)]
    no_sym: bool,

    /// Remove all tags
    #[arg(long)]
    no_tag: bool,

    /// Force one style on every scalar (plain, single-quoted, double-quoted, literal, folded)
    #[arg(long)]
    scalar_style: Option<String>,

    /// Print the level/position trace of every node instead of YAML
    #[arg(long)]
    hierarchy: bool,

    /// Show whole parent frames in the --hierarchy trace
    #[arg(long, requires = "hierarchy")]
    verbose: bool,

    /// Print the styled node tree as JSON instead of YAML
    #[arg(long, conflicts_with = "hierarchy")]
    json: bool,
}

/// Sets one style on every scalar.
struct ScalarStyler(ScalarStyle);

impl Styler for ScalarStyler {
    fn style_scalar(&mut self, _sniffer: &Sniffer, scalar: &mut Scalar) {
        scalar.style = self.0;
    }
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "yaml_style=info,styled_yaml=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let input = read_input(cli.input.as_ref())?;
    let options = Options {
        indentation: cli.indent,
        ..Options::default()
    };

    let mut stylers = build_stylers(&cli)?;
    let mut trace = cli.hierarchy.then(|| HierarchyStyler::new(cli.verbose));
    debug!(stylers = stylers.len(), "styling input");

    let tree = {
        let mut active: Vec<&mut dyn Styler> = stylers
            .iter_mut()
            .map(|styler| styler as &mut dyn Styler)
            .collect();
        if let Some(trace) = trace.as_mut() {
            active.push(trace);
        }
        parse_tree(&input, &mut active, &options).context("Failed to parse input YAML")?
    };

    let rendered = if let Some(trace) = trace {
        trace.to_string()
    } else if cli.json {
        serde_json::to_string_pretty(&tree)?
    } else {
        emit(&tree, &options)
    };

    match &cli.output {
        Some(path) => {
            std::fs::write(path, &rendered)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!(path = %path.display(), "wrote styled YAML");
        }
        None => print!("{rendered}"),
    }

    Ok(())
}

fn read_input(input: Option<&PathBuf>) -> Result<String> {
    match input {
        Some(path) if path.as_os_str() != "-" => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        _ => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read stdin")?;
            Ok(text)
        }
    }
}

/// The stylers the flags ask for, in the order they run.
fn build_stylers(cli: &Cli) -> Result<Vec<Box<dyn Styler>>> {
    let mut stylers: Vec<Box<dyn Styler>> = Vec::new();

    if cli.no_tag {
        stylers.push(Box::new(NoTagStyler));
    }
    if cli.no_sym {
        stylers.push(Box::new(NoSymStyler::default()));
    }

    if cli.cap && cli.cap_words {
        bail!("--cap and --cap-words cannot be used together");
    }
    if cli.cap {
        stylers.push(Box::new(CapStyler::whole_text()));
    }
    if cli.cap_words {
        let mut cap = CapStyler::new();
        if let Some(delim) = &cli.delim {
            let delim = Regex::new(delim)
                .with_context(|| format!("Invalid delimiter pattern: {delim}"))?;
            cap = cap.with_delim(delim);
        }
        if let Some(new_delim) = &cli.new_delim {
            cap = cap.with_new_delim(new_delim.as_str());
        }
        stylers.push(Box::new(cap));
    }

    if let Some(level) = cli.flow_level {
        stylers.push(Box::new(FlowStyler::new(level)));
    }
    if let Some(level) = cli.map_flow_level {
        stylers.push(Box::new(MapFlowStyler::new(level)));
    }
    if let Some(level) = cli.seq_flow_level {
        stylers.push(Box::new(SeqFlowStyler::new(level)));
    }

    if let Some(name) = &cli.scalar_style {
        match Style::lookup("scalar", name) {
            Style::Scalar(style) => stylers.push(Box::new(ScalarStyler(style))),
            _ => warn!(style = %name, "unknown scalar style, leaving scalars as they are"),
        }
    }

    Ok(stylers)
}
