//! Folio command-line inspector
//!
//! Builds a chain of nested boxes from declaration lists and prints the
//! geometry derived for each of them.
//!
//! - `folio 'padding: 1cm' 'left: 2cm; right: 2cm'`   # two nested boxes
//! - `folio --json ...`                               # machine-readable output
//! - `folio --properties`                             # recognized names

use std::rc::Rc;

use anyhow::Context;
use clap::Parser;
use folio_box::{
    BoxGeometry, BoxModel, BoxSizing, ContextRef, Edges, Extent, Position, Property, Rect,
    SharedBox,
};
use folio_common::warning::warn_once;
use owo_colors::OwoColorize;
use serde::Serialize;
use strum::IntoEnumIterator;

/// Folio: box-model geometry for paginated layout
#[derive(Parser, Debug)]
#[command(name = "folio")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # A4 sheet with a 2cm frame
    folio --context-width 21cm --context-height 29.7cm 'left: 2cm; right: 2cm; top: 2cm; bottom: 2cm'

    # Nested boxes, outermost first
    folio --context-width 595 'padding: 10pt' 'box-sizing: border-box; width: 5cm; border-width: 1pt'

    # JSON output
    folio --json --context-width 21cm 'margin: 1cm 2cm'

    # List recognized properties
    folio --properties
"#)]
struct Cli {
    /// Declaration lists, outermost box first; each box is placed in the previous one
    #[arg(value_name = "DECLARATIONS")]
    boxes: Vec<String>,

    /// Width of the outermost context (omit for unbounded)
    #[arg(long, value_name = "EXTENT", default_value = "auto")]
    context_width: String,

    /// Height of the outermost context (omit for unbounded)
    #[arg(long, value_name = "EXTENT", default_value = "auto")]
    context_height: String,

    /// Left edge of the outermost context
    #[arg(long, value_name = "EXTENT", default_value = "0")]
    origin_left: String,

    /// Top edge of the outermost context
    #[arg(long, value_name = "EXTENT", default_value = "0")]
    origin_top: String,

    /// Print geometry as JSON
    #[arg(long)]
    json: bool,

    /// List recognized property names and exit
    #[arg(long)]
    properties: bool,
}

/// Computed state of one box in the chain.
#[derive(Debug, Serialize)]
struct BoxReport {
    depth: usize,
    declarations: String,
    position: Position,
    box_sizing: BoxSizing,
    margin: Edges,
    border: Edges,
    padding: Edges,
    geometry: BoxGeometry,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    if cli.properties {
        print_properties();
        return Ok(());
    }

    if cli.boxes.is_empty() {
        anyhow::bail!("at least one declaration list is required (see --help)");
    }

    let sheet = sheet(&cli)?;
    let chain = build_chain(sheet, &cli.boxes)?;
    let reports: Vec<BoxReport> = chain
        .iter()
        .zip(&cli.boxes)
        .enumerate()
        .map(|(depth, (model, declarations))| report(depth, declarations, &model.borrow()))
        .collect();

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        print_reports(&reports);
    }
    Ok(())
}

/// The outermost context built from the command-line extents.
fn sheet(cli: &Cli) -> anyhow::Result<Rect> {
    let width = parse_option("--context-width", &cli.context_width)?;
    let height = parse_option("--context-height", &cli.context_height)?;
    let left = parse_option("--origin-left", &cli.origin_left)?;
    let top = parse_option("--origin-top", &cli.origin_top)?;

    if width.is_auto() || height.is_auto() {
        let _ = warn_once(
            "cli",
            "context size not fully given; unset dimensions are unbounded",
        );
    }

    Ok(Rect::new(
        left.points().context("--origin-left must be a length")?,
        top.points().context("--origin-top must be a length")?,
        width.points().unwrap_or(f64::INFINITY),
        height.points().unwrap_or(f64::INFINITY),
    ))
}

fn parse_option(name: &str, value: &str) -> anyhow::Result<Extent> {
    value
        .parse()
        .with_context(|| format!("invalid value for {name}: {value:?}"))
}

/// Create one box per declaration list, each inside the previous one.
fn build_chain(sheet: Rect, boxes: &[String]) -> anyhow::Result<Vec<SharedBox>> {
    let mut context: ContextRef = Rc::new(sheet);
    let mut chain = Vec::with_capacity(boxes.len());

    for (index, declarations) in boxes.iter().enumerate() {
        let model = BoxModel::create(Some(Rc::clone(&context)), declarations)
            .with_context(|| format!("box {}: {declarations:?}", index + 1))?;
        log::debug!("box {} style: {:?}", index + 1, model.style());

        let shared = model.into_shared();
        context = Rc::clone(&shared) as ContextRef;
        chain.push(shared);
    }
    Ok(chain)
}

fn report(depth: usize, declarations: &str, model: &BoxModel) -> BoxReport {
    let style = model.style();
    BoxReport {
        depth,
        declarations: declarations.to_owned(),
        position: model.position(),
        box_sizing: model.box_sizing(),
        margin: style.margin,
        border: style.border,
        padding: style.padding,
        geometry: model.geometry(),
    }
}

fn print_reports(reports: &[BoxReport]) {
    for report in reports {
        let indent = "  ".repeat(report.depth);
        println!(
            "{indent}{} {}",
            format!("box {}", report.depth + 1).bold(),
            report.declarations.dimmed()
        );
        println!(
            "{indent}  {} {}  {} {}",
            "position".cyan(),
            report.position,
            "sizing".cyan(),
            report.box_sizing
        );
        println!(
            "{indent}  {} {}  {} {}  {} {}",
            "margin".cyan(),
            report.margin,
            "border".cyan(),
            report.border,
            "padding".cyan(),
            report.padding
        );

        let geometry = &report.geometry;
        print_rect(&indent, "border box", geometry.border_box);
        print_rect(&indent, "padding box", geometry.padding_box);
        print_rect(&indent, "content box", geometry.content_box);
        println!(
            "{indent}  {:<12} {}, {}",
            "absolute".green(),
            length(geometry.absolute_left),
            length(geometry.absolute_top)
        );
    }
}

fn print_rect(indent: &str, label: &str, rect: Rect) {
    println!(
        "{indent}  {:<12} {}, {}  {} x {}",
        label.green(),
        length(rect.x),
        length(rect.y),
        length(rect.width),
        length(rect.height)
    );
}

fn length(value: f64) -> String {
    if value.is_finite() {
        format!("{value:.2}pt")
    } else {
        "unbounded".to_owned()
    }
}

fn print_properties() {
    println!("{}", "Recognized properties (highest priority first):".bold());
    let mut properties: Vec<Property> = Property::iter().collect();
    properties.sort_by_key(|property| std::cmp::Reverse(property.priority()));
    for property in properties {
        println!("  {property:<20} {}", property.priority());
    }
}
