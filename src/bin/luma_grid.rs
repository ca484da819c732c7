use luma_grid::config::grid::{self, GridToolConfig};
use luma_grid::image::io::{load_image, write_json_file};
use luma_grid::pipeline::{self, AdaptiveGrid, LuminanceReport};
use luma_grid::stats::{self, CategoryReport};
use serde::Serialize;
use std::env;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ToolReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    adaptive: Option<AdaptiveGrid>,
    luminance: LuminanceReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    categories: Option<CategoryReport>,
}

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let program = env::args()
        .next()
        .unwrap_or_else(|| "luma_grid".to_string());
    let config = grid::parse_cli(&program)?;

    let owned = load_image(&config.input_path)?;
    let image = owned.as_view().map_err(|e| e.to_string())?;

    let report = build_report(&config, &image)?;

    if config.output.format.includes_text() {
        print_text_summary(&report);
    }

    if config.output.format.includes_json() {
        if let Some(path) = &config.output.json_out {
            write_json_file(path, &report)?;
            println!("JSON report written to {}", path.display());
        } else {
            let json = serde_json::to_string_pretty(&report)
                .map_err(|e| format!("Failed to serialize JSON: {e}"))?;
            println!("{json}");
        }
    }

    Ok(())
}

fn build_report(
    config: &GridToolConfig,
    image: &luma_grid::image::ImageU8<'_>,
) -> Result<ToolReport, String> {
    let (adaptive, luminance) = match (&config.lines, &config.adaptive) {
        (Some(lines), _) => {
            let report = pipeline::mean_luminance(image, &lines.horizontal, &lines.vertical)
                .map_err(|e| e.to_string())?;
            (None, report)
        }
        (None, params) => {
            let params = params.clone().unwrap_or_default();
            let (adaptive, report) =
                pipeline::adaptive_luminance(image, &params).map_err(|e| e.to_string())?;
            (Some(adaptive), report)
        }
    };

    let categories = match &config.categories {
        Some(cat) => Some(
            stats::category_stats(&luminance.luminance, &cat.names, &cat.selections)
                .map_err(|e| e.to_string())?,
        ),
        None => None,
    };

    Ok(ToolReport {
        adaptive,
        luminance,
        categories,
    })
}

fn print_text_summary(report: &ToolReport) {
    let lum = &report.luminance;
    println!("Luminance summary");
    println!(
        "  input: {}x{} channels={}",
        lum.input.width, lum.input.height, lum.input.channels
    );
    if let Some(adaptive) = &report.adaptive {
        println!("  adaptive vertical: {:?}", adaptive.vertical_lines);
        println!("  adaptive horizontal: {:?}", adaptive.horizontal_lines);
    }
    println!("  rows: {:?}", lum.grid.rows.as_slice());
    println!("  cols: {:?}", lum.grid.cols.as_slice());
    for (i, row) in lum.luminance.iter_rows().enumerate() {
        let cells: Vec<String> = row.iter().map(|v| format!("{v:.3}")).collect();
        println!("  R{i}: {}", cells.join(" "));
    }
    println!("  total_ms: {:.3}", lum.timings.total_ms);

    if let Some(cats) = &report.categories {
        println!("\nCategories ({} selected cells)", cats.selected_cells);
        for c in &cats.categories {
            println!(
                "  {}: count={} average={}",
                c.category,
                c.count,
                format_opt(c.average)
            );
        }
        println!("  overall: {}", format_opt(cats.overall_average));
    }
}

fn format_opt(val: Option<f64>) -> String {
    val.map(|v| format!("{:.3}", v))
        .unwrap_or_else(|| "-".to_string())
}
