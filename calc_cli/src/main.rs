//! # Takeoff CLI
//!
//! Terminal demo for the takeoff engine: prompts for a rectangular column,
//! prints its quantities and costs, then checks it against the recommended
//! standards for a region.
//!
//! Set `RUST_LOG` (e.g. `RUST_LOG=calc_core=debug`) to see engine events.

use std::io::{self, BufRead, Write};

use calc_core::calculations::{calculate_column, ColumnTakeoffInput, Rates, SteelComponentKind};
use calc_core::compliance::{ComplianceEngine, DesignParameters};
use calc_core::geometry::{ColumnGeometry, ColumnShape};
use calc_core::materials::MaterialSpec;
use calc_core::reinforcement::{ColumnReinforcement, HookType, MainBars, StirrupShape, Stirrups};
use calc_core::units::UnitSystem;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn read_line(prompt: &str) -> Option<String> {
    print!("{}", prompt);
    io::stdout().flush().ok()?;

    let mut input = String::new();
    io::stdin().lock().read_line(&mut input).ok()?;
    let trimmed = input.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn prompt_f64(prompt: &str, default: f64) -> f64 {
    read_line(prompt).and_then(|s| s.parse().ok()).unwrap_or(default)
}

fn prompt_u32(prompt: &str, default: u32) -> u32 {
    read_line(prompt).and_then(|s| s.parse().ok()).unwrap_or(default)
}

fn prompt_string(prompt: &str, default: &str) -> String {
    read_line(prompt).unwrap_or_else(|| default.to_string())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn main() {
    init_tracing();

    println!("Takeoff CLI - RC Column Quantities & Compliance");
    println!("===============================================");
    println!();

    let width_mm = prompt_f64("Column width (mm) [400]: ", 400.0);
    let depth_mm = prompt_f64("Column depth (mm) [400]: ", 400.0);
    let height_mm = prompt_f64("Column height (mm) [3000]: ", 3000.0);
    let bar_count = prompt_u32("Main bar count [8]: ", 8);
    let bar_dia_mm = prompt_f64("Main bar diameter (mm) [16]: ", 16.0);
    let tie_dia_mm = prompt_f64("Tie diameter (mm) [8]: ", 8.0);
    let tie_spacing_mm = prompt_f64("Tie spacing (mm) [150]: ", 150.0);
    let region = prompt_string("Region [India]: ", "India");

    let input = ColumnTakeoffInput {
        label: "CLI-Demo".to_string(),
        geometry: ColumnGeometry::new(ColumnShape::Rectangular { width_mm, depth_mm }, height_mm),
        material: MaterialSpec::default(),
        reinforcement: ColumnReinforcement {
            main_bars: MainBars {
                count: bar_count,
                diameter_mm: bar_dia_mm,
                cover_mm: 40.0,
                development_length_mm: 0.0,
            },
            stirrups: Stirrups {
                shape: StirrupShape::Rectangular,
                diameter_mm: tie_dia_mm,
                spacing_mm: tie_spacing_mm,
                hook_type: HookType::Deg135,
                hook_length_mm: 0.0,
                number_of_legs: 2,
            },
        },
    };

    let result = match calculate_column(&input, &Rates::default()) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("Error: {}", e);
            if let Ok(json) = serde_json::to_string_pretty(&e) {
                eprintln!();
                eprintln!("Error JSON:");
                eprintln!("{}", json);
            }
            return;
        }
    };

    println!();
    println!("═══════════════════════════════════════");
    println!("  COLUMN TAKEOFF");
    println!("═══════════════════════════════════════");
    println!();
    println!("Input:");
    println!("  Section:  {:.0} x {:.0} mm, height {:.0} mm", width_mm, depth_mm, height_mm);
    println!("  Bars:     {} x {:.0} mm, ties {:.0} mm @ {:.0} mm", bar_count, bar_dia_mm, tie_dia_mm, tie_spacing_mm);
    println!("  Material: {} / {}", input.material.concrete_grade, input.material.steel_grade);
    println!();
    println!("Quantities:");
    println!("  Concrete: {:.3} m³ ({:.3} m³ dry, {:.0} kg)", result.concrete_volume_m3, result.dry_volume_m3, result.concrete_weight_kg);
    for kind in [SteelComponentKind::MainBars, SteelComponentKind::Stirrups] {
        println!("  {:<9} {:.2} kg", format!("{}:", kind.display_name()), result.steel_weight(kind));
    }
    println!("  Waste:    {:.2} kg", result.steel_waste_kg);
    println!("  Steel:    {:.2} kg", result.total_steel_weight_kg);
    println!();
    println!("Cost:");
    println!("  Concrete: {:.2}", result.concrete_cost);
    println!("  Steel:    {:.2}", result.total_steel_cost);
    println!("  Total:    {:.2}", result.total_cost);
    println!("  ({})", result.in_units(UnitSystem::Imperial));

    let engine = ComplianceEngine::builtin();
    let standard_ids = engine.registry().get_recommended_standards(&region);
    info!(region = %region, standards = ?standard_ids, "checking column");
    let compliance = engine.check_design(&standard_ids, &DesignParameters::for_column(&input));

    println!();
    println!("═══════════════════════════════════════");
    println!("  COMPLIANCE ({})", region);
    println!("═══════════════════════════════════════");
    for standard in &compliance {
        println!();
        println!("{} {}", standard.standard_name, status_icon(standard.overall_compliant));
        for check in &standard.checks {
            println!("  {} {}", status_icon(check.is_compliant), check.message);
        }
    }

    println!();
    println!("JSON Output:");
    let report = serde_json::json!({ "quantities": result, "compliance": compliance });
    if let Ok(json) = serde_json::to_string_pretty(&report) {
        println!("{}", json);
    }
}

fn status_icon(pass: bool) -> &'static str {
    if pass { "[OK]" } else { "[FAIL]" }
}
