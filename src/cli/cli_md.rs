use super::prompt;
use crate::MolecularDynamics::phase_diagram::{
    MdDataset, MdError, Observable, SeriesStats, StatePoint, discover,
};
use prettytable::{Table, row};
use std::path::{Path, PathBuf};

pub fn md_menu() {
    let root = prompt("Data directory (empty for ./data): ");
    let root = if root.is_empty() {
        PathBuf::from("data")
    } else {
        PathBuf::from(root)
    };
    loop {
        println!("\n=== Molecular Dynamics Data ({:?}) ===", root);
        println!("\x1b[33m1. List available state points\x1b[0m");
        println!("\x1b[33m2. Inspect state point\x1b[0m");
        println!("\x1b[33m0. Back to main menu\x1b[0m");

        let choice = prompt("Enter your choice: ");
        let result = match choice.as_str() {
            "1" => list_state_points(&root),
            "2" => inspect_state_point(&root),
            "0" => break,
            _ => {
                println!("Invalid choice. Please try again.");
                Ok(())
            }
        };
        if let Err(e) = result {
            println!("Error: {}", e);
        }
    }
}

fn list_state_points(root: &Path) -> Result<(), MdError> {
    let available = discover(root)?;
    let mut table = Table::new();
    table.add_row(row!["index", "T*", "rho*", "folder", "data"]);
    for (index, state) in StatePoint::all().into_iter().enumerate() {
        let present = if available.contains(&state) { "yes" } else { "-" };
        table.add_row(row![
            index,
            format!("{:.1}", state.temperature),
            format!("{:.1}", state.density),
            state.folder_name(),
            present
        ]);
    }
    table.printstd();
    Ok(())
}

fn inspect_state_point(root: &Path) -> Result<(), MdError> {
    let Ok(index) = prompt("State point index (0-15): ").parse::<usize>() else {
        println!("Not an index");
        return Ok(());
    };
    let dataset = MdDataset::open(root, StatePoint::from_index(index)?)?;
    dataset.pretty_print_observables()?;

    for (i, observable) in Observable::ALL.iter().enumerate() {
        println!("{}. {}", i + 1, observable.label());
    }
    let choice = prompt("Observable to print (empty to skip): ");
    if let Some(observable) = choice
        .parse::<usize>()
        .ok()
        .and_then(|i| i.checked_sub(1))
        .and_then(|i| Observable::ALL.get(i))
    {
        let series = dataset.observable(*observable)?;
        if let Some(stats) = SeriesStats::from_series(&series) {
            println!(
                "{}: {} steps, mean {:.4e}, min {:.4e}, max {:.4e}",
                observable.label(),
                stats.steps,
                stats.mean,
                stats.min,
                stats.max
            );
        }
    }

    match dataset.rdf() {
        Ok(rdf) => {
            if let Some((r, g)) = rdf
                .iter()
                .copied()
                .max_by(|a, b| a.1.total_cmp(&b.1))
            {
                println!("g(r) has {} points, highest peak {:.3} at r = {:.3}", rdf.len(), g, r);
            }
        }
        Err(e) => println!("No radial distribution function: {}", e),
    }
    let image = dataset.rdf_image_path();
    if image.is_file() {
        println!("g(r) plot: {:?}", image);
    }
    match dataset.animation_path() {
        Some(path) => println!("Animation: {:?}", path),
        None => println!("No animation file in {:?}", dataset.folder),
    }
    Ok(())
}
