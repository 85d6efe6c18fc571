use super::task_help::POISSON_HELPER;
use super::{confirm, prompt};
use crate::LaplacePoisson::jacobi::LaplaceError;
use crate::LaplacePoisson::poisson_task::{PoissonConfig, PoissonTask, create_template};
use crate::LaplacePoisson::potential::{BoundaryProfile, ChargePainter, Stroke};
use std::path::PathBuf;

pub fn poisson_menu() {
    loop {
        println!("\n=== Laplace-Poisson Equation ===");
        println!("\x1b[33m1. Solve from file\x1b[0m");
        println!("\x1b[33m2. Solve default lattice (central charge, choice of walls)\x1b[0m");
        println!("\x1b[33m3. Paint charges and solve\x1b[0m");
        println!("\x1b[33m4. Generate template\x1b[0m");
        println!("\x1b[33m5. Read help\x1b[0m");
        println!("\x1b[33m0. Back to main menu\x1b[0m");

        let choice = prompt("Enter your choice: ");
        match choice.as_str() {
            "1" => {
                let path = PathBuf::from(prompt("Enter file path: "));
                if !path.exists() {
                    println!("File not found: {:?}", path);
                    continue;
                }
                match PoissonTask::from_file(&path) {
                    Ok(task) => run_task(task, None),
                    Err(e) => println!("Error reading task: {}", e),
                }
            }
            "2" => {
                let names: Vec<&str> = BoundaryProfile::ALL.iter().map(|p| p.as_str()).collect();
                let answer = prompt(&format!(
                    "Starting potential ({}, empty for flat): ",
                    names.join("/")
                ));
                let profile = if answer.is_empty() {
                    BoundaryProfile::default()
                } else if let Some(profile) = BoundaryProfile::from_name(&answer) {
                    profile
                } else {
                    println!("Unknown starting potential '{}'", answer);
                    continue;
                };
                let config = PoissonConfig {
                    profile,
                    ..PoissonConfig::default()
                };
                match PoissonTask::new(config) {
                    Ok(task) => run_task(task, None),
                    Err(e) => println!("Error: {}", e),
                }
            }
            "3" => {
                let config = PoissonConfig::default();
                let source = paint_charges(&config);
                match PoissonTask::new(config) {
                    Ok(task) => run_task(task, Some(source)),
                    Err(e) => println!("Error: {}", e),
                }
            }
            "4" => match create_template("poisson_task.json") {
                Ok(()) => println!("Template written to poisson_task.json"),
                Err(e) => println!("Failed to write template: {}", e),
            },
            "5" => {
                println!("{}", POISSON_HELPER);
                let _ = prompt("Press Enter to return to menu...");
            }
            "0" => break,
            _ => println!("Invalid choice. Please try again."),
        }
    }
}

/// Terminal version of the mouse painter: "row col +", "row col -", "row col 0", "done".
fn paint_charges(config: &PoissonConfig) -> nalgebra::DMatrix<f64> {
    let mut painter = ChargePainter::new(config.N, config.Q);
    println!(
        "Lattice is {0}x{0}. Enter 'row col +' for +Q, 'row col -' for -Q, 'row col 0' to erase, 'done' to finish.",
        config.N + 1
    );
    loop {
        let line = prompt("> ");
        if line == "done" || line.is_empty() {
            break;
        }
        match parse_paint_command(&line) {
            Some((row, col, stroke)) => {
                if let Err(e) = painter.paint(row, col, stroke) {
                    println!("{}", e);
                }
            }
            None => println!("Cannot parse '{}'", line),
        }
    }
    println!("net charge: {}", painter.total_charge());
    painter.finish()
}

fn parse_paint_command(line: &str) -> Option<(usize, usize, Stroke)> {
    let mut parts = line.split_whitespace();
    let row = parts.next()?.parse().ok()?;
    let col = parts.next()?.parse().ok()?;
    let stroke = match parts.next()? {
        "+" => Stroke::Positive,
        "-" => Stroke::Negative,
        "0" => Stroke::Erase,
        _ => return None,
    };
    Some((row, col, stroke))
}

fn run_task(mut task: PoissonTask, source: Option<nalgebra::DMatrix<f64>>) {
    task.pretty_print_task();
    if !confirm("Start calculation? (y/n): ") {
        println!("Calculation cancelled. Returning to menu.");
        return;
    }
    let result = match &source {
        Some(source) => task.solve_with_source(source).map(|_| ()),
        None => task.solve().map(|_| ()),
    };
    match result {
        Ok(()) => task.pretty_print_solution(),
        Err(LaplaceError::NotConverged {
            iterations,
            residual,
        }) => {
            println!(
                "No convergence after {} iterations (norm {:e}). Relax the target or raise max_iterations.",
                iterations, residual
            );
            return;
        }
        Err(e) => {
            println!("Error: {}", e);
            return;
        }
    }
    let path = prompt("File for the potential (empty to skip): ");
    if path.is_empty() {
        return;
    }
    match task.save_results(&path) {
        Ok(()) => println!("Potential written to {}", path),
        Err(e) => println!("Failed to save results: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_paint_command() {
        assert_eq!(parse_paint_command("3 4 +"), Some((3, 4, Stroke::Positive)));
        assert_eq!(parse_paint_command(" 0  7 - "), Some((0, 7, Stroke::Negative)));
        assert_eq!(parse_paint_command("1 1 0"), Some((1, 1, Stroke::Erase)));
        assert_eq!(parse_paint_command("1 1"), None);
        assert_eq!(parse_paint_command("a 1 +"), None);
        assert_eq!(parse_paint_command("1 1 x"), None);
    }
}
