use super::task_help::HEAT_HELPER;
use super::{confirm, prompt};
use crate::HeatEquation::heat_task::{HeatConfig, HeatTask, create_template};
use std::path::PathBuf;

pub fn heat_menu() {
    loop {
        println!("\n=== Heat Equation ===");
        println!("\x1b[33m1. Solve from file\x1b[0m");
        println!("\x1b[33m2. Solve default plate\x1b[0m");
        println!("\x1b[33m3. Generate template\x1b[0m");
        println!("\x1b[33m4. Read help\x1b[0m");
        println!("\x1b[33m0. Back to main menu\x1b[0m");

        let choice = prompt("Enter your choice: ");
        match choice.as_str() {
            "1" => solve_from_file(),
            "2" => match HeatTask::new(HeatConfig::default()) {
                Ok(task) => run_task(task),
                Err(e) => println!("Error: {}", e),
            },
            "3" => match create_template("heat_task.json") {
                Ok(()) => println!("Template written to heat_task.json"),
                Err(e) => println!("Failed to write template: {}", e),
            },
            "4" => {
                println!("{}", HEAT_HELPER);
                let _ = prompt("Press Enter to return to menu...");
            }
            "0" => break,
            _ => println!("Invalid choice. Please try again."),
        }
    }
}

fn solve_from_file() {
    let path = PathBuf::from(prompt("Enter file path: "));
    if !path.exists() {
        println!("File not found: {:?}", path);
        return;
    }
    match HeatTask::from_file(&path) {
        Ok(task) => run_task(task),
        Err(e) => println!("Error reading task: {}", e),
    }
}

fn run_task(mut task: HeatTask) {
    task.pretty_print_task();
    if !confirm("Start calculation? (y/n): ") {
        println!("Calculation cancelled. Returning to menu.");
        return;
    }
    if let Err(e) = task.solve() {
        println!("Error: {}", e);
        return;
    }
    task.pretty_print_solution();
    let dir = prompt("Directory for frames (empty to skip): ");
    if dir.is_empty() {
        return;
    }
    match task.save_results(&dir) {
        Ok(written) => println!("{} frames written to {}", written.len(), dir),
        Err(e) => println!("Failed to save results: {}", e),
    }
}
