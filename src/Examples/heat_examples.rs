use crate::HeatEquation::boundary::{BoundarySpec, Edge};
use crate::HeatEquation::explicit_2d::explicit_step;
use crate::HeatEquation::heat_task::{HeatConfig, HeatTask};
use nalgebra::DMatrix;

pub fn heat_examples(heattask: usize) {
    //
    match heattask {
        0 => {
            // default 1 cm plate, north and east insulated
            let mut task = match HeatTask::new(HeatConfig::default()) {
                Ok(task) => task,
                Err(e) => {
                    println!("Error: {}", e);
                    return;
                }
            };
            task.pretty_print_task();
            match task.solve() {
                Ok(_) => task.pretty_print_solution(),
                Err(e) => println!("Error: {}", e),
            }
        }
        1 => {
            let config = HeatConfig {
                nt: 200,
                nx: 21,
                ny: 21,
                no_neumann: true,
                ..HeatConfig::default()
            };
            match HeatTask::new(config) {
                Ok(mut task) => {
                    task.pretty_print_task();
                    if task.solve().is_ok() {
                        task.pretty_print_solution();
                    }
                }
                Err(e) => println!("Error: {}", e),
            }
        }
        2 => {
            // direct use of the stepper on a 2:1 plate
            let (nx, ny) = (41, 21);
            let mut field = DMatrix::from_element(ny, nx, 20.0);
            let boundary = BoundarySpec::from_edges([Edge::South]);
            boundary.set_dirichlet(&mut field, 100.0);
            println!("boundary: {}", boundary);
            match explicit_step(&field, 300, 0.05, 0.2, &boundary) {
                Ok(history) => {
                    if let Some(last) = history.last() {
                        let mid = nx / 2;
                        println!("temperature along x = {}:", mid);
                        for row in 0..ny {
                            println!("  row {:>2}: {:>8.3}", row, last[(row, mid)]);
                        }
                    }
                    println!("min {:?}, max {:?}", history.min(), history.max());
                }
                Err(e) => println!("Error: {}", e),
            }
        }
        _ => println!("No such heat example"),
    }
}
