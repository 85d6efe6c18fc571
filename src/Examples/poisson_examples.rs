use crate::LaplacePoisson::jacobi::{ConvergenceState, LaplaceError};
use crate::LaplacePoisson::poisson_task::{PoissonConfig, PoissonTask};
use crate::LaplacePoisson::potential::{
    BoundaryProfile, ChargePainter, Stroke, initial_potential,
};

fn run(mut task: PoissonTask, painter: Option<ChargePainter>) {
    task.pretty_print_task();
    let result = match painter {
        Some(painter) => task.solve_with_source(&painter.finish()).map(|_| ()),
        None => task.solve().map(|_| ()),
    };
    match result {
        Ok(()) => task.pretty_print_solution(),
        Err(LaplaceError::NotConverged {
            iterations,
            residual,
        }) => println!(
            "no convergence after {} iterations, residual {:e}",
            iterations, residual
        ),
        Err(e) => println!("Error: {}", e),
    }
}

pub fn poisson_examples(poissontask: usize) {
    //
    match poissontask {
        0 => match PoissonTask::new(PoissonConfig::default()) {
            Ok(task) => run(task, None),
            Err(e) => println!("Error: {}", e),
        },
        1 => {
            let config = PoissonConfig {
                N: 30,
                target: 1e-6,
                Q: 0.0,
                profile: BoundaryProfile::Capacitor,
                ..PoissonConfig::default()
            };
            match PoissonTask::new(config) {
                Ok(task) => run(task, None),
                Err(e) => println!("Error: {}", e),
            }
        }
        2 => {
            // step by step to watch the norm fall
            let n = 20;
            let phi = initial_potential(n, 100.0, BoundaryProfile::Sinusoidal);
            let source = nalgebra::DMatrix::zeros(n + 1, n + 1);
            let mut state = match ConvergenceState::new(phi, &source) {
                Ok(state) => state,
                Err(e) => {
                    println!("Error: {}", e);
                    return;
                }
            };
            while !state.is_converged(1e-6) && state.iteration() < 5000 {
                state.iterate();
                if state.iteration() % 100 == 0 {
                    println!("iteration {:>5}: norm {:e}", state.iteration(), state.norm());
                }
            }
            println!(
                "stopped after {} iterations, norm {:e}",
                state.iteration(),
                state.norm()
            );
        }
        3 => {
            let config = PoissonConfig {
                N: 40,
                V: 0.0,
                target: 1e-6,
                ..PoissonConfig::default()
            };
            let mut painter = ChargePainter::new(config.N, config.Q);
            let strokes = [(20, 12, Stroke::Positive), (20, 28, Stroke::Negative)];
            for (row, col, stroke) in strokes {
                if let Err(e) = painter.paint(row, col, stroke) {
                    println!("Error: {}", e);
                    return;
                }
            }
            println!("total painted charge {}", painter.total_charge());
            match PoissonTask::new(config) {
                Ok(task) => run(task, Some(painter)),
                Err(e) => println!("Error: {}", e),
            }
        }
        _ => println!("No such Poisson example"),
    }
}
