#[cfg(test)]
mod tests {
    use crate::LaplacePoisson::jacobi::*;
    use crate::LaplacePoisson::poisson_task::*;
    use crate::LaplacePoisson::potential::*;
    use approx::assert_relative_eq;
    use nalgebra::DMatrix;
    use tempfile::tempdir;

    fn border(field: &DMatrix<f64>) -> Vec<f64> {
        let (nrows, ncols) = field.shape();
        let mut values = Vec::new();
        for j in 0..ncols {
            values.push(field[(0, j)]);
            values.push(field[(nrows - 1, j)]);
        }
        for i in 0..nrows {
            values.push(field[(i, 0)]);
            values.push(field[(i, ncols - 1)]);
        }
        values
    }

    #[test]
    fn relative_l2_diff_values() {
        let ones = DMatrix::from_element(2, 2, 1.0);
        let twos = DMatrix::from_element(2, 2, 2.0);
        assert_relative_eq!(relative_l2_diff(&twos, &ones), 1.0);
        assert_eq!(relative_l2_diff(&ones, &ones), 0.0);

        let zeros = DMatrix::zeros(2, 2);
        assert_eq!(relative_l2_diff(&zeros, &zeros), 0.0);
        assert_eq!(relative_l2_diff(&ones, &zeros), f64::INFINITY);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "iterates differ in shape")]
    fn relative_l2_diff_needs_equal_shapes() {
        let small = DMatrix::from_element(2, 2, 1.0);
        let large = DMatrix::from_element(3, 3, 1.0);
        relative_l2_diff(&large, &small);
    }

    #[test]
    fn uniform_field_is_a_fixed_point() {
        let phi = initial_potential(10, 100.0, BoundaryProfile::Flat);
        let source = DMatrix::zeros(11, 11);
        let solution = relax(&phi, &source, 1e-8, None).unwrap();
        assert_eq!(solution.iterations, 1);
        assert_eq!(solution.residual, 0.0);
        assert_eq!(solution.field, phi);
    }

    #[test]
    fn all_zero_field_counts_as_converged() {
        let zeros = DMatrix::zeros(6, 6);
        let solution = relax(&zeros, &zeros, 1e-8, Some(10)).unwrap();
        assert_eq!(solution.iterations, 1);
        assert_eq!(solution.residual, 0.0);
        assert!(solution.field.iter().all(|v| *v == 0.0));
    }

    #[test]
    fn single_cell_with_central_charge() {
        let phi = DMatrix::zeros(3, 3);
        let source = point_charge(2, 100.0);
        let solution = relax(&phi, &source, 1e-8, Some(100)).unwrap();
        // sweep 1 leaves the all-zero iterate (norm = inf), sweep 2 is a fixed point
        assert_eq!(solution.iterations, 2);
        assert_eq!(solution.field[(1, 1)], 25.0);
        for value in border(&solution.field) {
            assert!(solution.field[(1, 1)] > value);
        }
    }

    #[test]
    fn iteration_cap_reports_non_convergence() {
        let phi = initial_potential(50, 100.0, BoundaryProfile::Flat);
        let source = point_charge(50, 100.0);
        let result = relax(&phi, &source, 0.0, Some(1000));
        match result {
            Err(LaplaceError::NotConverged {
                iterations,
                residual,
            }) => {
                assert_eq!(iterations, 1000);
                assert!(residual > 0.0);
            }
            other => panic!("expected NotConverged, got {:?}", other),
        }
    }

    #[test]
    fn converged_field_is_stable_under_one_more_sweep() {
        let target = 1e-6;
        let phi = initial_potential(10, 100.0, BoundaryProfile::Capacitor);
        let source = DMatrix::zeros(11, 11);
        let solution = relax(&phi, &source, target, None).unwrap();
        assert!(solution.residual <= target);

        let mut state = ConvergenceState::new(solution.field.clone(), &source).unwrap();
        let next = state.iterate();
        assert!((next - solution.residual).abs() < target);
    }

    #[test]
    fn capacitor_is_antisymmetric() {
        let phi = initial_potential(10, 100.0, BoundaryProfile::Capacitor);
        let source = DMatrix::zeros(11, 11);
        let solution = relax(&phi, &source, 1e-8, None).unwrap();
        let field = &solution.field;
        for i in 0..11 {
            assert!(field[(i, 5)].abs() < 1e-12);
            for j in 0..11 {
                assert_relative_eq!(field[(i, j)], -field[(i, 10 - j)], epsilon = 1e-12);
            }
        }
        // potential falls monotonically from the +V plate to the -V plate along the middle row
        for j in 0..10 {
            assert!(field[(5, j)] > field[(5, j + 1)]);
        }
    }

    #[test]
    fn border_is_never_written() {
        let phi = initial_potential(8, 100.0, BoundaryProfile::Sinusoidal);
        let source = point_charge(8, 100.0);
        let solution = relax(&phi, &source, 1e-6, None).unwrap();
        assert_eq!(border(&solution.field), border(&phi));
    }

    #[test]
    fn point_charge_solution_is_symmetric() {
        let phi = DMatrix::zeros(11, 11);
        let source = point_charge(10, 100.0);
        let solution = relax(&phi, &source, 1e-10, None).unwrap();
        let field = &solution.field;
        for i in 0..11 {
            for j in 0..11 {
                assert_relative_eq!(field[(i, j)], field[(j, i)], epsilon = 1e-9);
                assert_relative_eq!(field[(i, j)], field[(10 - i, j)], epsilon = 1e-9);
            }
        }
        let peak = field.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        assert_eq!(peak, field[(5, 5)]);
    }

    #[test]
    fn invalid_inputs_are_rejected() {
        let phi = DMatrix::zeros(5, 5);
        let source = DMatrix::zeros(5, 5);
        assert!(matches!(
            relax(&phi, &DMatrix::zeros(4, 5), 1e-8, None),
            Err(LaplaceError::ShapeMismatch {
                field_shape: (5, 5),
                charge_shape: (4, 5)
            })
        ));
        assert!(matches!(
            relax(&DMatrix::zeros(2, 2), &DMatrix::zeros(2, 2), 1e-8, None),
            Err(LaplaceError::InvalidGrid(_))
        ));
        let mut bad = phi.clone();
        bad[(0, 0)] = f64::NAN;
        assert!(matches!(
            relax(&bad, &source, 1e-8, None),
            Err(LaplaceError::InvalidGrid(_))
        ));
        assert!(matches!(
            relax(&phi, &source, -1.0, None),
            Err(LaplaceError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            relax(&phi, &source, 1e-8, Some(0)),
            Err(LaplaceError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn convergence_state_tracks_iterations() {
        let phi = initial_potential(4, 10.0, BoundaryProfile::Capacitor);
        let source = DMatrix::zeros(5, 5);
        let mut state = ConvergenceState::new(phi.clone(), &source).unwrap();
        assert_eq!(state.iteration(), 0);
        assert_eq!(state.norm(), f64::INFINITY);
        assert!(!state.is_converged(1.0));
        state.iterate();
        assert_eq!(state.iteration(), 1);
        assert_eq!(state.previous(), &phi);
        assert!(state.is_converged(1.0));
    }

    #[test]
    fn task_with_default_charge() {
        let config = PoissonConfig {
            N: 20,
            target: 1e-6,
            ..PoissonConfig::default()
        };
        let mut task = PoissonTask::new(config).unwrap();
        let solution = task.solve().unwrap();
        let field = &solution.field;
        // flat 100 V walls plus a positive charge lift the whole interior above 100 V
        assert!(field.iter().all(|v| *v >= 100.0));
        let peak = field.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        assert_eq!(peak, field[(10, 10)]);

        let dir = tempdir().unwrap();
        let path = dir.path().join("phi.txt");
        task.save_results(&path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn task_with_painted_charges() {
        let config = PoissonConfig {
            N: 12,
            V: 0.0,
            target: 1e-6,
            ..PoissonConfig::default()
        };
        let mut painter = ChargePainter::new(config.N, config.Q);
        painter.paint(6, 3, Stroke::Positive).unwrap();
        painter.paint(6, 9, Stroke::Negative).unwrap();
        let source = painter.finish();

        let mut task = PoissonTask::new(config).unwrap();
        let solution = task.solve_with_source(&source).unwrap();
        assert!(solution.field[(6, 3)] > 0.0);
        assert!(solution.field[(6, 9)] < 0.0);
        assert_relative_eq!(solution.field[(6, 3)], -solution.field[(6, 9)], epsilon = 1e-9);
    }

    #[test]
    fn task_config_validation_and_files() {
        for config in [
            PoissonConfig { N: 1, ..PoissonConfig::default() },
            PoissonConfig { target: 0.0, ..PoissonConfig::default() },
            PoissonConfig { Q: f64::INFINITY, ..PoissonConfig::default() },
            PoissonConfig { max_iterations: Some(0), ..PoissonConfig::default() },
        ] {
            assert!(matches!(
                PoissonTask::new(config),
                Err(LaplaceError::InvalidConfiguration(_))
            ));
        }

        let dir = tempdir().unwrap();
        let path = dir.path().join("poisson.json");
        create_template(&path).unwrap();
        assert_eq!(PoissonConfig::from_file(&path).unwrap(), PoissonConfig::default());

        std::fs::write(&path, r#"{ "N": 8, "profile": "Capacitor", "max_iterations": null }"#)
            .unwrap();
        let task = PoissonTask::from_file(&path).unwrap();
        assert_eq!(task.config.N, 8);
        assert_eq!(task.config.profile, BoundaryProfile::Capacitor);
        assert_eq!(task.config.max_iterations, None);
        assert_eq!(task.config.coords().len(), 9);

        std::fs::write(&path, r#"{ "N": 1 }"#).unwrap();
        assert!(matches!(
            PoissonConfig::from_file(&path),
            Err(LaplaceError::InvalidConfiguration(_))
        ));
    }
}
