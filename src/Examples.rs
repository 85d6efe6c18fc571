pub mod heat_examples;
pub mod poisson_examples;
