use super::prompt;
use crate::Examples::heat_examples::heat_examples;
use crate::Examples::poisson_examples::poisson_examples;

pub fn examples_menu() {
    loop {
        println!("\n=== Examples ===");
        println!("1. Heat: default plate, north and east insulated");
        println!("2. Heat: all edges clamped");
        println!("3. Heat: elongated plate, south insulated");
        println!("4. Poisson: central charge in a flat potential");
        println!("5. Laplace: capacitor");
        println!("6. Laplace: sinusoidal wall");
        println!("7. Poisson: dipole");
        println!("0. Back to main menu");

        let choice = prompt("Enter your choice: ");
        match choice.as_str() {
            "1" => heat_examples(0),
            "2" => heat_examples(1),
            "3" => heat_examples(2),
            "4" => poisson_examples(0),
            "5" => poisson_examples(1),
            "6" => poisson_examples(2),
            "7" => poisson_examples(3),
            "0" => break,
            _ => println!("Invalid choice. Please try again."),
        }
    }
}
