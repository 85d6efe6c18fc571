use super::cli_examples::examples_menu;
use super::cli_heat::heat_menu;
use super::cli_md::md_menu;
use super::cli_poisson::poisson_menu;
use super::prompt;

pub fn run_interactive_menu() {
    loop {
        show_main_menu();
        let choice = prompt("Enter your choice: ");

        match choice.as_str() {
            "1" => heat_menu(),
            "2" => poisson_menu(),
            "3" => md_menu(),
            "4" => examples_menu(),
            "0" => {
                println!("Goodbye!");
                break;
            }
            _ => println!("Invalid choice. Please try again."),
        }
    }
}
/* colors
Blue (\x1b[34m) - Welcome header text

Yellow (\x1b[33m) - Menu options

Cyan (\x1b[36m) - prompts

Reset (\x1b[0m) - Returns to normal color after each colored section
*/
fn show_main_menu() {
    println!(
        "\x1b[34m\n Welcome to GridPDE: explicit finite-difference solvers for\n
    the heat equation and the Laplace-Poisson equation \n \x1b[0m"
    );
    println!("\x1b[33m1. Heat equation (FTCS)\x1b[0m");
    println!("\x1b[33m2. Laplace-Poisson equation (Jacobi)\x1b[0m");
    println!("\x1b[33m3. Molecular dynamics data browser\x1b[0m");
    println!("\x1b[33m4. Examples\x1b[0m");
    println!("\x1b[33m0. Exit\x1b[0m");
}
