use GridPDE::Utils::logger::init_logger;
use GridPDE::cli::cli_main::run_interactive_menu;
use log::LevelFilter;

pub fn main() {
    init_logger(LevelFilter::Info);
    run_interactive_menu();
}
