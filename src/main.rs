//! workhours main entrypoint.

use workhours::run;

fn main() {
    if let Err(e) = run() {
        workhours::ui::messages::error(format!("Error: {}", e));
        std::process::exit(1);
    }
}
