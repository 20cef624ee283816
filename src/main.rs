fn main() {
    worldgen::app::cli::run();
}
