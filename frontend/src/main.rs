fn main() {
    library_frontend::run();
}
