fn main() -> anyhow::Result<()> {
    scan_move::cli::run()
}
