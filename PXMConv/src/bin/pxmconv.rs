fn main() -> anyhow::Result<()> {
    pxmconv::cli::run_cli()
}
