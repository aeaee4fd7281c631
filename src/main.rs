fn main() -> anyhow::Result<()> {
    querypanel::app::run()
}
