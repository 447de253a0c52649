fn main() -> anyhow::Result<()> {
    ailaai_client::run()
}
