mod command;
mod source;
mod tracing_setup;
mod util;

fn main() -> anyhow::Result<()> {
    tracing_setup::init_tracing();
    command::run()
}
