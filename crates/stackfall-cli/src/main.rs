mod command;
mod input;
mod ui;

fn main() -> anyhow::Result<()> {
    command::run()
}
