mod config;
mod events;
mod films;
mod lookup;
mod movie;
mod pipeline;
mod writer;

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let sink = events::ConsoleSink::new();
    pipeline::run(&args, sink)
}
