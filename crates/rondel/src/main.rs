use rondel::app::App;
use rondel::config;
use rondel::sys::runtime;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = config::load_or_setup();
    let app = App::new(&config);

    let (tx, rx) = async_channel::bounded(32);

    // Start Background Services
    runtime::start_background_services(tx)?;

    // the wheel is single-threaded, so it stays on this thread
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    rt.block_on(app.run(rx));

    Ok(())
}
